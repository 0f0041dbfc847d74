use eg_core::{Image, ImageView};

/// Linear contrast stretch around the image mean:
/// `out = mean + (v - mean) * factor`, rounded and clamped to `0..=255`.
///
/// A factor of `1.0` returns the input unchanged.
pub fn enhance_contrast(img: &ImageView<'_, u8>, factor: f32) -> Image<u8> {
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 {
        return Image::new_fill(w, h, 0);
    }

    let mut sum = 0u64;
    for y in 0..h {
        sum += img.row(y).iter().map(|&v| v as u64).sum::<u64>();
    }
    let mean = sum as f32 / (w * h) as f32;

    Image::from_fn(w, h, |x, y| {
        let v = img.at(x, y) as f32;
        (mean + (v - mean) * factor).round().clamp(0.0, 255.0) as u8
    })
}

#[cfg(test)]
mod tests {
    use eg_core::Image;

    use super::enhance_contrast;

    #[test]
    fn unit_factor_is_identity() {
        let img = Image::from_fn(8, 4, |x, y| (x * 20 + y * 3) as u8);
        let out = enhance_contrast(&img.as_view(), 1.0);
        assert_eq!(out, img);
    }

    #[test]
    fn stretch_spreads_values_and_clamps() {
        // mean is 100
        let img = Image::from_vec(2, 1, vec![60u8, 140]).expect("valid image");
        let out = enhance_contrast(&img.as_view(), 1.5);
        assert_eq!(out.data(), &[40, 160]);

        let saturated = enhance_contrast(&img.as_view(), 4.0);
        assert_eq!(saturated.data(), &[0, 255]);
    }
}
