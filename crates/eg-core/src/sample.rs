use crate::image::ImageView;

/// Bilinear sample at pixel-center coordinates with clamp-to-edge borders.
///
/// Returns `0.0` for an empty view.
pub fn sample_bilinear_f32<T: Copy + Into<f32>>(img: &ImageView<'_, T>, x: f32, y: f32) -> f32 {
    let (w, h) = (img.width(), img.height());
    if w == 0 || h == 0 {
        return 0.0;
    }

    let x = x.clamp(0.0, (w - 1) as f32);
    let y = y.clamp(0.0, (h - 1) as f32);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(w - 1);
    let y1 = (y0 + 1).min(h - 1);

    let dx = x - x0 as f32;
    let dy = y - y0 as f32;

    let p00: f32 = img.at(x0, y0).into();
    let p10: f32 = img.at(x1, y0).into();
    let p01: f32 = img.at(x0, y1).into();
    let p11: f32 = img.at(x1, y1).into();

    let top = p00 * (1.0 - dx) + p10 * dx;
    let bottom = p01 * (1.0 - dx) + p11 * dx;
    top * (1.0 - dy) + bottom * dy
}
