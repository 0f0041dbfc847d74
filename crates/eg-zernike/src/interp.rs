//! 7x7 neighborhood extraction.

use eg_core::{ImageView, Vec2f, sample_bilinear_f32};

use crate::moments::Patch;

/// Half-width of the refinement window.
pub const PATCH_RADIUS: usize = 3;

/// `true` when a full 7x7 window centered on `(x, y)` fits inside the view.
pub fn has_full_patch<T>(img: &ImageView<'_, T>, x: usize, y: usize) -> bool {
    x >= PATCH_RADIUS
        && y >= PATCH_RADIUS
        && x + PATCH_RADIUS < img.width()
        && y + PATCH_RADIUS < img.height()
}

/// Raw 7x7 window centered on `(x, y)`, or `None` near the border.
pub fn extract_patch<T: Copy + Into<f32>>(
    img: &ImageView<'_, T>,
    x: usize,
    y: usize,
) -> Option<Patch> {
    if !has_full_patch(img, x, y) {
        return None;
    }
    let mut patch = [[0.0f32; 7]; 7];
    for (r, prow) in patch.iter_mut().enumerate() {
        let src = &img.row(y + r - PATCH_RADIUS)[x - PATCH_RADIUS..=x + PATCH_RADIUS];
        for (dst, &v) in prow.iter_mut().zip(src) {
            *dst = v.into();
        }
    }
    Some(patch)
}

/// 7x7 window where each cell is the mean of `factor` bilinear samples
/// spread across the cell along `direction` (radians).
///
/// Sample `t` sits at `(t + 0.5) / factor - 0.5` pixels from the cell center,
/// so `factor <= 1` reproduces [`extract_patch`].
pub fn directional_patch<T: Copy + Into<f32>>(
    img: &ImageView<'_, T>,
    x: usize,
    y: usize,
    direction: f32,
    factor: usize,
) -> Option<Patch> {
    if factor <= 1 {
        return extract_patch(img, x, y);
    }
    if !has_full_patch(img, x, y) {
        return None;
    }

    let normal = Vec2f::from_angle(direction);
    let inv = 1.0 / factor as f32;
    let offsets: Vec<Vec2f> = (0..factor)
        .map(|t| normal * ((t as f32 + 0.5) * inv - 0.5))
        .collect();

    let mut patch = [[0.0f32; 7]; 7];
    for (r, prow) in patch.iter_mut().enumerate() {
        let cy = (y + r - PATCH_RADIUS) as f32;
        for (c, cell) in prow.iter_mut().enumerate() {
            let cx = (x + c - PATCH_RADIUS) as f32;
            let acc: f32 = offsets
                .iter()
                .map(|o| sample_bilinear_f32(img, cx + o.x, cy + o.y))
                .sum();
            *cell = acc * inv;
        }
    }
    Some(patch)
}

#[cfg(test)]
mod tests {
    use eg_core::Image;

    use super::{directional_patch, extract_patch, has_full_patch};

    #[test]
    fn border_pixels_have_no_full_patch() {
        let img = Image::new_fill(10, 8, 0u8);
        let v = img.as_view();
        assert!(!has_full_patch(&v, 2, 4));
        assert!(!has_full_patch(&v, 7, 4));
        assert!(!has_full_patch(&v, 4, 5));
        assert!(has_full_patch(&v, 3, 3));
        assert!(has_full_patch(&v, 6, 4));
        assert!(extract_patch(&v, 0, 0).is_none());
        assert!(directional_patch(&v, 9, 7, 0.0, 3).is_none());
    }

    #[test]
    fn extract_copies_window_in_row_major_order() {
        let img = Image::from_fn(12, 10, |x, y| (x + 10 * y) as u8);
        let p = extract_patch(&img.as_view(), 5, 4).expect("interior");
        assert_eq!(p[0][0], (2 + 10) as f32);
        assert_eq!(p[3][3], (5 + 40) as f32);
        assert_eq!(p[6][6], (8 + 70) as f32);
    }

    #[test]
    fn directional_resampling_keeps_linear_ramps() {
        // Bilinear interpolation is exact on a ramp and the symmetric offsets
        // cancel, so every cell keeps its center value.
        let img = Image::from_fn(16, 16, |x, y| (3 * x + 2 * y) as u8);
        let view = img.as_view();
        let raw = extract_patch(&view, 8, 8).expect("interior");
        let resampled = directional_patch(&view, 8, 8, 0.6, 3).expect("interior");
        for r in 0..7 {
            for c in 0..7 {
                assert!((raw[r][c] - resampled[r][c]).abs() < 1e-3);
            }
        }
        assert_eq!(directional_patch(&view, 8, 8, 0.6, 1), Some(raw));
    }

    #[test]
    fn directional_resampling_softens_a_step_across_the_gradient() {
        let img = Image::from_fn(16, 9, |x, _| if x >= 8 { 200u8 } else { 0 });
        let view = img.as_view();
        let p = directional_patch(&view, 8, 4, 0.0, 3).expect("interior");
        // Cell at x = 7 picks up one third of its samples from the bright side.
        assert!((p[3][2] - 200.0 / 9.0).abs() < 1e-3, "{}", p[3][2]);
        assert!(p[3][0] == 0.0 && p[3][6] == 200.0);
    }
}
