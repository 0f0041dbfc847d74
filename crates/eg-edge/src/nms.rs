use eg_core::Image;

use crate::gradient::GradientField;

/// Magnitudes at or below this are never ridge pixels.
pub const NMS_NOISE_FLOOR: f32 = 1e-3;

/// Gradient direction quantized to one of four 45-degree-wide sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sector {
    /// Gradient near 0 / 180 degrees: compare left and right neighbors.
    Horizontal,
    /// Gradient near 45 degrees (down-right in image coordinates).
    Diagonal45,
    /// Gradient near 90 degrees: compare up and down neighbors.
    Vertical,
    /// Gradient near 135 degrees (down-left in image coordinates).
    Diagonal135,
}

impl Sector {
    /// Folds `direction` (radians) into `[0, 180)` degrees and picks the
    /// sector whose center is within 22.5 degrees.
    pub fn from_direction(direction: f32) -> Self {
        let mut deg = direction.to_degrees().rem_euclid(180.0);
        if deg >= 180.0 {
            deg = 0.0;
        }

        if !(22.5..157.5).contains(&deg) {
            Self::Horizontal
        } else if deg < 67.5 {
            Self::Diagonal45
        } else if deg < 112.5 {
            Self::Vertical
        } else {
            Self::Diagonal135
        }
    }

    /// `(dx, dy)` of one neighbor along the sector; the other is the negation.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Self::Horizontal => (1, 0),
            Self::Diagonal45 => (1, 1),
            Self::Vertical => (0, 1),
            Self::Diagonal135 => (-1, 1),
        }
    }
}

/// Keeps interior magnitudes that are >= both neighbors along their gradient
/// sector; everything else is zero.
pub fn non_max_suppression(field: &GradientField) -> Image<f32> {
    let (w, h) = (field.width(), field.height());
    let mut out = vec![0.0f32; w * h];

    if w >= 3 && h >= 3 {
        let samples = field.samples();
        for y in 1..(h - 1) {
            for x in 1..(w - 1) {
                let idx = y * w + x;
                let s = &samples[idx];
                if s.magnitude <= NMS_NOISE_FLOOR {
                    continue;
                }

                let (dx, dy) = Sector::from_direction(s.direction).offset();
                let fwd = idx.wrapping_add_signed(dy * w as isize + dx);
                let bwd = idx.wrapping_add_signed(-(dy * w as isize + dx));

                if s.magnitude >= samples[fwd].magnitude && s.magnitude >= samples[bwd].magnitude {
                    out[idx] = s.magnitude;
                }
            }
        }
    }

    Image::from_vec(w, h, out).expect("output sized to field dimensions")
}
