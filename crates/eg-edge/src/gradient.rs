//! Four-direction gradient field.
//!
//! Kernels (correlation, y grows downward):
//!
//! ```text
//!   gx          gy          g45         g135
//!  -1  0  1    -1 -2 -1     0  1  2    -2 -1  0
//!  -2  0  2     0  0  0    -1  0  1    -1  0  1
//!  -1  0  1     1  2  1    -2 -1  0     0  1  2
//! ```
//!
//! `g45` responds to brightness increasing toward the upper right, `g135`
//! toward the lower right. Each diagonal response is split half-and-half into
//! the axis components:
//!
//! `fx = gx + (g45 + g135) / 2`, `fy = gy + (g135 - g45) / 2`.
//!
//! Border rows and columns are left at zero.

use eg_core::{ImageView, Vec2f};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GradientSample {
    pub magnitude: f32,
    /// `atan2(fy, fx)` in `(-pi, pi]`.
    pub direction: f32,
    pub gx: f32,
    pub gy: f32,
    pub g45: f32,
    pub g135: f32,
}

impl GradientSample {
    fn from_responses(gx: f32, gy: f32, g45: f32, g135: f32) -> Self {
        let f = combine(gx, gy, g45, g135);
        Self {
            magnitude: f.norm(),
            direction: f.angle(),
            gx,
            gy,
            g45,
            g135,
        }
    }

    /// The combined vector the magnitude and direction were derived from.
    pub fn combined(&self) -> Vec2f {
        combine(self.gx, self.gy, self.g45, self.g135)
    }
}

fn combine(gx: f32, gy: f32, g45: f32, g135: f32) -> Vec2f {
    Vec2f::new(gx + 0.5 * (g45 + g135), gy + 0.5 * (g135 - g45))
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientField {
    width: usize,
    height: usize,
    samples: Vec<GradientSample>,
}

impl GradientField {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn samples(&self) -> &[GradientSample] {
        &self.samples
    }

    pub fn at(&self, x: usize, y: usize) -> &GradientSample {
        assert!(x < self.width && y < self.height, "gradient index out of bounds");
        &self.samples[y * self.width + x]
    }
}

pub fn compute_gradients<T: Copy + Into<f32>>(img: &ImageView<'_, T>) -> GradientField {
    let (w, h) = (img.width(), img.height());
    let mut samples = vec![GradientSample::default(); w * h];

    if w >= 3 && h >= 3 {
        for y in 1..(h - 1) {
            let r0 = img.row(y - 1);
            let r1 = img.row(y);
            let r2 = img.row(y + 1);
            for x in 1..(w - 1) {
                let p00: f32 = r0[x - 1].into();
                let p01: f32 = r0[x].into();
                let p02: f32 = r0[x + 1].into();
                let p10: f32 = r1[x - 1].into();
                let p12: f32 = r1[x + 1].into();
                let p20: f32 = r2[x - 1].into();
                let p21: f32 = r2[x].into();
                let p22: f32 = r2[x + 1].into();

                let gx = (p02 + 2.0 * p12 + p22) - (p00 + 2.0 * p10 + p20);
                let gy = (p20 + 2.0 * p21 + p22) - (p00 + 2.0 * p01 + p02);
                let g45 = (p01 + 2.0 * p02 + p12) - (p10 + 2.0 * p20 + p21);
                let g135 = (p12 + 2.0 * p22 + p21) - (p01 + 2.0 * p00 + p10);

                samples[y * w + x] = GradientSample::from_responses(gx, gy, g45, g135);
            }
        }
    }

    GradientField {
        width: w,
        height: h,
        samples,
    }
}
