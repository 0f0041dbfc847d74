//! Moments of a 7x7 patch and the ideal-step edge model derived from them.
//!
//! For a straight step edge of background `h`, contrast `k`, normal angle
//! `phi` and signed distance `l` (unit-disk units) from the patch center:
//!
//! ```text
//! Z11' = 2k (1 - l^2)^(3/2) / 3
//! Z20' = 2k l (1 - l^2)^(3/2) / 3
//! Z40' = Z20' (8 l^2 - 3) / 5
//! ```
//!
//! where primes denote moments rotated by `-phi`.

use core::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::masks::{self, Mask};

/// 7x7 neighborhood, indexed `[row][col]`, centered on the candidate pixel.
pub type Patch = [[f32; 7]; 7];

/// Rotated `Z11` at or below this carries no usable edge.
const MIN_Z11: f64 = 1e-6;

/// Below this `|l|` the fourth-order estimate is dominated by mask rounding.
const AVERAGING_MIN_DISTANCE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZernikeMoments {
    pub z00: f64,
    pub z11_re: f64,
    pub z11_im: f64,
    pub z20: f64,
    pub z40: f64,
}

impl ZernikeMoments {
    pub fn from_patch(patch: &Patch) -> Self {
        let apply = |mask: &Mask| -> f64 {
            let mut acc = 0.0;
            for (prow, mrow) in patch.iter().zip(mask) {
                for (&p, &m) in prow.iter().zip(mrow) {
                    acc += p as f64 * m;
                }
            }
            acc
        };

        Self {
            z00: apply(&masks::Z00),
            z11_re: apply(&masks::Z11_RE),
            z11_im: apply(&masks::Z11_IM),
            z20: apply(&masks::Z20),
            z40: apply(&masks::Z40),
        }
    }
}

/// How the edge distance `l` is recovered from the moments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RadiusEstimator {
    /// `l = Z20 / Z11'`.
    #[default]
    Ratio,
    /// Mean of the ratio estimate and the fourth-order estimate
    /// `sign(Z20) * sqrt((5 Z40 + 3 Z20) / (8 Z20))`. Falls back to the ratio
    /// when the latter is undefined or the edge is too close to the center.
    Averaged,
}

/// Step-edge parameters fitted to a patch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeModel {
    /// Edge normal in radians, pointing from dark to bright.
    pub phi: f64,
    /// Signed distance from the patch center along `phi`, unit-disk units.
    pub l: f64,
    /// Step height.
    pub k: f64,
    /// Background intensity on the dark side.
    pub h: f64,
}

impl EdgeModel {
    /// Pixel offset of the edge from the patch center.
    pub fn offset_px(&self) -> (f64, f64) {
        let d = masks::DISK_RADIUS_PX * self.l;
        (d * self.phi.cos(), d * self.phi.sin())
    }
}

/// Fits the step model. `None` when the patch has no oriented structure or
/// the distance estimate falls outside the unit disk.
pub fn edge_model(m: &ZernikeMoments, estimator: RadiusEstimator) -> Option<EdgeModel> {
    let phi = m.z11_im.atan2(m.z11_re);
    let z11 = m.z11_re * phi.cos() + m.z11_im * phi.sin();
    if !(z11 > MIN_Z11) {
        return None;
    }

    let ratio = m.z20 / z11;
    let l = match estimator {
        RadiusEstimator::Ratio => ratio,
        RadiusEstimator::Averaged => averaged_distance(m, ratio),
    };
    if !l.is_finite() || l.abs() >= 1.0 {
        return None;
    }

    let s = 1.0 - l * l;
    let k = 3.0 * z11 / (2.0 * s.powf(1.5));
    let h = (m.z00 - k * PI / 2.0 + k * l.asin() + k * l * s.sqrt()) / PI;

    Some(EdgeModel { phi, l, k, h })
}

fn averaged_distance(m: &ZernikeMoments, ratio: f64) -> f64 {
    if ratio.abs() < AVERAGING_MIN_DISTANCE {
        return ratio;
    }
    let radicand = (5.0 * m.z40 + 3.0 * m.z20) / (8.0 * m.z20);
    if !(0.0..1.0).contains(&radicand) {
        return ratio;
    }
    let fourth = radicand.sqrt().copysign(m.z20);
    0.5 * (ratio + fourth)
}
