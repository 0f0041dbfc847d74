//! Per-candidate sub-pixel refinement.

use eg_core::{Error, ImageView, Point2f};
use eg_edge::EdgeCandidate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::interp::directional_patch;
use crate::moments::{RadiusEstimator, ZernikeMoments, edge_model};

/// Default number of sub-samples per cell when directional interpolation is on.
pub const DEFAULT_INTERPOLATION_FACTOR: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineConfig {
    /// Largest accepted `|l|` (unit-disk units).
    pub l_threshold: f32,
    /// Smallest accepted step height.
    pub k_threshold: f32,
    pub estimator: RadiusEstimator,
    /// Sub-samples per cell for gradient-directional resampling; `None`
    /// uses the raw neighborhood.
    pub interpolation: Option<usize>,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            l_threshold: 0.4,
            k_threshold: 10.0,
            estimator: RadiusEstimator::Ratio,
            interpolation: None,
        }
    }
}

impl RefineConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if !self.l_threshold.is_finite() || !(0.0..1.0).contains(&self.l_threshold) {
            return Err(Error::InvalidParameter {
                name: "l_threshold",
                value: self.l_threshold,
            });
        }
        if !self.k_threshold.is_finite() || self.k_threshold < 0.0 {
            return Err(Error::InvalidParameter {
                name: "k_threshold",
                value: self.k_threshold,
            });
        }
        if self.interpolation == Some(0) {
            return Err(Error::InvalidParameter {
                name: "interpolation",
                value: 0.0,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefinedEdgePoint {
    pub original_x: usize,
    pub original_y: usize,
    pub subpixel: Point2f,
    /// Edge normal in radians, dark to bright.
    pub orientation: f32,
    /// Signed unit-disk distance from the original pixel.
    pub distance: f32,
    pub contrast: f32,
    pub background: f32,
    pub is_major: bool,
}

impl RefinedEdgePoint {
    /// Shifts all coordinates by `(dx, dy)` pixels.
    pub fn translated(mut self, dx: usize, dy: usize) -> Self {
        self.original_x += dx;
        self.original_y += dy;
        self.subpixel.x += dx as f32;
        self.subpixel.y += dy as f32;
        self
    }
}

/// Refines every candidate whose 7x7 window fits in `img`.
///
/// `img` should be the unfiltered intensities; candidate directions are only
/// used to steer directional resampling. Output preserves candidate order.
pub fn refine_edges(
    candidates: &[EdgeCandidate],
    img: &ImageView<'_, u8>,
    config: &RefineConfig,
) -> Vec<RefinedEdgePoint> {
    let refine = |c: &EdgeCandidate| refine_candidate(c, img, config);

    #[cfg(feature = "parallel")]
    let out: Vec<_> = candidates.par_iter().filter_map(refine).collect();
    #[cfg(not(feature = "parallel"))]
    let out: Vec<_> = candidates.iter().filter_map(refine).collect();

    out
}

fn refine_candidate(
    c: &EdgeCandidate,
    img: &ImageView<'_, u8>,
    config: &RefineConfig,
) -> Option<RefinedEdgePoint> {
    let factor = config.interpolation.unwrap_or(1);
    let patch = directional_patch(img, c.x, c.y, c.direction, factor)?;
    let model = edge_model(&ZernikeMoments::from_patch(&patch), config.estimator)?;

    if model.l.abs() > config.l_threshold as f64 || model.k < config.k_threshold as f64 {
        return None;
    }

    let (dx, dy) = model.offset_px();
    Some(RefinedEdgePoint {
        original_x: c.x,
        original_y: c.y,
        subpixel: Point2f::new(c.x as f32 + dx as f32, c.y as f32 + dy as f32),
        orientation: model.phi as f32,
        distance: model.l as f32,
        contrast: model.k as f32,
        background: model.h as f32,
        is_major: c.is_major,
    })
}
