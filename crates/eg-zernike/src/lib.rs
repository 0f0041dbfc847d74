//! Zernike-moment sub-pixel edge refinement.
//!
//! Each pixel-level [`eg_edge::EdgeCandidate`] is refined by fitting an ideal
//! step to the five low-order Zernike moments of its 7x7 neighborhood. The fit
//! yields the edge normal, its signed distance from the pixel center, the step
//! height and the background level.
//!
//! Distances are normalized to the unit disk inscribed in the window; pixel
//! offsets are `3.5 * l * (cos phi, sin phi)`.

pub mod interp;
pub mod masks;
pub mod moments;
pub mod refine;

pub use interp::{directional_patch, extract_patch};
pub use moments::{EdgeModel, Patch, RadiusEstimator, ZernikeMoments, edge_model};
pub use refine::{DEFAULT_INTERPOLATION_FACTOR, RefineConfig, RefinedEdgePoint, refine_edges};
