//! Pixel-level edge stages: smoothing, gradients, thinning and tracing.
//!
//! Each stage is a free function over borrowed input that returns a freshly
//! allocated output:
//!
//! 1. [`bilateral_filter`] (optionally preceded by [`enhance_contrast`])
//! 2. [`compute_gradients`]: Sobel plus both diagonal kernels merged into one
//!    field
//! 3. [`non_max_suppression`]
//! 4. [`trace_hysteresis`], producing [`EdgeCandidate`]s tagged strong/weak
//!
//! Coordinates follow the pixel-center convention with `y` growing downward;
//! gradient directions point from dark to bright.

pub mod bilateral;
pub mod contrast;
pub mod gradient;
pub mod hysteresis;
pub mod nms;

pub use bilateral::bilateral_filter;
pub use contrast::enhance_contrast;
pub use gradient::{GradientField, GradientSample, compute_gradients};
pub use hysteresis::{EdgeCandidate, Thresholds, trace_hysteresis};
pub use nms::{NMS_NOISE_FLOOR, Sector, non_max_suppression};
