//! Umbrella crate for the `edgegauge` workspace.
//!
//! Re-exports the stage crates and adds [`pipeline`], which chains them into
//! a validated detect-refine-measure run:
//!
//! ```no_run
//! use edgegauge::{Image, MeasurementAxis, PipelineConfig, run};
//!
//! let frame = Image::new_fill(640, 480, 0u8);
//! let config = PipelineConfig {
//!     axis: MeasurementAxis::Width,
//!     calibration_factor: 0.05,
//!     ..PipelineConfig::default()
//! };
//! let out = run(&frame.as_view(), &config)?;
//! if let Some(m) = out.measurement {
//!     println!("{:.3} mm", m.millimeter_measurement);
//! }
//! # Ok::<(), edgegauge::Error>(())
//! ```

pub mod pipeline;

pub use eg_core::*;
pub use eg_edge::*;
pub use eg_measure::*;
pub use eg_zernike::*;
pub use pipeline::{PipelineConfig, PipelineOutput, run};
