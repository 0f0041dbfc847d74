//! Linear measurement from refined edge points.
//!
//! [`measure`] pairs edges along scan lines and reports the best pair's
//! separation in pixels and, through a caller-supplied calibration factor, in
//! millimeters. [`measure_area`] combines a width and a height measurement.

mod area;
mod axis;
mod scan;

pub use area::{AreaMeasurement, measure_area};
pub use axis::MeasurementAxis;
pub use scan::{MeasurementResult, ScanConfig, measure, measure_with};
