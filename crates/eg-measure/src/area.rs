use eg_zernike::RefinedEdgePoint;
use serde::{Deserialize, Serialize};

use crate::axis::MeasurementAxis;
use crate::scan::{MeasurementResult, ScanConfig, measure_with};

/// Width and height measured independently on the same edge set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaMeasurement {
    pub width: MeasurementResult,
    pub height: MeasurementResult,
    pub area_pixels: f32,
    pub area_mm2: f32,
}

impl AreaMeasurement {
    pub fn translated(self, dx: usize, dy: usize) -> Self {
        Self {
            width: self.width.translated(dx, dy),
            height: self.height.translated(dx, dy),
            ..self
        }
    }
}

/// `None` unless both axes produce a measurement.
pub fn measure_area(
    edges: &[RefinedEdgePoint],
    width: usize,
    height: usize,
    calibration_factor: f32,
    config: &ScanConfig,
) -> Option<AreaMeasurement> {
    let along = |axis| measure_with(edges, width, height, axis, calibration_factor, config);
    let w = along(MeasurementAxis::Width)?;
    let h = along(MeasurementAxis::Height)?;
    Some(AreaMeasurement {
        area_pixels: w.pixel_measurement * h.pixel_measurement,
        area_mm2: w.millimeter_measurement * h.millimeter_measurement,
        width: w,
        height: h,
    })
}

#[cfg(test)]
mod tests {
    use eg_core::Point2f;
    use eg_zernike::RefinedEdgePoint;

    use super::measure_area;
    use crate::scan::ScanConfig;

    fn edge(x: f32, y: f32) -> RefinedEdgePoint {
        RefinedEdgePoint {
            original_x: x as usize,
            original_y: y as usize,
            subpixel: Point2f::new(x, y),
            orientation: 0.0,
            distance: 0.0,
            contrast: 100.0,
            background: 30.0,
            is_major: true,
        }
    }

    #[test]
    fn combines_both_axes() {
        let edges = [edge(50.0, 100.0), edge(350.0, 100.0), edge(200.0, 40.0), edge(200.0, 160.0)];
        let area = measure_area(&edges, 400, 200, 0.1, &ScanConfig::default()).expect("both axes");
        assert!((area.area_pixels - 300.0 * 120.0).abs() < 1e-2);
        assert!((area.area_mm2 - 30.0 * 12.0).abs() < 1e-3);

        let moved = area.translated(3, 4);
        assert_eq!(moved.width.edge_a, Point2f::new(53.0, 104.0));
        assert_eq!(moved.height.scan_line, area.height.scan_line + 3);
        assert_eq!(moved.area_pixels, area.area_pixels);
    }

    #[test]
    fn missing_axis_yields_none() {
        let edges = [edge(50.0, 100.0), edge(350.0, 100.0)];
        assert!(measure_area(&edges, 400, 200, 0.1, &ScanConfig::default()).is_none());
    }
}
