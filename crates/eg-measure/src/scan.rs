//! Scan-line edge pairing.
//!
//! A handful of lines across the image are tried. Refined edges near each
//! line are ordered along the measurement axis and every ordered pair is
//! scored by combined contrast, discounted when the pair is short. The best
//! pair over all lines is the measurement.

use eg_core::{Error, Point2f, Vec2f};
use eg_zernike::RefinedEdgePoint;
use serde::{Deserialize, Serialize};

use crate::axis::MeasurementAxis;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Scan-line positions in percent of the cross-axis extent.
    pub scan_percentages: Vec<usize>,
    /// Edges within this many pixels of a scan line take part in pairing.
    pub band_half_width: f32,
    /// Shortest accepted pair, as a fraction of the axis extent.
    pub min_distance_ratio: f32,
    /// Longest accepted pair, as a fraction of the axis extent.
    pub max_distance_ratio: f32,
    /// Pairs shorter than this fraction of the axis extent have their score
    /// scaled down linearly.
    pub full_score_ratio: f32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            scan_percentages: vec![30, 40, 50, 60, 70],
            band_half_width: 5.0,
            min_distance_ratio: 0.05,
            max_distance_ratio: 0.9,
            full_score_ratio: 0.2,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(&p) = self.scan_percentages.iter().find(|&&p| p > 100) {
            return Err(Error::InvalidParameter {
                name: "scan_percentages",
                value: p as f32,
            });
        }
        for (name, v) in [
            ("band_half_width", self.band_half_width),
            ("min_distance_ratio", self.min_distance_ratio),
            ("max_distance_ratio", self.max_distance_ratio),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::InvalidParameter { name, value: v });
            }
        }
        if self.min_distance_ratio > self.max_distance_ratio {
            return Err(Error::InvalidParameter {
                name: "min_distance_ratio",
                value: self.min_distance_ratio,
            });
        }
        if !self.full_score_ratio.is_finite() || self.full_score_ratio <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "full_score_ratio",
                value: self.full_score_ratio,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    /// Pair endpoint with the smaller coordinate along `axis`.
    pub edge_a: Point2f,
    pub edge_b: Point2f,
    pub pixel_measurement: f32,
    /// Cross-axis pixel index of the winning scan line.
    pub scan_line: usize,
    pub strength_score: f32,
    pub millimeter_measurement: f32,
    /// `Width` or `Height`; never `Longest`.
    pub axis: MeasurementAxis,
}

impl MeasurementResult {
    /// Shifts the result by `(dx, dy)` pixels.
    pub fn translated(mut self, dx: usize, dy: usize) -> Self {
        let shift = Vec2f::new(dx as f32, dy as f32);
        self.edge_a = self.edge_a + shift;
        self.edge_b = self.edge_b + shift;
        self.scan_line += match self.axis {
            MeasurementAxis::Height => dx,
            MeasurementAxis::Width | MeasurementAxis::Longest => dy,
        };
        self
    }
}

/// Measures with the default [`ScanConfig`].
pub fn measure(
    edges: &[RefinedEdgePoint],
    width: usize,
    height: usize,
    axis: MeasurementAxis,
    calibration_factor: f32,
) -> Option<MeasurementResult> {
    measure_with(edges, width, height, axis, calibration_factor, &ScanConfig::default())
}

/// Best edge pair along `axis`, or `None` when no pair passes the distance
/// bounds.
///
/// Major edges are used when there are at least two of them; otherwise every
/// edge is a candidate endpoint.
pub fn measure_with(
    edges: &[RefinedEdgePoint],
    width: usize,
    height: usize,
    axis: MeasurementAxis,
    calibration_factor: f32,
    config: &ScanConfig,
) -> Option<MeasurementResult> {
    let majors: Vec<&RefinedEdgePoint> = edges.iter().filter(|e| e.is_major).collect();
    let pool = if majors.len() >= 2 {
        majors
    } else {
        edges.iter().collect()
    };

    let along = |a| best_pair(&pool, width, height, a, calibration_factor, config);
    match axis {
        MeasurementAxis::Width | MeasurementAxis::Height => along(axis),
        MeasurementAxis::Longest => {
            match (along(MeasurementAxis::Width), along(MeasurementAxis::Height)) {
                (Some(w), Some(h)) if h.pixel_measurement > w.pixel_measurement => Some(h),
                (Some(w), _) => Some(w),
                (None, h) => h,
            }
        }
    }
}

fn best_pair(
    pool: &[&RefinedEdgePoint],
    width: usize,
    height: usize,
    axis: MeasurementAxis,
    calibration_factor: f32,
    config: &ScanConfig,
) -> Option<MeasurementResult> {
    let (dim, cross) = axis.extents(width, height);
    if dim == 0 || cross == 0 || pool.len() < 2 {
        return None;
    }

    let dim_f = dim as f32;
    let min_dist = config.min_distance_ratio * dim_f;
    let max_dist = config.max_distance_ratio * dim_f;
    let full_score = config.full_score_ratio * dim_f;

    let mut best: Option<MeasurementResult> = None;
    let mut band: Vec<(f32, Point2f, f32)> = Vec::new();

    for &percent in &config.scan_percentages {
        let scan = cross * percent / 100;

        band.clear();
        band.extend(pool.iter().filter_map(|e| {
            let (a, c) = axis.split(e.subpixel);
            let near = (c - scan as f32).abs() <= config.band_half_width;
            near.then_some((a, e.subpixel, e.contrast))
        }));
        band.sort_by(|l, r| l.0.total_cmp(&r.0));

        for (i, &(ai, pi, ki)) in band.iter().enumerate() {
            for &(aj, pj, kj) in &band[i + 1..] {
                let distance = aj - ai;
                if distance < min_dist || distance > max_dist {
                    continue;
                }

                let score = (ki + kj) * (distance / full_score).min(1.0);
                if best.is_some_and(|b| score <= b.strength_score) {
                    continue;
                }
                best = Some(MeasurementResult {
                    edge_a: pi,
                    edge_b: pj,
                    pixel_measurement: distance,
                    scan_line: scan,
                    strength_score: score,
                    millimeter_measurement: distance * calibration_factor,
                    axis,
                });
            }
        }
    }

    if let Some(b) = &best {
        log::trace!(
            "{axis:?}: {:.2} px on scan line {} (score {:.1})",
            b.pixel_measurement,
            b.scan_line,
            b.strength_score
        );
    }
    best
}

#[cfg(test)]
mod tests {
    use eg_core::Point2f;
    use eg_zernike::RefinedEdgePoint;

    use super::{MeasurementAxis, ScanConfig, measure, measure_with};

    fn edge(x: f32, y: f32, contrast: f32, is_major: bool) -> RefinedEdgePoint {
        RefinedEdgePoint {
            original_x: x.round() as usize,
            original_y: y.round() as usize,
            subpixel: Point2f::new(x, y),
            orientation: 0.0,
            distance: 0.0,
            contrast,
            background: 30.0,
            is_major,
        }
    }

    #[test]
    fn picks_strongest_valid_pair_and_calibrates() {
        let edges = vec![
            edge(50.2, 100.0, 150.0, true),
            edge(350.1, 100.0, 160.0, true),
            edge(200.0, 100.0, 20.0, true),
        ];
        let m = measure(&edges, 400, 200, MeasurementAxis::Width, 0.1).expect("pair found");
        assert_eq!(m.axis, MeasurementAxis::Width);
        assert!((m.pixel_measurement - 299.9).abs() < 1e-3);
        assert!((m.millimeter_measurement - 29.99).abs() < 1e-3);
        assert_eq!(m.edge_a, Point2f::new(50.2, 100.0));
        assert_eq!(m.edge_b, Point2f::new(350.1, 100.0));
        assert_eq!(m.scan_line, 100);
        assert!((m.strength_score - 310.0).abs() < 1e-3);
    }

    #[test]
    fn out_of_bounds_pairs_are_never_selected() {
        // Strongest pairs are 2% and 95% of the width apart.
        let edges = vec![
            edge(100.0, 100.0, 1000.0, true),
            edge(108.0, 100.0, 1000.0, true),
            edge(5.0, 100.0, 900.0, true),
            edge(385.0, 100.0, 900.0, true),
            edge(300.0, 100.0, 10.0, true),
        ];
        let m = measure(&edges, 400, 200, MeasurementAxis::Width, 1.0).expect("pair found");
        let d = m.pixel_measurement;
        assert!((20.0..=360.0).contains(&d), "distance {d}");
        assert!(m.edge_a.x != 5.0 || m.edge_b.x != 385.0);
        assert!(m.edge_a.x != 100.0 || m.edge_b.x != 108.0);

        let only_bad = vec![edge(100.0, 100.0, 1000.0, true), edge(108.0, 100.0, 1000.0, true)];
        assert!(measure(&only_bad, 400, 200, MeasurementAxis::Width, 1.0).is_none());
    }

    #[test]
    fn short_pairs_are_discounted() {
        // The 40 px pair (half of the 80 px full-score length) has the
        // highest contrast sum but loses half its score.
        let edges = vec![
            edge(100.0, 100.0, 120.0, true),
            edge(140.0, 100.0, 80.0, true),
            edge(300.0, 100.0, 60.0, true),
        ];
        let m = measure(&edges, 400, 200, MeasurementAxis::Width, 1.0).expect("pair found");
        assert_eq!((m.edge_a.x, m.edge_b.x), (100.0, 300.0));
        assert!((m.strength_score - 180.0).abs() < 1e-3);
    }

    #[test]
    fn falls_back_to_all_edges_when_majors_are_scarce() {
        let edges = vec![edge(60.0, 100.0, 80.0, true), edge(300.0, 100.0, 80.0, false)];
        let m = measure(&edges, 400, 200, MeasurementAxis::Width, 1.0).expect("pair found");
        assert!((m.pixel_measurement - 240.0).abs() < 1e-4);

        // With two majors the weak edge is ignored even if it pairs better.
        let edges = vec![
            edge(60.0, 100.0, 80.0, true),
            edge(70.0, 100.0, 80.0, true),
            edge(300.0, 100.0, 500.0, false),
        ];
        assert!(measure(&edges, 400, 200, MeasurementAxis::Width, 1.0).is_none());
    }

    #[test]
    fn majors_must_cover_the_whole_contour() {
        // Two straight sides of a box spanning rows 40..=160. If only the
        // first pixel of each trace were major, both majors would sit at
        // row 40, outside every scan band, and the pair would be lost.
        let sides = |major: &dyn Fn(usize) -> bool| -> Vec<RefinedEdgePoint> {
            (40..=160)
                .flat_map(|y| {
                    let m = major(y);
                    [edge(50.0, y as f32, 120.0, m), edge(350.0, y as f32, 120.0, m)]
                })
                .collect()
        };

        let seeds_only = sides(&|y| y == 40);
        assert!(measure(&seeds_only, 400, 200, MeasurementAxis::Width, 1.0).is_none());

        let all_strong = sides(&|_| true);
        let m = measure(&all_strong, 400, 200, MeasurementAxis::Width, 1.0).expect("pair found");
        assert!((m.pixel_measurement - 300.0).abs() < 1e-4);
        assert_eq!(m.scan_line, 60);
    }

    #[test]
    fn edges_outside_every_band_are_ignored() {
        // Scan lines for height 200 are rows 60, 80, 100, 120, 140.
        let edges = vec![edge(50.0, 20.0, 100.0, true), edge(350.0, 20.0, 100.0, true)];
        assert!(measure(&edges, 400, 200, MeasurementAxis::Width, 1.0).is_none());

        let edges = vec![edge(50.0, 85.0, 100.0, true), edge(350.0, 75.0, 100.0, true)];
        let m = measure(&edges, 400, 200, MeasurementAxis::Width, 1.0).expect("pair found");
        assert_eq!(m.scan_line, 80);
    }

    #[test]
    fn height_axis_scans_columns() {
        let edges = vec![edge(200.0, 40.3, 100.0, true), edge(201.0, 160.1, 100.0, true)];
        let m = measure(&edges, 400, 200, MeasurementAxis::Height, 0.5).expect("pair found");
        assert_eq!(m.axis, MeasurementAxis::Height);
        assert_eq!(m.scan_line, 200);
        assert!((m.pixel_measurement - 119.8).abs() < 1e-3);
        assert!((m.millimeter_measurement - 59.9).abs() < 1e-3);
    }

    #[test]
    fn longest_keeps_the_larger_axis() {
        let edges = vec![
            edge(50.0, 100.0, 100.0, true),
            edge(350.0, 100.0, 100.0, true),
            edge(200.0, 40.0, 100.0, true),
            edge(200.0, 160.0, 100.0, true),
        ];
        let m = measure(&edges, 400, 200, MeasurementAxis::Longest, 1.0).expect("pair found");
        assert_eq!(m.axis, MeasurementAxis::Width);
        assert!((m.pixel_measurement - 300.0).abs() < 1e-4);

        let tall = vec![edge(200.0, 40.0, 100.0, true), edge(200.0, 160.0, 100.0, true)];
        let m = measure(&tall, 400, 200, MeasurementAxis::Longest, 1.0).expect("pair found");
        assert_eq!(m.axis, MeasurementAxis::Height);
    }

    #[test]
    fn empty_or_degenerate_inputs_yield_none() {
        assert!(measure(&[], 400, 200, MeasurementAxis::Width, 1.0).is_none());
        let one = [edge(50.0, 100.0, 100.0, true)];
        assert!(measure(&one, 400, 200, MeasurementAxis::Width, 1.0).is_none());
        let two = [edge(50.0, 0.0, 100.0, true), edge(350.0, 0.0, 100.0, true)];
        assert!(measure(&two, 400, 0, MeasurementAxis::Width, 1.0).is_none());
    }

    #[test]
    fn custom_scan_configuration() {
        let edges = vec![edge(50.0, 10.0, 100.0, true), edge(350.0, 10.0, 100.0, true)];
        let config = ScanConfig {
            scan_percentages: vec![5],
            ..ScanConfig::default()
        };
        let m = measure_with(&edges, 400, 200, MeasurementAxis::Width, 1.0, &config)
            .expect("pair found");
        assert_eq!(m.scan_line, 10);
    }

    #[test]
    fn scan_config_validation() {
        assert!(ScanConfig::default().validate().is_ok());
        let inverted = ScanConfig {
            min_distance_ratio: 0.5,
            max_distance_ratio: 0.4,
            ..ScanConfig::default()
        };
        assert!(inverted.validate().is_err());
        let beyond = ScanConfig {
            scan_percentages: vec![50, 120],
            ..ScanConfig::default()
        };
        assert!(beyond.validate().is_err());
    }

    #[test]
    fn translation_follows_the_axis() {
        let edges = vec![edge(50.0, 100.0, 100.0, true), edge(350.0, 100.0, 100.0, true)];
        let m = measure(&edges, 400, 200, MeasurementAxis::Width, 1.0).expect("pair found");
        let t = m.translated(10, 20);
        assert_eq!(t.edge_a, Point2f::new(60.0, 120.0));
        assert_eq!(t.scan_line, m.scan_line + 20);
        assert_eq!(t.pixel_measurement, m.pixel_measurement);
    }
}
