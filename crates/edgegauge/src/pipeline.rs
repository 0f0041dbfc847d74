//! End-to-end edge detection and measurement.
//!
//! Stages run in order on the configured region of interest:
//!
//! 1. optional contrast stretch, then bilateral smoothing
//! 2. four-direction gradient field
//! 3. non-maximum suppression
//! 4. hysteresis tracing
//! 5. Zernike refinement on the unsmoothed intensities, then scan-line
//!    measurement
//!
//! All reported coordinates are in full-frame pixels.

use eg_core::{Error, ImageView, Roi};
use eg_edge::{
    Thresholds, bilateral_filter, compute_gradients, enhance_contrast, non_max_suppression,
    trace_hysteresis,
};
use eg_measure::{
    AreaMeasurement, MeasurementAxis, MeasurementResult, ScanConfig, measure_area, measure_with,
};
use eg_zernike::{RefineConfig, RefinedEdgePoint, refine_edges};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Stretch around the mean intensity before smoothing; `None` skips it.
    pub contrast_factor: Option<f32>,
    pub spatial_sigma: f32,
    pub range_sigma: f32,
    pub thresholds: Thresholds,
    pub refine: RefineConfig,
    pub axis: MeasurementAxis,
    pub scan: ScanConfig,
    /// Millimeters per pixel.
    pub calibration_factor: f32,
    /// Also measure along both axes and report the enclosed area.
    pub measure_area: bool,
    /// Sub-rectangle to process; `None` is the full frame.
    pub roi: Option<Roi>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            contrast_factor: None,
            spatial_sigma: 1.5,
            range_sigma: 25.0,
            thresholds: Thresholds::default(),
            refine: RefineConfig::default(),
            axis: MeasurementAxis::Width,
            scan: ScanConfig::default(),
            calibration_factor: 1.0,
            measure_area: false,
            roi: None,
        }
    }
}

impl PipelineConfig {
    /// Parses a JSON document; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        for (name, v) in [
            ("spatial_sigma", self.spatial_sigma),
            ("range_sigma", self.range_sigma),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::InvalidParameter { name, value: v });
            }
        }
        if let Some(f) = self.contrast_factor {
            if !f.is_finite() || f < 0.0 {
                return Err(Error::InvalidParameter {
                    name: "contrast_factor",
                    value: f,
                });
            }
        }
        if !self.calibration_factor.is_finite() || self.calibration_factor <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "calibration_factor",
                value: self.calibration_factor,
            });
        }
        self.thresholds.validate()?;
        self.refine.validate()?;
        self.scan.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    /// Region that was processed, in full-frame pixels.
    pub roi: Roi,
    /// Pixels accepted by hysteresis.
    pub candidate_count: usize,
    /// Refined edges in candidate order.
    pub edges: Vec<RefinedEdgePoint>,
    pub measurement: Option<MeasurementResult>,
    pub area: Option<AreaMeasurement>,
}

/// Runs every stage on `img` (or its configured ROI).
///
/// Parameters are validated before any pixel is read. Finding no measurable
/// edge pair is not an error: `measurement` is `None`.
pub fn run(img: &ImageView<'_, u8>, config: &PipelineConfig) -> Result<PipelineOutput, Error> {
    config.validate()?;

    let roi = config.roi.unwrap_or(Roi::full(img.width(), img.height()));
    let view = img.subview(roi)?;
    debug!(
        "processing {}x{} region at ({}, {})",
        roi.width, roi.height, roi.x, roi.y
    );

    let stretched = config.contrast_factor.map(|f| enhance_contrast(&view, f));
    let source = stretched.as_ref().map_or(view, |s| s.as_view());

    let smoothed = bilateral_filter(&source, config.spatial_sigma, config.range_sigma);
    let field = compute_gradients(&smoothed.as_view());
    let suppressed = non_max_suppression(&field);
    let ridge = suppressed.data().iter().filter(|&&m| m > 0.0).count();
    trace!("{ridge} ridge pixels after suppression");

    let (low, high) = config.thresholds.resolve(&suppressed);
    let candidates = trace_hysteresis(&suppressed, &field, low, high);
    debug!(
        "hysteresis [{low:.1}, {high:.1}]: {} candidates ({} major)",
        candidates.len(),
        candidates.iter().filter(|c| c.is_major).count()
    );

    let local = refine_edges(&candidates, &source, &config.refine);
    debug!("{} of {} candidates refined", local.len(), candidates.len());

    let measurement = measure_with(
        &local,
        roi.width,
        roi.height,
        config.axis,
        config.calibration_factor,
        &config.scan,
    );
    let area = if config.measure_area {
        measure_area(
            &local,
            roi.width,
            roi.height,
            config.calibration_factor,
            &config.scan,
        )
    } else {
        None
    };

    match &measurement {
        Some(m) => debug!(
            "{:?}: {:.3} px = {:.3} mm",
            m.axis, m.pixel_measurement, m.millimeter_measurement
        ),
        None => debug!("no edge pair satisfies the distance bounds"),
    }

    Ok(PipelineOutput {
        roi,
        candidate_count: candidates.len(),
        edges: local
            .into_iter()
            .map(|e| e.translated(roi.x, roi.y))
            .collect(),
        measurement: measurement.map(|m| m.translated(roi.x, roi.y)),
        area: area.map(|a| a.translated(roi.x, roi.y)),
    })
}
