//! Example: sub-pixel width/height measurement of a single image.
//!
//! Loads an image, converts it to 8-bit luma, runs the full edge pipeline and
//! writes a JSON report (refined edges plus the measurement) next to the
//! input. Pipeline parameters come from an optional JSON config; command-line
//! flags override individual fields.
//!
//! Run from the workspace root:
//!   cargo run -p edgegauge --example measure_image -- --help
//!   RUST_LOG=debug cargo run -p edgegauge --example measure_image -- \
//!       part.png --axis width --mm-per-px 0.05

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use edgegauge::{
    AreaMeasurement, DEFAULT_INTERPOLATION_FACTOR, Image, MeasurementAxis, MeasurementResult,
    PipelineConfig, RefinedEdgePoint, Roi, run,
};
use flexi_logger::Logger;
use image::ImageReader;
use serde::Serialize;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AxisArg {
    Width,
    Height,
    Longest,
}

impl From<AxisArg> for MeasurementAxis {
    fn from(a: AxisArg) -> Self {
        match a {
            AxisArg::Width => Self::Width,
            AxisArg::Height => Self::Height,
            AxisArg::Longest => Self::Longest,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Measure the distance between sub-pixel edges in an image")]
struct Args {
    /// Input image (any format the `image` crate decodes)
    input: PathBuf,

    /// JSON pipeline config; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Measurement axis
    #[arg(long, value_enum)]
    axis: Option<AxisArg>,

    /// Calibration in millimeters per pixel
    #[arg(long)]
    mm_per_px: Option<f32>,

    /// Contrast stretch factor applied before smoothing
    #[arg(long)]
    contrast: Option<f32>,

    /// Restrict processing to a centered square, side in percent of the height
    #[arg(long)]
    roi_percent: Option<f32>,

    /// Resample refinement windows along the gradient direction
    #[arg(long)]
    interpolate: bool,

    /// Also report width x height area
    #[arg(long)]
    area: bool,

    /// Output JSON path (default: <input stem>_measure.json next to input)
    #[arg(long)]
    out: Option<PathBuf>,
}

// ── JSON report ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Report<'a> {
    input: &'a Path,
    width: usize,
    height: usize,
    roi: Roi,
    config: &'a PipelineConfig,
    elapsed_ms: f64,
    candidate_count: usize,
    measurement: Option<MeasurementResult>,
    area: Option<AreaMeasurement>,
    edges: &'a [RefinedEdgePoint],
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(args: &Args, width: usize, height: usize) -> Result<PipelineConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            PipelineConfig::from_json_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => PipelineConfig::default(),
    };

    if let Some(axis) = args.axis {
        cfg.axis = axis.into();
    }
    if let Some(mm) = args.mm_per_px {
        cfg.calibration_factor = mm;
    }
    if let Some(f) = args.contrast {
        cfg.contrast_factor = Some(f);
    }
    if let Some(pct) = args.roi_percent {
        cfg.roi = Some(Roi::centered_square(width, height, pct));
    }
    if args.interpolate {
        cfg.refine.interpolation = Some(DEFAULT_INTERPOLATION_FACTOR);
    }
    cfg.measure_area |= args.area;

    cfg.validate().context("invalid pipeline configuration")?;
    Ok(cfg)
}

fn default_out_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let dir = input.parent().unwrap_or(Path::new("."));
    dir.join(format!("{stem}_measure.json"))
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    Logger::try_with_env_or_str("info")
        .context("configuring logger")?
        .start()
        .context("starting logger")?;

    let args = Args::parse();

    let gray = ImageReader::open(&args.input)
        .with_context(|| format!("opening {}", args.input.display()))?
        .decode()
        .with_context(|| format!("decoding {}", args.input.display()))?
        .into_luma8();

    let width = gray.width() as usize;
    let height = gray.height() as usize;
    if width == 0 || height == 0 {
        bail!("{} is empty", args.input.display());
    }
    let frame = Image::from_vec(width, height, gray.into_raw()).context("building luma image")?;

    let cfg = load_config(&args, width, height)?;
    log::info!("loaded {}: {width}x{height}", args.input.display());

    let t0 = Instant::now();
    let out = run(&frame.as_view(), &cfg).context("running pipeline")?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

    log::info!(
        "{} candidates, {} refined edges ({elapsed_ms:.2} ms)",
        out.candidate_count,
        out.edges.len()
    );
    match &out.measurement {
        Some(m) => log::info!(
            "{:?}: {:.3} px = {:.4} mm (scan line {}, score {:.1})",
            m.axis,
            m.pixel_measurement,
            m.millimeter_measurement,
            m.scan_line,
            m.strength_score
        ),
        None => log::warn!("no measurable edge pair found"),
    }
    if let Some(a) = &out.area {
        log::info!("area: {:.1} px^2 = {:.4} mm^2", a.area_pixels, a.area_mm2);
    }

    let report = Report {
        input: &args.input,
        width,
        height,
        roi: out.roi,
        config: &cfg,
        elapsed_ms,
        candidate_count: out.candidate_count,
        measurement: out.measurement,
        area: out.area,
        edges: &out.edges,
    };

    let out_path = args.out.clone().unwrap_or_else(|| default_out_path(&args.input));
    let out_file = std::fs::File::create(&out_path)
        .with_context(|| format!("creating {}", out_path.display()))?;
    serde_json::to_writer_pretty(out_file, &report)
        .with_context(|| format!("writing JSON to {}", out_path.display()))?;

    log::info!("report written to {}", out_path.display());
    Ok(())
}
