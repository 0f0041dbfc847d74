//! Dual-threshold edge tracing.
//!
//! Every suppressed pixel `>= high` seeds a trace; 8-connected pixels `>= low`
//! reachable from a seed join it. Tracing is an explicit-stack flood fill and
//! each pixel is claimed at most once, so output has no duplicates and memory
//! is bounded by the frontier.
//!
//! Emission order: seeds in row-major order, each followed depth-first by the
//! weak pixels it reaches.

use eg_core::{Error, Image};
use serde::{Deserialize, Serialize};

use crate::gradient::GradientField;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeCandidate {
    pub x: usize,
    pub y: usize,
    pub magnitude: f32,
    pub direction: f32,
    pub gx: f32,
    pub gy: f32,
    pub g45: f32,
    pub g135: f32,
    /// `true` for strong pixels (suppressed magnitude `>= high`).
    pub is_major: bool,
}

/// How hysteresis thresholds are obtained for an image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Thresholds {
    /// Thresholds in suppressed-magnitude units.
    Absolute { low: f32, high: f32 },
    /// Fractions of the largest suppressed magnitude in the image.
    Relative { low_ratio: f32, high_ratio: f32 },
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::Absolute {
            low: 50.0,
            high: 150.0,
        }
    }
}

impl Thresholds {
    pub fn validate(&self) -> Result<(), Error> {
        let (low, high, low_name, high_name) = match *self {
            Self::Absolute { low, high } => (low, high, "low_threshold", "high_threshold"),
            Self::Relative {
                low_ratio,
                high_ratio,
            } => {
                for (name, v) in [("low_ratio", low_ratio), ("high_ratio", high_ratio)] {
                    if !(0.0..=1.0).contains(&v) {
                        return Err(Error::InvalidParameter { name, value: v });
                    }
                }
                (low_ratio, high_ratio, "low_ratio", "high_ratio")
            }
        };

        for (name, v) in [(low_name, low), (high_name, high)] {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::InvalidParameter { name, value: v });
            }
        }
        if low > high {
            return Err(Error::ThresholdOrder { low, high });
        }
        Ok(())
    }

    /// Absolute `(low, high)` for a suppressed magnitude image.
    pub fn resolve(&self, suppressed: &Image<f32>) -> (f32, f32) {
        match *self {
            Self::Absolute { low, high } => (low, high),
            Self::Relative {
                low_ratio,
                high_ratio,
            } => {
                let max = suppressed.max_value();
                (low_ratio * max, high_ratio * max)
            }
        }
    }
}

/// Thresholds are used as given, in suppressed-magnitude units. Check them
/// with [`Thresholds::validate`] first: with `low > high` the weak band is
/// empty and only strong pixels are emitted, and a NaN `high` seeds every
/// positive pixel as non-major.
pub fn trace_hysteresis(
    suppressed: &Image<f32>,
    field: &GradientField,
    low: f32,
    high: f32,
) -> Vec<EdgeCandidate> {
    let (w, h) = (suppressed.width(), suppressed.height());
    assert!(
        field.width() == w && field.height() == h,
        "gradient field and suppressed image must share dimensions"
    );

    let mag = suppressed.data();
    let mut visited = vec![false; w * h];
    let mut stack = Vec::new();
    let mut out = Vec::new();

    let candidate = |idx: usize, m: f32| {
        let s = &field.samples()[idx];
        EdgeCandidate {
            x: idx % w,
            y: idx / w,
            magnitude: m,
            direction: s.direction,
            gx: s.gx,
            gy: s.gy,
            g45: s.g45,
            g135: s.g135,
            is_major: m >= high,
        }
    };

    for seed in 0..mag.len() {
        let m = mag[seed];
        if visited[seed] || m <= 0.0 || m < high {
            continue;
        }

        visited[seed] = true;
        out.push(candidate(seed, m));
        stack.push(seed);

        while let Some(idx) = stack.pop() {
            let x = idx % w;
            let y = idx / w;

            for ny in y.saturating_sub(1)..=(y + 1).min(h - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(w - 1) {
                    let nidx = ny * w + nx;
                    let nm = mag[nidx];
                    if visited[nidx] || nm <= 0.0 || nm < low {
                        continue;
                    }
                    visited[nidx] = true;
                    out.push(candidate(nidx, nm));
                    stack.push(nidx);
                }
            }
        }
    }

    out
}
