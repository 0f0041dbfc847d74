use eg_core::Point2f;
use serde::{Deserialize, Serialize};

/// Direction along which a length is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementAxis {
    /// Along x, scanning rows.
    #[default]
    Width,
    /// Along y, scanning columns.
    Height,
    /// Both axes; the longer result wins.
    Longest,
}

impl MeasurementAxis {
    /// `(along, cross)` image extents. `Longest` has no single orientation
    /// and reports the width layout.
    pub(crate) fn extents(self, width: usize, height: usize) -> (usize, usize) {
        match self {
            Self::Height => (height, width),
            Self::Width | Self::Longest => (width, height),
        }
    }

    /// `(along, cross)` coordinates of a point.
    pub(crate) fn split(self, p: Point2f) -> (f32, f32) {
        match self {
            Self::Height => (p.y, p.x),
            Self::Width | Self::Longest => (p.x, p.y),
        }
    }
}
