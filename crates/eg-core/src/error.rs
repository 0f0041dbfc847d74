use core::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    SizeMismatch { expected: usize, actual: usize },
    InvalidStride,
    RoiOutOfBounds,
    /// A scalar parameter is negative, non-finite or otherwise outside its domain.
    InvalidParameter { name: &'static str, value: f32 },
    /// Hysteresis thresholds with `low > high`.
    ThresholdOrder { low: f32, high: f32 },
    /// A configuration document could not be parsed.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::InvalidStride => write!(f, "invalid stride"),
            Self::RoiOutOfBounds => write!(f, "region of interest exceeds image bounds"),
            Self::InvalidParameter { name, value } => {
                write!(f, "invalid parameter `{name}`: {value}")
            }
            Self::ThresholdOrder { low, high } => {
                write!(f, "low threshold {low} exceeds high threshold {high}")
            }
            Self::Config(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
