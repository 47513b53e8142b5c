use polars::prelude::PolarsError;
use thiserror::Error;

/// Structural errors on a [`FeatureFrame`](crate::frame::FeatureFrame).
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("index level {level:?} not found (available: {})", available.join(", "))]
    MissingIndexLevel {
        level: String,
        available: Vec<String>,
    },
    #[error("{part} has {actual} rows but the frame has {expected} geometries")]
    LengthMismatch {
        part: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("mask has {actual} entries but the frame has {expected} rows")]
    MaskLength { expected: usize, actual: usize },
    #[error(transparent)]
    Polars(#[from] PolarsError),
}
