//! Error types for feature ingestion.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use poi_model::PoiError;
use thiserror::Error;

/// Errors that can occur while loading a feature collection.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The input file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid GeoJSON.
    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    /// A feature geometry could not be converted.
    #[error("feature {index}: unsupported geometry: {message}")]
    InvalidGeometry { index: usize, message: String },

    /// The legacy `crs` member could not be parsed.
    #[error("invalid crs member: {0}")]
    Crs(#[from] PoiError),

    /// Building the attribute frame failed.
    #[error("failed to build attribute columns: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
