use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoiError {
    #[error("invalid CRS identifier: {0:?}")]
    InvalidCrs(String),
    #[error("sparse column threshold must be within [0, 1], got {0}")]
    InvalidThreshold(f64),
    #[error("index level name must not be empty")]
    EmptyIndexLevel,
}

pub type Result<T> = std::result::Result<T, PoiError>;
