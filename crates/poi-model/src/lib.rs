pub mod crs;
pub mod error;
pub mod kind;
pub mod options;
pub mod report;

pub use crs::{Crs, WGS84_EPSG};
pub use error::{PoiError, Result};
pub use kind::{GeometryKind, OtherGeometryPolicy};
pub use options::{
    DEFAULT_INDEX_LEVEL, DEFAULT_SPARSE_COLUMN_THRESHOLD, NormalizeOptions, SpatialPredicate,
};
pub use report::{CrsMismatch, NormalizationReport};
