pub mod columns;
pub mod error;
pub mod geojson_table;

pub use columns::{ColumnBuilder, ColumnKind, infer_kind, json_to_text};
pub use error::{IngestError, Result};
pub use geojson_table::{
    DEFAULT_INDEX_LEVELS, GeoTable, IngestOptions, parse_geojson, read_geojson,
};
