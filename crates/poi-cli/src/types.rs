use std::collections::BTreeMap;
use std::path::PathBuf;

use poi_model::{Crs, GeometryKind, NormalizationReport};

#[derive(Debug)]
pub struct NormalizeOutcome {
    pub input: PathBuf,
    /// `None` on a dry run.
    pub output: Option<PathBuf>,
    pub null_geometries: usize,
    pub report: NormalizationReport,
}

#[derive(Debug)]
pub struct InspectOutcome {
    pub input: PathBuf,
    pub records: usize,
    pub null_geometries: usize,
    pub crs: Option<Crs>,
    pub index_levels: Vec<String>,
    pub kind_counts: BTreeMap<GeometryKind, usize>,
    pub columns: Vec<ColumnProfile>,
    pub threshold: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub missing_ratio: f64,
    pub would_drop: bool,
}
