//! Diagnostics collected while normalizing a feature collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::crs::Crs;
use crate::kind::GeometryKind;

/// CRS tags of the point and polygon subsets when they disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrsMismatch {
    pub points: Option<Crs>,
    pub polygons: Option<Crs>,
}

impl CrsMismatch {
    pub fn message(&self) -> String {
        format!(
            "point and polygon CRS differ ({} vs {}); unify the CRS of the input layers",
            describe(self.points.as_ref()),
            describe(self.polygons.as_ref())
        )
    }
}

fn describe(crs: Option<&Crs>) -> String {
    crs.map_or_else(|| "unset".to_string(), ToString::to_string)
}

/// Summary of one normalization run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizationReport {
    pub input_records: usize,
    pub output_records: usize,
    /// Columns removed for having too many missing values, in column order.
    pub dropped_columns: Vec<String>,
    /// Record counts per geometry kind after index flattening.
    pub kind_counts: BTreeMap<GeometryKind, usize>,
    /// Records excluded because they are neither points nor polygons.
    pub excluded_other: usize,
    /// Polygons removed because they matched at least one point.
    pub suppressed_polygons: usize,
    /// Extra records created by exploding multipolygon centroids.
    pub exploded_records: usize,
    /// Records dropped because no centroid could be computed.
    pub empty_geometries: usize,
    /// Geometries equal to an earlier geometry, removed in the final step.
    pub duplicate_geometries: usize,
    pub crs_mismatch: Option<CrsMismatch>,
    pub output_crs: Option<Crs>,
    /// Names of the pipeline steps that ran, in order.
    pub executed_steps: Vec<String>,
}

impl NormalizationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Human-readable line describing the sparse column outcome.
    pub fn dropped_columns_message(&self) -> String {
        if self.dropped_columns.is_empty() {
            "no columns with a high share of missing values".to_string()
        } else {
            format!("dropped columns: {}", self.dropped_columns.join(", "))
        }
    }

    pub fn kind_count(&self, kind: GeometryKind) -> usize {
        self.kind_counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn has_warnings(&self) -> bool {
        self.crs_mismatch.is_some() || self.excluded_other > 0 || self.empty_geometries > 0
    }
}
