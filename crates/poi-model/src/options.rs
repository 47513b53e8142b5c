//! Configuration options for feature normalization.

use serde::{Deserialize, Serialize};

use crate::crs::Crs;
use crate::error::{PoiError, Result};
use crate::kind::OtherGeometryPolicy;

/// Index level dropped when the compound index is flattened.
pub const DEFAULT_INDEX_LEVEL: &str = "element";

/// Columns with a missing-value share above this are dropped.
pub const DEFAULT_SPARSE_COLUMN_THRESHOLD: f64 = 0.9;

/// Spatial predicate used to match polygons against points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpatialPredicate {
    /// The point lies in the polygon interior (boundary points do not match).
    #[default]
    Contains,
    /// The point touches the polygon anywhere, boundary included.
    Intersects,
}

impl SpatialPredicate {
    pub fn as_str(self) -> &'static str {
        match self {
            SpatialPredicate::Contains => "contains",
            SpatialPredicate::Intersects => "intersects",
        }
    }
}

/// Options controlling the normalization pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeOptions {
    /// Name of the grouping index level removed before processing.
    pub index_level: String,

    /// Missing-value share above which an attribute column is dropped.
    ///
    /// The comparison is strict: a column missing exactly this share is kept.
    pub sparse_column_threshold: f64,

    /// Predicate for the polygon/point spatial join.
    pub predicate: SpatialPredicate,

    /// CRS label assigned to the output.
    ///
    /// This is a relabel, not a reprojection: coordinates are left untouched.
    pub output_crs: Crs,

    /// Treatment of geometries that are neither points nor polygons during
    /// point reduction.
    pub other_geometry_policy: OtherGeometryPolicy,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            index_level: DEFAULT_INDEX_LEVEL.to_string(),
            sparse_column_threshold: DEFAULT_SPARSE_COLUMN_THRESHOLD,
            predicate: SpatialPredicate::default(),
            output_crs: Crs::wgs84(),
            other_geometry_policy: OtherGeometryPolicy::default(),
        }
    }
}

impl NormalizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_index_level(mut self, level: impl Into<String>) -> Self {
        self.index_level = level.into();
        self
    }

    pub fn with_sparse_column_threshold(mut self, threshold: f64) -> Self {
        self.sparse_column_threshold = threshold;
        self
    }

    pub fn with_predicate(mut self, predicate: SpatialPredicate) -> Self {
        self.predicate = predicate;
        self
    }

    pub fn with_output_crs(mut self, crs: Crs) -> Self {
        self.output_crs = crs;
        self
    }

    pub fn with_other_geometry_policy(mut self, policy: OtherGeometryPolicy) -> Self {
        self.other_geometry_policy = policy;
        self
    }

    /// Check option values before running a pipeline.
    pub fn validate(&self) -> Result<()> {
        let threshold = self.sparse_column_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(PoiError::InvalidThreshold(threshold));
        }
        if self.index_level.trim().is_empty() {
            return Err(PoiError::EmptyIndexLevel);
        }
        Ok(())
    }
}
