//! Geometry kinds recognized by the normalizer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed classification of feature geometries.
///
/// Everything that is not a point, polygon or multipolygon falls into
/// [`GeometryKind::Other`]; how those records are treated is decided by
/// [`OtherGeometryPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    Polygon,
    MultiPolygon,
    Other,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 4] = [
        GeometryKind::Point,
        GeometryKind::Polygon,
        GeometryKind::MultiPolygon,
        GeometryKind::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::Other => "Other",
        }
    }

    /// Polygon or MultiPolygon.
    pub fn is_areal(self) -> bool {
        matches!(self, GeometryKind::Polygon | GeometryKind::MultiPolygon)
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the point reduction does with geometries of kind
/// [`GeometryKind::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtherGeometryPolicy {
    /// Keep the geometry unchanged.
    #[default]
    PassThrough,
    /// Remove the record.
    Drop,
}
