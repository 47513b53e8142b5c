//! Geometry classification, centroids and equality keys.

use std::mem::{Discriminant, discriminant};

use geo::{Centroid, CoordsIter, Geometry, MultiPolygon, Point, Polygon};
use poi_model::{GeometryKind, OtherGeometryPolicy};

pub fn kind_of(geometry: &Geometry<f64>) -> GeometryKind {
    match geometry {
        Geometry::Point(_) => GeometryKind::Point,
        Geometry::Polygon(_) => GeometryKind::Polygon,
        Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
        _ => GeometryKind::Other,
    }
}

/// GeoJSON-style type name, used when logging excluded records.
pub fn type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

pub fn polygon_centroid(polygon: &Polygon<f64>) -> Option<Point<f64>> {
    polygon.centroid()
}

/// One centroid per part; empty parts have none and are skipped.
pub fn part_centroids(multi: &MultiPolygon<f64>) -> Vec<Point<f64>> {
    multi.iter().filter_map(polygon_centroid).collect()
}

/// Reduce a geometry to the points that stand for it.
///
/// Points map to themselves, polygons to their centroid and multipolygons to
/// the centroid of each part. Other geometries follow `policy`. An empty
/// result means the record has no usable point.
pub fn reduce_geometry(
    geometry: &Geometry<f64>,
    policy: OtherGeometryPolicy,
) -> Vec<Geometry<f64>> {
    match geometry {
        Geometry::Point(point) => vec![Geometry::Point(*point)],
        Geometry::Polygon(polygon) => polygon_centroid(polygon)
            .map(Geometry::Point)
            .into_iter()
            .collect(),
        Geometry::MultiPolygon(multi) => part_centroids(multi)
            .into_iter()
            .map(Geometry::Point)
            .collect(),
        other => match policy {
            OtherGeometryPolicy::PassThrough => vec![other.clone()],
            OtherGeometryPolicy::Drop => Vec::new(),
        },
    }
}

/// Hashable identity of a geometry: its variant and exact coordinate
/// sequence. Negative zero compares equal to zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeometryKey {
    variant: Discriminant<Geometry<f64>>,
    coords: Vec<(u64, u64)>,
}

impl GeometryKey {
    pub fn of(geometry: &Geometry<f64>) -> Self {
        Self {
            variant: discriminant(geometry),
            coords: geometry
                .coords_iter()
                .map(|coord| (coord_bits(coord.x), coord_bits(coord.y)))
                .collect(),
        }
    }
}

fn coord_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}
