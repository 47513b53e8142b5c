//! Geometry partitioning and the polygon/point spatial join.
//!
//! Candidate points for each polygon come from an R-tree over point
//! coordinates queried with the polygon bounding rectangle; the exact
//! predicate is then evaluated with `geo`.

use std::collections::BTreeSet;

use anyhow::Result;
use geo::{BoundingRect, Contains, Geometry, Intersects, Point};
use poi_model::{Crs, CrsMismatch, GeometryKind, SpatialPredicate};
use rstar::primitives::GeomWithData;
use rstar::{AABB, RTree};

use crate::frame::FeatureFrame;
use crate::geometry::type_name;

type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// Records split by geometry kind.
#[derive(Debug, Clone)]
pub struct GeometryPartition {
    pub points: FeatureFrame,
    /// Polygons and multipolygons.
    pub polygons: FeatureFrame,
    /// Records that are neither; they belong to no subset.
    pub other: usize,
    /// Type names of those records, sorted.
    pub other_types: BTreeSet<&'static str>,
}

pub fn partition_by_kind(frame: &FeatureFrame) -> Result<GeometryPartition> {
    let kinds = frame.kinds();
    let point_mask: Vec<bool> = kinds.iter().map(|kind| *kind == GeometryKind::Point).collect();
    let polygon_mask: Vec<bool> = kinds.iter().map(|kind| kind.is_areal()).collect();
    let mut other = 0;
    let mut other_types = BTreeSet::new();
    for (kind, geometry) in kinds.iter().zip(&frame.geometries) {
        if *kind == GeometryKind::Other {
            other += 1;
            other_types.insert(type_name(geometry));
        }
    }
    Ok(GeometryPartition {
        points: frame.filter(&point_mask)?,
        polygons: frame.filter(&polygon_mask)?,
        other,
        other_types,
    })
}

/// Compare the CRS tags of the two subsets.
pub fn check_crs_compatibility(
    points: &FeatureFrame,
    polygons: &FeatureFrame,
) -> Option<CrsMismatch> {
    if points.crs == polygons.crs {
        return None;
    }
    Some(CrsMismatch {
        points: points.crs.clone(),
        polygons: polygons.crs.clone(),
    })
}

/// For every polygon, whether at least one point satisfies `predicate`
/// against it.
pub fn polygons_matching_points(
    polygons: &FeatureFrame,
    points: &FeatureFrame,
    predicate: SpatialPredicate,
) -> Vec<bool> {
    let indexed: Vec<IndexedPoint> = points
        .geometries
        .iter()
        .enumerate()
        .filter_map(|(row, geometry)| match geometry {
            Geometry::Point(point) => Some(GeomWithData::new([point.x(), point.y()], row)),
            _ => None,
        })
        .collect();
    let tree = RTree::bulk_load(indexed);
    polygons
        .geometries
        .iter()
        .map(|geometry| matches_any(geometry, &tree, predicate))
        .collect()
}

fn matches_any(
    geometry: &Geometry<f64>,
    tree: &RTree<IndexedPoint>,
    predicate: SpatialPredicate,
) -> bool {
    let Some(rect) = geometry.bounding_rect() else {
        return false;
    };
    let envelope = AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);
    tree.locate_in_envelope(&envelope).any(|candidate| {
        let [x, y] = *candidate.geom();
        areal_matches(geometry, &Point::new(x, y), predicate)
    })
}

fn areal_matches(geometry: &Geometry<f64>, point: &Point<f64>, predicate: SpatialPredicate) -> bool {
    match (geometry, predicate) {
        (Geometry::Polygon(polygon), SpatialPredicate::Contains) => polygon.contains(point),
        (Geometry::Polygon(polygon), SpatialPredicate::Intersects) => polygon.intersects(point),
        (Geometry::MultiPolygon(multi), SpatialPredicate::Contains) => multi.contains(point),
        (Geometry::MultiPolygon(multi), SpatialPredicate::Intersects) => multi.intersects(point),
        _ => false,
    }
}

/// Points followed by polygons, tagged with `crs`.
pub fn union_frames(
    points: &FeatureFrame,
    polygons: &FeatureFrame,
    crs: Option<Crs>,
) -> Result<FeatureFrame> {
    Ok(points.concat(polygons)?.with_crs(crs))
}
