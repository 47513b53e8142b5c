use anyhow::Result;
use poi_model::{Crs, GeometryKind, OtherGeometryPolicy};

use crate::frame::FeatureFrame;
use crate::geometry::{kind_of, reduce_geometry};

/// Result of reducing a frame to points.
#[derive(Debug, Clone)]
pub struct PointReduction {
    pub frame: FeatureFrame,
    /// Records added by exploding multi-centroid results.
    pub exploded: usize,
    /// Polygon records without any centroid, removed.
    pub empty: usize,
    /// Other-kind records removed by [`OtherGeometryPolicy::Drop`].
    pub dropped_other: usize,
}

/// Replace polygons by centroids and explode multipolygons into one record
/// per part.
///
/// Each output record copies the attributes of its source record; the
/// result is tagged with `output_crs` without touching coordinates.
pub fn reduce_to_points(
    frame: &FeatureFrame,
    policy: OtherGeometryPolicy,
    output_crs: &Crs,
) -> Result<PointReduction> {
    let mut rows = Vec::with_capacity(frame.len());
    let mut geometries = Vec::with_capacity(frame.len());
    let mut exploded = 0usize;
    let mut empty = 0usize;
    let mut dropped_other = 0usize;

    for (row, geometry) in frame.geometries.iter().enumerate() {
        let reduced = reduce_geometry(geometry, policy);
        match reduced.len() {
            0 if kind_of(geometry) == GeometryKind::Other => dropped_other += 1,
            0 => empty += 1,
            count => exploded += count - 1,
        }
        for point in reduced {
            rows.push(row);
            geometries.push(point);
        }
    }

    let mut reduced = frame.take(&rows)?;
    reduced.geometries = geometries;
    reduced.crs = Some(output_crs.clone());
    Ok(PointReduction {
        frame: reduced,
        exploded,
        empty,
        dropped_other,
    })
}
