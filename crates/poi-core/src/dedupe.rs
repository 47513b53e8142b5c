use std::collections::HashSet;

use anyhow::Result;
use geo::Geometry;

use crate::frame::FeatureFrame;
use crate::geometry::GeometryKey;

/// `true` for every geometry equal to an earlier one.
pub fn duplicate_flags(geometries: &[Geometry<f64>]) -> Vec<bool> {
    let mut seen = HashSet::with_capacity(geometries.len());
    geometries
        .iter()
        .map(|geometry| !seen.insert(GeometryKey::of(geometry)))
        .collect()
}

/// Keep the first occurrence of each geometry; returns the frame and the
/// number of removed duplicates.
pub fn drop_duplicate_geometries(frame: &FeatureFrame) -> Result<(FeatureFrame, usize)> {
    let flags = duplicate_flags(&frame.geometries);
    let duplicates = flags.iter().filter(|flag| **flag).count();
    if duplicates == 0 {
        return Ok((frame.clone(), 0));
    }
    let keep: Vec<bool> = flags.iter().map(|flag| !flag).collect();
    Ok((frame.filter(&keep)?, duplicates))
}
