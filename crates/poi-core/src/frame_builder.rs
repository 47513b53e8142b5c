use poi_ingest::GeoTable;

use crate::error::FrameError;
use crate::frame::FeatureFrame;

/// Build a [`FeatureFrame`] from a loaded table, keeping its index levels.
pub fn build_feature_frame(table: GeoTable) -> Result<FeatureFrame, FrameError> {
    let GeoTable {
        index,
        data,
        geometries,
        crs,
        ..
    } = table;
    FeatureFrame::new(data, geometries, crs)?.with_index(index)
}
