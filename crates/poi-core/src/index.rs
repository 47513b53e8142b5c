use anyhow::Result;
use polars::prelude::{Column, DataFrame};

use crate::error::FrameError;
use crate::frame::FeatureFrame;

/// Drop the `level` index level and reset to a sequential index.
///
/// Remaining index levels become the leading data columns, in index order,
/// so record identifiers survive as ordinary attributes.
pub fn flatten_index(frame: &FeatureFrame, level: &str) -> Result<FeatureFrame> {
    let names = frame.index_names();
    if !names.iter().any(|name| name == level) {
        return Err(FrameError::MissingIndexLevel {
            level: level.to_string(),
            available: names,
        }
        .into());
    }
    let mut columns: Vec<Column> = frame
        .index
        .get_columns()
        .iter()
        .filter(|column| column.name().as_str() != level)
        .cloned()
        .collect();
    columns.extend(frame.data.get_columns().iter().cloned());
    let data = if columns.is_empty() {
        DataFrame::empty()
    } else {
        DataFrame::new(columns).map_err(FrameError::from)?
    };
    let flattened = FeatureFrame::new(data, frame.geometries.clone(), frame.crs.clone())?;
    Ok(flattened)
}
