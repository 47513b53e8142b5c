//! Missing-value analysis and sparse column removal.

use anyhow::Result;
use polars::prelude::DataFrame;

use crate::error::FrameError;
use crate::frame::FeatureFrame;

/// Share of missing values per column, in column order.
///
/// An empty frame reports `0.0` for every column.
pub fn missing_ratios(df: &DataFrame) -> Vec<(String, f64)> {
    let height = df.height();
    df.get_columns()
        .iter()
        .map(|column| {
            let ratio = if height == 0 {
                0.0
            } else {
                column.null_count() as f64 / height as f64
            };
            (column.name().to_string(), ratio)
        })
        .collect()
}

/// Columns whose missing share is strictly above `threshold`.
pub fn sparse_columns(df: &DataFrame, threshold: f64) -> Vec<String> {
    missing_ratios(df)
        .into_iter()
        .filter(|(_, ratio)| *ratio > threshold)
        .map(|(name, _)| name)
        .collect()
}

/// Remove sparse attribute columns; returns the new frame and the dropped
/// column names.
pub fn drop_sparse_columns(
    frame: &FeatureFrame,
    threshold: f64,
) -> Result<(FeatureFrame, Vec<String>)> {
    let dropped = sparse_columns(&frame.data, threshold);
    if dropped.is_empty() {
        return Ok((frame.clone(), dropped));
    }
    let kept: Vec<String> = frame
        .column_names()
        .into_iter()
        .filter(|name| !dropped.contains(name))
        .collect();
    let data = if kept.is_empty() {
        DataFrame::empty()
    } else {
        frame.data.select(kept).map_err(FrameError::from)?
    };
    let mut result = frame.clone();
    result.data = data;
    Ok((result, dropped))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    fn frame_with(values: Vec<Option<&str>>) -> DataFrame {
        let full: Vec<Option<&str>> = values.iter().map(|_| Some("x")).collect();
        DataFrame::new(vec![
            Series::new("sparse".into(), values).into_column(),
            Series::new("full".into(), full).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn ratio_counts_nulls() {
        let df = frame_with(vec![Some("a"), None, None, None]);
        let ratios = missing_ratios(&df);
        assert_eq!(ratios[0], ("sparse".to_string(), 0.75));
        assert_eq!(ratios[1], ("full".to_string(), 0.0));
    }

    #[test]
    fn threshold_is_strict() {
        let mut values = vec![None; 9];
        values.push(Some("a"));
        let df = frame_with(values);
        assert!(sparse_columns(&df, 0.9).is_empty());
        assert_eq!(sparse_columns(&df, 0.89), vec!["sparse".to_string()]);
    }

    #[test]
    fn empty_frame_drops_nothing() {
        let df = frame_with(vec![]);
        assert!(sparse_columns(&df, 0.0).is_empty());
    }
}
