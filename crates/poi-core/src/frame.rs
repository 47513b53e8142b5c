use std::collections::BTreeMap;

use geo::Geometry;
use polars::prelude::{BooleanChunked, DataFrame, IdxCa, IdxSize, NewChunkedArray};
use poi_model::{Crs, GeometryKind};

use crate::error::FrameError;
use crate::geometry::kind_of;

/// A collection of features stored column-wise.
///
/// Attributes live in a Polars frame, geometries in a parallel vector. The
/// `index` frame holds the levels of a compound index (for OSM exports
/// `element` and `id`); a frame without columns stands for a plain sequential
/// index. Both frames either have no columns or exactly one row per geometry.
#[derive(Debug, Clone)]
pub struct FeatureFrame {
    pub index: DataFrame,
    pub data: DataFrame,
    pub geometries: Vec<Geometry<f64>>,
    /// CRS tag shared by every record.
    pub crs: Option<Crs>,
}

impl FeatureFrame {
    /// Create a frame with a sequential index.
    pub fn new(
        data: DataFrame,
        geometries: Vec<Geometry<f64>>,
        crs: Option<Crs>,
    ) -> Result<Self, FrameError> {
        check_height(&data, geometries.len(), "data")?;
        Ok(Self {
            index: DataFrame::empty(),
            data,
            geometries,
            crs,
        })
    }

    /// Frame holding geometries only.
    pub fn from_geometries(geometries: Vec<Geometry<f64>>, crs: Option<Crs>) -> Self {
        Self {
            index: DataFrame::empty(),
            data: DataFrame::empty(),
            geometries,
            crs,
        }
    }

    /// Attach a compound index.
    pub fn with_index(mut self, index: DataFrame) -> Result<Self, FrameError> {
        check_height(&index, self.geometries.len(), "index")?;
        self.index = index;
        Ok(self)
    }

    pub fn with_crs(mut self, crs: Option<Crs>) -> Self {
        self.crs = crs;
        self
    }

    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    pub fn has_sequential_index(&self) -> bool {
        self.index.width() == 0
    }

    pub fn index_names(&self) -> Vec<String> {
        names(&self.index)
    }

    pub fn column_names(&self) -> Vec<String> {
        names(&self.data)
    }

    pub fn kinds(&self) -> Vec<GeometryKind> {
        self.geometries.iter().map(kind_of).collect()
    }

    pub fn kind_counts(&self) -> BTreeMap<GeometryKind, usize> {
        let mut counts = BTreeMap::new();
        for kind in self.kinds() {
            *counts.entry(kind).or_insert(0) += 1;
        }
        counts
    }

    /// Rows at the given positions, in that order. Positions may repeat.
    pub fn take(&self, rows: &[usize]) -> Result<Self, FrameError> {
        let geometries = rows
            .iter()
            .map(|&row| self.geometries[row].clone())
            .collect();
        Ok(Self {
            index: take_rows(&self.index, rows)?,
            data: take_rows(&self.data, rows)?,
            geometries,
            crs: self.crs.clone(),
        })
    }

    /// Rows whose mask entry is `true`.
    pub fn filter(&self, keep: &[bool]) -> Result<Self, FrameError> {
        if keep.len() != self.len() {
            return Err(FrameError::MaskLength {
                expected: self.len(),
                actual: keep.len(),
            });
        }
        let geometries = self
            .geometries
            .iter()
            .zip(keep)
            .filter(|(_, keep)| **keep)
            .map(|(geometry, _)| geometry.clone())
            .collect();
        Ok(Self {
            index: filter_rows(&self.index, keep)?,
            data: filter_rows(&self.data, keep)?,
            geometries,
            crs: self.crs.clone(),
        })
    }

    /// Rows of `self` followed by rows of `other`, keeping the CRS of `self`.
    ///
    /// Both frames must share the same column layout.
    pub fn concat(&self, other: &Self) -> Result<Self, FrameError> {
        let mut geometries = self.geometries.clone();
        geometries.extend(other.geometries.iter().cloned());
        Ok(Self {
            index: stack_rows(&self.index, &other.index)?,
            data: stack_rows(&self.data, &other.data)?,
            geometries,
            crs: self.crs.clone(),
        })
    }
}

fn names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

fn check_height(df: &DataFrame, expected: usize, part: &'static str) -> Result<(), FrameError> {
    if df.width() > 0 && df.height() != expected {
        return Err(FrameError::LengthMismatch {
            part,
            expected,
            actual: df.height(),
        });
    }
    Ok(())
}

fn take_rows(df: &DataFrame, rows: &[usize]) -> Result<DataFrame, FrameError> {
    if df.width() == 0 {
        return Ok(DataFrame::empty());
    }
    let indices: Vec<IdxSize> = rows.iter().map(|&row| row as IdxSize).collect();
    let indices = IdxCa::from_vec("rows".into(), indices);
    Ok(df.take(&indices)?)
}

fn filter_rows(df: &DataFrame, keep: &[bool]) -> Result<DataFrame, FrameError> {
    if df.width() == 0 {
        return Ok(DataFrame::empty());
    }
    let mask = BooleanChunked::from_slice("keep".into(), keep);
    Ok(df.filter(&mask)?)
}

fn stack_rows(top: &DataFrame, bottom: &DataFrame) -> Result<DataFrame, FrameError> {
    match (top.width(), bottom.width()) {
        (0, 0) => Ok(DataFrame::empty()),
        (_, 0) if bottom.height() == 0 => Ok(top.clone()),
        (0, _) if top.height() == 0 => Ok(bottom.clone()),
        _ => Ok(top.vstack(bottom)?),
    }
}
