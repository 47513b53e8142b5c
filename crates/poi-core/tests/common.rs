//! Shared builders for normalization tests.

#![allow(dead_code)]

use geo::{Geometry, MultiPolygon, Polygon, point, polygon};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use poi_core::FeatureFrame;
use poi_model::Crs;

pub fn pt(x: f64, y: f64) -> Geometry<f64> {
    Geometry::Point(point!(x: x, y: y))
}

pub fn square(x: f64, y: f64, size: f64) -> Polygon<f64> {
    polygon![
        (x: x, y: y),
        (x: x + size, y: y),
        (x: x + size, y: y + size),
        (x: x, y: y + size),
        (x: x, y: y),
    ]
}

pub fn square_geometry(x: f64, y: f64, size: f64) -> Geometry<f64> {
    Geometry::Polygon(square(x, y, size))
}

pub fn multi_squares(corners: &[(f64, f64)], size: f64) -> Geometry<f64> {
    Geometry::MultiPolygon(MultiPolygon::new(
        corners.iter().map(|&(x, y)| square(x, y, size)).collect(),
    ))
}

fn element_of(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "node",
        Geometry::MultiPolygon(_) => "relation",
        _ => "way",
    }
}

/// An OSM-style frame indexed by (element, id) with the given attribute
/// columns.
pub fn osm_frame(
    geometries: Vec<Geometry<f64>>,
    columns: Vec<(&str, Vec<Option<&str>>)>,
    crs: Crs,
) -> FeatureFrame {
    let elements: Vec<&str> = geometries.iter().map(element_of).collect();
    let ids: Vec<i64> = (1..=geometries.len() as i64).collect();
    let index = DataFrame::new(vec![
        Series::new("element".into(), elements).into_column(),
        Series::new("id".into(), ids).into_column(),
    ])
    .unwrap();
    let data_columns: Vec<Column> = columns
        .into_iter()
        .map(|(name, values)| Series::new(name.into(), values).into_column())
        .collect();
    let data = if data_columns.is_empty() {
        DataFrame::empty()
    } else {
        DataFrame::new(data_columns).unwrap()
    };
    FeatureFrame::new(data, geometries, Some(crs))
        .unwrap()
        .with_index(index)
        .unwrap()
}

pub fn coords(frame: &FeatureFrame) -> Vec<(f64, f64)> {
    frame
        .geometries
        .iter()
        .map(|geometry| match geometry {
            Geometry::Point(point) => (point.x(), point.y()),
            other => panic!("expected point, got {other:?}"),
        })
        .collect()
}

pub fn approx_eq(actual: (f64, f64), expected: (f64, f64)) -> bool {
    (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9
}
