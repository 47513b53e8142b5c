//! Tests for FeatureFrame and its row operations.

mod common;

use polars::prelude::{AnyValue, DataFrame, IntoColumn, NamedFrom, Series};
use poi_core::{FeatureFrame, FrameError, flatten_index, reduce_to_points};
use poi_model::{Crs, GeometryKind, OtherGeometryPolicy};

use common::{multi_squares, osm_frame, pt, square_geometry};

#[test]
fn rejects_mismatched_lengths() {
    let data = DataFrame::new(vec![
        Series::new("name".into(), vec!["a", "b"]).into_column(),
    ])
    .unwrap();
    let result = FeatureFrame::new(data, vec![pt(0.0, 0.0)], None);
    assert!(matches!(
        result,
        Err(FrameError::LengthMismatch { part: "data", expected: 1, actual: 2 })
    ));
}

#[test]
fn flatten_keeps_record_id_as_leading_column() {
    let frame = osm_frame(
        vec![pt(0.0, 0.0), pt(1.0, 1.0)],
        vec![("name", vec![Some("a"), Some("b")])],
        Crs::wgs84(),
    );

    let flat = flatten_index(&frame, "element").unwrap();

    assert!(flat.has_sequential_index());
    assert_eq!(flat.column_names(), vec!["id", "name"]);
    assert_eq!(flat.data.column("id").unwrap().get(1).unwrap(), AnyValue::Int64(2));
}

#[test]
fn flatten_requires_level() {
    let frame = osm_frame(vec![pt(0.0, 0.0)], vec![], Crs::wgs84());

    let error = flatten_index(&frame, "type").unwrap_err();

    let frame_error = error.downcast_ref::<FrameError>().unwrap();
    assert!(matches!(frame_error, FrameError::MissingIndexLevel { level, .. } if level == "type"));
}

#[test]
fn take_repeats_rows() {
    let frame = osm_frame(
        vec![pt(0.0, 0.0), pt(1.0, 1.0)],
        vec![("name", vec![Some("a"), Some("b")])],
        Crs::wgs84(),
    );

    let taken = frame.take(&[1, 1, 0]).unwrap();

    assert_eq!(taken.len(), 3);
    assert_eq!(taken.data.height(), 3);
    assert_eq!(taken.index.height(), 3);
    let names = taken.data.column("name").unwrap();
    assert_eq!(names.get(0).unwrap(), AnyValue::String("b"));
    assert_eq!(names.get(2).unwrap(), AnyValue::String("a"));
}

#[test]
fn filter_checks_mask_length() {
    let frame = FeatureFrame::from_geometries(vec![pt(0.0, 0.0)], None);
    assert!(matches!(
        frame.filter(&[true, false]),
        Err(FrameError::MaskLength { expected: 1, actual: 2 })
    ));
}

#[test]
fn geometry_only_frames_support_row_operations() {
    let frame = FeatureFrame::from_geometries(vec![pt(0.0, 0.0), pt(1.0, 0.0)], None);

    let filtered = frame.filter(&[false, true]).unwrap();
    let joined = filtered.concat(&frame).unwrap();

    assert_eq!(joined.len(), 3);
    assert_eq!(joined.data.width(), 0);
}

#[test]
fn counts_kinds() {
    let frame = osm_frame(
        vec![pt(0.0, 0.0), square_geometry(0.0, 0.0, 1.0), pt(3.0, 3.0)],
        vec![],
        Crs::wgs84(),
    );
    let counts = frame.kind_counts();
    assert_eq!(counts.get(&GeometryKind::Point), Some(&2));
    assert_eq!(counts.get(&GeometryKind::Polygon), Some(&1));
    assert_eq!(counts.get(&GeometryKind::MultiPolygon), None);
}

#[test]
fn reduction_copies_attributes_per_part() {
    let frame = osm_frame(
        vec![multi_squares(&[(0.0, 0.0), (4.0, 0.0), (8.0, 0.0)], 2.0)],
        vec![("name", vec![Some("park")])],
        Crs::epsg(3857),
    );

    let reduction = reduce_to_points(&frame, OtherGeometryPolicy::PassThrough, &Crs::wgs84())
        .unwrap();

    assert_eq!(reduction.frame.len(), 3);
    assert_eq!(reduction.exploded, 2);
    assert_eq!(reduction.frame.crs, Some(Crs::wgs84()));
    assert_eq!(reduction.frame.data.column("name").unwrap().null_count(), 0);
}
