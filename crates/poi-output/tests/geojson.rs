//! Tests for GeoJSON output.

use geo::{Geometry, point};
use polars::prelude::{AnyValue, DataFrame, IntoColumn, NamedFrom, Series};
use poi_core::FeatureFrame;
use poi_ingest::{IngestOptions, read_geojson};
use poi_model::Crs;
use poi_output::{any_to_json, to_feature_collection, to_geojson_string, write_geojson};
use serde_json::{Value, json};

fn sample_frame() -> FeatureFrame {
    let data = DataFrame::new(vec![
        Series::new("id".into(), vec![11i64, 12]).into_column(),
        Series::new("name".into(), vec![Some("Cafe"), None]).into_column(),
        Series::new("levels".into(), vec![Some(2.5f64), Some(f64::NAN)]).into_column(),
    ])
    .unwrap();
    FeatureFrame::new(
        data,
        vec![
            Geometry::Point(point!(x: 30.5, y: 50.4)),
            Geometry::Point(point!(x: 30.6, y: 50.5)),
        ],
        Some(Crs::wgs84()),
    )
    .unwrap()
}

#[test]
fn writes_properties_and_nulls() {
    let collection = to_feature_collection(&sample_frame()).unwrap();

    assert_eq!(collection.features.len(), 2);
    let first = collection.features[0].properties.as_ref().unwrap();
    assert_eq!(first.get("id"), Some(&json!(11)));
    assert_eq!(first.get("name"), Some(&json!("Cafe")));
    assert_eq!(first.get("levels"), Some(&json!(2.5)));
    let second = collection.features[1].properties.as_ref().unwrap();
    assert_eq!(second.get("name"), Some(&Value::Null));
    assert_eq!(second.get("levels"), Some(&Value::Null));
}

#[test]
fn writes_crs_member() {
    let text = to_geojson_string(&sample_frame()).unwrap();
    let document: Value = serde_json::from_str(&text).unwrap();

    assert_eq!(document["type"], json!("FeatureCollection"));
    assert_eq!(
        document["crs"]["properties"]["name"],
        json!("urn:ogc:def:crs:EPSG::4326")
    );
    assert_eq!(
        document["features"][0]["geometry"]["coordinates"],
        json!([30.5, 50.4])
    );
}

#[test]
fn omits_crs_member_when_unset() {
    let frame = sample_frame().with_crs(None);
    let collection = to_feature_collection(&frame).unwrap();
    assert!(collection.foreign_members.is_none());
}

#[test]
fn written_file_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.geojson");
    let frame = sample_frame().with_crs(Some(Crs::epsg(3857)));

    write_geojson(&frame, &path).unwrap();
    let options = IngestOptions::default().with_index_levels(Vec::<String>::new());
    let table = read_geojson(&path, &options).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.crs, Some(Crs::epsg(3857)));
    let ids = table.data.column("id").unwrap();
    assert_eq!(ids.get(1).unwrap(), AnyValue::Int64(12));
}

#[test]
fn converts_cell_values() {
    assert_eq!(any_to_json(AnyValue::Boolean(true)), json!(true));
    assert_eq!(any_to_json(AnyValue::UInt32(7)), json!(7));
    assert_eq!(any_to_json(AnyValue::Null), Value::Null);
    assert_eq!(any_to_json(AnyValue::Float64(f64::INFINITY)), Value::Null);
}
