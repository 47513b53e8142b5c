//! Integration tests for GeoJSON loading.

use std::io::Write;

use geo::Geometry;
use poi_ingest::{IngestError, IngestOptions, parse_geojson, read_geojson};
use poi_model::Crs;
use polars::prelude::{AnyValue, DataType};

const OSM_EXPORT: &str = r#"{
  "type": "FeatureCollection",
  "crs": {"type": "name", "properties": {"name": "urn:ogc:def:crs:EPSG::4326"}},
  "features": [
    {
      "type": "Feature",
      "properties": {"element": "node", "id": 101, "name": "Cafe", "amenity": "cafe"},
      "geometry": {"type": "Point", "coordinates": [30.5, 50.4]}
    },
    {
      "type": "Feature",
      "properties": {"element": "way", "id": 202, "building": "yes", "levels": 3},
      "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [2, 0], [2, 2], [0, 2], [0, 0]]]}
    },
    {
      "type": "Feature",
      "properties": {"element": "relation", "id": 303, "levels": 2.5, "wheelchair": null},
      "geometry": {
        "type": "MultiPolygon",
        "coordinates": [
          [[[10, 10], [11, 10], [11, 11], [10, 11], [10, 10]]],
          [[[20, 20], [21, 20], [21, 21], [20, 21], [20, 20]]]
        ]
      }
    }
  ]
}"#;

#[test]
fn loads_osm_feature_collection() {
    let table = parse_geojson(OSM_EXPORT, &IngestOptions::default()).unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.crs, Some(Crs::wgs84()));
    assert_eq!(table.index_names(), vec!["element", "id"]);
    assert!(matches!(table.geometries[0], Geometry::Point(_)));
    assert!(matches!(table.geometries[1], Geometry::Polygon(_)));
    assert!(matches!(table.geometries[2], Geometry::MultiPolygon(_)));

    let names = table.column_names();
    assert!(names.contains(&"name".to_string()));
    assert!(names.contains(&"building".to_string()));
    assert!(!names.contains(&"element".to_string()));
    assert_eq!(table.data.height(), 3);
}

#[test]
fn infers_column_types_and_nulls() {
    let table = parse_geojson(OSM_EXPORT, &IngestOptions::default()).unwrap();

    let levels = table.data.column("levels").unwrap();
    assert_eq!(levels.dtype(), &DataType::Float64);
    assert_eq!(levels.null_count(), 1);

    let name = table.data.column("name").unwrap();
    assert_eq!(name.dtype(), &DataType::String);
    assert_eq!(name.null_count(), 2);

    let wheelchair = table.data.column("wheelchair").unwrap();
    assert_eq!(wheelchair.null_count(), 3);

    let ids = table.index.column("id").unwrap();
    assert_eq!(ids.dtype(), &DataType::Int64);
    assert_eq!(ids.get(1).unwrap(), AnyValue::Int64(202));
}

#[test]
fn splits_overpass_style_ids() {
    let text = r#"{
      "type": "FeatureCollection",
      "features": [
        {"type": "Feature", "id": "node/42", "properties": {"shop": "bakery"},
         "geometry": {"type": "Point", "coordinates": [1, 2]}}
      ]
    }"#;
    let table = parse_geojson(text, &IngestOptions::default()).unwrap();

    let element = table.index.column("element").unwrap();
    assert_eq!(element.get(0).unwrap(), AnyValue::String("node"));
    let id = table.index.column("id").unwrap();
    assert_eq!(id.get(0).unwrap(), AnyValue::Int64(42));
}

#[test]
fn keeps_features_without_geometry_as_empty_collections() {
    let text = r#"{
      "type": "FeatureCollection",
      "features": [
        {"type": "Feature", "properties": {"element": "node", "id": 1}, "geometry": null},
        {"type": "Feature", "properties": {"element": "node", "id": 2},
         "geometry": {"type": "Point", "coordinates": [1, 2]}}
      ]
    }"#;
    let table = parse_geojson(text, &IngestOptions::default()).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.null_geometries, 1);
    assert_eq!(table.index.height(), 2);
    assert!(matches!(
        &table.geometries[0],
        Geometry::GeometryCollection(collection) if collection.0.is_empty()
    ));
    assert!(matches!(table.geometries[1], Geometry::Point(_)));
}

#[test]
fn uses_default_crs_without_member() {
    let text = r#"{"type": "Point", "coordinates": [1, 2]}"#;
    let options = IngestOptions::default().with_default_crs(Some(Crs::epsg(3857)));
    let table = parse_geojson(text, &options).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.crs, Some(Crs::epsg(3857)));
    assert_eq!(table.data.width(), 0);
}

#[test]
fn rejects_invalid_documents() {
    let result = parse_geojson("{\"type\": \"Nope\"}", &IngestOptions::default());
    assert!(matches!(result, Err(IngestError::GeoJson(_))));
}

#[test]
fn reads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(OSM_EXPORT.as_bytes()).unwrap();

    let table = read_geojson(file.path(), &IngestOptions::default()).unwrap();
    assert_eq!(table.len(), 3);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.geojson");
    let error = read_geojson(&path, &IngestOptions::default()).unwrap_err();
    assert!(matches!(error, IngestError::Io { .. }));
    assert!(error.to_string().contains("missing.geojson"));
}
