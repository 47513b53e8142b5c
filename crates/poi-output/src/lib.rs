//! GeoJSON output for normalized feature frames.

use std::path::Path;

use anyhow::{Context, Result};
use geojson::{Feature, FeatureCollection, GeoJson, JsonObject};
use polars::prelude::{AnyValue, Series};
use poi_core::FeatureFrame;
use poi_model::Crs;
use serde_json::{Number, Value, json};
use tracing::debug;

/// Convert a frame into a GeoJSON feature collection.
///
/// Index levels and attribute columns become properties (index first);
/// nulls are written as JSON `null`. The CRS, when set, is written as the
/// legacy `crs` member.
pub fn to_feature_collection(frame: &FeatureFrame) -> Result<FeatureCollection> {
    let columns: Vec<&Series> = frame
        .index
        .get_columns()
        .iter()
        .chain(frame.data.get_columns())
        .map(|column| column.as_materialized_series())
        .collect();

    let mut features = Vec::with_capacity(frame.len());
    for (row, geometry) in frame.geometries.iter().enumerate() {
        let mut properties = JsonObject::new();
        for series in &columns {
            let value = series
                .get(row)
                .with_context(|| format!("read {} at row {row}", series.name()))?;
            properties.insert(series.name().to_string(), any_to_json(value));
        }
        features.push(Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(geometry))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        });
    }

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: frame.crs.as_ref().map(crs_member),
    })
}

fn crs_member(crs: &Crs) -> JsonObject {
    let mut members = JsonObject::new();
    members.insert(
        "crs".to_string(),
        json!({"type": "name", "properties": {"name": crs.to_urn()}}),
    );
    members
}

/// JSON form of a cell value.
pub fn any_to_json(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(value) => Value::Bool(value),
        AnyValue::Int8(value) => Value::from(value),
        AnyValue::Int16(value) => Value::from(value),
        AnyValue::Int32(value) => Value::from(value),
        AnyValue::Int64(value) => Value::from(value),
        AnyValue::UInt8(value) => Value::from(value),
        AnyValue::UInt16(value) => Value::from(value),
        AnyValue::UInt32(value) => Value::from(value),
        AnyValue::UInt64(value) => Value::from(value),
        AnyValue::Float32(value) => float_to_json(f64::from(value)),
        AnyValue::Float64(value) => float_to_json(value),
        AnyValue::String(value) => Value::String(value.to_string()),
        AnyValue::StringOwned(value) => Value::String(value.to_string()),
        other => Value::String(other.to_string()),
    }
}

fn float_to_json(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Serialize a frame as pretty-printed GeoJSON.
pub fn to_geojson_string(frame: &FeatureFrame) -> Result<String> {
    let document = GeoJson::from(to_feature_collection(frame)?);
    serde_json::to_string_pretty(&document).context("serialize geojson")
}

/// Write a frame to a GeoJSON file.
pub fn write_geojson(frame: &FeatureFrame, path: &Path) -> Result<()> {
    let text = to_geojson_string(frame)?;
    std::fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
    debug!(path = %path.display(), features = frame.len(), "wrote geojson");
    Ok(())
}
