use std::collections::HashMap;
use std::path::Path;

use geo::{Geometry, GeometryCollection};
use geojson::feature::Id;
use geojson::{Feature, GeoJson, JsonObject};
use polars::prelude::{Column, DataFrame};
use poi_model::Crs;
use serde_json::Value;
use tracing::{debug, warn};

use crate::columns::ColumnBuilder;
use crate::error::{IngestError, Result};

/// Index levels of an OSM-style export: element type, then element id.
pub const DEFAULT_INDEX_LEVELS: [&str; 2] = ["element", "id"];

/// Options for loading GeoJSON into a [`GeoTable`].
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Property names lifted into the index, outermost level first.
    pub index_levels: Vec<String>,
    /// CRS assumed when the document has no `crs` member.
    pub default_crs: Option<Crs>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            index_levels: DEFAULT_INDEX_LEVELS.iter().map(ToString::to_string).collect(),
            default_crs: Some(Crs::wgs84()),
        }
    }
}

impl IngestOptions {
    pub fn with_index_levels<I, S>(mut self, levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index_levels = levels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default_crs(mut self, crs: Option<Crs>) -> Self {
        self.default_crs = crs;
        self
    }
}

/// A feature collection in columnar form.
///
/// `index` holds the index levels, `data` the remaining properties and
/// `geometries` one geometry per row.
#[derive(Debug, Clone)]
pub struct GeoTable {
    pub index: DataFrame,
    pub data: DataFrame,
    pub geometries: Vec<Geometry<f64>>,
    pub crs: Option<Crs>,
    /// Features with a `null` geometry, kept as empty geometry collections.
    pub null_geometries: usize,
}

impl GeoTable {
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }

    pub fn index_names(&self) -> Vec<String> {
        column_names(&self.index)
    }

    pub fn column_names(&self) -> Vec<String> {
        column_names(&self.data)
    }
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

/// Load a GeoJSON file.
pub fn read_geojson(path: &Path, options: &IngestOptions) -> Result<GeoTable> {
    let text = std::fs::read_to_string(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_geojson(&text, options)?;
    debug!(
        path = %path.display(),
        features = table.len(),
        columns = table.data.width(),
        null_geometries = table.null_geometries,
        "loaded geojson"
    );
    Ok(table)
}

/// Parse a GeoJSON document: a feature collection, a single feature or a
/// bare geometry.
pub fn parse_geojson(text: &str, options: &IngestOptions) -> Result<GeoTable> {
    let document: GeoJson = text.parse()?;
    let (features, foreign_members) = match document {
        GeoJson::FeatureCollection(collection) => {
            (collection.features, collection.foreign_members)
        }
        GeoJson::Feature(feature) => (vec![feature], None),
        GeoJson::Geometry(geometry) => (
            vec![Feature {
                bbox: None,
                geometry: Some(geometry),
                id: None,
                properties: None,
                foreign_members: None,
            }],
            None,
        ),
    };
    let crs = match foreign_members.as_ref().and_then(crs_member) {
        Some(name) => Some(Crs::parse(&name)?),
        None => options.default_crs.clone(),
    };
    build_table(features, crs, options)
}

/// Read the CRS name from a legacy `crs` member.
///
/// Accepts `{"type": "name", "properties": {"name": ...}}` and a plain
/// string.
fn crs_member(members: &JsonObject) -> Option<String> {
    match members.get("crs")? {
        Value::String(name) => Some(name.clone()),
        Value::Object(crs) => crs
            .get("properties")
            .and_then(|properties| properties.get("name"))
            .and_then(Value::as_str)
            .map(ToString::to_string),
        _ => None,
    }
}

fn build_table(
    features: Vec<Feature>,
    crs: Option<Crs>,
    options: &IngestOptions,
) -> Result<GeoTable> {
    let mut index_builders: Vec<ColumnBuilder> = options
        .index_levels
        .iter()
        .map(|level| ColumnBuilder::with_missing_rows(level.as_str(), 0))
        .collect();
    let mut data_builders: Vec<ColumnBuilder> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut geometries = Vec::with_capacity(features.len());
    let mut null_geometries = 0usize;

    for (feature_index, feature) in features.into_iter().enumerate() {
        let geometry = match feature.geometry {
            Some(geometry) => Geometry::<f64>::try_from(geometry.value).map_err(|error| {
                IngestError::InvalidGeometry {
                    index: feature_index,
                    message: error.to_string(),
                }
            })?,
            None => {
                null_geometries += 1;
                Geometry::GeometryCollection(GeometryCollection::default())
            }
        };
        let row = geometries.len();
        let mut properties = feature.properties.unwrap_or_default();

        let mut levels: Vec<Option<Value>> = options
            .index_levels
            .iter()
            .map(|level| properties.remove(level))
            .collect();
        if levels.iter().all(Option::is_none) {
            fill_levels_from_id(&mut levels, feature.id.as_ref());
        }
        for (builder, value) in index_builders.iter_mut().zip(levels) {
            builder.push(value);
        }

        for (key, value) in properties {
            let position = *positions.entry(key.clone()).or_insert_with(|| {
                data_builders.push(ColumnBuilder::with_missing_rows(key.as_str(), row));
                data_builders.len() - 1
            });
            data_builders[position].push(Some(value));
        }
        for builder in &mut data_builders {
            builder.fill_to(row + 1);
        }
        geometries.push(geometry);
    }

    if null_geometries > 0 {
        warn!(null_geometries, "features without geometry");
    }

    let index = frame_from_builders(index_builders)?;
    let data = frame_from_builders(data_builders)?;
    Ok(GeoTable {
        index,
        data,
        geometries,
        crs,
        null_geometries,
    })
}

/// Derive index levels from a feature id when the properties carry none.
///
/// A string id `node/123` fills the first two levels; any other id fills the
/// innermost level.
fn fill_levels_from_id(levels: &mut [Option<Value>], id: Option<&Id>) {
    let Some(id) = id else {
        return;
    };
    let id_value = match id {
        Id::String(text) => match (levels.len(), text.split_once('/')) {
            (2, Some((element, osm_id))) if !element.is_empty() => {
                levels[0] = Some(Value::String(element.to_string()));
                Some(parse_id(osm_id))
            }
            _ => Some(Value::String(text.clone())),
        },
        Id::Number(number) => Some(Value::Number(number.clone())),
    };
    if let Some(last) = levels.last_mut() {
        *last = id_value;
    }
}

fn parse_id(raw: &str) -> Value {
    raw.parse::<i64>()
        .map_or_else(|_| Value::String(raw.to_string()), Value::from)
}

fn frame_from_builders(builders: Vec<ColumnBuilder>) -> Result<DataFrame> {
    let columns: Vec<Column> = builders.into_iter().map(ColumnBuilder::finish).collect();
    Ok(DataFrame::new(columns)?)
}
