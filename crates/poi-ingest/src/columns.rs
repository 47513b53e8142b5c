//! Column builders turning JSON property values into Polars columns.
//!
//! Each column keeps one slot per feature. Absent keys and JSON `null` are
//! stored as `None` and become Polars nulls.

use polars::prelude::{Column, IntoColumn, NamedFrom, Series};
use serde_json::Value;

/// Inferred storage type for a property column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Boolean,
    Integer,
    Float,
    Text,
}

/// Accumulates the values of one property across features.
#[derive(Debug, Clone)]
pub struct ColumnBuilder {
    name: String,
    values: Vec<Option<Value>>,
}

impl ColumnBuilder {
    /// Create a builder whose first `rows` slots are missing.
    pub fn with_missing_rows(name: impl Into<String>, rows: usize) -> Self {
        Self {
            name: name.into(),
            values: vec![None; rows],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn push(&mut self, value: Option<Value>) {
        self.values.push(value.filter(|value| !value.is_null()));
    }

    /// Pad with missing values up to `rows` slots.
    pub fn fill_to(&mut self, rows: usize) {
        if self.values.len() < rows {
            self.values.resize(rows, None);
        }
    }

    pub fn kind(&self) -> ColumnKind {
        infer_kind(self.values.iter().flatten())
    }

    pub fn finish(self) -> Column {
        let kind = self.kind();
        let name = self.name.as_str();
        let series = match kind {
            ColumnKind::Boolean => {
                let values: Vec<Option<bool>> = self
                    .values
                    .iter()
                    .map(|value| value.as_ref().and_then(Value::as_bool))
                    .collect();
                Series::new(name.into(), values)
            }
            ColumnKind::Integer => {
                let values: Vec<Option<i64>> = self
                    .values
                    .iter()
                    .map(|value| value.as_ref().and_then(Value::as_i64))
                    .collect();
                Series::new(name.into(), values)
            }
            ColumnKind::Float => {
                let values: Vec<Option<f64>> = self
                    .values
                    .iter()
                    .map(|value| value.as_ref().and_then(Value::as_f64))
                    .collect();
                Series::new(name.into(), values)
            }
            ColumnKind::Text => {
                let values: Vec<Option<String>> = self
                    .values
                    .iter()
                    .map(|value| value.as_ref().map(json_to_text))
                    .collect();
                Series::new(name.into(), values)
            }
        };
        series.into_column()
    }
}

/// Infer the narrowest column kind that holds every value.
///
/// A column with no values at all is text.
pub fn infer_kind<'a>(values: impl Iterator<Item = &'a Value>) -> ColumnKind {
    let mut kind: Option<ColumnKind> = None;
    for value in values {
        let value_kind = match value {
            Value::Bool(_) => ColumnKind::Boolean,
            Value::Number(number) if number.is_i64() => ColumnKind::Integer,
            Value::Number(_) => ColumnKind::Float,
            _ => return ColumnKind::Text,
        };
        kind = Some(match (kind, value_kind) {
            (None, next) => next,
            (Some(current), next) if current == next => current,
            (Some(ColumnKind::Integer), ColumnKind::Float)
            | (Some(ColumnKind::Float), ColumnKind::Integer) => ColumnKind::Float,
            _ => return ColumnKind::Text,
        });
    }
    kind.unwrap_or(ColumnKind::Text)
}

/// Text form of a JSON value; strings are unquoted, other values are JSON.
pub fn json_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
