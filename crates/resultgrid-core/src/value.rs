//! Heterogeneous cell values.
//!
//! Query engines return cells of arbitrary type. [`CellValue`] is the
//! crate's own model of those cells, kept deliberately separate from the
//! wire representation (`serde_json::Value`) so later stages never touch
//! raw JSON.

use std::fmt;

/// A single cell value as delivered by the query engine.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// SQL NULL / JSON null.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Text value.
    Text(String),
    /// Ordered list of nested values (engine arrays and tuples).
    List(Vec<CellValue>),
    /// Ordered key/value pairs (engine maps and nested objects).
    Map(Vec<(String, CellValue)>),
}

impl CellValue {
    /// Whether this cell is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Borrow the text content, if this is a text cell.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer content, if this is an integer cell.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric content widened to `f64`, if this cell is numeric.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Convert back into a JSON value.
    ///
    /// Used for rendering structured cells as compact JSON text.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CellValue::Null => serde_json::Value::Null,
            CellValue::Bool(b) => serde_json::Value::Bool(*b),
            CellValue::Int(i) => serde_json::Value::Number((*i).into()),
            CellValue::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(serde_json::Value::Null, serde_json::Value::Number),
            CellValue::Text(s) => serde_json::Value::String(s.clone()),
            CellValue::List(items) => {
                serde_json::Value::Array(items.iter().map(CellValue::to_json).collect())
            }
            CellValue::Map(entries) => {
                let map: serde_json::Map<String, serde_json::Value> = entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect();
                serde_json::Value::Object(map)
            }
        }
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => CellValue::Null,
            serde_json::Value::Bool(b) => CellValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    CellValue::Int(i)
                } else {
                    // u64 beyond i64::MAX and all non-integers widen to f64.
                    CellValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => CellValue::Text(s),
            serde_json::Value::Array(items) => {
                CellValue::List(items.into_iter().map(CellValue::from).collect())
            }
            serde_json::Value::Object(map) => CellValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, CellValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for CellValue {
    /// The lossless string form of the value.
    ///
    /// This is the fallback every formatter degrades to, so it must succeed
    /// for any value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => write!(f, "null"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::List(_) | CellValue::Map(_) => {
                let json = self.to_json();
                match serde_json::to_string(&json) {
                    Ok(s) => write!(f, "{s}"),
                    Err(_) => write!(f, "{json}"),
                }
            }
        }
    }
}

/// One row of cells, positionally aligned to a column sequence.
///
/// Invariant (enforced by the shaper): `row.len()` equals the column count
/// of the response the row arrived in.
pub type RawRow = Vec<CellValue>;
