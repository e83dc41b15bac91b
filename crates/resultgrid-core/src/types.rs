//! Semantic classification of column values.
//!
//! Engines describe columns with concrete type names such as `Int64`,
//! `Nullable(DateTime64(6, 'UTC'))` or `Array(String)`. The rendering
//! layer only cares about a handful of categories, so the concrete names
//! are collapsed into a [`SemanticType`] used to pick a formatter.

use std::sync::OnceLock;

use regex::Regex;

use crate::value::CellValue;

/// The inferred domain classification of a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SemanticType {
    /// Integers, floats, decimals.
    Numeric,
    /// Dates, times, timestamps.
    Temporal,
    /// Booleans.
    Boolean,
    /// Plain text (the default when nothing better is known).
    #[default]
    Text,
    /// Arrays, tuples, maps, nested objects.
    Structured,
}

/// Matches one level of type wrapper: `Nullable(T)` or `LowCardinality(T)`.
fn wrapper_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:Nullable|LowCardinality)\((.*)\)$").expect("static pattern is valid")
    })
}

impl SemanticType {
    /// Classify an engine type name.
    ///
    /// Wrapper types (`Nullable`, `LowCardinality`) are stripped before
    /// classification, so `Nullable(Float64)` classifies like `Float64`.
    /// Unrecognized names classify as [`SemanticType::Text`]; this never
    /// fails.
    ///
    /// # Example
    ///
    /// ```
    /// use resultgrid_core::SemanticType;
    ///
    /// assert_eq!(SemanticType::parse("Int64"), SemanticType::Numeric);
    /// assert_eq!(
    ///     SemanticType::parse("Nullable(DateTime64(6, 'UTC'))"),
    ///     SemanticType::Temporal
    /// );
    /// assert_eq!(SemanticType::parse("Array(String)"), SemanticType::Structured);
    /// ```
    #[must_use]
    pub fn parse(type_name: &str) -> Self {
        let mut base = type_name.trim();
        while let Some(captures) = wrapper_pattern().captures(base) {
            match captures.get(1) {
                Some(inner) => base = inner.as_str().trim(),
                None => break,
            }
        }

        let head = base
            .split(|c: char| c == '(' || c.is_whitespace())
            .next()
            .unwrap_or(base);

        match head.to_ascii_lowercase().as_str() {
            "int8" | "int16" | "int32" | "int64" | "int128" | "int256" | "uint8" | "uint16"
            | "uint32" | "uint64" | "uint128" | "uint256" | "float32" | "float64" | "decimal"
            | "decimal32" | "decimal64" | "decimal128" | "int" | "integer" | "bigint"
            | "smallint" | "tinyint" | "float" | "double" | "real" | "numeric" => {
                SemanticType::Numeric
            }
            "date" | "date32" | "datetime" | "datetime64" | "time" | "time64" | "timestamp"
            | "timestamptz" | "interval" => SemanticType::Temporal,
            "bool" | "boolean" => SemanticType::Boolean,
            "array" | "tuple" | "map" | "nested" | "json" | "object" | "variant" => {
                SemanticType::Structured
            }
            _ => SemanticType::Text,
        }
    }

    /// Infer a classification from a value's shape.
    ///
    /// Used when a response carries no type metadata for a column. Text
    /// values are sniffed for ISO date/timestamp shapes so temporal columns
    /// still format sensibly without schema information.
    #[must_use]
    pub fn infer(value: &CellValue) -> Self {
        match value {
            CellValue::Bool(_) => SemanticType::Boolean,
            CellValue::Int(_) | CellValue::Float(_) => SemanticType::Numeric,
            CellValue::List(_) | CellValue::Map(_) => SemanticType::Structured,
            CellValue::Text(s) if looks_temporal(s) => SemanticType::Temporal,
            CellValue::Text(_) | CellValue::Null => SemanticType::Text,
        }
    }

    /// Infer a classification from a column of sample values.
    ///
    /// The first non-null value decides; an all-null column stays
    /// [`SemanticType::Text`].
    #[must_use]
    pub fn infer_from_samples<'a, I>(samples: I) -> Self
    where
        I: IntoIterator<Item = &'a CellValue>,
    {
        samples
            .into_iter()
            .find(|v| !v.is_null())
            .map_or(SemanticType::Text, SemanticType::infer)
    }

    /// Whether values of this type right-align in tabular output.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, SemanticType::Numeric)
    }
}

/// Whether a string looks like an ISO date (`YYYY-MM-DD`) or timestamp.
fn looks_temporal(s: &str) -> bool {
    let trimmed = s.trim();
    let bytes = trimmed.as_bytes();

    // Date prefix: YYYY-MM-DD with digit positions checked.
    let has_date_prefix = bytes.len() >= 10
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..7].iter().all(u8::is_ascii_digit)
        && bytes[7] == b'-'
        && bytes[8..10].iter().all(u8::is_ascii_digit);

    if !has_date_prefix {
        return false;
    }

    // Bare date, or date followed by a time section.
    trimmed.len() == 10
        || ((bytes[10] == b'T' || bytes[10] == b' ') && trimmed.contains(':'))
}
