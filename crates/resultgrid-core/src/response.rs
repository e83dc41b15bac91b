//! Raw query responses as delivered by the external engine.
//!
//! The response shape is owned by the upstream query engine; this crate
//! only decodes it. The schema section (`columns` + `types`) and the data
//! section (`results`) are treated as opaque input contracts: order is
//! authoritative, and nothing here re-sorts or deduplicates.

use std::fmt;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Opaque continuation token for fetching the next page of rows.
///
/// The engine defines the token's content (an offset, a key range, a server
/// cursor id); this crate only carries it back on the next fetch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Cursor(pub String);

impl Cursor {
    /// Create a cursor from its token text.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A decoded query engine payload.
///
/// # Example
///
/// ```
/// use resultgrid_core::RawQueryResponse;
///
/// let raw = serde_json::json!({
///     "columns": ["id", "created_at"],
///     "types": [["id", "Int64"], ["created_at", "DateTime"]],
///     "results": [[1, "2024-01-01 10:30:00"]],
///     "hasMore": false,
/// });
/// let response: RawQueryResponse = serde_json::from_value(raw).unwrap();
/// assert_eq!(response.columns.len(), 2);
/// assert!(response.cursor().is_none());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQueryResponse {
    /// Column names, in schema order.
    #[serde(default)]
    pub columns: Vec<String>,
    /// `(column name, engine type name)` pairs, in schema order.
    ///
    /// May be empty when the engine omits type metadata; consumers fall
    /// back to value-shape inference.
    #[serde(default)]
    pub types: Vec<(String, String)>,
    /// Row data: one array of cells per row, positionally aligned to
    /// `columns`.
    #[serde(default)]
    pub results: Vec<Vec<serde_json::Value>>,
    /// Structured error message reported inside an otherwise well-formed
    /// payload.
    #[serde(default)]
    pub error: Option<String>,
    /// Continuation token for the next page, when one exists.
    #[serde(default)]
    pub next_cursor: Option<String>,
    /// Whether more rows exist beyond this payload.
    #[serde(default)]
    pub has_more: bool,
}

impl RawQueryResponse {
    /// Create an empty response with the given column names.
    ///
    /// Intended for tests and demos; production payloads arrive via serde.
    #[must_use]
    pub fn new(columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Set the `(name, type)` metadata pairs.
    #[must_use]
    pub fn with_types<N, T>(mut self, types: impl IntoIterator<Item = (N, T)>) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        self.types = types
            .into_iter()
            .map(|(n, t)| (n.into(), t.into()))
            .collect();
        self
    }

    /// Append one data row.
    #[must_use]
    pub fn row(mut self, cells: impl IntoIterator<Item = serde_json::Value>) -> Self {
        self.results.push(cells.into_iter().collect());
        self
    }

    /// Set the structured error message.
    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    /// Set the continuation token and mark the payload as partial.
    #[must_use]
    pub fn with_next_cursor(mut self, token: impl Into<String>) -> Self {
        self.next_cursor = Some(token.into());
        self.has_more = true;
        self
    }

    /// Decode a raw engine payload.
    ///
    /// Only structural problems (wrong-typed fields) fail; missing fields
    /// fall back to their defaults.
    pub fn from_json(payload: serde_json::Value) -> Result<Self> {
        serde_json::from_value(payload).map_err(|e| Error::MalformedResponse(e.to_string()))
    }

    /// The continuation cursor, present only when more rows exist.
    #[must_use]
    pub fn cursor(&self) -> Option<Cursor> {
        if self.has_more {
            self.next_cursor.as_deref().map(Cursor::new)
        } else {
            None
        }
    }

    /// The engine type name recorded for `column`, if any.
    #[must_use]
    pub fn type_of(&self, column: &str) -> Option<&str> {
        self.types
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, ty)| ty.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_full_payload() {
        let raw = json!({
            "columns": ["id", "name"],
            "types": [["id", "Int64"], ["name", "String"]],
            "results": [[1, "Alice"], [2, "Bob"]],
            "hasMore": true,
            "nextCursor": "offset:2",
        });
        let response: RawQueryResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.columns, vec!["id", "name"]);
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.cursor(), Some(Cursor::new("offset:2")));
        assert_eq!(response.type_of("id"), Some("Int64"));
        assert_eq!(response.type_of("missing"), None);
    }

    #[test]
    fn test_deserialize_sparse_payload() {
        let raw = json!({ "columns": ["a"], "results": [["x"]] });
        let response: RawQueryResponse = serde_json::from_value(raw).unwrap();
        assert!(response.types.is_empty());
        assert!(response.error.is_none());
        assert!(!response.has_more);
        assert!(response.cursor().is_none());
    }

    #[test]
    fn test_cursor_requires_has_more() {
        // A stale token without hasMore means the page set is exhausted.
        let raw = json!({
            "columns": ["a"],
            "results": [],
            "nextCursor": "offset:10",
            "hasMore": false,
        });
        let response: RawQueryResponse = serde_json::from_value(raw).unwrap();
        assert!(response.cursor().is_none());
    }

    #[test]
    fn test_from_json_rejects_wrong_shapes() {
        let err = RawQueryResponse::from_json(json!({ "columns": 42 })).unwrap_err();
        assert!(matches!(err, crate::Error::MalformedResponse(_)));

        let ok = RawQueryResponse::from_json(json!({ "columns": ["a"] })).unwrap();
        assert_eq!(ok.columns, vec!["a"]);
    }

    #[test]
    fn test_builder_round_trip() {
        let response = RawQueryResponse::new(["id", "flag"])
            .with_types([("id", "Int64"), ("flag", "Bool")])
            .row([json!(1), json!(true)])
            .with_next_cursor("offset:1");
        assert_eq!(response.results.len(), 1);
        assert!(response.has_more);
        assert_eq!(response.cursor(), Some(Cursor::new("offset:1")));
    }
}
