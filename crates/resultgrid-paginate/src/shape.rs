//! Normalizing raw responses into aligned batches.

use resultgrid_core::{
    CellValue, ColumnDescriptor, DisplaySettings, RawQueryResponse, RawRow, SemanticType,
    ShapeError,
};

/// A raw response normalized into aligned column and row sequences.
#[derive(Debug, Clone)]
pub struct ShapedBatch {
    /// Column descriptors in response schema order.
    pub columns: Vec<ColumnDescriptor>,
    /// Rows whose cell count matched the column count.
    pub rows: Vec<RawRow>,
    /// Defects recovered during shaping (dropped rows).
    pub dropped: Vec<ShapeError>,
}

impl ShapedBatch {
    /// Column names in schema order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Normalizes raw query responses into [`ShapedBatch`] values.
///
/// The shaper itself holds only configuration (per-column display
/// settings); shaping is a pure function of the response.
///
/// # Example
///
/// ```
/// use resultgrid_core::RawQueryResponse;
/// use resultgrid_paginate::ResultShaper;
/// use serde_json::json;
///
/// let response = RawQueryResponse::new(["id", "name"])
///     .with_types([("id", "Int64"), ("name", "String")])
///     .row([json!(1), json!("Alice")]);
///
/// let batch = ResultShaper::new().shape(&response);
/// assert_eq!(batch.columns.len(), 2);
/// assert_eq!(batch.rows.len(), 1);
/// assert!(batch.dropped.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResultShaper {
    /// Display settings applied to matching columns, by column name.
    settings: Vec<(String, DisplaySettings)>,
}

impl ResultShaper {
    /// Create a shaper with no display settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach display settings for one column.
    ///
    /// Settings for names the response never mentions are ignored.
    #[must_use]
    pub fn setting(mut self, column: impl Into<String>, settings: DisplaySettings) -> Self {
        self.settings.push((column.into(), settings));
        self
    }

    /// Shape a raw response into aligned columns and rows.
    ///
    /// Column order and names are taken from the response schema verbatim:
    /// no re-sorting, no deduplication. Each column's semantic type comes
    /// from the response's type metadata when present, otherwise from the
    /// shape of the column's first non-null value. Rows whose cell count
    /// differs from the column count are dropped and reported in
    /// [`ShapedBatch::dropped`]; shaping itself never fails.
    #[must_use]
    pub fn shape(&self, response: &RawQueryResponse) -> ShapedBatch {
        let expected = response.columns.len();

        let mut rows: Vec<RawRow> = Vec::with_capacity(response.results.len());
        let mut dropped = Vec::new();
        for (row_index, raw_row) in response.results.iter().enumerate() {
            if raw_row.len() != expected {
                let defect = ShapeError::RowArityMismatch {
                    row_index,
                    expected,
                    actual: raw_row.len(),
                };
                tracing::warn!(
                    row_index,
                    expected,
                    actual = raw_row.len(),
                    "Dropping row with mismatched cell count"
                );
                dropped.push(defect);
                continue;
            }
            rows.push(raw_row.iter().cloned().map(CellValue::from).collect());
        }

        let columns = response
            .columns
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let semantic_type = response.type_of(name).map_or_else(
                    || SemanticType::infer_from_samples(rows.iter().map(|row| &row[index])),
                    SemanticType::parse,
                );
                let mut column = ColumnDescriptor::new(name.clone(), semantic_type);
                if let Some((_, settings)) =
                    self.settings.iter().find(|(target, _)| target == name)
                {
                    column = column.with_settings(settings.clone());
                }
                column
            })
            .collect();

        ShapedBatch {
            columns,
            rows,
            dropped,
        }
    }
}
