//! The append-only row store for one query.

use resultgrid_core::{ColumnDescriptor, Cursor, RawRow};

/// Rows accumulated across the pages of a single query.
///
/// Created empty when a query starts and discarded when the query identity
/// changes; there is no cross-query reuse. Columns are fixed once at
/// creation; rows are append-only, so already-rendered rows never change
/// identity or position.
#[derive(Debug, Clone, Default)]
pub struct AccumulatedResult {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<RawRow>,
    cursor: Option<Cursor>,
    exhausted: bool,
}

impl AccumulatedResult {
    /// Create an empty accumulator bound to a fixed column set.
    #[must_use]
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            cursor: None,
            exhausted: false,
        }
    }

    /// The fixed column set.
    #[must_use]
    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// All rows accumulated so far, in arrival order.
    #[must_use]
    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// Number of rows accumulated so far.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows have been accumulated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The continuation token for the next page, if one exists.
    #[must_use]
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    /// Whether no further pages exist.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Append a batch of rows and advance the cursor.
    ///
    /// The accumulator becomes exhausted when the batch carries no
    /// continuation token or no rows.
    pub(crate) fn append(&mut self, rows: Vec<RawRow>, next_cursor: Option<Cursor>) -> usize {
        let appended = rows.len();
        self.exhausted = next_cursor.is_none() || appended == 0;
        self.cursor = next_cursor;
        self.rows.extend(rows);
        appended
    }
}
