//! The presentation model consumed by the display layer.

use std::sync::Arc;

use resultgrid_core::{CellValue, ColumnDescriptor, RawRow};

use crate::format::{self, PresentedCell, RenderContext};

/// One row of formatted cells, positionally aligned to
/// [`RenderModel::columns`].
pub type PresentedRow = Vec<PresentedCell>;

/// A column descriptor bound to the render context.
///
/// Built once per column-set or context change (never per row), so the
/// display layer can format any cell of the column without re-deriving the
/// binding.
#[derive(Debug, Clone)]
pub struct ColumnRenderer {
    column: ColumnDescriptor,
    context: Arc<RenderContext>,
}

impl ColumnRenderer {
    /// Bind `column` to `context`.
    #[must_use]
    pub fn new(column: ColumnDescriptor, context: Arc<RenderContext>) -> Self {
        Self { column, context }
    }

    /// The bound column.
    #[must_use]
    pub fn column(&self) -> &ColumnDescriptor {
        &self.column
    }

    /// Format one cell of this column.
    #[must_use]
    pub fn render(&self, value: &CellValue, row: &RawRow, row_index: usize) -> PresentedCell {
        format::format(&self.column, value, row, row_index, &self.context)
    }
}

/// Display spec for one column: header title plus bound renderer.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    /// Header title (the settings label when present, else the column
    /// name).
    pub title: String,
    /// The bound cell formatter.
    pub renderer: ColumnRenderer,
}

/// Bind a column set to a shared context.
#[must_use]
pub fn bind_columns(
    columns: &[ColumnDescriptor],
    context: &Arc<RenderContext>,
) -> Vec<ColumnSpec> {
    columns
        .iter()
        .map(|column| ColumnSpec {
            title: column.title().to_string(),
            renderer: ColumnRenderer::new(column.clone(), Arc::clone(context)),
        })
        .collect()
}

/// Substitute content shown instead of row data.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Placeholder {
    /// Rows render normally.
    #[default]
    None,
    /// The query succeeded but returned nothing.
    Empty {
        /// Primary message.
        heading: String,
        /// Guidance for the user.
        detail: String,
    },
    /// The query failed or was cancelled.
    Error {
        /// Error title shown to the user.
        title: String,
    },
}

/// The pagination affordance descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Footer {
    /// No affordance: nothing loaded yet, or no further pages exist.
    #[default]
    None,
    /// Offer loading the next page.
    LoadMore {
        /// Rows already loaded, for "showing first N rows" messaging.
        loaded_rows: usize,
    },
}

/// The complete presentation model for one render pass.
///
/// Rebuilt from scratch on every relevant state change; never mutated in
/// place. Exactly one of rows / empty placeholder / error placeholder is
/// populated at any time.
#[derive(Debug, Clone, Default)]
pub struct RenderModel {
    /// Column display specs, in schema order.
    pub columns: Vec<ColumnSpec>,
    /// Formatted rows, each aligned to `columns`.
    pub rows: Vec<PresentedRow>,
    /// Placeholder directive.
    pub placeholder: Placeholder,
    /// Pagination affordance.
    pub footer: Footer,
    /// Whether a fetch is outstanding (display intermixes a loading
    /// indicator and disables the load-more affordance).
    pub loading: bool,
}

impl RenderModel {
    /// Whether the model shows rows rather than a placeholder.
    #[must_use]
    pub fn shows_rows(&self) -> bool {
        matches!(self.placeholder, Placeholder::None)
    }
}
