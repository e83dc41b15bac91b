//! resultgrid — a tabular result rendering engine for analytics query UIs.
//!
//! resultgrid takes a heterogeneous query response (arbitrary columns,
//! arbitrary value types, unbounded row count) and produces a stable,
//! per-column-formatted presentation model, while tracking the query's
//! lifecycle (loading, success, error, cancellation, empty result) and
//! supporting incremental "load more" fetching without data loss or
//! duplication.
//!
//! This facade crate re-exports the whole public surface and adds
//! [`ResultGrid`], the event-driven orchestrator most applications want.
//!
//! # Example
//!
//! ```
//! use resultgrid::prelude::*;
//! use serde_json::json;
//!
//! struct NoopEngine;
//! impl QueryEngine for NoopEngine {
//!     fn fetch_next(&mut self, _token: QueryToken, _cursor: Cursor) {}
//! }
//!
//! let mut grid = ResultGrid::new();
//! let token = grid.start_query();
//!
//! let response = RawQueryResponse::new(["id", "name"])
//!     .with_types([("id", "Int64"), ("name", "String")])
//!     .row([json!(1), json!("Alice")]);
//! grid.on_response(token, &response);
//!
//! let model = grid.render();
//! assert_eq!(model.rows.len(), 1);
//! assert!(model.shows_rows());
//! ```

pub mod grid;

pub use grid::ResultGrid;

pub use resultgrid_core::{
    CellValue, ColumnDescriptor, Cursor, DisplaySettings, Error, FormatHint, QueryLifecycle,
    QueryToken, RawQueryResponse, RawRow, Result, SemanticType, ShapeError,
};
pub use resultgrid_paginate::{
    AccumulatedResult, PaginationController, QueryEngine, ResultShaper, ShapedBatch,
};
pub use resultgrid_render::{
    ColumnRenderer, ColumnSpec, Footer, Placeholder, PresentedCell, PresentedRow, RenderContext,
    RenderModel, RenderModelBuilder, RenderOptions,
};

/// Commonly used types, importable in one line.
pub mod prelude {
    pub use crate::grid::ResultGrid;
    pub use resultgrid_core::{
        CellValue, ColumnDescriptor, Cursor, DisplaySettings, FormatHint, QueryLifecycle,
        QueryToken, RawQueryResponse, SemanticType, ShapeError,
    };
    pub use resultgrid_paginate::{PaginationController, QueryEngine, ResultShaper};
    pub use resultgrid_render::{
        Footer, Placeholder, RenderContext, RenderModel, RenderModelBuilder, RenderOptions,
    };
}
