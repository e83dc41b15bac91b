//! Core types for the resultgrid tabular rendering engine.
//!
//! `resultgrid-core` is the **foundation layer** for the resultgrid
//! workspace. It defines the data model shared by every other crate.
//!
//! # Role In The Architecture
//!
//! - **Data model**: [`CellValue`], [`RawRow`], and [`ColumnDescriptor`]
//!   represent the aligned column/row structure every later stage works on.
//! - **Wire boundary**: [`RawQueryResponse`] is the decoded form of an
//!   external query engine payload (schema section + data section + error
//!   and continuation metadata).
//! - **Classification**: [`SemanticType`] maps engine type metadata (or, as
//!   a fallback, value shapes) onto the handful of categories the formatter
//!   layer dispatches on.
//! - **Lifecycle**: [`QueryLifecycle`] mirrors the external engine's query
//!   status; [`QueryToken`] stamps every event with a query identity so
//!   late batches from superseded queries can be discarded.
//!
//! # Who Uses This Crate
//!
//! - `resultgrid-paginate` shapes responses into batches and accumulates
//!   them across pages.
//! - `resultgrid-render` formats cells and builds the presentation model.
//! - The `resultgrid` facade re-exports everything for applications.

pub mod column;
pub mod error;
pub mod lifecycle;
pub mod response;
pub mod types;
pub mod value;

pub use column::{ColumnDescriptor, DisplaySettings, FormatHint};
pub use error::{Error, Result, ShapeError};
pub use lifecycle::{QueryLifecycle, QueryToken};
pub use response::{Cursor, RawQueryResponse};
pub use types::SemanticType;
pub use value::{CellValue, RawRow};
