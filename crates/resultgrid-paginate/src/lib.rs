//! Response shaping and incremental accumulation for resultgrid.
//!
//! This crate owns the mutable half of the engine:
//!
//! - [`ResultShaper`] normalizes a raw engine payload into an aligned
//!   batch of columns and rows, dropping (and reporting) malformed rows.
//! - [`AccumulatedResult`] is the append-only row store for one query.
//! - [`PaginationController`] coordinates "load more" fetching: it owns
//!   the accumulator and the fetch cursor, coalesces concurrent load
//!   requests, rejects batches whose column set diverges from the set
//!   fixed at reset, and discards batches from superseded queries.
//!
//! All mutation happens in reaction to discrete events (response arrival,
//! pagination arrival, cancellation) on a single thread; fetch dispatch is
//! fire-and-forget through the [`QueryEngine`] collaborator trait.

pub mod accumulate;
pub mod controller;
pub mod shape;

pub use accumulate::AccumulatedResult;
pub use controller::{PaginationController, QueryEngine};
pub use shape::{ResultShaper, ShapedBatch};
