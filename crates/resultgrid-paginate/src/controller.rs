//! Incremental fetch coordination.

use resultgrid_core::{ColumnDescriptor, Cursor, QueryToken, ShapeError};

use crate::accumulate::AccumulatedResult;
use crate::shape::ShapedBatch;

/// The external query engine, as seen by the controller.
///
/// Dispatch is fire-and-forget: `fetch_next` must return immediately, and
/// the resulting batch (or error) is delivered later as an event stamped
/// with the same token. The controller never blocks on the engine.
pub trait QueryEngine {
    /// Request the page identified by `cursor` for the query identified by
    /// `token`.
    fn fetch_next(&mut self, token: QueryToken, cursor: Cursor);
}

/// Owns the growing row sequence and the fetch cursor for one query.
///
/// The controller is the only writer of its [`AccumulatedResult`]. It
/// enforces three invariants:
///
/// - **Coalescing**: at most one fetch is outstanding; `load_next` while a
///   fetch is in flight (or after exhaustion) is a no-op.
/// - **Column stability**: a batch whose column set differs from the set
///   fixed at reset is rejected, leaving accumulated rows untouched.
/// - **Query identity**: a batch stamped with a superseded token is
///   discarded, never merged.
///
/// Recovered defects are retained and can be inspected with
/// [`PaginationController::shape_errors`].
#[derive(Debug)]
pub struct PaginationController {
    token: QueryToken,
    accumulated: AccumulatedResult,
    in_flight: Option<Cursor>,
    errors: Vec<ShapeError>,
}

impl PaginationController {
    /// Create a controller for the query identified by `token`, with no
    /// columns fixed yet.
    #[must_use]
    pub fn new(token: QueryToken) -> Self {
        Self {
            token,
            accumulated: AccumulatedResult::default(),
            in_flight: None,
            errors: Vec::new(),
        }
    }

    /// Discard all state and bind a fresh accumulator to `columns`.
    ///
    /// Called when a new query starts (new token) or when the first
    /// successful response fixes the column set.
    #[tracing::instrument(level = "debug", skip(self, columns))]
    pub fn reset(&mut self, token: QueryToken, columns: Vec<ColumnDescriptor>) {
        self.token = token;
        self.accumulated = AccumulatedResult::new(columns);
        self.in_flight = None;
        self.errors.clear();
    }

    /// The token of the query currently owning the accumulator.
    #[must_use]
    pub fn token(&self) -> QueryToken {
        self.token
    }

    /// Read access to the accumulated result.
    #[must_use]
    pub fn accumulated(&self) -> &AccumulatedResult {
        &self.accumulated
    }

    /// Whether a fetch is currently outstanding.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Defects recovered so far (dropped rows, rejected batches, stale
    /// batches).
    #[must_use]
    pub fn shape_errors(&self) -> &[ShapeError] {
        &self.errors
    }

    /// Whether the load-more affordance should be offered: rows exist and
    /// further pages remain.
    #[must_use]
    pub fn can_load_next(&self) -> bool {
        !self.accumulated.is_empty() && !self.accumulated.is_exhausted()
    }

    /// Append a shaped batch delivered for `token`.
    ///
    /// Returns the number of rows appended. A stale token or a diverging
    /// column set appends nothing; the defect is recorded and existing
    /// rows remain untouched. Arrival of a batch (accepted or rejected)
    /// completes the outstanding fetch.
    #[tracing::instrument(level = "debug", skip(self, batch, next_cursor))]
    pub fn append_batch(
        &mut self,
        token: QueryToken,
        batch: ShapedBatch,
        next_cursor: Option<Cursor>,
    ) -> usize {
        if token != self.token {
            tracing::warn!(
                current = %self.token,
                stale = %token,
                "Discarding batch for superseded query"
            );
            self.errors.push(ShapeError::StaleBatch {
                expected: self.token,
                actual: token,
            });
            return 0;
        }

        self.in_flight = None;

        let expected: Vec<&str> = self
            .accumulated
            .columns()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        let actual = batch.column_names();
        if expected != actual {
            tracing::warn!(
                expected = ?expected,
                actual = ?actual,
                "Rejecting batch whose column set diverges from the fixed set"
            );
            self.errors.push(ShapeError::ColumnSetChanged {
                expected: expected.iter().map(ToString::to_string).collect(),
                actual: actual.iter().map(ToString::to_string).collect(),
            });
            return 0;
        }

        self.errors.extend(batch.dropped);
        let appended = self.accumulated.append(batch.rows, next_cursor);
        tracing::debug!(
            appended,
            total = self.accumulated.row_count(),
            exhausted = self.accumulated.is_exhausted(),
            "Appended batch"
        );
        appended
    }

    /// Request the next page through the engine.
    ///
    /// Returns whether a fetch was dispatched. No-op when the accumulator
    /// is exhausted, when no rows have arrived yet, or when a fetch is
    /// already outstanding; concurrent requests for the same cursor
    /// coalesce into the single outstanding fetch.
    #[tracing::instrument(level = "debug", skip(self, engine))]
    pub fn load_next(&mut self, engine: &mut dyn QueryEngine) -> bool {
        if self.in_flight.is_some() {
            tracing::debug!(token = %self.token, "load_next coalesced; fetch already in flight");
            return false;
        }
        if !self.can_load_next() {
            return false;
        }
        let Some(cursor) = self.accumulated.cursor().cloned() else {
            return false;
        };

        self.in_flight = Some(cursor.clone());
        tracing::debug!(token = %self.token, cursor = %cursor, "Dispatching next-page fetch");
        engine.fetch_next(self.token, cursor);
        true
    }

    /// React to a user-initiated cancellation of the in-flight fetch.
    ///
    /// Clears the outstanding-fetch marker without touching accumulated
    /// rows: partially received data from the cancelled fetch is
    /// discarded, never partially appended.
    pub fn handle_cancellation(&mut self) {
        if self.in_flight.take().is_some() {
            tracing::debug!(token = %self.token, "In-flight fetch cancelled");
        }
    }

    /// React to an engine-reported failure of the in-flight fetch.
    ///
    /// Completes the fetch without appending anything, so a later
    /// `load_next` may retry the same cursor once the engine recovers.
    pub fn handle_fetch_failure(&mut self) {
        if self.in_flight.take().is_some() {
            tracing::debug!(token = %self.token, "In-flight fetch failed");
        }
    }
}
