//! The event-driven grid orchestrator.
//!
//! [`ResultGrid`] ties the pieces together for one display surface: it owns
//! the pagination controller and the render-model builder, holds the latest
//! lifecycle snapshot, and rebuilds the presentation model on demand.
//!
//! Everything is single-threaded and event-driven. The host delivers
//! discrete events (response arrival, next-page arrival, failure,
//! cancellation), each stamped with the [`QueryToken`] of the query it
//! belongs to; events for superseded queries are discarded. No method
//! blocks: fetch dispatch goes through the fire-and-forget
//! [`QueryEngine`] trait and completion arrives later as another event.

use resultgrid_core::{QueryLifecycle, QueryToken, RawQueryResponse, ShapeError};
use resultgrid_paginate::{PaginationController, QueryEngine, ResultShaper};
use resultgrid_render::{RenderContext, RenderModel, RenderModelBuilder};

/// Orchestrates shaping, accumulation, and rendering for one query surface.
///
/// A grid serves one query at a time. Starting a new query allocates a
/// fresh token and a fresh accumulator; late events carrying an older
/// token are discarded, so two queries racing each other can never
/// interleave their batches.
#[derive(Debug)]
pub struct ResultGrid {
    shaper: ResultShaper,
    controller: PaginationController,
    builder: RenderModelBuilder,
    lifecycle: QueryLifecycle,
    response_error: Option<String>,
}

impl ResultGrid {
    /// Create a grid with default shaping and rendering configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shaper: ResultShaper::new(),
            controller: PaginationController::new(QueryToken::next()),
            builder: RenderModelBuilder::default(),
            lifecycle: QueryLifecycle::Idle,
            response_error: None,
        }
    }

    /// Use `shaper` for response shaping (carrying per-column display
    /// settings).
    #[must_use]
    pub fn with_shaper(mut self, shaper: ResultShaper) -> Self {
        self.shaper = shaper;
        self
    }

    /// Use `context` for cell formatting.
    #[must_use]
    pub fn with_context(mut self, context: RenderContext) -> Self {
        self.builder = RenderModelBuilder::new(context);
        self
    }

    /// The token of the query currently owning this grid.
    #[must_use]
    pub fn token(&self) -> QueryToken {
        self.controller.token()
    }

    /// The latest lifecycle snapshot.
    #[must_use]
    pub fn lifecycle(&self) -> &QueryLifecycle {
        &self.lifecycle
    }

    /// Defects recovered so far for the current query.
    #[must_use]
    pub fn shape_errors(&self) -> &[ShapeError] {
        self.controller.shape_errors()
    }

    /// Begin a new query, superseding any previous one.
    ///
    /// Returns the token the host must stamp on every event belonging to
    /// this query. All previously accumulated state is discarded.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn start_query(&mut self) -> QueryToken {
        let token = QueryToken::next();
        tracing::debug!(token = %token, "Starting query");
        self.controller.reset(token, Vec::new());
        self.lifecycle = QueryLifecycle::Loading;
        self.response_error = None;
        token
    }

    /// Deliver the initial response for the query identified by `token`.
    ///
    /// Fixes the column set for the query's lifetime and appends the first
    /// batch. A payload carrying a structured error moves the lifecycle to
    /// the error state instead.
    #[tracing::instrument(level = "debug", skip(self, response))]
    pub fn on_response(&mut self, token: QueryToken, response: &RawQueryResponse) {
        if token != self.controller.token() {
            // Route through the controller so the stale batch is reported.
            let batch = self.shaper.shape(response);
            self.controller.append_batch(token, batch, response.cursor());
            return;
        }

        if let Some(message) = response.error.as_deref() {
            self.response_error = Some(message.to_string());
            self.lifecycle = QueryLifecycle::failed(message);
            return;
        }

        let batch = self.shaper.shape(response);
        self.controller.reset(token, batch.columns.clone());
        self.controller.append_batch(token, batch, response.cursor());
        self.response_error = None;
        self.lifecycle = QueryLifecycle::Success;
    }

    /// Deliver a pagination response for the query identified by `token`.
    ///
    /// Appends the batch after the existing rows; a diverging column set
    /// or a stale token appends nothing (the defect is reported and prior
    /// rows remain untouched).
    #[tracing::instrument(level = "debug", skip(self, response))]
    pub fn on_next_page(&mut self, token: QueryToken, response: &RawQueryResponse) {
        if let Some(message) = response.error.as_deref() {
            if token == self.controller.token() {
                self.response_error = Some(message.to_string());
                self.lifecycle = QueryLifecycle::failed(message);
                self.controller.handle_fetch_failure();
            }
            return;
        }

        let batch = self.shaper.shape(response);
        let appended = self.controller.append_batch(token, batch, response.cursor());
        if token == self.controller.token() {
            self.response_error = None;
            self.lifecycle = QueryLifecycle::Success;
        }
        tracing::debug!(token = %token, appended, "Pagination response handled");
    }

    /// Deliver an engine-reported failure or a user cancellation for the
    /// query identified by `token`.
    ///
    /// Cancellation takes priority over any concurrently-arriving error
    /// payload and never mutates accumulated rows.
    #[tracing::instrument(level = "debug", skip(self, message))]
    pub fn on_error(&mut self, token: QueryToken, message: &str, cancelled: bool) {
        if token != self.controller.token() {
            tracing::debug!(token = %token, "Ignoring failure for superseded query");
            return;
        }
        if cancelled {
            self.controller.handle_cancellation();
            self.lifecycle = QueryLifecycle::cancelled();
        } else {
            self.controller.handle_fetch_failure();
            self.lifecycle = QueryLifecycle::failed(message);
        }
    }

    /// Request the next page through the engine.
    ///
    /// Delegates to the controller's coalescing `load_next`; when a fetch
    /// is actually dispatched the lifecycle re-enters `Loading`.
    pub fn load_next(&mut self, engine: &mut dyn QueryEngine) {
        if self.controller.load_next(engine) {
            self.lifecycle = QueryLifecycle::Loading;
        }
    }

    /// Build a fresh presentation model from the current state.
    ///
    /// Models are rebuilt, never mutated in place.
    #[must_use]
    pub fn render(&self) -> RenderModel {
        self.builder.build(
            self.controller.accumulated(),
            &self.lifecycle,
            self.response_error.as_deref(),
        )
    }
}

impl Default for ResultGrid {
    fn default() -> Self {
        Self::new()
    }
}
