//! Composing the final presentation model.

use std::sync::Arc;

use resultgrid_core::QueryLifecycle;
use resultgrid_paginate::AccumulatedResult;

use crate::format::RenderContext;
use crate::model::{Footer, Placeholder, PresentedRow, RenderModel, bind_columns};

/// Heading for the empty-result placeholder.
const EMPTY_HEADING: &str = "There are no results for this query";
/// Guidance for the empty-result placeholder.
const EMPTY_DETAIL: &str = "Try changing the date range, or query.";
/// Title for the cancellation placeholder.
const CANCELLED_TITLE: &str = "The query was cancelled";

/// Builds a [`RenderModel`] from accumulated rows and a lifecycle snapshot.
///
/// The builder owns the shared [`RenderContext`]; rebinding happens only
/// when the context changes, not per build and never per row.
///
/// # Placeholder policy
///
/// Priority order, first match wins:
///
/// 1. cancelled → error placeholder titled "The query was cancelled";
/// 2. error → error placeholder; the response's structured error message
///    wins over the lifecycle message when present;
/// 3. no rows and success → empty placeholder;
/// 4. otherwise rows render normally, with the loading flag mirroring the
///    lifecycle.
///
/// The load-more footer is offered iff rows exist and further pages remain.
#[derive(Debug, Clone)]
pub struct RenderModelBuilder {
    context: Arc<RenderContext>,
}

impl RenderModelBuilder {
    /// Create a builder around `context`.
    #[must_use]
    pub fn new(context: RenderContext) -> Self {
        Self {
            context: Arc::new(context),
        }
    }

    /// The shared render context.
    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Replace the render context (e.g. when display options change).
    ///
    /// Renderers bound by later builds pick up the new context.
    pub fn set_context(&mut self, context: RenderContext) {
        self.context = Arc::new(context);
    }

    /// Build a fresh presentation model.
    ///
    /// `response_error` is the structured error message carried inside the
    /// raw response payload, when the engine supplied one.
    #[must_use]
    pub fn build(
        &self,
        accumulated: &AccumulatedResult,
        lifecycle: &QueryLifecycle,
        response_error: Option<&str>,
    ) -> RenderModel {
        let columns = bind_columns(accumulated.columns(), &self.context);

        let placeholder = match lifecycle {
            QueryLifecycle::Error { cancelled: true, .. } => Placeholder::Error {
                title: CANCELLED_TITLE.to_string(),
            },
            QueryLifecycle::Error { message, .. } => {
                let title = response_error
                    .filter(|m| !m.is_empty())
                    .unwrap_or(message)
                    .to_string();
                Placeholder::Error { title }
            }
            QueryLifecycle::Success if accumulated.is_empty() => Placeholder::Empty {
                heading: EMPTY_HEADING.to_string(),
                detail: EMPTY_DETAIL.to_string(),
            },
            _ => Placeholder::None,
        };

        // Exactly one of rows / empty-state / error-state is populated.
        let rows: Vec<PresentedRow> = if matches!(placeholder, Placeholder::None) {
            accumulated
                .rows()
                .iter()
                .enumerate()
                .map(|(row_index, row)| {
                    columns
                        .iter()
                        .zip(row.iter())
                        .map(|(spec, value)| spec.renderer.render(value, row, row_index))
                        .collect()
                })
                .collect()
        } else {
            Vec::new()
        };

        let footer = if !rows.is_empty() && !accumulated.is_exhausted() {
            Footer::LoadMore {
                loaded_rows: rows.len(),
            }
        } else {
            Footer::None
        };

        RenderModel {
            columns,
            rows,
            placeholder,
            footer,
            loading: lifecycle.is_loading(),
        }
    }
}

impl Default for RenderModelBuilder {
    fn default() -> Self {
        Self::new(RenderContext::new())
    }
}
