//! Query lifecycle state and query identity tokens.
//!
//! The lifecycle state machine belongs to the external query engine:
//! `Idle → Loading → (Success | Error)`, with `Loading` re-entered when a
//! new fetch (including pagination) begins. This crate only reads
//! snapshots of it to choose between rows, an empty placeholder, and an
//! error placeholder.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Snapshot of the external query engine's status for one query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryLifecycle {
    /// No query has been issued.
    #[default]
    Idle,
    /// A fetch is outstanding (initial or pagination).
    Loading,
    /// The most recent fetch completed successfully.
    Success,
    /// The most recent fetch failed or was aborted.
    Error {
        /// Engine-reported failure message.
        message: String,
        /// Whether the failure was a user-initiated cancellation.
        ///
        /// Cancellation takes priority over any concurrently-arriving
        /// error payload.
        cancelled: bool,
    },
}

impl QueryLifecycle {
    /// An error state for a user-initiated cancellation.
    #[must_use]
    pub fn cancelled() -> Self {
        QueryLifecycle::Error {
            message: "The query was cancelled".to_string(),
            cancelled: true,
        }
    }

    /// An error state for an engine-reported failure.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        QueryLifecycle::Error {
            message: message.into(),
            cancelled: false,
        }
    }

    /// Whether a fetch is outstanding.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryLifecycle::Loading)
    }

    /// Whether the query completed successfully.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, QueryLifecycle::Success)
    }

    /// Whether the query failed (including cancellation).
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, QueryLifecycle::Error { .. })
    }

    /// Whether the query was cancelled by the user.
    #[must_use]
    pub fn was_cancelled(&self) -> bool {
        matches!(
            self,
            QueryLifecycle::Error {
                cancelled: true,
                ..
            }
        )
    }

    /// The failure message, when in an error state.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        match self {
            QueryLifecycle::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Identity of one query run.
///
/// Every batch and lifecycle event is stamped with the token of the query
/// it belongs to, so a late-arriving batch from a superseded query can be
/// discarded instead of being merged into the successor's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryToken(u64);

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

impl QueryToken {
    /// Allocate the next token. Monotonic within a process.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw token value, for diagnostics.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for QueryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert_eq!(QueryLifecycle::default(), QueryLifecycle::Idle);
    }

    #[test]
    fn test_state_predicates() {
        assert!(QueryLifecycle::Loading.is_loading());
        assert!(QueryLifecycle::Success.is_success());
        assert!(QueryLifecycle::failed("boom").is_error());
        assert!(!QueryLifecycle::failed("boom").was_cancelled());
        assert!(QueryLifecycle::cancelled().was_cancelled());
    }

    #[test]
    fn test_error_message() {
        assert_eq!(QueryLifecycle::failed("timeout").error_message(), Some("timeout"));
        assert_eq!(QueryLifecycle::Success.error_message(), None);
        assert_eq!(
            QueryLifecycle::cancelled().error_message(),
            Some("The query was cancelled")
        );
    }

    #[test]
    fn test_tokens_are_unique_and_ordered() {
        let first = QueryToken::next();
        let second = QueryToken::next();
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn test_token_display() {
        let token = QueryToken::next();
        assert_eq!(token.to_string(), format!("q{}", token.value()));
    }
}
