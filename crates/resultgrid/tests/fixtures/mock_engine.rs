//! A query engine double that records dispatches instead of fetching.

use resultgrid::{Cursor, QueryEngine, QueryToken};

/// Records every dispatched fetch; never performs I/O.
///
/// Tests deliver the "network" result themselves by calling the grid's
/// event methods, which mirrors the fire-and-forget contract: dispatch
/// returns immediately, completion arrives later as an event.
#[derive(Debug, Default)]
pub struct MockQueryEngine {
    /// Dispatched fetches, in order.
    pub fetches: Vec<(QueryToken, Cursor)>,
}

impl MockQueryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent dispatch.
    pub fn last_fetch(&self) -> Option<&(QueryToken, Cursor)> {
        self.fetches.last()
    }
}

impl QueryEngine for MockQueryEngine {
    fn fetch_next(&mut self, token: QueryToken, cursor: Cursor) {
        self.fetches.push((token, cursor));
    }
}
