//! Canned engine payloads.

use resultgrid::RawQueryResponse;
use serde_json::json;

/// Column names used by the event payloads below.
pub const EVENT_COLUMNS: [&str; 3] = ["id", "event", "created_at"];

fn event_types() -> Vec<(String, String)> {
    vec![
        ("id".to_string(), "Int64".to_string()),
        ("event".to_string(), "String".to_string()),
        ("created_at".to_string(), "DateTime64(6, 'UTC')".to_string()),
    ]
}

/// A page of event rows with ids `start..start + count`.
///
/// `next_cursor` marks the payload as partial when present.
pub fn event_page(start: i64, count: i64, next_cursor: Option<&str>) -> RawQueryResponse {
    let mut response = RawQueryResponse::new(EVENT_COLUMNS);
    response.types = event_types();
    for id in start..start + count {
        response = response.row([
            json!(id),
            json!(format!("event-{id}")),
            json!("2024-01-01T00:00:00Z"),
        ]);
    }
    match next_cursor {
        Some(cursor) => response.with_next_cursor(cursor),
        None => response,
    }
}

/// A successful response with zero rows.
pub fn empty_response() -> RawQueryResponse {
    let mut response = RawQueryResponse::new(EVENT_COLUMNS);
    response.types = event_types();
    response
}

/// A well-formed payload carrying a structured error message.
pub fn error_response(message: &str) -> RawQueryResponse {
    RawQueryResponse::new(EVENT_COLUMNS).with_error(message)
}

/// A page whose column set grew by one relative to [`EVENT_COLUMNS`].
pub fn widened_page() -> RawQueryResponse {
    RawQueryResponse::new(["id", "event", "created_at", "extra"])
        .row([json!(999), json!("event-999"), json!("2024-01-01T00:00:00Z"), json!(true)])
}
