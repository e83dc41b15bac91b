//! End-to-end scenarios: one query from start to rendered model.

mod fixtures;

use fixtures::{empty_response, error_response, event_page, widened_page};
use resultgrid::prelude::*;
use serde_json::json;

#[test]
fn test_single_page_success_renders_rows_without_footer() {
    let mut grid = ResultGrid::new();
    let token = grid.start_query();

    let response = RawQueryResponse::new(["id", "created_at"])
        .with_types([("id", "Int64"), ("created_at", "DateTime")])
        .row([json!(1), json!("2024-01-01")]);
    grid.on_response(token, &response);

    let model = grid.render();
    assert!(model.shows_rows());
    assert_eq!(model.rows.len(), 1);
    assert_eq!(model.placeholder, Placeholder::None);
    assert_eq!(model.footer, Footer::None);
    assert!(!model.loading);
}

#[test]
fn test_empty_success_shows_empty_placeholder() {
    let mut grid = ResultGrid::new();
    let token = grid.start_query();
    grid.on_response(token, &empty_response());

    let model = grid.render();
    assert_eq!(
        model.placeholder,
        Placeholder::Empty {
            heading: "There are no results for this query".to_string(),
            detail: "Try changing the date range, or query.".to_string(),
        }
    );
    assert!(model.rows.is_empty());
    assert_eq!(model.footer, Footer::None);
}

#[test]
fn test_cancellation_discards_partial_rows_from_view() {
    let mut grid = ResultGrid::new();
    let token = grid.start_query();
    grid.on_response(token, &event_page(1, 3, Some("offset:3")));

    grid.on_error(token, "whatever arrived alongside", true);

    let model = grid.render();
    assert_eq!(
        model.placeholder,
        Placeholder::Error {
            title: "The query was cancelled".to_string(),
        }
    );
    assert!(model.rows.is_empty());
    assert_eq!(model.footer, Footer::None);
}

#[test]
fn test_error_without_structured_payload_uses_lifecycle_message() {
    let mut grid = ResultGrid::new();
    let token = grid.start_query();
    grid.on_error(token, "timeout", false);

    let model = grid.render();
    assert_eq!(
        model.placeholder,
        Placeholder::Error {
            title: "timeout".to_string(),
        }
    );
}

#[test]
fn test_error_with_structured_payload_prefers_it() {
    let mut grid = ResultGrid::new();
    let token = grid.start_query();
    grid.on_response(token, &error_response("Estimated query execution time is too long"));

    let model = grid.render();
    assert_eq!(
        model.placeholder,
        Placeholder::Error {
            title: "Estimated query execution time is too long".to_string(),
        }
    );
    assert!(grid.lifecycle().is_error());
}

#[test]
fn test_widened_batch_rejected_rows_unchanged() {
    let mut grid = ResultGrid::new();
    let token = grid.start_query();
    grid.on_response(token, &event_page(1, 2, Some("offset:2")));

    grid.on_next_page(token, &widened_page());

    let model = grid.render();
    assert_eq!(model.rows.len(), 2);
    assert_eq!(model.rows[0][0].text, "1");
    assert!(matches!(
        grid.shape_errors().last(),
        Some(ShapeError::ColumnSetChanged { .. })
    ));
}

#[test]
fn test_every_presented_row_matches_column_count() {
    let mut grid = ResultGrid::new();
    let token = grid.start_query();
    grid.on_response(token, &event_page(1, 5, Some("offset:5")));
    grid.on_next_page(token, &event_page(6, 5, None));

    let model = grid.render();
    assert_eq!(model.rows.len(), 10);
    for row in &model.rows {
        assert_eq!(row.len(), model.columns.len());
    }
}

#[test]
fn test_column_order_matches_first_response_schema() {
    let mut grid = ResultGrid::new();
    let token = grid.start_query();

    let response = RawQueryResponse::new(["zeta", "alpha", "mid"])
        .row([json!(1), json!(2), json!(3)]);
    grid.on_response(token, &response);
    grid.on_next_page(
        token,
        &RawQueryResponse::new(["zeta", "alpha", "mid"]).row([json!(4), json!(5), json!(6)]),
    );

    let model = grid.render();
    let titles: Vec<&str> = model.columns.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn test_column_titles_and_hints_from_settings() {
    let shaper = ResultShaper::new().setting(
        "created_at",
        DisplaySettings::new().label("Created").format_str("date"),
    );
    let mut grid = ResultGrid::new().with_shaper(shaper);
    let token = grid.start_query();
    grid.on_response(token, &event_page(1, 1, None));

    let model = grid.render();
    assert_eq!(model.columns[2].title, "Created");
    assert_eq!(model.rows[0][2].text, "2024-01-01");
}

#[test]
fn test_mismatched_row_dropped_but_rest_renders() {
    let mut grid = ResultGrid::new();
    let token = grid.start_query();

    let response = RawQueryResponse::new(["a", "b"])
        .row([json!(1), json!(2)])
        .row([json!(3)])
        .row([json!(4), json!(5)]);
    grid.on_response(token, &response);

    let model = grid.render();
    assert_eq!(model.rows.len(), 2);
    assert!(matches!(
        grid.shape_errors().first(),
        Some(ShapeError::RowArityMismatch { .. })
    ));
}

#[test]
fn test_render_is_a_pure_rebuild() {
    let mut grid = ResultGrid::new();
    let token = grid.start_query();
    grid.on_response(token, &event_page(1, 2, Some("offset:2")));

    let first = grid.render();
    let second = grid.render();
    assert_eq!(first.rows, second.rows);
    assert_eq!(first.placeholder, second.placeholder);
    assert_eq!(first.footer, second.footer);
}

#[test]
fn test_loading_before_first_response_has_no_placeholder() {
    let mut grid = ResultGrid::new();
    grid.start_query();

    let model = grid.render();
    assert_eq!(model.placeholder, Placeholder::None);
    assert!(model.rows.is_empty());
    assert!(model.loading);
}
