use resultgrid_core::{QueryLifecycle, QueryToken, RawQueryResponse};
use resultgrid_paginate::{PaginationController, ResultShaper};
use resultgrid_render::{Footer, Placeholder, RenderContext, RenderModel, RenderModelBuilder};
use serde_json::json;

fn print_model(title: &str, model: &RenderModel) {
    println!("== {title} ==");
    match &model.placeholder {
        Placeholder::None => {
            let titles: Vec<&str> = model.columns.iter().map(|c| c.title.as_str()).collect();
            println!("{}", titles.join(" | "));
            for row in &model.rows {
                let cells: Vec<&str> = row.iter().map(|c| c.text.as_str()).collect();
                println!("{}", cells.join(" | "));
            }
        }
        Placeholder::Empty { heading, detail } => println!("[empty] {heading} — {detail}"),
        Placeholder::Error { title } => println!("[error] {title}"),
    }
    match model.footer {
        Footer::LoadMore { loaded_rows } => println!("(showing first {loaded_rows} rows — load more)"),
        Footer::None => {}
    }
    println!();
}

fn main() {
    let context = RenderContext::new()
        .query_label("demo events query")
        .detail_link_base("/persons");
    let builder = RenderModelBuilder::new(context);

    let response = RawQueryResponse::new(["person_id", "event", "created_at", "conversion"])
        .with_types([
            ("person_id", "Int64"),
            ("event", "String"),
            ("created_at", "DateTime64(6, 'UTC')"),
            ("conversion", "Nullable(Float64)"),
        ])
        .row([json!(101), json!("pageview"), json!("2024-03-01T09:15:00Z"), json!(0.182)])
        .row([json!(102), json!("signup"), json!("2024-03-01T09:16:30Z"), json!(null)])
        .row([json!(103), json!("purchase"), json!("2024-03-01T09:20:12Z"), json!(0.947)])
        .with_next_cursor("offset:3");

    let token = QueryToken::next();
    let mut controller = PaginationController::new(token);
    let batch = ResultShaper::new().shape(&response);
    controller.reset(token, batch.columns.clone());
    controller.append_batch(token, batch, response.cursor());

    print_model(
        "First page",
        &builder.build(controller.accumulated(), &QueryLifecycle::Success, None),
    );

    let next_page = RawQueryResponse::new(["person_id", "event", "created_at", "conversion"])
        .with_types([
            ("person_id", "Int64"),
            ("event", "String"),
            ("created_at", "DateTime64(6, 'UTC')"),
            ("conversion", "Nullable(Float64)"),
        ])
        .row([json!(104), json!("pageview"), json!("2024-03-01T09:21:44Z"), json!(0.3)]);
    let batch = ResultShaper::new().shape(&next_page);
    controller.append_batch(token, batch, next_page.cursor());

    print_model(
        "After load more (exhausted)",
        &builder.build(controller.accumulated(), &QueryLifecycle::Success, None),
    );

    print_model(
        "Engine failure",
        &builder.build(
            controller.accumulated(),
            &QueryLifecycle::failed("Estimated query execution time is too long"),
            Some("Estimated query execution time is too long"),
        ),
    );

    print_model(
        "Cancellation",
        &builder.build(controller.accumulated(), &QueryLifecycle::cancelled(), None),
    );
}
