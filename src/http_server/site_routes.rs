//! Landing page, stylesheet and health check

use axum::{
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};

const INDEX_HTML: &str = include_str!("../../views/index.html");
const STYLE_CSS: &str = include_str!("../../public/style.css");

/// Static routes; no state
pub fn site_routes() -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/public/style.css", get(style_handler))
        .route("/health", get(health_handler))
}

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn style_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
