//! HTTP routes.

use axum::{Json, Router, response::Redirect, routing::get};
use serde_json::{Value, json};

use crate::{PROJECT, VERSION};

const DOCS: &str = "\
GET /         redirect to /docs
GET /docs     this page
GET /healthz  service name and version
";

/// Build the router for the service.
pub fn router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/docs", get(docs))
        .route("/healthz", get(healthz))
}

async fn root() -> Redirect {
    Redirect::to("/docs")
}

async fn docs() -> &'static str {
    DOCS
}

async fn healthz() -> Json<Value> {
    Json(json!({ "message": format!("Running '{PROJECT}' ver: '{VERSION}'") }))
}
