//! HTTP endpoints.
//!
//! - `/`        : landing page
//! - `/metrics` : Prometheus text format
//! - anything else : 404 with an empty body

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use pmetrics_core::exposition::CONTENT_TYPE;

use crate::{app_state::AppState, scrape::scrape};

const LANDING_HTML: &str = "<html><body><h1>pmetrics Prometheus Exporter</h1>\
<p><a href=\"/metrics\">Metrics</a></p></body></html>";

pub async fn index() -> impl IntoResponse {
    Html(LANDING_HTML)
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let source = state.source();
    match scrape(source.as_ref(), state.aggregate_opts(), state.fetch_timeout()).await {
        Ok(body) => (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            tracing::warn!(kind = e.kind().as_str(), error = %e, "scrape failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain")],
                format!("Error: {e}\n"),
            )
                .into_response()
        }
    }
}

pub async fn not_found() -> impl IntoResponse {
    StatusCode::NOT_FOUND
}
