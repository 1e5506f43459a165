//! pmetrics Prometheus exporter.
//!
//! - `GET /metrics` reads the pmetrics store and renders the text format
//! - `GET /` serves a landing page
//! - `DATABASE_URL` is required, `PORT` defaults to 9187

use std::fmt::Display;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use pmetrics_exporter::{app_state::AppState, config, router, source::PostgresSource};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = config::load_from_env().unwrap_or_else(|e| fatal("configuration error", e));
    let listen = cfg
        .exporter
        .listen_addr()
        .unwrap_or_else(|e| fatal("configuration error", e));
    let database_url = cfg
        .exporter
        .database_url()
        .unwrap_or_else(|e| fatal("configuration error", e))
        .to_string();

    let state = AppState::new(cfg, Arc::new(PostgresSource::new(database_url)));
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .unwrap_or_else(|e| fatal("failed to bind", e));

    tracing::info!(%listen, "pmetrics exporter listening");
    tracing::info!("metrics available at http://{listen}/metrics");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        fatal("server failed", e);
    }
    tracing::info!("shutting down");
}

fn fatal(what: &str, e: impl Display) -> ! {
    tracing::error!(error = %e, "{what}");
    std::process::exit(1);
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
