//! HTTP scrape endpoint for smartctl-exporter.
//!
//! Every request to the metrics path runs smartctl for each configured device,
//! maps the reports and answers with the Prometheus text exposition. Nothing
//! is cached between requests.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::get,
};

use smartctl_exporter_core::{ExporterConfig, PrometheusSink, ReportSource, scrape};

/// Content type of the Prometheus text format.
pub const TEXT_FORMAT: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Shared server state.
struct AppState {
    config: ExporterConfig,
    source: Box<dyn ReportSource>,
}

/// Scrape every device and render the exposition text.
pub fn render_scrape(
    source: &dyn ReportSource,
    devices: &[String],
) -> smartctl_exporter_core::Result<String> {
    let mut sink = PrometheusSink::new();
    scrape(source, devices, &mut sink);
    sink.render()
}

async fn handle_metrics(State(state): State<Arc<AppState>>) -> Response {
    let worker = Arc::clone(&state);
    let result = tokio::task::spawn_blocking(move || {
        render_scrape(worker.source.as_ref(), &worker.config.devices)
    })
    .await;

    match result {
        Ok(Ok(body)) => ([(header::CONTENT_TYPE, TEXT_FORMAT)], body).into_response(),
        Ok(Err(e)) => {
            log::error!("failed to render metrics: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("error: {e}")).into_response()
        }
        Err(e) => {
            log::error!("scrape task failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "scrape failed".to_string()).into_response()
        }
    }
}

async fn handle_health() -> &'static str {
    "ok"
}

async fn handle_index(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let devices = if state.config.devices.is_empty() {
        serde_json::json!("scan")
    } else {
        serde_json::json!(state.config.devices)
    };
    Json(serde_json::json!({
        "name": "smartctl exporter",
        "version": smartctl_exporter_core::VERSION,
        "smartctl": state.config.smartctl_path,
        "devices": devices,
        "endpoints": {
            "/": "This index",
            state.config.metrics_path.as_str(): "Prometheus metrics for every device",
            "/health": "Liveness check",
        },
    }))
}

/// Routes the metrics endpoint may not take over.
pub const RESERVED_PATHS: &[&str] = &["/", "/health"];

/// The route the exposition is served on. Relative paths and reserved routes
/// fall back to `/metrics`.
pub fn metrics_route(path: &str) -> &str {
    if !path.starts_with('/') || RESERVED_PATHS.contains(&path) {
        log::warn!("metrics path {path:?} is not usable, serving on /metrics");
        return "/metrics";
    }
    path
}

/// Build the axum router.
pub fn build_router(mut config: ExporterConfig, source: Box<dyn ReportSource>) -> Router {
    config.metrics_path = metrics_route(&config.metrics_path).to_string();
    let metrics_path = config.metrics_path.clone();
    let state = Arc::new(AppState { config, source });

    Router::new()
        .route("/", get(handle_index))
        .route("/health", get(handle_health))
        .route(&metrics_path, get(handle_metrics))
        .with_state(state)
}

/// Run the HTTP exporter until the listener fails.
pub async fn run_server(
    config: ExporterConfig,
    source: Box<dyn ReportSource>,
) -> std::io::Result<()> {
    let addr = config.listen_addr();
    let app = build_router(config, source);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("listening on {addr}");
    axum::serve(listener, app).await
}
