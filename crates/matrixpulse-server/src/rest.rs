//! REST pull endpoints
//!
//! Serves the engine's published snapshots as JSON: `/matrix`, `/mode`,
//! and `/alerts` (each `null`/empty until the first compute cycle), plus a
//! plain-text `/health` probe. Responses carry a permissive CORS header so
//! browser dashboards can poll directly.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use matrixpulse_engine::Engine;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info};

const CORS_ALLOW_ALL: (header::HeaderName, &str) = (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*");

/// REST adapter serving engine snapshots
pub struct RestServer {
    engine: Arc<Engine>,
    port: u16,
}

impl RestServer {
    pub fn new(engine: Arc<Engine>, port: u16) -> Self {
        Self { engine, port }
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        Router::new()
            .route("/matrix", get(get_matrix))
            .route("/mode", get(get_mode))
            .route("/alerts", get(get_alerts))
            .route("/health", get(get_health))
            .with_state(Arc::clone(&self.engine))
    }

    /// Serve until the shutdown signal fires
    ///
    /// Bind and I/O failures are logged and contained here; they never
    /// propagate into the engine.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = match tokio::net::TcpListener::bind(&addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!(addr = %addr, error = %e, "rest: failed to bind");
                return;
            }
        };

        info!(addr = %addr, "rest: listening");

        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await;

        if let Err(e) = result {
            error!(error = %e, "rest: server error");
        }
        info!("rest: stopped");
    }
}

async fn get_matrix(State(engine): State<Arc<Engine>>) -> impl IntoResponse {
    ([CORS_ALLOW_ALL], Json(engine.matrix()))
}

async fn get_mode(State(engine): State<Arc<Engine>>) -> impl IntoResponse {
    ([CORS_ALLOW_ALL], Json(engine.mode()))
}

async fn get_alerts(State(engine): State<Arc<Engine>>) -> impl IntoResponse {
    ([CORS_ALLOW_ALL], Json(engine.alerts()))
}

async fn get_health() -> impl IntoResponse {
    ([CORS_ALLOW_ALL], "ok")
}
