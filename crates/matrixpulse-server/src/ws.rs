//! WebSocket push channel
//!
//! Clients connect to `/ws` and receive one JSON frame per second with the
//! full published state: `{"matrix": ..., "mode": ..., "alerts": [...]}`.
//! Each connection runs its own send loop; a slow or dead client only
//! affects itself.

use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    response::IntoResponse,
    routing::get,
    Router,
};
use matrixpulse_engine::Engine;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

const BROADCAST_INTERVAL: Duration = Duration::from_secs(1);

/// WebSocket adapter pushing engine snapshots
pub struct WsServer {
    engine: Arc<Engine>,
    port: u16,
}

impl WsServer {
    pub fn new(engine: Arc<Engine>, port: u16) -> Self {
        Self { engine, port }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/ws", get(ws_upgrade))
            .with_state(Arc::clone(&self.engine))
    }

    /// Serve until the shutdown signal fires; in-flight client loops end
    /// when their sockets close
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = match tokio::net::TcpListener::bind(&addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!(addr = %addr, error = %e, "websocket: failed to bind");
                return;
            }
        };

        info!(addr = %addr, "websocket: listening");

        let result = axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await;

        if let Err(e) = result {
            error!(error = %e, "websocket: server error");
        }
        info!("websocket: stopped");
    }
}

async fn ws_upgrade(
    ws: WebSocketUpgrade,
    State(engine): State<Arc<Engine>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| client_loop(socket, engine))
}

/// Push the state frame once per second until the client goes away
async fn client_loop(mut socket: WebSocket, engine: Arc<Engine>) {
    debug!("websocket: client connected");
    let mut ticker = tokio::time::interval(BROADCAST_INTERVAL);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let frame = state_frame(&engine);
                if socket.send(Message::Text(frame)).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => {
                match incoming {
                    // Inbound content is ignored; the channel is push-only.
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break,
                }
            }
        }
    }

    debug!("websocket: client disconnected");
}

/// Serialise the engine's published state triple
fn state_frame(engine: &Engine) -> String {
    let frame = serde_json::json!({
        "matrix": engine.matrix(),
        "mode": engine.mode(),
        "alerts": engine.alerts(),
    });
    frame.to_string()
}
