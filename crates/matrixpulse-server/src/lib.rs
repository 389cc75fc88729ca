//! MatrixPulse Server
//!
//! Publication adapters: a REST pull interface and a WebSocket push
//! channel. Both read the engine's published snapshots only; adapter I/O
//! failures never reach the engine.

pub mod rest;
pub mod ws;

pub use rest::RestServer;
pub use ws::WsServer;
