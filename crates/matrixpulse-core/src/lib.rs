//! MatrixPulse Core
//!
//! Shared types, configuration, and errors for the MatrixPulse
//! correlation/regime engine.

pub mod config;
pub mod error;
pub mod types;

pub use config::{
    AlertsConfig, AppConfig, DashboardConfig, PersistenceConfig, RestConfig, WebSocketConfig,
};
pub use error::{ConfigError, EngineError, PersistenceError};
pub use types::{Alert, AlertLevel, MatrixSnapshot, ModeSnapshot, Regime, Tick};
