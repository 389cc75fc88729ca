//! Application configuration
//!
//! Loaded from a TOML file (path in `MATRIXPULSE_CONFIG`, default
//! `config.toml`); a missing file falls back to defaults. Every field is
//! validated at load time and validation failures are fatal.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Default config file path, overridable via `MATRIXPULSE_CONFIG`
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Symbol universe; fixed for the lifetime of the engine
    pub symbols: Vec<String>,
    /// Capacity of every per-symbol rolling window
    pub window_size: usize,
    /// Compute-loop frequency in Hz
    pub update_hz: u32,
    pub alerts: AlertsConfig,
    pub persistence: PersistenceConfig,
    pub dashboard: DashboardConfig,
    pub websocket: WebSocketConfig,
    pub rest: RestConfig,
}

/// Alert thresholds
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertsConfig {
    /// Absolute pairwise-correlation threshold for HIGH alerts
    pub correlation: f64,
    /// Max-eigenvalue threshold for CRITICAL alerts (CRISIS regime)
    pub eigenvalue: f64,
    /// Reserved; parsed and validated but not consumed by the engine
    pub volatility: f64,
}

/// Periodic state snapshot policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub enabled: bool,
    pub path: String,
    pub interval_seconds: u64,
}

/// Terminal dashboard settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub enabled: bool,
    pub refresh_ms: u64,
}

/// WebSocket push adapter settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct WebSocketConfig {
    pub enabled: bool,
    pub port: u16,
}

/// REST pull adapter settings
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct RestConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            symbols: ["AAPL", "GOOGL", "MSFT", "AMZN", "TSLA", "META"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            window_size: 120,
            update_hz: 40,
            alerts: AlertsConfig::default(),
            persistence: PersistenceConfig::default(),
            dashboard: DashboardConfig::default(),
            websocket: WebSocketConfig::default(),
            rest: RestConfig::default(),
        }
    }
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            correlation: 0.82,
            eigenvalue: 2.8,
            volatility: 0.04,
        }
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "matrixpulse_state.json".to_string(),
            interval_seconds: 60,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            refresh_ms: 200,
        }
    }
}

impl Default for WebSocketConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8080,
        }
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            port: 8081,
        }
    }
}

impl AppConfig {
    /// Load configuration from the configured path, falling back to defaults
    /// when the file does not exist
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("MATRIXPULSE_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let config = match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str::<AppConfig>(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path, "config file not found, using defaults");
                AppConfig::default()
            }
            Err(e) => {
                return Err(ConfigError::FileRead {
                    path: path.to_string(),
                    source: e,
                })
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate every field against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbols.is_empty() {
            return Err(ConfigError::invalid("symbols", "must specify at least one symbol"));
        }
        if self.symbols.len() > 100 {
            return Err(ConfigError::invalid(
                "symbols",
                format!("too many symbols (max 100, got {})", self.symbols.len()),
            ));
        }
        if self.window_size < 10 {
            return Err(ConfigError::invalid(
                "window_size",
                format!("too small (min 10, got {})", self.window_size),
            ));
        }
        if self.window_size > 10_000 {
            return Err(ConfigError::invalid(
                "window_size",
                format!("too large (max 10000, got {})", self.window_size),
            ));
        }
        if self.update_hz < 1 || self.update_hz > 1000 {
            return Err(ConfigError::invalid(
                "update_hz",
                format!("out of range (1-1000, got {})", self.update_hz),
            ));
        }
        if !(0.0..=1.0).contains(&self.alerts.correlation) {
            return Err(ConfigError::invalid(
                "alerts.correlation",
                format!("must be 0-1 (got {})", self.alerts.correlation),
            ));
        }
        if self.alerts.eigenvalue <= 0.0 {
            return Err(ConfigError::invalid(
                "alerts.eigenvalue",
                format!("must be positive (got {})", self.alerts.eigenvalue),
            ));
        }
        if self.alerts.volatility < 0.0 {
            return Err(ConfigError::invalid(
                "alerts.volatility",
                format!("must be non-negative (got {})", self.alerts.volatility),
            ));
        }
        if self.persistence.interval_seconds < 1 {
            return Err(ConfigError::invalid(
                "persistence.interval_seconds",
                "must be at least 1",
            ));
        }
        if self.dashboard.refresh_ms < 50 || self.dashboard.refresh_ms > 5000 {
            return Err(ConfigError::invalid(
                "dashboard.refresh_ms",
                format!("out of range (50-5000, got {})", self.dashboard.refresh_ms),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.symbols.len(), 6);
        assert_eq!(config.window_size, 120);
        assert_eq!(config.update_hz, 40);
        assert_eq!(config.alerts.correlation, 0.82);
        assert_eq!(config.alerts.eigenvalue, 2.8);
        assert_eq!(config.persistence.path, "matrixpulse_state.json");
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            symbols = ["BTC", "ETH"]
            window_size = 60

            [alerts]
            correlation = 0.9
            "#,
        )
        .unwrap();

        assert_eq!(config.symbols, vec!["BTC", "ETH"]);
        assert_eq!(config.window_size, 60);
        assert_eq!(config.alerts.correlation, 0.9);
        assert_eq!(config.alerts.eigenvalue, 2.8);
        assert_eq!(config.update_hz, 40);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_symbols() {
        let mut config = AppConfig::default();
        config.symbols.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_too_many_symbols() {
        let mut config = AppConfig::default();
        config.symbols = (0..101).map(|i| format!("SYM{i}")).collect();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_window_size_out_of_range() {
        let mut config = AppConfig::default();
        config.window_size = 9;
        assert!(config.validate().is_err());
        config.window_size = 10_001;
        assert!(config.validate().is_err());
        config.window_size = 10;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_update_hz() {
        let mut config = AppConfig::default();
        config.update_hz = 0;
        assert!(config.validate().is_err());
        config.update_hz = 1001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_correlation_out_of_unit_interval() {
        let mut config = AppConfig::default();
        config.alerts.correlation = 1.5;
        assert!(config.validate().is_err());
        config.alerts.correlation = -0.1;
        assert!(config.validate().is_err());
        config.alerts.correlation = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_eigenvalue_threshold() {
        let mut config = AppConfig::default();
        config.alerts.eigenvalue = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_refresh_ms() {
        let mut config = AppConfig::default();
        config.dashboard.refresh_ms = 49;
        assert!(config.validate().is_err());
        config.dashboard.refresh_ms = 5001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_persistence_interval() {
        let mut config = AppConfig::default();
        config.persistence.interval_seconds = 0;
        assert!(config.validate().is_err());
    }
}
