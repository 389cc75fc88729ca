//! Shared data types for the MatrixPulse engine and its adapters

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single price observation for one symbol
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tick {
    pub symbol: String,
    pub price: f64,
    pub volume: f64,
    pub time: DateTime<Utc>,
}

impl Tick {
    pub fn new(symbol: impl Into<String>, price: f64, volume: f64) -> Self {
        Self {
            symbol: symbol.into(),
            price,
            volume,
            time: Utc::now(),
        }
    }
}

/// Market regime label derived from the correlation spectrum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Regime {
    Normal,
    Stressed,
    Crisis,
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Stressed => write!(f, "STRESSED"),
            Self::Crisis => write!(f, "CRISIS"),
        }
    }
}

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    High,
    Critical,
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "HIGH"),
            Self::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A threshold-crossing event emitted by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    /// Pair key ("AAPL-MSFT") or "MARKET" for regime-wide alerts
    pub symbol: String,
    pub message: String,
    /// Observed value that crossed the threshold
    pub value: f64,
    /// Configured threshold that was crossed
    pub threshold: f64,
    pub time: DateTime<Utc>,
}

/// One published covariance/correlation matrix
///
/// Immutable once published: readers hold a shared reference that will not
/// change underneath them. `cor` is symmetric with a unit diagonal; entries
/// involving a zero-variance return series are 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixSnapshot {
    pub symbols: Vec<String>,
    pub cov: Vec<Vec<f64>>,
    pub cor: Vec<Vec<f64>>,
    pub time: DateTime<Utc>,
}

impl MatrixSnapshot {
    /// Number of symbols (matrix dimension)
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

/// One published eigen/regime snapshot
///
/// Eigenvalues are in solver order, not sorted. `condition` is
/// `max_eigen / min_positive_eigen`, or +inf when the spectrum has no
/// strictly positive entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeSnapshot {
    pub eigenvalues: Vec<f64>,
    pub max_eigen: f64,
    pub condition: f64,
    pub regime: Regime,
    pub time: DateTime<Utc>,
}
