//! The correlation/regime engine
//!
//! Owns the per-symbol rolling windows and the published state triple
//! (matrix, mode, alert ring). Ingest is high-frequency and touches only
//! the target symbol's window; compute is low-frequency and heavy, so the
//! new matrix and mode are built entirely off-lock and swapped in under a
//! short exclusive section. Readers receive shared immutable snapshots.

use crate::eigen;
use crate::ring::AlertRing;
use crate::stats;
use crate::window::RollingWindow;
use chrono::Utc;
use matrixpulse_core::{
    Alert, AlertLevel, AlertsConfig, MatrixSnapshot, ModeSnapshot, Regime, Tick,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Fixed capacity of the alert ring
pub const ALERT_RING_CAPACITY: usize = 100;

/// Condition-number ratio above which the correlation matrix is deemed
/// ill-conditioned and the regime reads STRESSED
const CONDITION_STRESSED_THRESHOLD: f64 = 50.0;

/// Real-time correlation matrix and market regime engine
pub struct Engine {
    symbols: Vec<String>,
    windows: HashMap<String, RollingWindow>,
    thresholds: AlertsConfig,
    published: RwLock<Published>,
}

/// The state triple readers observe, guarded by one lock
struct Published {
    matrix: Option<Arc<MatrixSnapshot>>,
    mode: Option<Arc<ModeSnapshot>>,
    alerts: AlertRing,
}

impl Engine {
    /// Create an engine for a fixed symbol universe
    pub fn new(symbols: Vec<String>, window_size: usize, thresholds: AlertsConfig) -> Self {
        let windows = symbols
            .iter()
            .map(|s| (s.clone(), RollingWindow::new(window_size)))
            .collect();

        Self {
            symbols,
            windows,
            thresholds,
            published: RwLock::new(Published {
                matrix: None,
                mode: None,
                alerts: AlertRing::new(ALERT_RING_CAPACITY),
            }),
        }
    }

    /// The engine's symbol universe, in matrix order
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Push a tick into its symbol's window
    ///
    /// Ticks for symbols outside the configured universe are dropped; the
    /// universe is fixed at construction.
    pub fn ingest(&self, tick: Tick) {
        match self.windows.get(&tick.symbol) {
            Some(window) => window.push(tick.price),
            None => trace!(symbol = %tick.symbol, "dropping tick for unknown symbol"),
        }
    }

    /// Run one full compute cycle: covariance/correlation matrix, then the
    /// eigen/regime step
    ///
    /// Aborts with no observable state change while any window holds fewer
    /// than two samples. Intended to have a single caller (the compute
    /// loop); interior locking keeps it safe regardless.
    pub fn compute(&self) {
        let n = self.symbols.len();
        let mut returns = Vec::with_capacity(n);
        let mut means = Vec::with_capacity(n);
        let mut stds = Vec::with_capacity(n);

        for symbol in &self.symbols {
            let prices = self.windows[symbol].snapshot();
            if prices.len() < 2 {
                debug!(
                    symbol = %symbol,
                    samples = prices.len(),
                    "insufficient data, skipping compute cycle"
                );
                return;
            }
            let series = stats::log_returns(&prices);
            let mean = stats::mean(&series);
            let std = stats::std_dev(&series, mean);
            returns.push(series);
            means.push(mean);
            stds.push(std);
        }

        let mut cov = vec![vec![0.0; n]; n];
        let mut cor = vec![vec![0.0; n]; n];
        let mut spikes = Vec::new();

        for i in 0..n {
            for j in i..n {
                let c = stats::covariance(&returns[i], &returns[j], means[i], means[j]);
                cov[i][j] = c;
                cov[j][i] = c;

                if i == j {
                    cor[i][j] = 1.0;
                } else if stds[i] > 0.0 && stds[j] > 0.0 {
                    let r = c / (stds[i] * stds[j]);
                    cor[i][j] = r;
                    cor[j][i] = r;

                    if r.abs() > self.thresholds.correlation {
                        spikes.push(Alert {
                            level: AlertLevel::High,
                            symbol: format!("{}-{}", self.symbols[i], self.symbols[j]),
                            message: "correlation spike".to_string(),
                            value: r,
                            threshold: self.thresholds.correlation,
                            time: Utc::now(),
                        });
                    }
                }
            }
        }

        let matrix = Arc::new(MatrixSnapshot {
            symbols: self.symbols.clone(),
            cov,
            cor,
            time: Utc::now(),
        });

        {
            let mut published = self.published.write();
            for alert in spikes {
                published.alerts.push(alert);
            }
            published.matrix = Some(Arc::clone(&matrix));
        }

        self.compute_mode(&matrix.cor);
    }

    /// Eigen-decompose the correlation matrix and publish the mode snapshot
    fn compute_mode(&self, cor: &[Vec<f64>]) {
        let eigenvalues = match eigen::symmetric_eigenvalues(cor) {
            Ok(values) => values,
            Err(e) => {
                warn!(error = %e, "skipping mode update for this cycle");
                return;
            }
        };

        let (max_eigen, condition) = spectrum_stats(&eigenvalues);

        let mut regime = Regime::Normal;
        let mut critical = None;
        if max_eigen > self.thresholds.eigenvalue {
            regime = Regime::Crisis;
            critical = Some(Alert {
                level: AlertLevel::Critical,
                symbol: "MARKET".to_string(),
                message: "crisis mode detected".to_string(),
                value: max_eigen,
                threshold: self.thresholds.eigenvalue,
                time: Utc::now(),
            });
        } else if condition > CONDITION_STRESSED_THRESHOLD {
            regime = Regime::Stressed;
        }

        let mode = Arc::new(ModeSnapshot {
            eigenvalues,
            max_eigen,
            condition,
            regime,
            time: Utc::now(),
        });

        let mut published = self.published.write();
        if let Some(alert) = critical {
            published.alerts.push(alert);
        }
        published.mode = Some(mode);
    }

    /// Most recently published matrix, if any cycle has completed
    pub fn matrix(&self) -> Option<Arc<MatrixSnapshot>> {
        self.published.read().matrix.clone()
    }

    /// Most recently published mode, if any cycle has completed
    pub fn mode(&self) -> Option<Arc<ModeSnapshot>> {
        self.published.read().mode.clone()
    }

    /// Chronological copy of the alert ring
    pub fn alerts(&self) -> Vec<Alert> {
        self.published.read().alerts.snapshot()
    }
}

/// Largest eigenvalue and condition number of a real spectrum
///
/// The condition number is the ratio of the largest eigenvalue to the
/// smallest strictly positive one; a spectrum with no positive entry gets
/// an infinite condition number.
fn spectrum_stats(eigenvalues: &[f64]) -> (f64, f64) {
    let max_eigen = eigenvalues
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let min_positive = eigenvalues
        .iter()
        .copied()
        .filter(|v| *v > 0.0)
        .fold(f64::INFINITY, f64::min);

    let condition = if min_positive.is_finite() {
        max_eigen / min_positive
    } else {
        f64::INFINITY
    };

    (max_eigen, condition)
}
