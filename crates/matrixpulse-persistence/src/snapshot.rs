//! Engine state snapshot serialisation

use matrixpulse_core::{Alert, MatrixSnapshot, ModeSnapshot, PersistenceError};
use matrixpulse_engine::Engine;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// The persisted form of the engine's published state
///
/// `matrix` and `mode` are null until the first compute cycle completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub matrix: Option<MatrixSnapshot>,
    pub mode: Option<ModeSnapshot>,
    pub alerts: Vec<Alert>,
}

/// Writes engine state to a JSON file
pub struct Snapshotter {
    path: PathBuf,
    engine: Arc<Engine>,
}

impl Snapshotter {
    pub fn new(path: impl Into<PathBuf>, engine: Arc<Engine>) -> Self {
        Self {
            path: path.into(),
            engine,
        }
    }

    /// Capture the current published state and write it to the configured
    /// path, replacing any previous snapshot
    pub fn save(&self) -> Result<(), PersistenceError> {
        let state = StateSnapshot {
            matrix: self.engine.matrix().map(|m| (*m).clone()),
            mode: self.engine.mode().map(|m| (*m).clone()),
            alerts: self.engine.alerts(),
        };

        let file = File::create(&self.path)?;
        serde_json::to_writer(BufWriter::new(file), &state)?;

        debug!(path = %self.path.display(), "state snapshot written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use matrixpulse_core::{AlertLevel, AlertsConfig, Regime, Tick};

    fn sample_state() -> StateSnapshot {
        StateSnapshot {
            matrix: Some(MatrixSnapshot {
                symbols: vec!["A".to_string(), "B".to_string()],
                cov: vec![vec![0.25, 0.1], vec![0.1, 0.5]],
                cor: vec![vec![1.0, 0.37], vec![0.37, 1.0]],
                time: Utc::now(),
            }),
            mode: Some(ModeSnapshot {
                eigenvalues: vec![1.37, 0.63],
                max_eigen: 1.37,
                condition: 1.37 / 0.63,
                regime: Regime::Normal,
                time: Utc::now(),
            }),
            alerts: vec![Alert {
                level: AlertLevel::High,
                symbol: "A-B".to_string(),
                message: "correlation spike".to_string(),
                value: 0.91,
                threshold: 0.82,
                time: Utc::now(),
            }],
        }
    }

    #[test]
    fn state_round_trips_through_json() {
        let state = sample_state();
        let encoded = serde_json::to_string(&state).unwrap();
        let decoded: StateSnapshot = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, state);
        let matrix = decoded.matrix.unwrap();
        assert_eq!(matrix.cor[0][1], 0.37);
        assert_eq!(matrix.cov[1][1], 0.5);
    }

    #[test]
    fn empty_state_serialises_nulls() {
        let state = StateSnapshot {
            matrix: None,
            mode: None,
            alerts: Vec::new(),
        };
        let encoded = serde_json::to_string(&state).unwrap();
        assert_eq!(encoded, r#"{"matrix":null,"mode":null,"alerts":[]}"#);
    }

    #[test]
    fn save_writes_engine_state_to_disk() {
        let engine = Arc::new(Engine::new(
            vec!["A".to_string(), "B".to_string()],
            10,
            AlertsConfig {
                correlation: 1.0,
                eigenvalue: 100.0,
                volatility: 0.04,
            },
        ));
        for k in 1..=10u32 {
            engine.ingest(Tick::new("A", 100.0 + k as f64, 1000.0));
            engine.ingest(Tick::new("B", 50.0 + (k as f64 * 1.3).sin(), 1000.0));
        }
        engine.compute();

        let path = std::env::temp_dir().join("matrixpulse_snapshot_test.json");
        let snapshotter = Snapshotter::new(&path, Arc::clone(&engine));
        snapshotter.save().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let decoded: StateSnapshot = serde_json::from_str(&content).unwrap();
        std::fs::remove_file(&path).ok();

        let live = engine.matrix().unwrap();
        let persisted = decoded.matrix.unwrap();
        assert_eq!(persisted.symbols, live.symbols);
        assert_eq!(persisted.cov, live.cov);
        assert_eq!(persisted.cor, live.cor);
        assert_eq!(persisted.time, live.time);
        assert!(decoded.mode.is_some());
    }

    #[test]
    fn save_before_first_compute_persists_nulls() {
        let engine = Arc::new(Engine::new(
            vec!["A".to_string()],
            10,
            AlertsConfig::default(),
        ));
        let path = std::env::temp_dir().join("matrixpulse_snapshot_empty_test.json");
        let snapshotter = Snapshotter::new(&path, engine);
        snapshotter.save().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        let decoded: StateSnapshot = serde_json::from_str(&content).unwrap();
        assert!(decoded.matrix.is_none());
        assert!(decoded.mode.is_none());
        assert!(decoded.alerts.is_empty());
    }
}
