//! MatrixPulse Engine
//!
//! The core of the system: per-symbol rolling windows, the numeric kernel
//! (log-returns, moments, covariance, symmetric eigensolver), the bounded
//! alert ring, and the engine that orchestrates ingest, compute, and
//! snapshot publication for concurrent readers.

pub mod eigen;
pub mod engine;
pub mod ring;
pub mod stats;
pub mod window;

pub use engine::{Engine, ALERT_RING_CAPACITY};
pub use ring::AlertRing;
pub use window::RollingWindow;
