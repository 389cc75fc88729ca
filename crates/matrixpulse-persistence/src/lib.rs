//! MatrixPulse Persistence
//!
//! Writes the engine's published state (matrix, mode, alert ring) to disk
//! as a single JSON record. The window contents are deliberately not
//! persisted; a restarted engine refills its windows from the live feed.

mod snapshot;

pub use snapshot::{Snapshotter, StateSnapshot};
