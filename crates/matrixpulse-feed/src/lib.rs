//! MatrixPulse Feed
//!
//! Tick producers. Only the simulated reference feed lives here; a real
//! exchange connector would expose the same bounded-channel contract.

pub mod simulated;

pub use simulated::SimulatedFeed;
