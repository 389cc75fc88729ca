//! Simulated market data feed
//!
//! One producer task per symbol at a 25 ms cadence, all feeding a single
//! bounded channel. The price path is a deterministic function of wall
//! clock time: slow sinusoidal drift and trend plus a sub-second noise
//! term scaled by a breathing volatility factor. Good enough to exercise
//! every correlation regime without an exchange connection.

use chrono::Utc;
use matrixpulse_core::Tick;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tracing::debug;

const TICK_INTERVAL: Duration = Duration::from_millis(25);

/// Channel slots per symbol; sized to tolerate ingest bursts
const CHANNEL_SLOTS_PER_SYMBOL: usize = 20;

/// Deterministic per-symbol tick generator
pub struct SimulatedFeed {
    symbols: Vec<String>,
}

impl SimulatedFeed {
    pub fn new(symbols: Vec<String>) -> Self {
        Self { symbols }
    }

    /// Spawn one producer task per symbol and return the shared receiver
    ///
    /// Producers stop when the shutdown signal fires; once every producer
    /// has dropped its sender the channel closes and the consumer sees the
    /// end of the stream.
    pub fn start(&self, shutdown: &broadcast::Sender<()>) -> mpsc::Receiver<Tick> {
        let capacity = (self.symbols.len().max(1)) * CHANNEL_SLOTS_PER_SYMBOL;
        let (tx, rx) = mpsc::channel(capacity);

        for (index, symbol) in self.symbols.iter().cloned().enumerate() {
            let tx = tx.clone();
            let mut shutdown = shutdown.subscribe();

            tokio::spawn(async move {
                let phase = index as f64 * 0.5;
                let base = 100.0 + (symbol.len() * 10) as f64;
                let mut ticker = tokio::time::interval(TICK_INTERVAL);

                loop {
                    tokio::select! {
                        _ = shutdown.recv() => {
                            debug!(symbol = %symbol, "producer stopping");
                            break;
                        }
                        _ = ticker.tick() => {
                            let tick = synthesize(&symbol, base, phase);
                            if tx.send(tick).await.is_err() {
                                // Consumer gone; nothing left to produce for.
                                break;
                            }
                        }
                    }
                }
            });
        }

        rx
    }
}

/// One tick of the reference price model
fn synthesize(symbol: &str, base: f64, phase: f64) -> Tick {
    let now = Utc::now();
    let t_ns = now.timestamp_nanos_opt().unwrap_or(0);
    let ts = t_ns as f64 / 1e9;

    let drift = (ts / 5.0 + phase).sin() * 1.5;
    let vol = 0.3 + 0.2 * (ts / 20.0).sin();
    let noise = ((t_ns % 10_000) as f64 / 5000.0 - 1.0) * vol;
    let trend = (ts / 30.0 + phase).sin() * 0.5;

    let price = (base + drift + noise + trend).max(1.0);
    let volume = 1000.0 + (t_ns % 5000) as f64;

    Tick {
        symbol: symbol.to_string(),
        price,
        volume,
        time: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesized_prices_are_positive_and_near_base() {
        for symbol in ["AAPL", "GOOGL", "X"] {
            let base = 100.0 + (symbol.len() * 10) as f64;
            let tick = synthesize(symbol, base, 0.5);
            assert_eq!(tick.symbol, symbol);
            assert!(tick.price >= 1.0);
            // Drift + noise + trend stay within a few units of base.
            assert!((tick.price - base).abs() < 3.0);
            assert!(tick.volume >= 1000.0);
            assert!(tick.volume < 6000.0);
        }
    }

    #[tokio::test]
    async fn feed_produces_ticks_for_every_symbol() {
        let symbols = vec!["A".to_string(), "B".to_string()];
        let feed = SimulatedFeed::new(symbols.clone());
        let (shutdown_tx, _) = broadcast::channel(1);

        let mut rx = feed.start(&shutdown_tx);

        let mut seen = std::collections::HashSet::new();
        while seen.len() < symbols.len() {
            let tick = tokio::time::timeout(Duration::from_secs(2), rx.recv())
                .await
                .expect("feed should tick within two seconds")
                .expect("channel open");
            assert!(tick.price > 0.0);
            seen.insert(tick.symbol);
        }

        let _ = shutdown_tx.send(());
    }

    #[tokio::test]
    async fn shutdown_closes_the_stream() {
        let feed = SimulatedFeed::new(vec!["A".to_string()]);
        let (shutdown_tx, _) = broadcast::channel(1);
        let mut rx = feed.start(&shutdown_tx);

        let _ = shutdown_tx.send(());

        // Drain whatever was in flight; the channel must then close.
        let closed = tokio::time::timeout(Duration::from_secs(2), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(closed.is_ok(), "channel should close after shutdown");
    }
}
