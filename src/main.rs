//! MatrixPulse - Real-time Correlation & Market Regime Engine
//!
//! Wires the core engine to its collaborators: the simulated tick feed,
//! the ingest/compute/persistence loops, the REST and WebSocket adapters,
//! and the terminal dashboard. All long-running loops share one broadcast
//! shutdown signal and get a bounded grace period to finish their cleanup.

use anyhow::{Context, Result};
use matrixpulse_core::{AppConfig, Tick};
use matrixpulse_engine::Engine;
use matrixpulse_feed::SimulatedFeed;
use matrixpulse_persistence::Snapshotter;
use matrixpulse_server::{RestServer, WsServer};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinSet;
use tokio::time::{interval, interval_at, Instant};
use tracing::{error, info, warn};

mod logging;

/// How long loops get to finish their current iteration and cleanup
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = AppConfig::load().context("failed to load configuration")?;
    info!(
        symbols = config.symbols.len(),
        window = config.window_size,
        update_hz = config.update_hz,
        "configuration loaded"
    );

    let engine = Arc::new(Engine::new(
        config.symbols.clone(),
        config.window_size,
        config.alerts,
    ));

    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    let feed = SimulatedFeed::new(config.symbols.clone());
    let tick_rx = feed.start(&shutdown_tx);

    let mut loops = JoinSet::new();
    loops.spawn(ingest_loop(
        Arc::clone(&engine),
        tick_rx,
        shutdown_tx.subscribe(),
    ));
    loops.spawn(compute_loop(
        Arc::clone(&engine),
        config.update_hz,
        shutdown_tx.subscribe(),
    ));

    if config.persistence.enabled {
        let snapshotter = Snapshotter::new(config.persistence.path.clone(), Arc::clone(&engine));
        loops.spawn(persist_loop(
            snapshotter,
            config.persistence.interval_seconds,
            shutdown_tx.subscribe(),
        ));
    }

    if config.websocket.enabled {
        let ws = WsServer::new(Arc::clone(&engine), config.websocket.port);
        loops.spawn(ws.run(shutdown_tx.subscribe()));
    }

    if config.rest.enabled {
        let rest = RestServer::new(Arc::clone(&engine), config.rest.port);
        loops.spawn(rest.run(shutdown_tx.subscribe()));
    }

    // Ctrl-C triggers the same shutdown path as the dashboard quit key.
    {
        let shutdown_tx = shutdown_tx.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
                let _ = shutdown_tx.send(());
            }
        });
    }

    if config.dashboard.enabled {
        info!("starting dashboard");
        let dashboard_engine = Arc::clone(&engine);
        let refresh_ms = config.dashboard.refresh_ms;
        let dashboard_shutdown = shutdown_tx.clone();

        let outcome = tokio::task::spawn_blocking(move || {
            matrixpulse_tui::run(dashboard_engine, refresh_ms, dashboard_shutdown)
        })
        .await;

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error!(error = %e, "dashboard error"),
            Err(e) => error!(error = %e, "dashboard thread panicked"),
        }
    } else {
        info!("running headless, waiting for shutdown signal");
        let mut shutdown_rx = shutdown_tx.subscribe();
        let _ = shutdown_rx.recv().await;
    }

    info!("shutting down");
    let _ = shutdown_tx.send(());

    let drain = async {
        while loops.join_next().await.is_some() {}
    };
    if tokio::time::timeout(SHUTDOWN_GRACE, drain).await.is_err() {
        warn!("shutdown grace period exceeded, abandoning remaining loops");
    } else {
        info!("all loops stopped cleanly");
    }

    info!("shutdown complete");
    Ok(())
}

/// Drain the tick channel into the engine, logging the ingest rate
async fn ingest_loop(
    engine: Arc<Engine>,
    mut ticks: mpsc::Receiver<Tick>,
    mut shutdown: broadcast::Receiver<()>,
) {
    info!("ingest loop started");

    let stats_period = Duration::from_secs(5);
    let mut stats = interval_at(Instant::now() + stats_period, stats_period);
    let mut count: u64 = 0;

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            tick = ticks.recv() => match tick {
                Some(tick) => {
                    engine.ingest(tick);
                    count += 1;
                }
                None => {
                    info!("tick channel closed");
                    break;
                }
            },
            _ = stats.tick() => {
                info!(ticks = count, per_sec = count as f64 / 5.0, "ingest rate");
                count = 0;
            }
        }
    }

    info!("ingest loop stopped");
}

/// Fire the engine's compute cycle at the configured rate
async fn compute_loop(engine: Arc<Engine>, update_hz: u32, mut shutdown: broadcast::Receiver<()>) {
    info!(hz = update_hz, "compute loop started");

    let budget = Duration::from_secs(1) / update_hz;
    let mut ticker = interval(budget);

    let stats_period = Duration::from_secs(10);
    let mut stats = interval_at(Instant::now() + stats_period, stats_period);
    let mut cycles: u64 = 0;

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            _ = ticker.tick() => {
                let start = Instant::now();
                engine.compute();
                let elapsed = start.elapsed();
                cycles += 1;

                if elapsed > budget {
                    warn!(?elapsed, ?budget, "compute cycle over budget");
                }
            }
            _ = stats.tick() => {
                info!(cycles, hz_actual = cycles as f64 / 10.0, "compute rate");
                cycles = 0;
            }
        }
    }

    info!("compute loop stopped");
}

/// Periodically snapshot engine state, with a final save on the way out
async fn persist_loop(
    snapshotter: Snapshotter,
    interval_seconds: u64,
    mut shutdown: broadcast::Receiver<()>,
) {
    info!(interval_seconds, "persistence loop started");

    let period = Duration::from_secs(interval_seconds);
    let mut ticker = interval_at(Instant::now() + period, period);

    loop {
        tokio::select! {
            _ = shutdown.recv() => break,
            _ = ticker.tick() => {
                match snapshotter.save() {
                    Ok(()) => info!("state snapshot saved"),
                    Err(e) => error!(error = %e, "persistence error"),
                }
            }
        }
    }

    info!("saving final state");
    if let Err(e) = snapshotter.save() {
        error!(error = %e, "failed to save final state");
    }
    info!("persistence loop stopped");
}
