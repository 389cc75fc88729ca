//! MatrixPulse TUI
//!
//! Real-time terminal dashboard: market regime, correlation matrix grid,
//! and the alert log. Runs on a dedicated blocking thread and drives the
//! system shutdown when the user quits.

pub mod app;
mod event;
mod ui;

pub use app::{App, AppAction};
pub use event::{Event, EventHandler};
pub use ui::draw;

use matrixpulse_engine::Engine;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

/// Run the dashboard loop until the user quits or the system shuts down
///
/// Blocking; call from a dedicated thread. Quitting the dashboard
/// broadcasts the shutdown signal to the rest of the system.
pub fn run(
    engine: Arc<Engine>,
    refresh_ms: u64,
    shutdown: broadcast::Sender<()>,
) -> anyhow::Result<()> {
    let mut shutdown_rx = shutdown.subscribe();
    let mut terminal = ratatui::init();
    let events = EventHandler::new(refresh_ms);
    let mut app = App::new();

    let result = loop {
        match shutdown_rx.try_recv() {
            Err(TryRecvError::Empty) => {}
            // A signal arrived (or the channel is gone): stop drawing.
            Ok(()) | Err(TryRecvError::Closed) | Err(TryRecvError::Lagged(_)) => break Ok(()),
        }

        app.refresh(engine.matrix(), engine.mode(), engine.alerts());
        if let Err(e) = terminal.draw(|frame| draw(frame, &app)) {
            break Err(e.into());
        }

        match events.next_event() {
            Ok(Event::Key(key)) => app.handle_action(EventHandler::key_to_action(key)),
            Ok(Event::Tick) | Ok(Event::Resize(..)) => {}
            Err(e) => break Err(e),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    ratatui::restore();
    let _ = shutdown.send(());
    result
}
