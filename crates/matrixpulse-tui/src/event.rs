//! Input event handling for the dashboard

use crate::AppAction;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

/// Events that can occur in the dashboard
#[derive(Debug, Clone)]
pub enum Event {
    /// A key was pressed
    Key(KeyEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Refresh tick
    Tick,
}

/// Polls the terminal for input, falling back to a refresh tick
pub struct EventHandler {
    refresh_rate: Duration,
}

impl EventHandler {
    pub fn new(refresh_ms: u64) -> Self {
        Self {
            refresh_rate: Duration::from_millis(refresh_ms),
        }
    }

    /// Wait for the next event, at most one refresh interval
    pub fn next_event(&self) -> anyhow::Result<Event> {
        if event::poll(self.refresh_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) => Ok(Event::Key(key)),
                CrosstermEvent::Resize(w, h) => Ok(Event::Resize(w, h)),
                _ => Ok(Event::Tick),
            }
        } else {
            Ok(Event::Tick)
        }
    }

    /// Convert a key event to a dashboard action
    pub fn key_to_action(key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => AppAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => AppAction::Quit,
            _ => AppAction::None,
        }
    }
}
