//! Dashboard application state

use chrono::{DateTime, Utc};
use matrixpulse_core::{Alert, MatrixSnapshot, ModeSnapshot};
use std::sync::Arc;

/// Maximum number of alerts shown in the log panel
pub const MAX_VISIBLE_ALERTS: usize = 20;

/// Maximum matrix dimension rendered in the grid
pub const MAX_MATRIX_DISPLAY: usize = 10;

/// Actions the dashboard can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Quit the dashboard and shut the system down
    Quit,
    /// No action
    None,
}

/// Dashboard state, refreshed from the engine every frame
pub struct App {
    pub should_quit: bool,

    /// Latest published matrix, if any
    pub matrix: Option<Arc<MatrixSnapshot>>,

    /// Latest published mode, if any
    pub mode: Option<Arc<ModeSnapshot>>,

    /// Chronological alert copy
    pub alerts: Vec<Alert>,

    /// When the dashboard started, for the uptime readout
    pub started_at: DateTime<Utc>,

    /// Frames drawn so far
    pub frames: u64,
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            matrix: None,
            mode: None,
            alerts: Vec::new(),
            started_at: Utc::now(),
            frames: 0,
        }
    }

    /// Pull the latest snapshots into the frame state
    pub fn refresh(
        &mut self,
        matrix: Option<Arc<MatrixSnapshot>>,
        mode: Option<Arc<ModeSnapshot>>,
        alerts: Vec<Alert>,
    ) {
        self.matrix = matrix;
        self.mode = mode;
        self.alerts = alerts;
        self.frames += 1;
    }

    pub fn handle_action(&mut self, action: AppAction) {
        if action == AppAction::Quit {
            self.should_quit = true;
        }
    }

    /// Uptime formatted as 1h02m03s / 2m03s / 45s
    pub fn uptime(&self) -> String {
        let total = (Utc::now() - self.started_at).num_seconds().max(0);
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;

        if hours > 0 {
            format!("{hours}h{minutes:02}m{seconds:02}s")
        } else if minutes > 0 {
            format!("{minutes}m{seconds:02}s")
        } else {
            format!("{seconds}s")
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_action_sets_flag() {
        let mut app = App::new();
        app.handle_action(AppAction::None);
        assert!(!app.should_quit);
        app.handle_action(AppAction::Quit);
        assert!(app.should_quit);
    }

    #[test]
    fn refresh_counts_frames() {
        let mut app = App::new();
        app.refresh(None, None, Vec::new());
        app.refresh(None, None, Vec::new());
        assert_eq!(app.frames, 2);
        assert!(app.matrix.is_none());
    }

    #[test]
    fn uptime_formats_seconds() {
        let mut app = App::new();
        app.started_at = Utc::now() - chrono::Duration::seconds(65);
        assert_eq!(app.uptime(), "1m05s");
        app.started_at = Utc::now() - chrono::Duration::seconds(3723);
        assert_eq!(app.uptime(), "1h02m03s");
    }
}
