//! Dashboard layout and rendering

use crate::app::{App, MAX_MATRIX_DISPLAY, MAX_VISIBLE_ALERTS};
use matrixpulse_core::{AlertLevel, Regime};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the dashboard
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header + status
            Constraint::Length(5),  // Regime panel
            Constraint::Min(8),     // Correlation matrix
            Constraint::Length(10), // Alert log
            Constraint::Length(1),  // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    draw_regime(frame, app, chunks[1]);
    draw_matrix(frame, app, chunks[2]);
    draw_alerts(frame, app, chunks[3]);
    draw_footer(frame, chunks[4]);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let symbols = app.matrix.as_ref().map(|m| m.len()).unwrap_or(0);
    let status = format!(
        "uptime {}  |  frames {}  |  symbols {}  |  alerts {}",
        app.uptime(),
        app.frames,
        symbols,
        app.alerts.len(),
    );

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "MATRIXPULSE",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(status),
    ])
    .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(header, area);
}

fn draw_regime(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Market Regime");

    let lines = match &app.mode {
        None => vec![Line::from("initializing...")],
        Some(mode) => {
            let style = regime_style(mode.regime);
            let mut eigen_sorted = mode.eigenvalues.clone();
            eigen_sorted.sort_by(|a, b| b.abs().partial_cmp(&a.abs()).unwrap_or(std::cmp::Ordering::Equal));

            let dominant: Vec<String> = eigen_sorted
                .iter()
                .take(6)
                .map(|v| format!("{v:.3}"))
                .collect();

            vec![
                Line::from(Span::styled(mode.regime.to_string(), style)),
                Line::from(format!(
                    "max eigenvalue {:.4}  |  condition {:.2}",
                    mode.max_eigen, mode.condition
                )),
                Line::from(format!("dominant eigenvalues: {}", dominant.join(" "))),
            ]
        }
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_matrix(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Correlation Matrix");

    let lines = match &app.matrix {
        None => vec![Line::from(
            "waiting for data (need at least 2 samples per symbol)",
        )],
        Some(matrix) => {
            let n = matrix.len().min(MAX_MATRIX_DISPLAY);
            let mut lines = Vec::with_capacity(n + 2);

            let mut header = vec![Span::raw(format!("{:8}", ""))];
            for symbol in matrix.symbols.iter().take(n) {
                header.push(Span::styled(
                    format!("{:>8}", truncate(symbol, 7)),
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            }
            lines.push(Line::from(header));

            for i in 0..n {
                let mut row = vec![Span::styled(
                    format!("{:8}", truncate(&matrix.symbols[i], 7)),
                    Style::default().add_modifier(Modifier::BOLD),
                )];
                for j in 0..n {
                    let value = matrix.cor[i][j];
                    row.push(Span::styled(
                        format!("{value:>8.3}"),
                        correlation_style(value, i == j),
                    ));
                }
                lines.push(Line::from(row));
            }

            if matrix.len() > MAX_MATRIX_DISPLAY {
                lines.push(Line::from(format!(
                    "(showing top {n}x{n} of {0}x{0})",
                    matrix.len()
                )));
            }
            lines
        }
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_alerts(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Alerts");

    let lines = if app.alerts.is_empty() {
        vec![Line::from("no alerts")]
    } else {
        // Most recent first.
        app.alerts
            .iter()
            .rev()
            .take(MAX_VISIBLE_ALERTS)
            .map(|alert| {
                let style = match alert.level {
                    AlertLevel::Critical => Style::default().fg(Color::Red),
                    AlertLevel::High => Style::default().fg(Color::Yellow),
                };
                Line::from(vec![
                    Span::raw(format!("{} ", alert.time.format("%H:%M:%S"))),
                    Span::styled(format!("[{}] ", alert.level), style),
                    Span::raw(format!(
                        "{}: {} ({:.4} > {:.4})",
                        truncate(&alert.symbol, 20),
                        alert.message,
                        alert.value,
                        alert.threshold
                    )),
                ])
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        "q / esc: quit",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(footer, area);
}

fn regime_style(regime: Regime) -> Style {
    let color = match regime {
        Regime::Normal => Color::Green,
        Regime::Stressed => Color::Yellow,
        Regime::Crisis => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// Cell colour by correlation strength; the diagonal stays neutral
fn correlation_style(value: f64, diagonal: bool) -> Style {
    if diagonal {
        return Style::default().fg(Color::DarkGray);
    }
    let magnitude = value.abs();
    if magnitude > 0.8 {
        Style::default().fg(Color::Red)
    } else if magnitude > 0.5 {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        s
    } else {
        &s[..max]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_clips_long_symbols() {
        assert_eq!(truncate("AAPL", 7), "AAPL");
        assert_eq!(truncate("VERYLONGSYMBOL", 7), "VERYLON");
    }

    #[test]
    fn correlation_style_escalates_with_magnitude() {
        assert_eq!(correlation_style(0.2, false), Style::default());
        assert_eq!(
            correlation_style(-0.6, false),
            Style::default().fg(Color::Yellow)
        );
        assert_eq!(
            correlation_style(0.95, false),
            Style::default().fg(Color::Red)
        );
        assert_eq!(
            correlation_style(1.0, true),
            Style::default().fg(Color::DarkGray)
        );
    }
}
