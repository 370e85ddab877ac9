//! UI rendering: screens, popups, toasts and small shared helpers.

pub mod popup;
pub mod screens;
pub mod theme;
pub mod toast;

pub use toast::{Toast, ToastLevel};

use apiconn_config::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
};
use serde_json::Value;

/// A rectangle of `percent_x` by `percent_y` centred in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Pretty-printed JSON with keys and values coloured by the theme.
pub fn json_lines(value: &Value, theme: &Theme) -> Vec<Line<'static>> {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    pretty
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let indent = &line[..line.len() - trimmed.len()];
            match trimmed.split_once("\": ") {
                Some((key, rest)) if trimmed.starts_with('"') => Line::from(vec![
                    Span::raw(indent.to_string()),
                    Span::styled(format!("{key}\""), Style::default().fg(theme.json_key)),
                    Span::raw(": "),
                    Span::styled(rest.to_string(), Style::default().fg(theme.json_value)),
                ]),
                _ => Line::from(Span::styled(
                    line.to_string(),
                    Style::default().fg(theme.json_value),
                )),
            }
        })
        .collect()
}
