//! Screen renderers.
//!
//! Each screen takes a `*RenderConfig` borrowing exactly what it draws, so
//! rendering never reaches into unrelated app state.

pub mod connections;
pub mod dashboard;
pub mod docs;
pub mod explorer;
pub mod history;
pub mod notifications;
pub mod query;
pub mod settings;

use apiconn_config::Theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::ui::theme::{ThemeExt, spinner_char};

/// Bordered block with the screen's title.
pub(crate) fn screen_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(theme.border())
        .title_style(theme.title())
}

/// Centred one-line message inside a titled block.
pub(crate) fn render_message(f: &mut Frame, area: Rect, title: &str, message: &str, style: Style, theme: &Theme) {
    let p = Paragraph::new(message)
        .block(screen_block(title, theme))
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(p, area);
}

pub(crate) fn render_loading(f: &mut Frame, area: Rect, title: &str, what: &str, spinner_frame: u8, theme: &Theme) {
    let message = format!("{} Loading {what}...", spinner_char(spinner_frame));
    render_message(f, area, title, &message, theme.info(), theme);
}

/// Shared "nothing to show yet" handling for list screens.
///
/// Returns `true` when it drew something and the caller should stop.
pub(crate) fn render_unavailable(
    f: &mut Frame,
    area: Rect,
    title: &str,
    what: &str,
    state: Availability<'_>,
    theme: &Theme,
) -> bool {
    match state {
        Availability::Ready => false,
        Availability::Loading(frame) => {
            render_loading(f, area, title, what, frame, theme);
            true
        }
        Availability::Failed(message) => {
            render_message(
                f,
                area,
                title,
                &format!("Failed to load {what}: {message}. Press 'r' to retry."),
                theme.error(),
                theme,
            );
            true
        }
        Availability::NotLoaded => {
            render_message(
                f,
                area,
                title,
                &format!("No {what} loaded. Press 'r' to refresh."),
                theme.text_dim(),
                theme,
            );
            true
        }
    }
}

/// Whether a screen's data can be drawn.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Availability<'a> {
    Ready,
    Loading(u8),
    Failed(&'a str),
    NotLoaded,
}

impl<'a> Availability<'a> {
    pub(crate) fn of<T: ?Sized>(data: Option<&T>, loading: bool, error: Option<&'a str>, spinner_frame: u8) -> Self {
        match (data, error) {
            (Some(_), _) => Self::Ready,
            (None, Some(e)) => Self::Failed(e),
            (None, None) if loading => Self::Loading(spinner_frame),
            (None, None) => Self::NotLoaded,
        }
    }
}

/// Truncate to `max` characters, ending with `...` when cut.
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer line", 10), "a much ...");
    }

    #[test]
    fn test_availability_prefers_data() {
        let data = vec![1];
        assert!(matches!(Availability::of(Some(&data), true, Some("x"), 0), Availability::Ready));
        assert!(matches!(Availability::<'_>::of::<Vec<i32>>(None, true, None, 0), Availability::Loading(0)));
        assert!(matches!(Availability::<'_>::of::<Vec<i32>>(None, false, Some("x"), 0), Availability::Failed("x")));
    }
}
