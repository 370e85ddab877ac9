//! History screen: searchable, paginated list of past queries with a
//! detail pane.

use apiconn_client::views::{Page, format_timestamp};
use apiconn_client::{HistoryEntry, HistoryStatus};
use apiconn_config::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
};
use serde_json::Value;

use crate::app::forms::TextField;
use crate::ui::json_lines;
use crate::ui::screens::{Availability, render_unavailable, screen_block, truncate};
use crate::ui::theme::ThemeExt;

pub struct HistoryRenderConfig<'a> {
    pub loading: bool,
    /// Entries after search filtering; `None` until history is loaded.
    pub entries: Option<&'a [&'a HistoryEntry]>,
    pub error: Option<&'a str>,
    pub search: &'a TextField,
    pub searching: bool,
    pub page: usize,
    pub per_page: usize,
    pub state: &'a mut ListState,
    pub show_detail: bool,
    /// Resolves a connection id to its display name.
    pub connection_name: &'a dyn Fn(&HistoryEntry) -> String,
    pub theme: &'a Theme,
    pub spinner_frame: u8,
}

pub fn render_history(f: &mut Frame, area: Rect, config: HistoryRenderConfig) {
    let HistoryRenderConfig {
        loading,
        entries,
        error,
        search,
        searching,
        page,
        per_page,
        state,
        show_detail,
        connection_name,
        theme,
        spinner_frame,
    } = config;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    render_search(f, rows[0], search, searching, theme);

    let availability = Availability::of(entries, loading, error, spinner_frame);
    if render_unavailable(f, rows[1], "Query History", "history", availability, theme) {
        return;
    }
    let Some(entries) = entries else {
        return;
    };

    let page = Page::of(entries, page, per_page);
    let body = if show_detail {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(rows[1])
    };

    if page.items.is_empty() {
        let message = if search.is_empty() {
            "No queries yet. Run one from the Query screen (3)."
        } else {
            "No queries match your search."
        };
        let p = Paragraph::new(message)
            .style(theme.text_dim())
            .block(screen_block("Query History", theme));
        f.render_widget(p, body[0]);
    } else {
        let items: Vec<ListItem> = page
            .items
            .iter()
            .map(|entry| {
                let (marker, style) = status_marker(entry.status, theme);
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!("{marker} "), style),
                        Span::styled(truncate(&entry.user_query, 70), theme.text()),
                    ]),
                    Line::from(vec![
                        Span::styled(format!("  {}", entry.endpoint()), theme.info()),
                        Span::styled(format!("  {}", connection_name(*entry)), theme.text_dim()),
                        Span::styled(
                            format!("  {}", format_timestamp(&entry.created_at)),
                            theme.text_dim(),
                        ),
                    ]),
                ])
            })
            .collect();
        let list = List::new(items)
            .block(screen_block("Query History", theme))
            .highlight_style(theme.highlight())
            .highlight_symbol("> ");
        f.render_stateful_widget(list, body[0], state);
    }

    if show_detail {
        let selected = state.selected().and_then(|i| page.items.get(i)).copied();
        render_detail(f, body[1], selected, connection_name, theme);
    }

    let footer = Line::from(vec![
        Span::styled(page.range_label(), theme.text_dim()),
        Span::styled(
            format!(
                "   Page {} of {}",
                if page.total_pages == 0 { 0 } else { page.page },
                page.total_pages
            ),
            theme.text_dim(),
        ),
        Span::styled(
            match (page.has_previous(), page.has_next()) {
                (true, true) => "   < Left | Right >",
                (true, false) => "   < Left",
                (false, true) => "   Right >",
                (false, false) => "",
            },
            theme.info(),
        ),
    ]);
    f.render_widget(Paragraph::new(footer), rows[2]);
}

fn render_search(f: &mut Frame, area: Rect, search: &TextField, searching: bool, theme: &Theme) {
    let line = if search.is_empty() && !searching {
        Line::from(Span::styled("Press / to search queries and endpoints", theme.disabled()))
    } else {
        Line::from(Span::styled(search.value().to_string(), theme.text()))
    };
    let mut block = screen_block("Search", theme);
    if searching {
        block = block.border_style(theme.border_focused());
        let x = area.x + 1 + search.cursor() as u16;
        if x < area.x + area.width.saturating_sub(1) {
            f.set_cursor_position(Position::new(x, area.y + 1));
        }
    }
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_detail(
    f: &mut Frame,
    area: Rect,
    entry: Option<&HistoryEntry>,
    connection_name: &dyn Fn(&HistoryEntry) -> String,
    theme: &Theme,
) {
    let block = screen_block("Query Details", theme);
    let Some(entry) = entry else {
        f.render_widget(Paragraph::new("Select a query").block(block), area);
        return;
    };

    let (_, status_style) = status_marker(entry.status, theme);
    let field = |label: &str, value: String, style: Style| {
        Line::from(vec![
            Span::styled(format!("{label}: "), theme.text_dim()),
            Span::styled(value, style),
        ])
    };

    let mut lines = vec![
        field("Query", entry.user_query.clone(), theme.text()),
        field("Status", entry.status.as_str().to_string(), status_style),
        field("Connection", connection_name(entry), theme.text()),
        field("Endpoint", entry.endpoint().to_string(), theme.info()),
        field("Date", format_timestamp(&entry.created_at), theme.text()),
    ];

    if let Some(interpretation) = entry.interpretation() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Interpretation", theme.title())));
        lines.extend(json_lines(&interpretation, theme));
    }

    if let Some(raw) = entry.response_data.as_deref() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Response", theme.title())));
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => lines.extend(json_lines(&value, theme)),
            Err(_) => lines.push(Line::from(Span::styled(raw.to_string(), theme.text()))),
        }
    }

    let p = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(p, area);
}

fn status_marker(status: HistoryStatus, theme: &Theme) -> (&'static str, Style) {
    match status {
        HistoryStatus::Success => ("✓", theme.success()),
        HistoryStatus::Error => ("✗", theme.error()),
        HistoryStatus::Pending => ("…", theme.warning()),
        HistoryStatus::Unknown => ("?", theme.text_dim()),
    }
}
