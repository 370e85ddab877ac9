//! Connections screen: saved connections and the new-connection form.

use apiconn_client::views::format_timestamp;
use apiconn_client::{AuthType, Connection};
use apiconn_config::Theme;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph},
};

use crate::app::forms::{ConnectionField, ConnectionForm, TextField};
use crate::ui::centered_rect;
use crate::ui::screens::{Availability, render_unavailable, screen_block, truncate};
use crate::ui::theme::ThemeExt;

pub struct ConnectionsRenderConfig<'a> {
    pub loading: bool,
    pub connections: Option<&'a [Connection]>,
    pub error: Option<&'a str>,
    pub state: &'a mut ListState,
    pub form: Option<&'a ConnectionForm>,
    pub theme: &'a Theme,
    pub spinner_frame: u8,
}

pub fn render_connections(f: &mut Frame, area: Rect, config: ConnectionsRenderConfig) {
    let ConnectionsRenderConfig {
        loading,
        connections,
        error,
        state,
        form,
        theme,
        spinner_frame,
    } = config;

    render_list(f, area, connections, loading, error, state, theme, spinner_frame);

    if let Some(form) = form {
        render_form(f, area, form, theme);
    }
}

#[allow(clippy::too_many_arguments)]
fn render_list(
    f: &mut Frame,
    area: Rect,
    connections: Option<&[Connection]>,
    loading: bool,
    error: Option<&str>,
    state: &mut ListState,
    theme: &Theme,
    spinner_frame: u8,
) {
    let availability = Availability::of(connections, loading, error, spinner_frame);
    if render_unavailable(f, area, "Connections", "connections", availability, theme) {
        return;
    }
    let Some(connections) = connections else {
        return;
    };

    if connections.is_empty() {
        let p = Paragraph::new("No connections yet. Press 'n' to add one.")
            .style(theme.text_dim())
            .block(screen_block("Connections", theme));
        f.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = connections
        .iter()
        .map(|c| {
            let created = c
                .created_at
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_default();
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(c.name.clone(), theme.title()),
                    Span::styled(format!("  [{}]", c.auth_type), theme.info()),
                ]),
                Line::from(vec![
                    Span::styled(format!("  {}", truncate(&c.base_url, 60)), theme.text()),
                    Span::styled(format!("  {created}"), theme.text_dim()),
                ]),
            ])
        })
        .collect();

    let title = format!("Connections ({})", connections.len());
    let list = List::new(items)
        .block(screen_block(&title, theme))
        .highlight_style(theme.highlight())
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, state);
}

fn render_form(f: &mut Frame, area: Rect, form: &ConnectionForm, theme: &Theme) {
    let popup = centered_rect(70, 70, area);
    f.render_widget(Clear, popup);

    let title = match &form.template {
        Some(name) => format!("New Connection ({name} template)"),
        None => "New Connection".to_string(),
    };
    let block = screen_block(&title, theme).border_style(theme.border_focused());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let fields = form.visible_fields();
    let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(2)).collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (field, row) in fields.iter().zip(rows.iter()) {
        let focused = *field == form.focus;
        let label_style = if focused { theme.title() } else { theme.text_dim() };
        let (label, value, input) = match field {
            ConnectionField::Name => ("Name", form.name.value().to_string(), Some(&form.name)),
            ConnectionField::BaseUrl => ("Base URL", form.base_url.value().to_string(), Some(&form.base_url)),
            ConnectionField::AuthType => ("Auth Type", format!("< {} >", form.auth_type), None),
            ConnectionField::Credential => {
                let label = if form.auth_type == AuthType::Bearer { "Token" } else { "API Key" };
                (label, form.credential.masked(), Some(&form.credential))
            }
            ConnectionField::Header => ("Header", form.header.value().to_string(), Some(&form.header)),
        };
        let placeholder = match field {
            ConnectionField::BaseUrl if value.is_empty() => "https://api.example.com",
            ConnectionField::Header if value.is_empty() => "X-API-Key",
            _ => "",
        };
        let value_span = if value.is_empty() {
            Span::styled(placeholder, theme.disabled())
        } else {
            Span::styled(value, theme.text())
        };
        let line = Line::from(vec![Span::styled(format!("{label:>10}: "), label_style), value_span]);
        f.render_widget(Paragraph::new(line), *row);

        if focused && let Some(input) = input {
            place_cursor(f, *row, input);
        }
    }

    if let Some(hint_area) = rows.last() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Tab next field | Ctrl+P provider template | Ctrl+T test | Enter save | Esc cancel",
                theme.text_dim(),
            )),
        ]);
        f.render_widget(hint, *hint_area);
    }
}

/// Cursor after the 12-cell label column.
fn place_cursor(f: &mut Frame, row: Rect, input: &TextField) {
    let x = row.x + 12 + input.cursor() as u16;
    if x < row.x + row.width {
        f.set_cursor_position(Position::new(x, row.y));
    }
}
