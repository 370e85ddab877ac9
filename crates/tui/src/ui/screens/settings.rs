//! Settings screen: backend preferences on the left, stored API keys on the
//! right, and the add-key form.

use apiconn_client::views::format_timestamp;
use apiconn_client::{ApiKey, Settings};
use apiconn_config::{ColorTheme, Theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState, Paragraph},
};
use serde_json::Value;

use crate::app::forms::{ApiKeyField, ApiKeyForm};
use crate::app::state::SettingsPane;
use crate::ui::centered_rect;
use crate::ui::screens::{Availability, render_unavailable, screen_block};
use crate::ui::theme::ThemeExt;

pub struct SettingsRenderConfig<'a> {
    pub loading: bool,
    pub settings: Option<&'a Settings>,
    pub api_keys: Option<&'a [ApiKey]>,
    pub error: Option<&'a str>,
    pub pane: SettingsPane,
    pub settings_state: &'a mut ListState,
    pub keys_state: &'a mut ListState,
    pub dirty: bool,
    pub color_theme: ColorTheme,
    pub form: Option<&'a ApiKeyForm>,
    pub theme: &'a Theme,
    pub spinner_frame: u8,
}

pub fn render_settings(f: &mut Frame, area: Rect, config: SettingsRenderConfig) {
    let SettingsRenderConfig {
        loading,
        settings,
        api_keys,
        error,
        pane,
        settings_state,
        keys_state,
        dirty,
        color_theme,
        form,
        theme,
        spinner_frame,
    } = config;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let mut status = vec![
        Span::styled(" Theme: ", theme.text_dim()),
        Span::styled(color_theme.display_name(), theme.info()),
        Span::styled(" (c to change)", theme.disabled()),
    ];
    if dirty {
        status.push(Span::styled("   Unsaved changes, press s to save", theme.warning()));
    }
    f.render_widget(Paragraph::new(Line::from(status)), rows[0]);

    let availability = Availability::of(settings, loading, error, spinner_frame);
    if render_unavailable(f, rows[1], "Settings", "settings", availability, theme) {
        return;
    }

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    if let Some(settings) = settings {
        render_preferences(f, panes[0], settings, settings_state, pane == SettingsPane::Preferences, theme);
    }
    render_api_keys(f, panes[1], api_keys, keys_state, pane == SettingsPane::ApiKeys, theme);

    if let Some(form) = form {
        render_key_form(f, area, form, theme);
    }
}

fn render_preferences(
    f: &mut Frame,
    area: Rect,
    settings: &Settings,
    state: &mut ListState,
    focused: bool,
    theme: &Theme,
) {
    let items: Vec<ListItem> = settings
        .entries()
        .map(|(section, key, value)| {
            let rendered = match settings.get_bool(section, key) {
                Some(true) => Span::styled("[x]", theme.success()),
                Some(false) => Span::styled("[ ]", theme.text_dim()),
                None => Span::styled(display_value(value), theme.info()),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{section} › "), theme.text_dim()),
                Span::styled(format!("{key}  "), theme.text()),
                rendered,
            ]))
        })
        .collect();

    let block = screen_block("Preferences (Space toggle)", theme).border_style(if focused {
        theme.border_focused()
    } else {
        theme.border()
    });
    let list = List::new(items)
        .block(block)
        .highlight_style(if focused { theme.highlight() } else { theme.text() })
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, state);
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_api_keys(
    f: &mut Frame,
    area: Rect,
    keys: Option<&[ApiKey]>,
    state: &mut ListState,
    focused: bool,
    theme: &Theme,
) {
    let block = screen_block("API Keys (a add, t test, d delete)", theme).border_style(if focused {
        theme.border_focused()
    } else {
        theme.border()
    });

    let Some(keys) = keys else {
        f.render_widget(Paragraph::new("Loading API keys...").style(theme.text_dim()).block(block), area);
        return;
    };
    if keys.is_empty() {
        f.render_widget(
            Paragraph::new("No API keys stored. Press 'a' to add one.")
                .style(theme.text_dim())
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = keys
        .iter()
        .map(|k| {
            let status_style = if k.is_active() { theme.success() } else { theme.text_dim() };
            let last_used = k
                .last_used
                .as_deref()
                .map(format_timestamp)
                .unwrap_or_else(|| "never used".to_string());
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(k.name.clone(), theme.title()),
                    Span::styled(format!("  {}", k.service), theme.info()),
                    Span::styled(format!("  {}", k.status), status_style),
                ]),
                Line::from(Span::styled(format!("  {last_used}"), theme.text_dim())),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if focused { theme.highlight() } else { theme.text() })
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, state);
}

fn render_key_form(f: &mut Frame, area: Rect, form: &ApiKeyForm, theme: &Theme) {
    let popup = centered_rect(60, 40, area);
    f.render_widget(Clear, popup);
    let block = screen_block("Add API Key", theme).border_style(theme.border_focused());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .split(inner);

    let fields = [
        (ApiKeyField::Name, "Name", form.name.value().to_string(), &form.name),
        (ApiKeyField::Service, "Service", form.service.value().to_string(), &form.service),
        (ApiKeyField::Value, "Key", form.value.masked(), &form.value),
    ];
    for ((field, label, value, input), row) in fields.into_iter().zip(rows.iter()) {
        let focused = field == form.focus;
        let label_style = if focused { theme.title() } else { theme.text_dim() };
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{label:>8}: "), label_style),
                Span::styled(value, theme.text()),
            ])),
            *row,
        );
        if focused {
            let x = row.x + 10 + input.cursor() as u16;
            if x < row.x + row.width {
                f.set_cursor_position(Position::new(x, row.y));
            }
        }
    }

    f.render_widget(
        Paragraph::new(Span::styled("Tab next field | Enter save | Esc cancel", theme.text_dim())),
        rows[3],
    );
}
