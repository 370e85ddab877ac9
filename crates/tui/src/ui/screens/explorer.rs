//! API explorer: browse the provider catalog by search, category and
//! favourites.

use apiconn_client::Provider;
use apiconn_config::{PersistedState, Theme};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use crate::app::forms::TextField;
use crate::app::state::ExplorerTab;
use crate::ui::screens::{Availability, render_unavailable, screen_block, truncate};
use crate::ui::theme::ThemeExt;

pub struct ExplorerRenderConfig<'a> {
    pub loading: bool,
    /// `None` until the catalog is loaded.
    pub providers: Option<&'a [&'a Provider]>,
    pub total: usize,
    pub error: Option<&'a str>,
    pub search: &'a TextField,
    pub searching: bool,
    pub category: Option<&'a str>,
    pub tab: ExplorerTab,
    pub state: &'a mut ListState,
    pub show_detail: bool,
    pub persisted: &'a PersistedState,
    pub theme: &'a Theme,
    pub spinner_frame: u8,
}

pub fn render_explorer(f: &mut Frame, area: Rect, config: ExplorerRenderConfig) {
    let ExplorerRenderConfig {
        loading,
        providers,
        total,
        error,
        search,
        searching,
        category,
        tab,
        state,
        show_detail,
        persisted,
        theme,
        spinner_frame,
    } = config;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let tabs = [ExplorerTab::All, ExplorerTab::ByCategory, ExplorerTab::Favorites];
    let selected_tab = tabs.iter().position(|t| *t == tab).unwrap_or(0);
    let tab_widget = Tabs::new(tabs.iter().map(|t| t.label()))
        .select(selected_tab)
        .style(theme.text_dim())
        .highlight_style(theme.highlight())
        .block(screen_block("API Explorer (v to switch)", theme));
    f.render_widget(tab_widget, rows[0]);

    let filter_line = Line::from(vec![
        Span::styled("Search: ", theme.text_dim()),
        if search.is_empty() && !searching {
            Span::styled("/ to search", theme.disabled())
        } else {
            Span::styled(search.value().to_string(), theme.text())
        },
        Span::styled("   Category: ", theme.text_dim()),
        Span::styled(category.unwrap_or("All").to_string(), theme.info()),
        Span::styled(" (g to change)", theme.disabled()),
    ]);
    let mut filter_block = screen_block("Filter", theme);
    if searching {
        filter_block = filter_block.border_style(theme.border_focused());
        let x = rows[1].x + 1 + "Search: ".len() as u16 + search.cursor() as u16;
        if x < rows[1].x + rows[1].width.saturating_sub(1) {
            f.set_cursor_position(Position::new(x, rows[1].y + 1));
        }
    }
    f.render_widget(Paragraph::new(filter_line).block(filter_block), rows[1]);

    let availability = Availability::of(providers, loading, error, spinner_frame);
    if render_unavailable(f, rows[2], "APIs", "providers", availability, theme) {
        return;
    }
    let Some(providers) = providers else {
        return;
    };

    let body = if show_detail {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(rows[2])
    };

    let title = format!("APIs ({} of {total})", providers.len());
    if providers.is_empty() {
        let message = match tab {
            ExplorerTab::Favorites => "No favorites yet. Press 'f' on an API to star it.",
            _ => "No APIs match your filters.",
        };
        let p = Paragraph::new(message)
            .style(theme.text_dim())
            .block(screen_block(&title, theme));
        f.render_widget(p, body[0]);
    } else {
        let items: Vec<ListItem> = providers
            .iter()
            .map(|p| {
                let star = if persisted.is_favorite(&p.key) { "★ " } else { "  " };
                let category = p.category.as_deref().unwrap_or("Other");
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(star, theme.warning()),
                        Span::styled(p.name.clone(), theme.title()),
                        Span::styled(format!("  [{category}]"), theme.info()),
                        Span::styled(format!("  {}", p.auth_type), theme.text_dim()),
                    ]),
                    Line::from(Span::styled(
                        format!("    {}", truncate(&p.description, 80)),
                        theme.text(),
                    )),
                ])
            })
            .collect();
        let list = List::new(items)
            .block(screen_block(&title, theme))
            .highlight_style(theme.highlight())
            .highlight_symbol("> ");
        f.render_stateful_widget(list, body[0], state);
    }

    if show_detail {
        let selected = state.selected().and_then(|i| providers.get(i)).copied();
        render_detail(f, body[1], selected, persisted, theme);
    }
}

fn render_detail(
    f: &mut Frame,
    area: Rect,
    provider: Option<&Provider>,
    persisted: &PersistedState,
    theme: &Theme,
) {
    let block = screen_block("API Details", theme);
    let Some(p) = provider else {
        f.render_widget(Paragraph::new("Select an API").block(block), area);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(p.name.clone(), theme.title()),
            Span::styled(
                if persisted.is_favorite(&p.key) { "  ★ favorite" } else { "" },
                theme.warning(),
            ),
        ]),
        Line::from(Span::styled(p.description.clone(), theme.text())),
        Line::from(""),
        Line::from(vec![
            Span::styled("Category: ", theme.text_dim()),
            Span::styled(p.category.clone().unwrap_or_else(|| "Other".to_string()), theme.text()),
        ]),
        Line::from(vec![
            Span::styled("Auth: ", theme.text_dim()),
            Span::styled(p.auth_type.to_string(), theme.text()),
        ]),
        Line::from(vec![
            Span::styled("Base URL: ", theme.text_dim()),
            Span::styled(p.base_url.clone(), theme.info()),
        ]),
    ];

    if !p.example_queries.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Example queries", theme.title())));
        lines.extend(
            p.example_queries
                .iter()
                .map(|q| Line::from(Span::styled(format!("  \"{q}\""), theme.text()))),
        );
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "c connect   f toggle favorite",
        theme.text_dim(),
    )));

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}
