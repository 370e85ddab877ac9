//! Rendering logic for the TUI app.
//!
//! Responsibilities:
//! - Render the main layout (header, content, footer).
//! - Dispatch to screen renderers with the state each one needs.
//! - Draw popups and toasts on top.
//!
//! Non-responsibilities:
//! - Does NOT handle input.
//! - Does NOT mutate app state (except list selection state).

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
};

use crate::app::state::{CurrentScreen, FOOTER_HEIGHT, HEADER_HEIGHT};
use crate::app::{App, connection_display_name, visible_providers};
use crate::ui::screens::{
    connections, dashboard, docs, explorer, history, notifications, query, settings,
};
use crate::ui::theme::{ThemeExt, spinner_char};

impl App {
    /// Render the application UI.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_content(f, chunks[1]);
        self.render_footer(f, chunks[2]);

        crate::ui::toast::render_toasts(f, &self.toasts, &self.theme);

        if let Some(popup) = &self.popup {
            crate::ui::popup::render_popup(f, popup, &self.theme);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let unread = self.notifications.unread_count();
        let mut right = vec![Span::styled(format!(" {} ", self.base_url), theme.text_dim())];
        if unread > 0 {
            right.push(Span::styled(format!("● {unread} unread "), theme.warning()));
        }

        let titles = CurrentScreen::ALL
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{} {}", i + 1, s.title()));
        let selected = CurrentScreen::ALL
            .iter()
            .position(|s| *s == self.current_screen)
            .unwrap_or(0);

        let tabs = Tabs::new(titles)
            .select(selected)
            .style(theme.text_dim())
            .highlight_style(theme.highlight())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border())
                    .title(Line::from(Span::styled(" API Connector ", theme.title())))
                    .title(Line::from(right).right_aligned()),
            );
        f.render_widget(tabs, area);
    }

    fn render_content(&mut self, f: &mut Frame, area: Rect) {
        let error = self
            .load_error
            .as_ref()
            .filter(|(screen, _)| *screen == self.current_screen)
            .map(|(_, message)| message.as_str());
        let loading = self.loading;
        let spinner_frame = self.spinner_frame;

        match self.current_screen {
            CurrentScreen::Dashboard => dashboard::render_dashboard(
                f,
                area,
                dashboard::DashboardRenderConfig {
                    loading,
                    stats: self.dashboard.as_ref(),
                    error,
                    theme: &self.theme,
                    spinner_frame,
                },
            ),
            CurrentScreen::Connections => connections::render_connections(
                f,
                area,
                connections::ConnectionsRenderConfig {
                    loading,
                    connections: self.connections.as_deref(),
                    error,
                    state: &mut self.connections_state,
                    form: self.connection_form.as_ref(),
                    theme: &self.theme,
                    spinner_frame,
                },
            ),
            CurrentScreen::Query => {
                let examples = self.example_queries();
                let connection = self
                    .query
                    .connection_index
                    .and_then(|i| self.connections.as_ref()?.get(i));
                query::render_query(
                    f,
                    area,
                    query::QueryRenderConfig {
                        connection,
                        connection_count: self.connections.as_ref().map_or(0, Vec::len),
                        input: &self.query.input,
                        examples: &examples,
                        example_index: self.query.example_index,
                        running: self.query.running,
                        result: self.query.result.as_ref(),
                        scroll: self.query.scroll,
                        theme: &self.theme,
                        spinner_frame,
                    },
                );
            }
            CurrentScreen::History => {
                let entries: Option<Vec<_>> = self.history.as_deref().map(|h| {
                    apiconn_client::views::filter_history(h, self.history_view.search.value())
                });
                let connections = self.connections.as_deref();
                let name = |entry: &apiconn_client::HistoryEntry| {
                    connection_display_name(connections, entry.api_connection_id.as_ref())
                };
                history::render_history(
                    f,
                    area,
                    history::HistoryRenderConfig {
                        loading,
                        entries: entries.as_deref(),
                        error,
                        search: &self.history_view.search,
                        searching: self.history_view.searching,
                        page: self.history_view.page,
                        per_page: self.history_view.per_page,
                        state: &mut self.history_view.list_state,
                        show_detail: self.history_view.show_detail,
                        connection_name: &name,
                        theme: &self.theme,
                        spinner_frame,
                    },
                );
            }
            CurrentScreen::Explorer => {
                let visible: Option<Vec<_>> = self.providers.as_deref().map(|p| {
                    visible_providers(
                        p,
                        self.explorer.search.value(),
                        self.explorer.category.as_deref(),
                        self.explorer.tab,
                        &self.persisted,
                    )
                });
                explorer::render_explorer(
                    f,
                    area,
                    explorer::ExplorerRenderConfig {
                        loading,
                        providers: visible.as_deref(),
                        total: self.providers.as_ref().map_or(0, Vec::len),
                        error,
                        search: &self.explorer.search,
                        searching: self.explorer.searching,
                        category: self.explorer.category.as_deref(),
                        tab: self.explorer.tab,
                        state: &mut self.explorer.list_state,
                        show_detail: self.explorer.show_detail,
                        persisted: &self.persisted,
                        theme: &self.theme,
                        spinner_frame,
                    },
                );
            }
            CurrentScreen::Settings => settings::render_settings(
                f,
                area,
                settings::SettingsRenderConfig {
                    loading,
                    settings: self.settings.as_ref(),
                    api_keys: self.api_keys.as_deref(),
                    error,
                    pane: self.settings_view.pane,
                    settings_state: &mut self.settings_view.settings_state,
                    keys_state: &mut self.settings_view.keys_state,
                    dirty: self.settings_view.dirty,
                    color_theme: self.persisted.selected_theme,
                    form: self.api_key_form.as_ref(),
                    theme: &self.theme,
                    spinner_frame,
                },
            ),
            CurrentScreen::Notifications => notifications::render_notifications(
                f,
                area,
                notifications::NotificationsRenderConfig {
                    center: &self.notifications,
                    filter: self.notifications_view.filter,
                    state: &mut self.notifications_view.list_state,
                    theme: &self.theme,
                },
            ),
            CurrentScreen::Docs => docs::render_docs(
                f,
                area,
                docs::DocsRenderConfig {
                    base_url: &self.base_url,
                    scroll: self.docs_scroll,
                    theme: &self.theme,
                },
            ),
        }
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let mut spans = Vec::new();
        if self.loading {
            spans.push(Span::styled(
                format!(" {} Loading... ", spinner_char(self.spinner_frame)),
                theme.warning(),
            ));
            spans.push(Span::raw("|"));
        }
        spans.push(Span::styled(format!(" {} ", self.key_hints()), theme.text()));
        spans.push(Span::raw("|"));
        spans.push(Span::styled(" ?:Help ", theme.info()));
        spans.push(Span::styled(
            if self.is_editing() { " Ctrl+C:Quit " } else { " q:Quit " },
            theme.error(),
        ));

        let footer = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border()),
        );
        f.render_widget(footer, area);
    }

    fn key_hints(&self) -> &'static str {
        if self.connection_form.is_some() || self.api_key_form.is_some() {
            return "Tab:Next Field | Enter:Save | Esc:Cancel";
        }
        match self.current_screen {
            CurrentScreen::Dashboard => "Tab:Next Screen | 1-8:Jump | r:Refresh",
            CurrentScreen::Connections => "n:New | t:Test | d:Delete | r:Refresh",
            CurrentScreen::Query => "Enter:Run | Up/Down:Examples | Ctrl+N:Connection",
            CurrentScreen::History if self.history_view.searching => "Enter/Esc:Done",
            CurrentScreen::History => "/:Search | Left/Right:Page | Enter:Details",
            CurrentScreen::Explorer if self.explorer.searching => "Enter/Esc:Done",
            CurrentScreen::Explorer => "/:Search | g:Category | v:Tab | f:Favorite | c:Connect",
            CurrentScreen::Settings => "Left/Right:Pane | Space:Toggle | s:Save | a:Add Key",
            CurrentScreen::Notifications => "Left/Right:Filter | m:Read | d:Delete",
            CurrentScreen::Docs => "Up/Down:Scroll",
        }
    }
}
