//! Keyboard handling.
//!
//! Responsibilities:
//! - Route keys to the open popup, the open form, or the current screen.
//! - Return the action a key triggers; small view-state changes (selection,
//!   search text, page) are applied in place.
//!
//! Non-responsibilities:
//! - Does NOT apply API results (see `update.rs`).
//! - Does NOT spawn tasks.

use apiconn_client::views::{example_queries_for, filter_history, popular_providers};
use apiconn_client::{Connection, ConnectionTest, QueryRequest};
use apiconn_config::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde_json::{Map, Value};

use crate::action::Action;
use crate::app::App;
use crate::app::forms::{ApiKeyForm, ConnectionForm};
use crate::app::state::{CurrentScreen, SettingsPane, move_selection};
use crate::ui::popup::Popup;
use crate::ui::toast::{Toast, ToastLevel};

impl App {
    /// Translate a key press into an action.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<Action> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        if let Some(popup) = self.popup.take() {
            return self.handle_popup_input(popup, key);
        }
        if self.connection_form.is_some() {
            return self.handle_connection_form_input(key);
        }
        if self.api_key_form.is_some() {
            return self.handle_api_key_form_input(key);
        }

        match key.code {
            KeyCode::Tab => return Some(Action::NextScreen),
            KeyCode::BackTab => return Some(Action::PreviousScreen),
            _ => {}
        }

        if !self.is_editing() {
            match key.code {
                KeyCode::Char('q') => return Some(Action::Quit),
                KeyCode::Char('?') => {
                    self.popup = Some(Popup::Help);
                    return None;
                }
                KeyCode::Char('r') => return self.load_action_for_screen(self.current_screen),
                KeyCode::Char(c) => {
                    if let Some(screen) = CurrentScreen::from_digit(c) {
                        return Some(Action::SwitchTo(screen));
                    }
                }
                _ => {}
            }
        }

        match self.current_screen {
            CurrentScreen::Dashboard => None,
            CurrentScreen::Connections => self.handle_connections_input(key),
            CurrentScreen::Query => self.handle_query_input(key),
            CurrentScreen::History => self.handle_history_input(key),
            CurrentScreen::Explorer => self.handle_explorer_input(key),
            CurrentScreen::Settings => self.handle_settings_input(key),
            CurrentScreen::Notifications => self.handle_notifications_input(key),
            CurrentScreen::Docs => self.handle_docs_input(key),
        }
    }

    fn handle_popup_input(&mut self, popup: Popup, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('y') => match popup {
                Popup::ConfirmDeleteConnection { id, .. } => Some(Action::DeleteConnection(id)),
                Popup::ConfirmDeleteApiKey { id, .. } => Some(Action::DeleteApiKey(id)),
                Popup::Help => None,
            },
            KeyCode::Char('n') | KeyCode::Esc => None,
            _ if matches!(popup, Popup::Help) => None,
            _ => {
                // Keep the confirmation open until it is answered.
                self.popup = Some(popup);
                None
            }
        }
    }

    fn handle_connection_form_input(&mut self, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.connection_form = None;
                None
            }
            KeyCode::Char('p') if ctrl => {
                self.apply_next_template();
                None
            }
            KeyCode::Char('t') if ctrl => {
                let form = self.connection_form.as_ref()?;
                if form.base_url.value().trim().is_empty() {
                    self.toast(ToastLevel::Error, "Base URL is required to test a connection");
                    return None;
                }
                Some(Action::TestConnection(form.to_new_connection().as_test()))
            }
            KeyCode::Enter => {
                let conn = self.connection_form.as_ref()?.to_new_connection();
                match conn.validate() {
                    Ok(()) => Some(Action::CreateConnection(conn)),
                    Err(e) => {
                        self.toast(ToastLevel::Error, e.user_message());
                        None
                    }
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                self.connection_form.as_mut()?.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.connection_form.as_mut()?.focus_previous();
                None
            }
            _ => {
                self.connection_form.as_mut()?.handle_key(key);
                None
            }
        }
    }

    /// Cycle the form through provider templates, popular ones first.
    fn apply_next_template(&mut self) {
        let Some(providers) = self.providers.as_deref() else {
            self.toast(ToastLevel::Info, "Provider templates are still loading");
            return;
        };
        let popular = popular_providers(providers);
        let templates: Vec<_> = if popular.is_empty() {
            providers.iter().collect()
        } else {
            popular
        };
        if templates.is_empty() {
            return;
        }
        let Some(form) = self.connection_form.as_mut() else {
            return;
        };
        let index = form
            .template_index
            .map_or(0, |i| (i + 1) % templates.len());
        form.template_index = Some(index);
        form.apply_template(templates[index]);
    }

    fn handle_connections_input(&mut self, key: KeyEvent) -> Option<Action> {
        let len = self.connections.as_ref().map_or(0, Vec::len);
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                move_selection(&mut self.connections_state, len, 1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                move_selection(&mut self.connections_state, len, -1);
                None
            }
            KeyCode::Char('n') => {
                self.connection_form = Some(ConnectionForm::default());
                None
            }
            KeyCode::Char('t') => {
                let conn = self.selected_saved_connection()?;
                Some(Action::TestConnection(connection_test_for(conn)))
            }
            KeyCode::Char('d') => {
                let conn = self.selected_saved_connection()?;
                self.popup = Some(Popup::ConfirmDeleteConnection {
                    id: conn.id.clone(),
                    name: conn.name.clone(),
                });
                None
            }
            _ => None,
        }
    }

    fn selected_saved_connection(&self) -> Option<&Connection> {
        let index = self.connections_state.selected()?;
        self.connections.as_ref()?.get(index)
    }

    /// Example queries for the connection selected on the query screen.
    pub fn example_queries(&self) -> Vec<String> {
        match self.selected_connection() {
            Some(conn) => {
                example_queries_for(&conn.base_url, self.providers.as_deref().unwrap_or(&[]))
            }
            None => Vec::new(),
        }
    }

    fn handle_query_input(&mut self, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => {
                if self.query.running {
                    return None;
                }
                let text = self.query.input.value().trim().to_string();
                let connection_id = self.selected_connection().map(|c| c.id.clone());
                match connection_id {
                    Some(connection_id) if !text.is_empty() => {
                        Some(Action::RunQuery(QueryRequest {
                            query: text,
                            connection_id,
                        }))
                    }
                    _ => {
                        self.toast(
                            ToastLevel::Error,
                            "Please select a connection and enter a query",
                        );
                        None
                    }
                }
            }
            KeyCode::Char('n') if ctrl => {
                self.cycle_query_connection(1);
                None
            }
            KeyCode::Char('p') if ctrl => {
                self.cycle_query_connection(-1);
                None
            }
            KeyCode::Up | KeyCode::Down => {
                let examples = self.example_queries();
                if examples.is_empty() {
                    return None;
                }
                let len = examples.len();
                let next = match (self.query.example_index, key.code) {
                    (None, KeyCode::Down) => 0,
                    (None, _) => len - 1,
                    (Some(i), KeyCode::Down) => (i + 1) % len,
                    (Some(i), _) => (i + len - 1) % len,
                };
                self.query.example_index = Some(next);
                self.query.input.set_value(examples[next].clone());
                None
            }
            KeyCode::PageDown => {
                self.query.scroll = self.query.scroll.saturating_add(10);
                None
            }
            KeyCode::PageUp => {
                self.query.scroll = self.query.scroll.saturating_sub(10);
                None
            }
            _ => {
                self.query.input.handle_key(key);
                None
            }
        }
    }

    fn cycle_query_connection(&mut self, delta: isize) {
        let Some(connections) = self.connections.as_ref() else {
            return;
        };
        if connections.is_empty() {
            return;
        }
        let len = connections.len() as isize;
        let next = match self.query.connection_index {
            None => 0,
            Some(i) => (i as isize + delta).rem_euclid(len) as usize,
        };
        self.query.connection_index = Some(next);
        self.query.example_index = None;
        self.persisted.last_connection_id = Some(connections[next].id.to_string());
    }

    fn handle_history_input(&mut self, key: KeyEvent) -> Option<Action> {
        if self.history_view.searching {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.history_view.searching = false,
                _ => {
                    if self.history_view.search.handle_key(key) {
                        self.history_view.page = 1;
                        self.history_view.list_state.select(Some(0));
                    }
                }
            }
            return None;
        }

        let filtered_len = self
            .history
            .as_deref()
            .map_or(0, |h| filter_history(h, self.history_view.search.value()).len());
        let per_page = self.history_view.per_page.max(1);
        let total_pages = filtered_len.div_ceil(per_page);
        let on_page = filtered_len
            .saturating_sub((self.history_view.page - 1) * per_page)
            .min(per_page);

        match key.code {
            KeyCode::Char('/') => {
                self.history_view.searching = true;
            }
            KeyCode::Left | KeyCode::Char('h') if self.history_view.page > 1 => {
                self.history_view.page -= 1;
                self.history_view.list_state.select(Some(0));
            }
            KeyCode::Right | KeyCode::Char('l') if self.history_view.page < total_pages => {
                self.history_view.page += 1;
                self.history_view.list_state.select(Some(0));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                move_selection(&mut self.history_view.list_state, on_page, 1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                move_selection(&mut self.history_view.list_state, on_page, -1);
            }
            KeyCode::Enter => {
                self.history_view.show_detail = !self.history_view.show_detail;
            }
            KeyCode::Esc => {
                self.history_view.show_detail = false;
            }
            _ => {}
        }
        None
    }

    fn handle_explorer_input(&mut self, key: KeyEvent) -> Option<Action> {
        if self.explorer.searching {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.explorer.searching = false,
                _ => {
                    if self.explorer.search.handle_key(key) {
                        self.explorer.list_state.select(Some(0));
                    }
                }
            }
            return None;
        }

        let len = self.visible_providers().len();
        match key.code {
            KeyCode::Char('/') => {
                self.explorer.searching = true;
                None
            }
            KeyCode::Char('g') => {
                self.explorer.category = self.next_category();
                self.explorer.list_state.select(Some(0));
                None
            }
            KeyCode::Char('v') => {
                self.explorer.tab = self.explorer.tab.next();
                self.explorer.list_state.select(Some(0));
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                move_selection(&mut self.explorer.list_state, len, 1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                move_selection(&mut self.explorer.list_state, len, -1);
                None
            }
            KeyCode::Enter => {
                self.explorer.show_detail = !self.explorer.show_detail;
                None
            }
            KeyCode::Esc => {
                self.explorer.show_detail = false;
                None
            }
            KeyCode::Char('f') => {
                let key = self.selected_provider()?.key.clone();
                let starred = self.persisted.toggle_favorite(&key);
                let message = if starred {
                    format!("Added {key} to favorites")
                } else {
                    format!("Removed {key} from favorites")
                };
                self.toast(ToastLevel::Info, message);
                Some(Action::SavePreferences(self.persisted.clone()))
            }
            KeyCode::Char('c') => {
                let form = ConnectionForm::from_provider(self.selected_provider()?);
                self.connection_form = Some(form);
                Some(Action::SwitchTo(CurrentScreen::Connections))
            }
            _ => None,
        }
    }

    fn handle_settings_input(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Left | KeyCode::Right => {
                self.settings_view.pane = match self.settings_view.pane {
                    SettingsPane::Preferences => SettingsPane::ApiKeys,
                    SettingsPane::ApiKeys => SettingsPane::Preferences,
                };
                return None;
            }
            KeyCode::Char('s') => {
                return self.settings.clone().map(Action::SaveSettings);
            }
            KeyCode::Char('c') => {
                self.persisted.selected_theme = self.persisted.selected_theme.cycle_next();
                self.theme = Theme::from_color_theme(self.persisted.selected_theme);
                self.toast(
                    ToastLevel::Info,
                    format!("Theme: {}", self.persisted.selected_theme),
                );
                return Some(Action::SavePreferences(self.persisted.clone()));
            }
            _ => {}
        }

        match self.settings_view.pane {
            SettingsPane::Preferences => {
                let len = self.settings.as_ref().map_or(0, |s| s.entries().count());
                match key.code {
                    KeyCode::Down | KeyCode::Char('j') => {
                        move_selection(&mut self.settings_view.settings_state, len, 1)
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        move_selection(&mut self.settings_view.settings_state, len, -1)
                    }
                    KeyCode::Char(' ') | KeyCode::Enter => self.toggle_selected_setting(),
                    _ => {}
                }
                None
            }
            SettingsPane::ApiKeys => {
                let len = self.api_keys.as_ref().map_or(0, Vec::len);
                let selected = self
                    .settings_view
                    .keys_state
                    .selected()
                    .and_then(|i| self.api_keys.as_ref()?.get(i));
                match key.code {
                    KeyCode::Down | KeyCode::Char('j') => {
                        move_selection(&mut self.settings_view.keys_state, len, 1);
                        None
                    }
                    KeyCode::Up | KeyCode::Char('k') => {
                        move_selection(&mut self.settings_view.keys_state, len, -1);
                        None
                    }
                    KeyCode::Char('a') => {
                        self.api_key_form = Some(ApiKeyForm::default());
                        None
                    }
                    KeyCode::Char('t') => selected.map(|k| Action::TestApiKey(k.id.clone())),
                    KeyCode::Char('d') => {
                        let popup = selected.map(|k| Popup::ConfirmDeleteApiKey {
                            id: k.id.clone(),
                            name: k.name.clone(),
                        });
                        self.popup = popup;
                        None
                    }
                    _ => None,
                }
            }
        }
    }

    fn toggle_selected_setting(&mut self) {
        let Some(index) = self.settings_view.settings_state.selected() else {
            return;
        };
        let Some(settings) = self.settings.as_mut() else {
            return;
        };
        let target = settings
            .entries()
            .nth(index)
            .map(|(section, key, _)| (section.to_string(), key.to_string()));
        match target {
            Some((section, key)) if settings.get_bool(&section, &key).is_some() => {
                settings.toggle(&section, &key);
                self.settings_view.dirty = true;
            }
            _ => self
                .toasts
                .push(Toast::info("Only on/off settings can be toggled here")),
        }
    }

    fn handle_api_key_form_input(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.api_key_form = None;
                None
            }
            KeyCode::Enter => {
                let new_key = self.api_key_form.as_ref()?.to_new_key();
                match new_key.validate() {
                    Ok(()) => Some(Action::CreateApiKey(new_key)),
                    Err(e) => {
                        self.toast(ToastLevel::Error, e.user_message());
                        None
                    }
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                self.api_key_form.as_mut()?.focus_next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.api_key_form.as_mut()?.focus_previous();
                None
            }
            _ => {
                self.api_key_form.as_mut()?.handle_key(key);
                None
            }
        }
    }

    fn handle_notifications_input(&mut self, key: KeyEvent) -> Option<Action> {
        let filter = self.notifications_view.filter;
        let visible: Vec<_> = self
            .notifications
            .filtered(filter)
            .into_iter()
            .map(|n| n.id)
            .collect();
        let selected = self
            .notifications_view
            .list_state
            .selected()
            .and_then(|i| visible.get(i).copied());

        match key.code {
            KeyCode::Right | KeyCode::Char('l') => {
                self.notifications_view.filter = filter.next();
                self.notifications_view.list_state.select(Some(0));
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.notifications_view.filter = filter.previous();
                self.notifications_view.list_state.select(Some(0));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                move_selection(&mut self.notifications_view.list_state, visible.len(), 1)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                move_selection(&mut self.notifications_view.list_state, visible.len(), -1)
            }
            KeyCode::Char('m') | KeyCode::Enter => {
                if let Some(id) = selected {
                    self.notifications.mark_read(id);
                }
            }
            KeyCode::Char('M') => self.notifications.mark_all_read(),
            KeyCode::Char('d') => {
                if let Some(id) = selected {
                    self.notifications.delete(id);
                    let remaining = self.notifications.filtered(filter).len();
                    move_selection(&mut self.notifications_view.list_state, remaining, 0);
                }
            }
            KeyCode::Char('X') => {
                self.notifications.clear();
                self.notifications_view.list_state.select(None);
            }
            _ => {}
        }
        None
    }

    fn handle_docs_input(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.docs_scroll = self.docs_scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.docs_scroll = self.docs_scroll.saturating_sub(1),
            KeyCode::PageDown => self.docs_scroll = self.docs_scroll.saturating_add(10),
            KeyCode::PageUp => self.docs_scroll = self.docs_scroll.saturating_sub(10),
            _ => {}
        }
        None
    }
}

/// Test payload for a saved connection, reusing its stored credentials.
fn connection_test_for(conn: &Connection) -> ConnectionTest {
    let as_map = |value: &Option<Value>| -> Map<String, Value> {
        value
            .as_ref()
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default()
    };
    ConnectionTest {
        base_url: conn.base_url.clone(),
        auth_type: conn.auth_type.clone(),
        auth_data: as_map(&conn.auth_data),
        headers: as_map(&conn.headers),
    }
}
