//! Applying actions to application state.
//!
//! `update` returns an optional follow-up action; the runtime feeds it back
//! through `update` and the side-effect handler until none remains. This is
//! how a screen switch triggers its load, and how a successful mutation
//! reloads the list it changed.

use apiconn_client::views::DashboardStats;
use apiconn_client::{ClientError, Connection, NotificationCategory, NotificationKind, QueryResponse};

use crate::action::{Action, ApiResult};
use crate::app::App;
use crate::app::state::CurrentScreen;
use crate::ui::toast::ToastLevel;

impl App {
    /// Apply `action` and return the follow-up it implies, if any.
    pub fn update(&mut self, action: Action) -> Option<Action> {
        if is_api_result(&action) {
            self.loading = false;
        }

        match action {
            Action::Input(key) => self.handle_input(key),
            Action::Quit => None,
            Action::Tick => {
                self.toasts.retain(|t| !t.is_expired());
                if self.loading || self.query.running {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
                None
            }
            Action::SwitchTo(screen) => self.switch_to(screen),
            Action::NextScreen => self.switch_to(self.current_screen.next()),
            Action::PreviousScreen => self.switch_to(self.current_screen.previous()),
            Action::Loading(loading) => {
                self.loading = loading;
                None
            }
            Action::Notify(level, message) => {
                self.toast(level, message);
                None
            }
            Action::RunQuery(_) => {
                self.query.running = true;
                self.query.result = None;
                self.query.scroll = 0;
                None
            }
            Action::TestConnection(_) => {
                self.toast(ToastLevel::Info, "Testing connection...");
                None
            }

            Action::DashboardLoaded(result) => {
                match *result {
                    Ok(data) => {
                        self.dashboard = Some(DashboardStats::compute(
                            &data.history,
                            &data.connections,
                            &data.providers,
                        ));
                        self.history = Some(data.history);
                        self.connections = Some(data.connections);
                        self.providers = Some(data.providers);
                        self.clear_load_error(CurrentScreen::Dashboard);
                    }
                    Err(e) => self.load_failed(CurrentScreen::Dashboard, "dashboard", &e),
                }
                None
            }
            Action::ConnectionsLoaded(result) => self.apply_connections(result),
            Action::ProvidersLoaded(result) => {
                match result {
                    Ok(providers) => {
                        self.providers = Some(providers);
                        if self.explorer.list_state.selected().is_none() {
                            self.explorer.list_state.select(Some(0));
                        }
                        self.clear_load_error(CurrentScreen::Explorer);
                    }
                    Err(e) => self.load_failed(CurrentScreen::Explorer, "providers", &e),
                }
                None
            }
            Action::HistoryLoaded(result) => match result {
                Ok(history) => {
                    self.history = Some(history);
                    self.history_view.page = 1;
                    self.history_view.list_state.select(Some(0));
                    self.clear_load_error(CurrentScreen::History);
                    // Entries name their connection by id only.
                    self.connections.is_none().then_some(Action::LoadConnections)
                }
                Err(e) => {
                    self.load_failed(CurrentScreen::History, "history", &e);
                    None
                }
            },
            Action::SettingsLoaded(result) => match result {
                Ok(settings) => {
                    self.settings = Some(settings.with_defaults());
                    self.settings_view.dirty = false;
                    if self.settings_view.settings_state.selected().is_none() {
                        self.settings_view.settings_state.select(Some(0));
                    }
                    self.clear_load_error(CurrentScreen::Settings);
                    Some(Action::LoadApiKeys)
                }
                Err(e) => {
                    self.load_failed(CurrentScreen::Settings, "settings", &e);
                    None
                }
            },
            Action::ApiKeysLoaded(result) => {
                match result {
                    Ok(keys) => {
                        let len = keys.len();
                        self.api_keys = Some(keys);
                        clamp_selection(&mut self.settings_view.keys_state, len);
                    }
                    Err(e) => self.load_failed(CurrentScreen::Settings, "API keys", &e),
                }
                None
            }

            Action::ConnectionCreated(result) => match result {
                Ok(_) => {
                    self.connection_form = None;
                    self.report(
                        NotificationKind::Success,
                        NotificationCategory::Connection,
                        "Connection created",
                        "Connection created successfully!",
                    );
                    Some(Action::LoadConnections)
                }
                Err(e) => {
                    self.report(
                        NotificationKind::Error,
                        NotificationCategory::Connection,
                        "Connection not created",
                        format!("Failed to create connection: {}", e.user_message()),
                    );
                    None
                }
            },
            Action::ConnectionTested(result) => {
                match result {
                    Ok(outcome) if outcome.success => self.report(
                        NotificationKind::Success,
                        NotificationCategory::Connection,
                        "Connection test passed",
                        outcome.summary(),
                    ),
                    Ok(outcome) => self.report(
                        NotificationKind::Error,
                        NotificationCategory::Connection,
                        "Connection test failed",
                        outcome.summary(),
                    ),
                    Err(e) => self.report(
                        NotificationKind::Error,
                        NotificationCategory::Connection,
                        "Connection test failed",
                        format!("Connection test failed: {}", e.user_message()),
                    ),
                }
                None
            }
            Action::ConnectionDeleted(result) => match result {
                Ok(_) => {
                    self.report(
                        NotificationKind::Success,
                        NotificationCategory::Connection,
                        "Connection deleted",
                        "Connection deleted successfully!",
                    );
                    Some(Action::LoadConnections)
                }
                Err(e) => {
                    self.report(
                        NotificationKind::Error,
                        NotificationCategory::Connection,
                        "Connection not deleted",
                        format!("Failed to delete connection: {}", e.user_message()),
                    );
                    None
                }
            },
            Action::QueryCompleted(result) => {
                self.query.running = false;
                self.query.scroll = 0;
                let response = match result {
                    Ok(response) => response,
                    Err(e) => QueryResponse {
                        success: false,
                        data: None,
                        error: Some(e.user_message()),
                        interpretation: None,
                        query_id: None,
                    },
                };
                if response.success {
                    self.report(
                        NotificationKind::Success,
                        NotificationCategory::Query,
                        "Query executed",
                        "Query executed successfully!",
                    );
                } else {
                    let reason = response.error.as_deref().unwrap_or("unknown error");
                    self.report(
                        NotificationKind::Error,
                        NotificationCategory::Query,
                        "Query failed",
                        format!("Query failed: {reason}"),
                    );
                }
                self.query.result = Some(response);
                None
            }
            Action::SettingsSaved(result) => {
                match result {
                    Ok(_) => {
                        self.settings_view.dirty = false;
                        self.report(
                            NotificationKind::Success,
                            NotificationCategory::System,
                            "Settings saved",
                            "Settings saved successfully!",
                        );
                    }
                    Err(e) => self.report(
                        NotificationKind::Error,
                        NotificationCategory::System,
                        "Settings not saved",
                        format!("Failed to save settings: {}", e.user_message()),
                    ),
                }
                None
            }
            Action::ApiKeyCreated(result) => match result {
                Ok(_) => {
                    self.api_key_form = None;
                    self.report(
                        NotificationKind::Success,
                        NotificationCategory::Security,
                        "API key added",
                        "API key added successfully!",
                    );
                    Some(Action::LoadApiKeys)
                }
                Err(e) => {
                    self.report(
                        NotificationKind::Error,
                        NotificationCategory::Security,
                        "API key not added",
                        format!("Failed to add API key: {}", e.user_message()),
                    );
                    None
                }
            },
            Action::ApiKeyDeleted(result) => match result {
                Ok(_) => {
                    self.report(
                        NotificationKind::Success,
                        NotificationCategory::Security,
                        "API key deleted",
                        "API key deleted successfully!",
                    );
                    Some(Action::LoadApiKeys)
                }
                Err(e) => {
                    self.report(
                        NotificationKind::Error,
                        NotificationCategory::Security,
                        "API key not deleted",
                        format!("Failed to delete API key: {}", e.user_message()),
                    );
                    None
                }
            },
            Action::ApiKeyTested(result) => {
                match result {
                    Ok(outcome) if outcome.success => self.report(
                        NotificationKind::Success,
                        NotificationCategory::Security,
                        "API key test passed",
                        outcome
                            .message
                            .unwrap_or_else(|| "API key is valid".to_string()),
                    ),
                    Ok(outcome) => self.report(
                        NotificationKind::Error,
                        NotificationCategory::Security,
                        "API key test failed",
                        format!(
                            "API key test failed: {}",
                            outcome
                                .error
                                .or(outcome.message)
                                .unwrap_or_else(|| "unknown error".to_string())
                        ),
                    ),
                    Err(e) => self.report(
                        NotificationKind::Error,
                        NotificationCategory::Security,
                        "API key test failed",
                        format!("API key test failed: {}", e.user_message()),
                    ),
                }
                None
            }

            // Handled by the side-effect layer.
            Action::LoadDashboard
            | Action::LoadConnections
            | Action::LoadProviders
            | Action::LoadHistory
            | Action::LoadSettings
            | Action::LoadApiKeys
            | Action::CreateConnection(_)
            | Action::DeleteConnection(_)
            | Action::SaveSettings(_)
            | Action::CreateApiKey(_)
            | Action::DeleteApiKey(_)
            | Action::TestApiKey(_)
            | Action::SavePreferences(_) => None,
        }
    }

    fn switch_to(&mut self, screen: CurrentScreen) -> Option<Action> {
        self.current_screen = screen;
        self.load_action_for_screen(screen)
    }

    fn apply_connections(&mut self, result: ApiResult<Vec<Connection>>) -> Option<Action> {
        let connections = match result {
            Ok(connections) => connections,
            Err(e) => {
                self.load_failed(self.current_screen, "connections", &e);
                return None;
            }
        };

        clamp_selection(&mut self.connections_state, connections.len());

        // Keep the current pick; on first load restore the last used one.
        let last = self.persisted.last_connection_id.as_deref();
        self.query.connection_index = self
            .query
            .connection_index
            .filter(|i| *i < connections.len())
            .or_else(|| {
                connections
                    .iter()
                    .position(|c| Some(c.id.to_string().as_str()) == last)
            })
            .or((!connections.is_empty()).then_some(0));

        self.connections = Some(connections);
        self.clear_load_error(self.current_screen);

        let wants_providers = matches!(
            self.current_screen,
            CurrentScreen::Connections | CurrentScreen::Query
        );
        (wants_providers && self.providers.is_none()).then_some(Action::LoadProviders)
    }

    fn load_failed(&mut self, screen: CurrentScreen, what: &str, error: &ClientError) {
        let message = error.user_message();
        self.toast(ToastLevel::Error, format!("Failed to load {what}: {message}"));
        self.load_error = Some((screen, message));
    }

    fn clear_load_error(&mut self, screen: CurrentScreen) {
        if self.load_error.as_ref().is_some_and(|(s, _)| *s == screen) {
            self.load_error = None;
        }
    }
}

fn is_api_result(action: &Action) -> bool {
    matches!(
        action,
        Action::DashboardLoaded(_)
            | Action::ConnectionsLoaded(_)
            | Action::ProvidersLoaded(_)
            | Action::HistoryLoaded(_)
            | Action::SettingsLoaded(_)
            | Action::ApiKeysLoaded(_)
            | Action::ConnectionCreated(_)
            | Action::ConnectionTested(_)
            | Action::ConnectionDeleted(_)
            | Action::QueryCompleted(_)
            | Action::SettingsSaved(_)
            | Action::ApiKeyCreated(_)
            | Action::ApiKeyDeleted(_)
            | Action::ApiKeyTested(_)
    )
}

/// Keep a list selection inside `len` items, selecting the first when unset.
fn clamp_selection(state: &mut ratatui::widgets::ListState, len: usize) {
    if len == 0 {
        state.select(None);
    } else {
        let index = state.selected().unwrap_or(0).min(len - 1);
        state.select(Some(index));
    }
}
