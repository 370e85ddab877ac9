//! Application state for the API Connector TUI.
//!
//! Responsibilities:
//! - Own everything the screens render: fetched data, view state, forms,
//!   toasts, popups, notifications and persisted preferences.
//! - Translate keys into actions (`input`) and apply actions (`update`).
//!
//! Does NOT handle:
//! - Network calls (see `runtime::side_effects`).
//! - Terminal setup (see `main.rs` and `runtime::terminal`).
//!
//! Invariants:
//! - `handle_input` never performs I/O; it only returns actions.
//! - Every mutation result reaches the user as a toast and a notification.

pub mod forms;
mod input;
mod render;
pub mod state;
mod update;

pub use state::{CurrentScreen, FOOTER_HEIGHT, HEADER_HEIGHT};

use apiconn_client::views::{
    DashboardStats, NotificationCenter, filter_providers, group_by_category,
};
use apiconn_client::{
    ApiKey, Connection, HistoryEntry, NotificationCategory, NotificationKind, Provider,
    ResourceId, Settings,
};
use apiconn_config::{PersistedState, Theme};
use ratatui::widgets::ListState;

use crate::ui::popup::Popup;
use crate::ui::toast::{Toast, ToastLevel};
use forms::{ApiKeyForm, ConnectionForm};
use state::{
    ExplorerState, ExplorerTab, HistoryView, NotificationsView, QueryState, SettingsView,
};

/// Main application state.
pub struct App {
    pub current_screen: CurrentScreen,
    pub theme: Theme,
    /// Backend the client talks to, shown in the header.
    pub base_url: String,
    pub loading: bool,
    /// Advanced on every tick while loading.
    pub spinner_frame: u8,
    pub toasts: Vec<Toast>,
    pub popup: Option<Popup>,
    pub persisted: PersistedState,
    pub notifications: NotificationCenter,

    // Fetched data; `None` until the first successful load.
    pub dashboard: Option<DashboardStats>,
    pub connections: Option<Vec<Connection>>,
    pub providers: Option<Vec<Provider>>,
    pub history: Option<Vec<HistoryEntry>>,
    pub settings: Option<Settings>,
    pub api_keys: Option<Vec<ApiKey>>,
    /// Last load error per screen, shown inline instead of the data.
    pub load_error: Option<(CurrentScreen, String)>,

    // View state
    pub connections_state: ListState,
    pub connection_form: Option<ConnectionForm>,
    pub query: QueryState,
    pub history_view: HistoryView,
    pub explorer: ExplorerState,
    pub settings_view: SettingsView,
    pub api_key_form: Option<ApiKeyForm>,
    pub notifications_view: NotificationsView,
    pub docs_scroll: u16,
}

impl App {
    pub fn new(base_url: impl Into<String>, persisted: PersistedState) -> Self {
        let theme = Theme::from_color_theme(persisted.selected_theme);
        let mut history_view = HistoryView {
            per_page: persisted.history_page_size.max(1),
            ..Default::default()
        };
        history_view.list_state.select(Some(0));

        let mut query = QueryState::default();
        if let Some(text) = &persisted.last_query {
            query.input.set_value(text.clone());
        }

        Self {
            current_screen: CurrentScreen::Dashboard,
            theme,
            base_url: base_url.into(),
            loading: false,
            spinner_frame: 0,
            toasts: Vec::new(),
            popup: None,
            persisted,
            notifications: NotificationCenter::new(),
            dashboard: None,
            connections: None,
            providers: None,
            history: None,
            settings: None,
            api_keys: None,
            load_error: None,
            connections_state: ListState::default(),
            connection_form: None,
            query,
            history_view,
            explorer: ExplorerState::default(),
            settings_view: SettingsView::default(),
            api_key_form: None,
            notifications_view: NotificationsView::default(),
            docs_scroll: 0,
        }
    }

    /// The action that fetches what `screen` shows, if it shows backend data.
    pub fn load_action_for_screen(&self, screen: CurrentScreen) -> Option<crate::Action> {
        use crate::Action;
        match screen {
            CurrentScreen::Dashboard => Some(Action::LoadDashboard),
            CurrentScreen::Connections => Some(Action::LoadConnections),
            // Providers follow once connections arrive; they feed the examples.
            CurrentScreen::Query => Some(Action::LoadConnections),
            CurrentScreen::History => Some(Action::LoadHistory),
            CurrentScreen::Explorer => Some(Action::LoadProviders),
            CurrentScreen::Settings => Some(Action::LoadSettings),
            CurrentScreen::Notifications | CurrentScreen::Docs => None,
        }
    }

    /// Preferences to write on exit.
    pub fn persisted_state(&self) -> PersistedState {
        let mut state = self.persisted.clone();
        state.history_page_size = self.history_view.per_page;
        let last_query = self.query.input.value().trim();
        state.last_query = (!last_query.is_empty()).then(|| last_query.to_string());
        state
    }

    pub fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toasts.push(Toast::new(message.into(), level));
    }

    /// Toast plus an entry in the notification center.
    pub fn report(
        &mut self,
        kind: NotificationKind,
        category: NotificationCategory,
        title: &str,
        message: impl Into<String>,
    ) {
        let message = message.into();
        let level = match kind {
            NotificationKind::Success => ToastLevel::Success,
            NotificationKind::Error => ToastLevel::Error,
            NotificationKind::Warning => ToastLevel::Warning,
            NotificationKind::Info => ToastLevel::Info,
        };
        self.toasts.push(Toast::new(message.clone(), level));
        self.notifications.notify(kind, category, title, message);
    }

    /// Selected connection on the query screen.
    pub fn selected_connection(&self) -> Option<&Connection> {
        let index = self.query.connection_index?;
        self.connections.as_ref()?.get(index)
    }

    /// Providers shown in the explorer for the current search, category and tab.
    pub fn visible_providers(&self) -> Vec<&Provider> {
        self.providers
            .as_deref()
            .map(|providers| {
                visible_providers(
                    providers,
                    self.explorer.search.value(),
                    self.explorer.category.as_deref(),
                    self.explorer.tab,
                    &self.persisted,
                )
            })
            .unwrap_or_default()
    }

    pub fn selected_provider(&self) -> Option<&Provider> {
        let index = self.explorer.list_state.selected()?;
        self.visible_providers().get(index).copied()
    }

    /// Category after the active one; wraps to "all categories".
    pub fn next_category(&self) -> Option<String> {
        let categories: Vec<String> = self
            .providers
            .as_deref()
            .map(|p| group_by_category(p).into_keys().collect())
            .unwrap_or_default();
        match &self.explorer.category {
            None => categories.into_iter().next(),
            Some(current) => categories
                .iter()
                .position(|c| c == current)
                .and_then(|i| categories.get(i + 1).cloned()),
        }
    }

    /// Display name of the connection a history entry ran against.
    pub fn connection_name(&self, id: Option<&ResourceId>) -> String {
        connection_display_name(self.connections.as_deref(), id)
    }

    /// True when a text input or form should receive plain character keys.
    pub fn is_editing(&self) -> bool {
        self.connection_form.is_some()
            || self.api_key_form.is_some()
            || self.current_screen == CurrentScreen::Query
            || (self.current_screen == CurrentScreen::History && self.history_view.searching)
            || (self.current_screen == CurrentScreen::Explorer && self.explorer.searching)
    }
}

/// Explorer list: search and category filters, then the tab's ordering or
/// favourites restriction.
pub(crate) fn visible_providers<'a>(
    providers: &'a [Provider],
    search: &str,
    category: Option<&str>,
    tab: ExplorerTab,
    persisted: &PersistedState,
) -> Vec<&'a Provider> {
    let mut visible = filter_providers(providers, search, category);
    match tab {
        ExplorerTab::All => {}
        ExplorerTab::ByCategory => visible.sort_by(|a, b| {
            a.category
                .as_deref()
                .unwrap_or("Other")
                .cmp(b.category.as_deref().unwrap_or("Other"))
                .then_with(|| a.name.cmp(&b.name))
        }),
        ExplorerTab::Favorites => visible.retain(|p| persisted.is_favorite(&p.key)),
    }
    visible
}

/// Name for a connection id, falling back to the id when it is not loaded.
pub(crate) fn connection_display_name(connections: Option<&[Connection]>, id: Option<&ResourceId>) -> String {
    let Some(id) = id else {
        return "Unknown".to_string();
    };
    connections
        .and_then(|list| list.iter().find(|c| &c.id == id))
        .map(|c| c.name.clone())
        .unwrap_or_else(|| format!("Connection {id}"))
}
