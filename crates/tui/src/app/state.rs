//! Screen enum and per-screen view state.
//!
//! Responsibilities:
//! - Define the navigable screens and their cycle order.
//! - Hold selection, search and paging state that lives only in the UI.
//!
//! Does NOT handle:
//! - Fetched backend data (held directly on `App`).
//! - Forms (see `app::forms`).

use apiconn_client::views::NotificationFilter;
use apiconn_config::constants::DEFAULT_HISTORY_PAGE_SIZE;
use ratatui::widgets::ListState;

use crate::app::forms::TextField;

pub const HEADER_HEIGHT: u16 = 3;
pub const FOOTER_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CurrentScreen {
    #[default]
    Dashboard,
    Connections,
    Query,
    History,
    Explorer,
    Settings,
    Notifications,
    Docs,
}

impl CurrentScreen {
    /// Screens in tab order; number keys 1-8 index into this.
    pub const ALL: [CurrentScreen; 8] = [
        Self::Dashboard,
        Self::Connections,
        Self::Query,
        Self::History,
        Self::Explorer,
        Self::Settings,
        Self::Notifications,
        Self::Docs,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Connections => "Connections",
            Self::Query => "Query",
            Self::History => "History",
            Self::Explorer => "Explorer",
            Self::Settings => "Settings",
            Self::Notifications => "Notifications",
            Self::Docs => "Docs",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// `'1'` → Dashboard … `'8'` → Docs.
    pub fn from_digit(c: char) -> Option<Self> {
        let n = c.to_digit(10)? as usize;
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

/// Move a list selection by `delta`, clamped to `len`.
pub fn move_selection(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let current = state.selected().unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, len as isize - 1);
    state.select(Some(next as usize));
}

/// Query console state.
#[derive(Debug, Default)]
pub struct QueryState {
    pub input: TextField,
    /// Index into the loaded connections.
    pub connection_index: Option<usize>,
    /// Selected example query, cycled with Up/Down.
    pub example_index: Option<usize>,
    /// A query is in flight; the run key is disabled until it settles.
    pub running: bool,
    pub result: Option<apiconn_client::QueryResponse>,
    pub scroll: u16,
}

/// History viewer state. Pages are 1-based.
#[derive(Debug)]
pub struct HistoryView {
    pub search: TextField,
    pub searching: bool,
    pub page: usize,
    pub per_page: usize,
    pub list_state: ListState,
    pub show_detail: bool,
}

impl Default for HistoryView {
    fn default() -> Self {
        Self {
            search: TextField::default(),
            searching: false,
            page: 1,
            per_page: DEFAULT_HISTORY_PAGE_SIZE,
            list_state: ListState::default(),
            show_detail: false,
        }
    }
}

/// Explorer tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExplorerTab {
    #[default]
    All,
    ByCategory,
    Favorites,
}

impl ExplorerTab {
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::ByCategory,
            Self::ByCategory => Self::Favorites,
            Self::Favorites => Self::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All APIs",
            Self::ByCategory => "By Category",
            Self::Favorites => "Favorites",
        }
    }
}

#[derive(Debug, Default)]
pub struct ExplorerState {
    pub search: TextField,
    pub searching: bool,
    /// Category filter; `None` shows every category.
    pub category: Option<String>,
    pub tab: ExplorerTab,
    pub list_state: ListState,
    pub show_detail: bool,
}

/// Which half of the settings screen has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsPane {
    #[default]
    Preferences,
    ApiKeys,
}

#[derive(Debug, Default)]
pub struct SettingsView {
    pub pane: SettingsPane,
    pub settings_state: ListState,
    pub keys_state: ListState,
    /// Local edits not yet saved to the backend.
    pub dirty: bool,
}

#[derive(Debug, Default)]
pub struct NotificationsView {
    pub filter: NotificationFilter,
    pub list_state: ListState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_cycle_wraps() {
        assert_eq!(CurrentScreen::Docs.next(), CurrentScreen::Dashboard);
        assert_eq!(CurrentScreen::Dashboard.previous(), CurrentScreen::Docs);
        let mut screen = CurrentScreen::Dashboard;
        for _ in 0..CurrentScreen::ALL.len() {
            screen = screen.next();
        }
        assert_eq!(screen, CurrentScreen::Dashboard);
    }

    #[test]
    fn test_from_digit() {
        assert_eq!(CurrentScreen::from_digit('1'), Some(CurrentScreen::Dashboard));
        assert_eq!(CurrentScreen::from_digit('4'), Some(CurrentScreen::History));
        assert_eq!(CurrentScreen::from_digit('8'), Some(CurrentScreen::Docs));
        assert_eq!(CurrentScreen::from_digit('0'), None);
        assert_eq!(CurrentScreen::from_digit('9'), None);
    }

    #[test]
    fn test_move_selection_clamps() {
        let mut state = ListState::default();
        move_selection(&mut state, 3, 1);
        assert_eq!(state.selected(), Some(1));
        move_selection(&mut state, 3, 10);
        assert_eq!(state.selected(), Some(2));
        move_selection(&mut state, 3, -10);
        assert_eq!(state.selected(), Some(0));
        move_selection(&mut state, 0, 1);
        assert_eq!(state.selected(), None);
    }
}
