//! User preferences that persist across runs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_HISTORY_PAGE_SIZE;
use crate::types::ColorTheme;

/// Preferences kept on disk between dashboard sessions.
///
/// # Invariants
///
/// - `history_page_size` is at least 1 after `sanitize()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    /// Connection preselected on the query screen.
    pub last_connection_id: Option<String>,
    /// Provider keys starred in the explorer.
    pub favorite_providers: BTreeSet<String>,
    /// History entries per page.
    pub history_page_size: usize,
    /// Selected color theme.
    pub selected_theme: ColorTheme,
    /// Last query text typed in the console.
    pub last_query: Option<String>,
}

impl Default for PersistedState {
    fn default() -> Self {
        Self {
            last_connection_id: None,
            favorite_providers: BTreeSet::new(),
            history_page_size: DEFAULT_HISTORY_PAGE_SIZE,
            selected_theme: ColorTheme::Default,
            last_query: None,
        }
    }
}

impl PersistedState {
    /// Clamp values read from disk into their valid ranges.
    pub fn sanitize(mut self) -> Self {
        if self.history_page_size == 0 {
            self.history_page_size = DEFAULT_HISTORY_PAGE_SIZE;
        }
        self
    }

    /// Star or unstar a provider. Returns `true` if it is now a favourite.
    pub fn toggle_favorite(&mut self, provider_key: &str) -> bool {
        if self.favorite_providers.remove(provider_key) {
            false
        } else {
            self.favorite_providers.insert(provider_key.to_string());
            true
        }
    }

    pub fn is_favorite(&self, provider_key: &str) -> bool {
        self.favorite_providers.contains(provider_key)
    }
}
