//! Centralized constants for the API Connector workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Backend address used in development builds.
pub const DEVELOPMENT_API_URL: &str = "http://localhost:5001";

/// WebSocket address used in development builds.
pub const DEVELOPMENT_WS_URL: &str = "ws://localhost:5001";

/// Origin assumed in production when no explicit API URL is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8000";

/// Header name used for `api_key` connections when none is given.
pub const DEFAULT_API_KEY_HEADER: &str = "X-API-Key";

// =============================================================================
// Embed SDK Defaults
// =============================================================================

/// Default query cache expiry in milliseconds (5 minutes).
pub const DEFAULT_CACHE_EXPIRY_MS: u64 = 300_000;

// =============================================================================
// Dashboard Defaults
// =============================================================================

/// History entries shown per page.
pub const DEFAULT_HISTORY_PAGE_SIZE: usize = 10;

/// Number of history entries shown in the dashboard activity feed.
pub const RECENT_ACTIVITY_LIMIT: usize = 6;

/// Provider keys surfaced as "popular" templates on the connections screen.
pub const POPULAR_PROVIDER_KEYS: &[&str] = &[
    "github",
    "wordpress",
    "openweather",
    "twitter",
    "spotify",
    "youtube",
];

// =============================================================================
// TUI/UI Defaults
// =============================================================================

/// Default channel capacity for action messages.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Default UI tick interval for animations in milliseconds.
pub const DEFAULT_UI_TICK_MS: u64 = 250;

/// Default toast time-to-live in seconds.
pub const DEFAULT_TOAST_TTL_SECS: u64 = 5;
