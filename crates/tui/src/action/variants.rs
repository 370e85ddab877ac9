//! Action enum definitions for the TUI event system.
//!
//! Actions represent both user intents and async API results.
//!
//! # Action Categories
//!
//! - **System**: lifecycle, screen switching, ticks, toasts
//! - **API Triggers**: commands handled by `runtime::side_effects`
//! - **API Results**: `*Loaded` / completion actions sent back by spawned tasks
//!
//! # Security Note
//!
//! Several payloads carry credentials or query text. Log actions through
//! [`crate::action::RedactedAction`], never with `?action`.

use std::sync::Arc;

use apiconn_client::{
    ApiKey, ApiKeyTestResult, ClientError, Connection, ConnectionTest, CreatedApiKey,
    CreatedConnection, HistoryEntry, MessageResponse, NewApiKey, NewConnection, Provider,
    QueryRequest, QueryResponse, ResourceId, Settings, TestConnectionResult,
};
use apiconn_config::PersistedState;
use crossterm::event::KeyEvent;

use crate::app::CurrentScreen;
use crate::ui::ToastLevel;

/// Result type carried by API result actions.
pub type ApiResult<T> = Result<T, Arc<ClientError>>;

/// Everything the dashboard screen is computed from.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub history: Vec<HistoryEntry>,
    pub connections: Vec<Connection>,
    pub providers: Vec<Provider>,
}

#[derive(Debug, Clone)]
pub enum Action {
    // System
    /// Raw key press from the terminal.
    Input(KeyEvent),
    /// Save preferences and leave the event loop.
    Quit,
    /// UI tick: expires toasts.
    Tick,
    /// Jump to a screen and fetch its data.
    SwitchTo(CurrentScreen),
    NextScreen,
    PreviousScreen,
    Loading(bool),
    Notify(ToastLevel, String),

    // API triggers
    LoadDashboard,
    LoadConnections,
    LoadProviders,
    LoadHistory,
    LoadSettings,
    LoadApiKeys,
    CreateConnection(NewConnection),
    TestConnection(ConnectionTest),
    DeleteConnection(ResourceId),
    RunQuery(QueryRequest),
    SaveSettings(Settings),
    CreateApiKey(NewApiKey),
    DeleteApiKey(ResourceId),
    TestApiKey(ResourceId),
    /// Write preferences to disk.
    SavePreferences(PersistedState),

    // API results
    DashboardLoaded(Box<ApiResult<DashboardData>>),
    ConnectionsLoaded(ApiResult<Vec<Connection>>),
    ProvidersLoaded(ApiResult<Vec<Provider>>),
    HistoryLoaded(ApiResult<Vec<HistoryEntry>>),
    SettingsLoaded(ApiResult<Settings>),
    ApiKeysLoaded(ApiResult<Vec<ApiKey>>),
    ConnectionCreated(ApiResult<CreatedConnection>),
    ConnectionTested(ApiResult<TestConnectionResult>),
    ConnectionDeleted(ApiResult<MessageResponse>),
    QueryCompleted(ApiResult<QueryResponse>),
    SettingsSaved(ApiResult<MessageResponse>),
    ApiKeyCreated(ApiResult<CreatedApiKey>),
    ApiKeyDeleted(ApiResult<MessageResponse>),
    ApiKeyTested(ApiResult<ApiKeyTestResult>),
}
