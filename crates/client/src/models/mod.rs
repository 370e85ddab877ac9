//! Data models for API Connector backend resources.
//!
//! Every type here mirrors a JSON shape produced or accepted by the backend,
//! except notifications, which are dashboard-local state.

mod api_key;
mod common;
mod connection;
mod history;
mod ids;
mod notification;
mod provider;
mod query;
mod settings;

pub use api_key::{ApiKey, ApiKeyTestResult, ApiKeyUpdate, CreatedApiKey, NewApiKey};
pub use common::{ErrorBody, MessageResponse, ServerStatus};
pub use connection::{
    AuthType, Connection, ConnectionTest, CreatedConnection, Credentials, NewConnection,
    TestConnectionResult,
};
pub use history::{HistoryEntry, HistoryStatus};
pub use ids::ResourceId;
pub use notification::{Notification, NotificationCategory, NotificationKind};
pub use provider::{Provider, ProviderCategories, ProviderSummary};
pub use query::{Interpretation, QueryRequest, QueryResponse};
pub use settings::Settings;
