//! REST client for the API Connector backend.
//!
//! This crate provides a type-safe client for the natural-language proxy
//! backend (`/api/query`, `/api/connections`, `/api/providers`,
//! `/api/history`, `/api/settings`, `/api/api-keys`), plus the client-side
//! page logic (filtering, pagination, dashboard statistics) the CLI and TUI
//! share.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod metrics;
pub mod metrics_exporter;
pub mod models;
pub mod views;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use client::ApiClient;
pub use client::builder::ApiClientBuilder;
pub use error::{ClientError, Result};
pub use metrics::{CallOutcome, ErrorCategory, MetricsCollector};
pub use metrics_exporter::{MetricsExporter, MetricsExporterError};
pub use models::{
    ApiKey, ApiKeyTestResult, ApiKeyUpdate, AuthType, Connection, ConnectionTest,
    CreatedApiKey, CreatedConnection, Credentials, HistoryEntry, HistoryStatus, Interpretation,
    MessageResponse, NewApiKey, NewConnection, Notification, NotificationCategory,
    NotificationKind, Provider, ProviderCategories, ProviderSummary, QueryRequest, QueryResponse,
    ResourceId, ServerStatus, Settings, TestConnectionResult,
};
