//! Metrics for backend calls and the embed query cache.
//!
//! Recording goes through the `metrics` facade, so it is a no-op until a
//! recorder is installed (see [`crate::metrics_exporter`]). Label names are
//! fixed: `endpoint`, `method`, `status`, `error_category`.

use crate::error::ClientError;
use std::time::Duration;

pub const METRIC_REQUEST_DURATION: &str = "apiconn_api_request_duration_seconds";
pub const METRIC_REQUESTS_TOTAL: &str = "apiconn_api_requests_total";
pub const METRIC_ERRORS_TOTAL: &str = "apiconn_api_errors_total";
pub const METRIC_CACHE_HITS: &str = "apiconn_sdk_cache_hits_total";
pub const METRIC_CACHE_MISSES: &str = "apiconn_sdk_cache_misses_total";
pub const METRIC_TUI_ACTION_QUEUE_DEPTH: &str = "apiconn_tui_action_queue_depth";

/// Coarse failure class used as the `error_category` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Connection refused, DNS failure and the like.
    Transport,
    Http4xx,
    Http5xx,
    Timeout,
    Unknown,
}

impl ErrorCategory {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Transport => "transport",
            ErrorCategory::Http4xx => "http_4xx",
            ErrorCategory::Http5xx => "http_5xx",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Unknown => "unknown",
        }
    }
}

impl From<&ClientError> for ErrorCategory {
    fn from(error: &ClientError) -> Self {
        match error {
            ClientError::ApiError { status, .. } => match status {
                400..=499 => ErrorCategory::Http4xx,
                500..=599 => ErrorCategory::Http5xx,
                _ => ErrorCategory::Unknown,
            },
            ClientError::HttpError(e) if e.is_timeout() => ErrorCategory::Timeout,
            ClientError::HttpError(e) if e.is_connect() => ErrorCategory::Transport,
            _ => ErrorCategory::Unknown,
        }
    }
}

/// How a backend call ended, as far as metrics care.
#[derive(Debug, Clone, Copy)]
pub enum CallOutcome<'a> {
    /// A 2xx response.
    Ok(u16),
    /// A response arrived but the call still failed (non-2xx).
    Rejected(u16, &'a ClientError),
    /// No response at all.
    Failed(&'a ClientError),
}

impl CallOutcome<'_> {
    fn status_label(&self) -> String {
        match self {
            CallOutcome::Ok(status) | CallOutcome::Rejected(status, _) => status.to_string(),
            CallOutcome::Failed(_) => "error".to_string(),
        }
    }

    fn error(&self) -> Option<&ClientError> {
        match self {
            CallOutcome::Ok(_) => None,
            CallOutcome::Rejected(_, e) | CallOutcome::Failed(e) => Some(e),
        }
    }
}

/// Labelled wrapper over the `metrics` macros.
///
/// Cloning is cheap; a disabled collector records nothing.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    enabled: bool,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Count a call as it goes out.
    pub fn record_request(&self, endpoint: &str, method: &str) {
        if !self.enabled {
            return;
        }
        metrics::counter!(METRIC_REQUESTS_TOTAL,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
        )
        .increment(1);
    }

    /// Record latency for a finished call, and count it as an error if it
    /// failed.
    pub fn record_outcome(
        &self,
        endpoint: &str,
        method: &str,
        elapsed: Duration,
        outcome: CallOutcome<'_>,
    ) {
        if !self.enabled {
            return;
        }
        metrics::histogram!(METRIC_REQUEST_DURATION,
            "endpoint" => endpoint.to_string(),
            "method" => method.to_string(),
            "status" => outcome.status_label(),
        )
        .record(elapsed.as_secs_f64());

        if let Some(error) = outcome.error() {
            metrics::counter!(METRIC_ERRORS_TOTAL,
                "endpoint" => endpoint.to_string(),
                "method" => method.to_string(),
                "error_category" => ErrorCategory::from(error).as_str(),
            )
            .increment(1);
        }
    }

    /// Count an embed query cache lookup.
    pub fn record_cache_lookup(&self, hit: bool) {
        if !self.enabled {
            return;
        }
        let name = if hit { METRIC_CACHE_HITS } else { METRIC_CACHE_MISSES };
        metrics::counter!(name).increment(1);
    }

    pub fn record_tui_action_queue_depth(&self, depth: usize) {
        if self.enabled {
            metrics::gauge!(METRIC_TUI_ACTION_QUEUE_DEPTH).set(depth as f64);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16) -> ClientError {
        ClientError::ApiError {
            status,
            url: "u".into(),
            message: "m".into(),
        }
    }

    #[test]
    fn test_error_category_from_status() {
        assert_eq!(ErrorCategory::from(&api_error(404)), ErrorCategory::Http4xx);
        assert_eq!(ErrorCategory::from(&api_error(502)), ErrorCategory::Http5xx);
        assert_eq!(ErrorCategory::from(&api_error(302)), ErrorCategory::Unknown);
        assert_eq!(
            ErrorCategory::from(&ClientError::InvalidRequest("x".into())),
            ErrorCategory::Unknown
        );
    }

    #[test]
    fn test_outcome_labels() {
        let err = api_error(400);
        assert_eq!(CallOutcome::Ok(200).status_label(), "200");
        assert_eq!(CallOutcome::Rejected(400, &err).status_label(), "400");
        assert_eq!(CallOutcome::Failed(&err).status_label(), "error");
        assert!(CallOutcome::Ok(204).error().is_none());
        assert!(CallOutcome::Failed(&err).error().is_some());
    }

    #[test]
    fn test_recording_without_recorder_is_harmless() {
        for collector in [MetricsCollector::new(), MetricsCollector::disabled()] {
            collector.record_request("/api/query", "POST");
            collector.record_outcome(
                "/api/query",
                "POST",
                Duration::from_millis(12),
                CallOutcome::Ok(200),
            );
            collector.record_cache_lookup(true);
            collector.record_tui_action_queue_depth(3);
        }
        assert!(!MetricsCollector::disabled().is_enabled());
    }
}
