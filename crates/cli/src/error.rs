//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `ClientError` and `EmbedError` variants to those codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Signal handling (see cancellation.rs for SIGINT handling).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use apiconn_client::ClientError;
use apiconn_embed::EmbedError;

/// Structured exit codes for `apiconn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    Success = 0,

    /// Unhandled or generic failure.
    GeneralError = 1,

    /// Missing or rejected API key (HTTP 401/403).
    AuthenticationFailed = 2,

    /// Network failure, refused connection or timeout.
    ///
    /// Scripts may retry.
    ConnectionError = 3,

    /// Connection, provider or key id does not exist.
    NotFound = 4,

    /// Rejected input: blank fields, HTTP 400, malformed responses.
    ///
    /// Scripts should fix the input and not retry the same request.
    ValidationError = 5,

    /// Backend or upstream failure (HTTP 5xx).
    ServerError = 8,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }

    fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ExitCode::AuthenticationFailed,
            404 => ExitCode::NotFound,
            400 | 422 => ExitCode::ValidationError,
            500..=599 => ExitCode::ServerError,
            _ => ExitCode::GeneralError,
        }
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::ApiError { status, .. } => Self::from_status(*status),
            ClientError::HttpError(e) if e.is_connect() || e.is_timeout() => {
                ExitCode::ConnectionError
            }
            ClientError::HttpError(_) => ExitCode::GeneralError,
            ClientError::InvalidUrl(_) => ExitCode::ConnectionError,
            ClientError::InvalidRequest(_) | ClientError::InvalidResponse(_) => {
                ExitCode::ValidationError
            }
        }
    }
}

impl From<&EmbedError> for ExitCode {
    fn from(err: &EmbedError) -> Self {
        match err {
            EmbedError::Http { status } => Self::from_status(*status),
            EmbedError::Transport(e) if e.is_connect() || e.is_timeout() => {
                ExitCode::ConnectionError
            }
            EmbedError::Transport(_) => ExitCode::GeneralError,
            EmbedError::Decode(_) | EmbedError::InvalidSelector { .. } => ExitCode::ValidationError,
            EmbedError::InvalidOptions(_) => ExitCode::ConnectionError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns `ExitCode::GeneralError` if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(client_err) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(client_err);
            }
            if let Some(embed_err) = cause.downcast_ref::<EmbedError>() {
                return ExitCode::from(embed_err);
            }
        }
        ExitCode::GeneralError
    }
}
