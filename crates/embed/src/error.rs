//! Error types for the embed SDK.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EmbedError>;

/// Errors raised by [`crate::EmbedClient`] and the DOM helpers.
///
/// HTTP failures carry only the status; the body of a failed response is
/// never read.
#[derive(Error, Debug)]
pub enum EmbedError {
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// The request never produced a response (DNS, refused connection, TLS).
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body was not JSON.
    #[error("Invalid JSON response: {0}")]
    Decode(String),

    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Invalid options: {0}")]
    InvalidOptions(String),
}

impl EmbedError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } => Some(*status),
            _ => None,
        }
    }
}
