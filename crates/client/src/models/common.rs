//! Shapes shared by several endpoints.

use serde::{Deserialize, Serialize};

/// `{ "message": ... }` acknowledgement returned by mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `{ "error": ... }` body returned with non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Health message served at `/`.
pub type ServerStatus = MessageResponse;
