//! oVirt client errors

use thiserror::Error;

/// Errors that can occur when interacting with the oVirt Engine API
#[derive(Debug, Error)]
pub enum OvirtError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// oVirt API returned an error
    #[error("oVirt API error: {0}")]
    Api(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Authentication failed (bad credentials, missing permissions)
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request (e.g., empty identifiers)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl OvirtError {
    /// Whether the engine reported the addressed entity as absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, OvirtError::NotFound(_))
    }
}
