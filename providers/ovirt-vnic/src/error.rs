//! Provider error types.
//!
//! This module defines the errors surfaced by the vNIC resource handler.
//! Engine failures are carried as-is in [`ProviderError::Remote`].

use ovirt_client::OvirtError;
use thiserror::Error;

/// Errors that can occur while managing a vNIC resource.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Composite id does not split into `<vm_id>:<vnic_id>`
    #[error("Malformed identifier: {0}")]
    MalformedIdentifier(String),

    /// Engine response lacks an expected field
    #[error("Unexpected response: {0}")]
    ResponseShape(String),

    /// Any failure reported by the oVirt client, unchanged
    #[error(transparent)]
    Remote(#[from] OvirtError),

    /// Invalid configuration or resource arguments
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Resource expected to exist is gone (import, read-back after create)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The vNIC was attached but reading it back failed; `id` is still live
    #[error("vnic {id} was created but reading it back failed: {source}")]
    ReadBack {
        /// Composite id of the attached vNIC
        id: String,
        /// Why the read-back failed
        #[source]
        source: Box<ProviderError>,
    },
}

impl ProviderError {
    /// Id of a vNIC that exists on the engine despite this error
    pub fn created_id(&self) -> Option<&str> {
        match self {
            ProviderError::ReadBack { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Result alias used across the provider
pub type ProviderResult<T> = Result<T, ProviderError>;
