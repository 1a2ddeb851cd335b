//! OvirtClient trait for mocking
//!
//! This trait abstracts the OvirtClient so resource handlers can be tested
//! against an in-memory implementation instead of a live engine.

use crate::error::OvirtError;
use crate::models::{Nic, NicRequest};

/// Trait for oVirt API client operations
///
/// NICs are always addressed through their owning VM; the engine cannot
/// resolve a NIC by its own id.
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait OvirtClientTrait: Send + Sync {
    /// Get the API base URL
    fn base_url(&self) -> &str;

    /// Check connectivity and credentials
    async fn validate_connection(&self) -> Result<(), OvirtError>;

    /// Attach a NIC to a VM.
    ///
    /// Returns `Ok(None)` when the engine accepted the request but the
    /// response carried no NIC.
    async fn add_nic(&self, vm_id: &str, nic: &NicRequest) -> Result<Option<Nic>, OvirtError>;

    /// Fetch a NIC of a VM
    async fn get_nic(&self, vm_id: &str, nic_id: &str) -> Result<Nic, OvirtError>;

    /// Unplug a NIC (hot-unplug on running VMs)
    async fn deactivate_nic(&self, vm_id: &str, nic_id: &str) -> Result<(), OvirtError>;

    /// Remove a NIC from its VM
    async fn remove_nic(&self, vm_id: &str, nic_id: &str) -> Result<(), OvirtError>;
}
