//! oVirt Engine REST API Client
//!
//! A Rust client library for the parts of the oVirt Engine API (v4) used to
//! manage virtual machine network interfaces.
//!
//! # Example
//!
//! ```no_run
//! use ovirt_client::{NicRequest, OvirtClient, OvirtClientTrait};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OvirtClient::new(
//!     "https://engine.example.com/ovirt-engine/api".to_string(),
//!     "admin@internal".to_string(),
//!     "secret".to_string(),
//! )?;
//!
//! client.validate_connection().await?;
//!
//! // Attach a NIC to a VM using an existing vNIC profile
//! let nic = client
//!     .add_nic("vm-123", &NicRequest::new("nic1", "profile-456"))
//!     .await?;
//!
//! // NICs can only be addressed through their VM
//! if let Some(nic) = nic {
//!     let id = nic.id.unwrap_or_default();
//!     client.deactivate_nic("vm-123", &id).await?;
//!     client.remove_nic("vm-123", &id).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **NIC Operations**: add, get, deactivate and remove VM network interfaces
//! - **Typed Errors**: not-found responses are distinguishable from other failures
//! - **Mocking**: `MockOvirtClient` behind the `test-util` feature

pub mod client;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod ovirt_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::{ClientOptions, OvirtClient};
pub use error::OvirtError;
pub use models::*;
pub use ovirt_trait::OvirtClientTrait;
#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockCall, MockOp, MockOvirtClient};
