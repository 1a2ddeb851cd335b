//! oVirt vNIC resource provider
//!
//! Manages the `ovirt_vnic` resource: a network interface attached to an
//! oVirt virtual machine through a vNIC profile.
//!
//! - [`VnicResource`]: create / read / delete / import against the engine
//! - [`VnicRef`]: the composite `"<vm_id>:<vnic_id>"` resource id
//! - [`schema`]: attribute declaration and replacement planning
//! - [`ProviderConfig`]: engine connection settings from the environment
//!
//! # Example
//!
//! ```no_run
//! use ovirt_vnic_provider::{ProviderConfig, VnicDesired, VnicResource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ProviderConfig::from_env()?.connect()?;
//! let resource = VnicResource::new(Box::new(client));
//!
//! let state = resource
//!     .apply(&VnicDesired::new("vm-123", "nic1", "profile-456"))
//!     .await?;
//! println!("created {}", state.id);
//!
//! resource.delete(&state.id).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod resource;
pub mod schema;
pub mod vnic_ref;
#[cfg(test)]
mod test_utils;

pub use config::ProviderConfig;
pub use error::{ProviderError, ProviderResult};
pub use resource::{VnicPhase, VnicResource};
pub use schema::{PlanAction, VnicDesired, VnicState, plan};
pub use vnic_ref::VnicRef;
