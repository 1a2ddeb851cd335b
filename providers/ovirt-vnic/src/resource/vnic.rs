//! ovirt_vnic resource handler
//!
//! Translates the flat `{vm_id, name, vnic_profile_id}` record onto the
//! engine's NIC API. The resource id is the composite `"<vm_id>:<vnic_id>"`
//! (see [`VnicRef`]).

use super::lifecycle::VnicPhase;
use crate::error::{ProviderError, ProviderResult};
use crate::schema::{VnicDesired, VnicState};
use crate::vnic_ref::VnicRef;
use ovirt_client::{NicRequest, OvirtClientTrait};
use tracing::{debug, info, warn};

/// Manages vNIC attachments through an injected engine client.
pub struct VnicResource {
    client: Box<dyn OvirtClientTrait>,
}

impl std::fmt::Debug for VnicResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VnicResource")
            .field("base_url", &self.client.base_url())
            .finish()
    }
}

impl VnicResource {
    /// Create a handler over an engine client
    pub fn new(client: Box<dyn OvirtClientTrait>) -> Self {
        Self { client }
    }

    /// Attach a new vNIC to `desired.vm_id`.
    ///
    /// Not idempotent: every call attaches another NIC.
    pub async fn create(&self, desired: &VnicDesired) -> ProviderResult<VnicRef> {
        info!(
            "Creating vnic {} on vm {} (profile {})",
            desired.name, desired.vm_id, desired.vnic_profile_id
        );

        let request = NicRequest::new(desired.name.as_str(), desired.vnic_profile_id.as_str());
        let nic = self
            .client
            .add_nic(&desired.vm_id, &request)
            .await?
            .ok_or_else(|| ProviderError::ResponseShape("response missing nic".to_string()))?;

        let vnic_id = nic
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ProviderError::ResponseShape("nic in response has no id".to_string()))?;

        let vnic_ref = VnicRef::new(desired.vm_id.as_str(), vnic_id);
        info!("Created vnic {}", vnic_ref);
        Ok(vnic_ref)
    }

    /// Refresh a vNIC from the engine.
    ///
    /// `Ok(None)` means the vNIC no longer exists and the caller should drop
    /// its recorded id.
    pub async fn read(&self, id: &str) -> ProviderResult<Option<VnicDesired>> {
        let vnic_ref = VnicRef::parse(id)?;
        debug!("Reading vnic {}", vnic_ref);

        let nic = match self.client.get_nic(&vnic_ref.vm_id, &vnic_ref.vnic_id).await {
            Ok(nic) => nic,
            Err(e) if e.is_not_found() => {
                warn!("Vnic {} not found, removing from state", vnic_ref);
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let vnic_profile_id = nic.vnic_profile_id().map(str::to_string).ok_or_else(|| {
            ProviderError::ResponseShape(format!("nic {} has no vnic profile", vnic_ref))
        })?;
        let name = nic
            .name
            .ok_or_else(|| ProviderError::ResponseShape(format!("nic {} has no name", vnic_ref)))?;

        Ok(Some(VnicDesired {
            vm_id: vnic_ref.vm_id,
            name,
            vnic_profile_id,
        }))
    }

    /// Detach a vNIC: deactivate, then remove.
    ///
    /// A vNIC the engine no longer knows counts as deleted at either step.
    pub async fn delete(&self, id: &str) -> ProviderResult<()> {
        let vnic_ref = VnicRef::parse(id)?;
        let (vm_id, vnic_id) = (vnic_ref.vm_id.as_str(), vnic_ref.vnic_id.as_str());

        let mut phase = VnicPhase::Active;
        while phase != VnicPhase::Gone {
            let outcome = match phase {
                VnicPhase::Active => {
                    debug!("Deactivate nic ({}) before remove", vnic_id);
                    self.client.deactivate_nic(vm_id, vnic_id).await
                }
                VnicPhase::Inactive => {
                    debug!("Now to remove nic ({})", vnic_id);
                    self.client.remove_nic(vm_id, vnic_id).await
                }
                VnicPhase::Gone => break,
            };
            phase = phase.after(outcome)?;
        }

        info!("Deleted vnic {}", vnic_ref);
        Ok(())
    }

    /// Import an existing vNIC by composite id.
    ///
    /// The id alone is enough to rehydrate every attribute via [`Self::read`].
    pub async fn import(&self, id: &str) -> ProviderResult<VnicState> {
        info!("Importing vnic {}", id);
        let attributes = self.read(id).await?.ok_or_else(|| {
            ProviderError::NotFound(format!("cannot import vnic {}: no such nic", id))
        })?;

        Ok(VnicState {
            id: id.to_string(),
            attributes,
        })
    }

    /// Validate, create, then read back the recorded state.
    ///
    /// Once the vNIC is attached, a failed read-back is reported as
    /// [`ProviderError::ReadBack`] carrying the new id.
    pub async fn apply(&self, desired: &VnicDesired) -> ProviderResult<VnicState> {
        desired.validate()?;

        let id = self.create(desired).await?.to_string();
        let read_back = self.read(&id).await.and_then(|attributes| {
            attributes.ok_or_else(|| {
                ProviderError::NotFound(format!("vnic {} disappeared right after creation", id))
            })
        });

        match read_back {
            Ok(attributes) => Ok(VnicState { id, attributes }),
            Err(source) => {
                warn!("Vnic {} attached but read-back failed: {}", id, source);
                Err(ProviderError::ReadBack {
                    id,
                    source: Box::new(source),
                })
            }
        }
    }
}
