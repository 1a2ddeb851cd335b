//! oVirt API models
//!
//! These models match the JSON representation of the oVirt Engine API v4.
//! Only the attributes needed for NIC management are mapped; unknown fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};

/// Link to another entity, as embedded in oVirt responses (`{"href": ..., "id": ...}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    /// Entity id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// API link to the entity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl EntityRef {
    /// Reference an entity by id only
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            href: None,
        }
    }
}

/// MAC address block of a NIC
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mac {
    /// Colon separated MAC address
    #[serde(default)]
    pub address: Option<String>,
}

/// Network interface of a virtual machine (`/vms/{vm}/nics/{nic}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Nic {
    /// NIC id
    #[serde(default)]
    pub id: Option<String>,
    /// API link to the NIC
    #[serde(default)]
    pub href: Option<String>,
    /// NIC name, e.g. "nic1"
    #[serde(default)]
    pub name: Option<String>,
    /// Device model, e.g. "virtio" or "e1000"
    #[serde(default)]
    pub interface: Option<String>,
    /// Assigned MAC address
    #[serde(default)]
    pub mac: Option<Mac>,
    /// Attached to the running VM
    #[serde(default, deserialize_with = "de_opt_bool")]
    pub plugged: Option<bool>,
    /// Link state
    #[serde(default, deserialize_with = "de_opt_bool")]
    pub linked: Option<bool>,
    /// Profile the NIC is attached through
    #[serde(default)]
    pub vnic_profile: Option<EntityRef>,
    /// Owning VM
    #[serde(default)]
    pub vm: Option<EntityRef>,
}

impl Nic {
    /// Id of the vNIC profile this NIC is attached through, if present
    pub fn vnic_profile_id(&self) -> Option<&str> {
        self.vnic_profile.as_ref().and_then(|p| p.id.as_deref())
    }
}

/// Request body for attaching a NIC to a VM
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NicRequest {
    /// Name of the new NIC
    pub name: String,
    /// Profile reference, by id
    pub vnic_profile: EntityRef,
}

impl NicRequest {
    /// Build a request for a NIC named `name` using the vNIC profile `vnic_profile_id`
    pub fn new(name: impl Into<String>, vnic_profile_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vnic_profile: EntityRef::with_id(vnic_profile_id),
        }
    }
}

/// Error body returned by the engine on failed requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fault {
    /// Short failure reason
    #[serde(default)]
    pub reason: Option<String>,
    /// Longer explanation
    #[serde(default)]
    pub detail: Option<String>,
}

impl Fault {
    /// Render as "reason: detail", skipping missing parts
    pub fn message(&self) -> Option<String> {
        match (self.reason.as_deref(), self.detail.as_deref()) {
            (Some(reason), Some(detail)) => Some(format!("{}: {}", reason, detail)),
            (Some(only), None) | (None, Some(only)) => Some(only.to_string()),
            (None, None) => None,
        }
    }
}

/// Action responses (`POST .../deactivate`) wrap the outcome in an `action` object.
/// The engine reports `"status": "complete"` on success.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionResponse {
    /// Action status, `"complete"` or `"failed"`
    #[serde(default)]
    pub status: Option<String>,
    /// Fault attached to a failed action
    #[serde(default)]
    pub fault: Option<Fault>,
}

// The engine serializes booleans as "true"/"false" strings.
fn de_opt_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Str(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::Str(s)) => match s.as_str() {
            "true" => Ok(Some(true)),
            "false" => Ok(Some(false)),
            other => Err(serde::de::Error::custom(format!(
                "invalid boolean value: {}",
                other
            ))),
        },
    }
}
