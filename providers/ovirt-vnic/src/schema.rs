//! `ovirt_vnic` resource schema and planning
//!
//! Every attribute is required and force-new: the engine offers no in-place
//! update path this resource uses, so any change is a destroy and recreate.

use crate::error::{ProviderError, ProviderResult};
use serde::{Deserialize, Serialize};

/// Resource type name as seen by the framework
pub const RESOURCE_TYPE: &str = "ovirt_vnic";

/// Declaration of one resource attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSchema {
    /// Attribute key in the state record
    pub name: &'static str,
    /// Human readable description
    pub description: &'static str,
    /// Must be set and non-empty
    pub required: bool,
    /// Changing the value forces replacement of the resource
    pub force_new: bool,
}

/// Attributes of the `ovirt_vnic` resource
pub const VNIC_SCHEMA: &[AttributeSchema] = &[
    AttributeSchema {
        name: "vm_id",
        description: "Id of the VM the vNIC is attached to",
        required: true,
        force_new: true,
    },
    AttributeSchema {
        name: "name",
        description: "Name of the vNIC",
        required: true,
        force_new: true,
    },
    AttributeSchema {
        name: "vnic_profile_id",
        description: "Id of the vNIC profile the vNIC is attached through",
        required: true,
        force_new: true,
    },
];

/// Declared vNIC configuration, also the persisted state record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct VnicDesired {
    /// VM the vNIC is attached to
    pub vm_id: String,
    /// vNIC name
    pub name: String,
    /// vNIC profile the vNIC is attached through
    pub vnic_profile_id: String,
}

impl VnicDesired {
    /// Build a record from its three attributes
    pub fn new(
        vm_id: impl Into<String>,
        name: impl Into<String>,
        vnic_profile_id: impl Into<String>,
    ) -> Self {
        Self {
            vm_id: vm_id.into(),
            name: name.into(),
            vnic_profile_id: vnic_profile_id.into(),
        }
    }

    /// Value of a schema attribute by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match name {
            "vm_id" => Some(&self.vm_id),
            "name" => Some(&self.name),
            "vnic_profile_id" => Some(&self.vnic_profile_id),
            _ => None,
        }
    }

    /// Check required attributes are present and non-empty
    pub fn validate(&self) -> ProviderResult<()> {
        for attr in VNIC_SCHEMA.iter().filter(|a| a.required) {
            let blank = self
                .attribute(attr.name)
                .is_none_or(|value| value.trim().is_empty());
            if blank {
                return Err(ProviderError::InvalidConfig(format!(
                    "{}: attribute '{}' is required",
                    RESOURCE_TYPE, attr.name
                )));
            }
        }
        Ok(())
    }
}

/// A vNIC as recorded by the framework: composite id plus flat attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VnicState {
    /// Composite id `"<vm_id>:<vnic_id>"`
    pub id: String,
    /// Attributes read from the engine
    #[serde(flatten)]
    pub attributes: VnicDesired,
}

/// Outcome of comparing recorded state against declared configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// Nothing recorded yet
    Create,
    /// Recorded state matches
    NoOp,
    /// Force-new attributes changed; destroy then create
    Replace {
        /// Names of the changed attributes
        attributes: Vec<&'static str>,
    },
}

/// Decide what applying `desired` over `prior` requires
pub fn plan(prior: Option<&VnicDesired>, desired: &VnicDesired) -> PlanAction {
    let Some(prior) = prior else {
        return PlanAction::Create;
    };

    let changed: Vec<&'static str> = VNIC_SCHEMA
        .iter()
        .filter(|attr| attr.force_new && prior.attribute(attr.name) != desired.attribute(attr.name))
        .map(|attr| attr.name)
        .collect();

    if changed.is_empty() {
        PlanAction::NoOp
    } else {
        PlanAction::Replace { attributes: changed }
    }
}
