//! Composite identifier for vNIC attachments
//!
//! The engine cannot resolve a NIC by its own id; every lookup goes through
//! the owning VM. The resource id therefore carries both: `"<vm_id>:<vnic_id>"`.

use crate::error::ProviderError;
use std::fmt;
use std::str::FromStr;

/// Separator between the VM id and the vNIC id
pub const ID_SEPARATOR: char = ':';

/// Identifies one vNIC attachment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VnicRef {
    /// Owning VM id
    pub vm_id: String,
    /// NIC id within that VM
    pub vnic_id: String,
}

impl VnicRef {
    /// Build a reference from its two parts
    pub fn new(vm_id: impl Into<String>, vnic_id: impl Into<String>) -> Self {
        Self {
            vm_id: vm_id.into(),
            vnic_id: vnic_id.into(),
        }
    }

    /// Parse a composite id.
    ///
    /// Exactly one separator is required and both sides must be non-empty.
    pub fn parse(id: &str) -> Result<Self, ProviderError> {
        let parts: Vec<&str> = id.split(ID_SEPARATOR).collect();
        if parts.len() != 2 {
            return Err(ProviderError::MalformedIdentifier(format!(
                "invalid resource id '{}', expected '<vm_id>{}<vnic_id>'",
                id, ID_SEPARATOR
            )));
        }
        if parts[0].is_empty() || parts[1].is_empty() {
            return Err(ProviderError::MalformedIdentifier(format!(
                "invalid resource id '{}', vm id and vnic id must not be empty",
                id
            )));
        }
        Ok(Self::new(parts[0], parts[1]))
    }
}

impl fmt::Display for VnicRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.vm_id, ID_SEPARATOR, self.vnic_id)
    }
}

impl FromStr for VnicRef {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
