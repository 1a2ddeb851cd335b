//! Teardown state machine for a vNIC
//!
//! ```text
//! Active --deactivate--> Inactive --remove--> Gone
//!    \____________ not found ____________/
//! ```
//!
//! A not-found answer at either step means the vNIC is already gone.

use ovirt_client::OvirtError;

/// Where a vNIC is in its teardown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VnicPhase {
    /// Plugged (or unknown); must be deactivated before removal
    Active,
    /// Unplugged; can be removed
    Inactive,
    /// No longer present on the engine
    Gone,
}

impl VnicPhase {
    /// Advance past the engine call made in this phase.
    ///
    /// Errors other than not-found are returned unchanged and end the teardown.
    pub fn after(self, outcome: Result<(), OvirtError>) -> Result<VnicPhase, OvirtError> {
        match (self, outcome) {
            (VnicPhase::Gone, _) => Ok(VnicPhase::Gone),
            (_, Err(err)) if err.is_not_found() => Ok(VnicPhase::Gone),
            (_, Err(err)) => Err(err),
            (VnicPhase::Active, Ok(())) => Ok(VnicPhase::Inactive),
            (VnicPhase::Inactive, Ok(())) => Ok(VnicPhase::Gone),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn not_found() -> Result<(), OvirtError> {
        Err(OvirtError::NotFound("nic n1 of vm v1 not found".to_string()))
    }

    #[test]
    fn test_happy_path() {
        let phase = VnicPhase::Active.after(Ok(())).unwrap();
        assert_eq!(phase, VnicPhase::Inactive);
        assert_eq!(phase.after(Ok(())).unwrap(), VnicPhase::Gone);
    }

    #[test]
    fn test_not_found_short_circuits() {
        assert_eq!(VnicPhase::Active.after(not_found()).unwrap(), VnicPhase::Gone);
        assert_eq!(VnicPhase::Inactive.after(not_found()).unwrap(), VnicPhase::Gone);
    }

    #[test]
    fn test_other_errors_pass_through() {
        let err = VnicPhase::Active
            .after(Err(OvirtError::Api("VM is locked".to_string())))
            .unwrap_err();
        assert!(matches!(err, OvirtError::Api(ref msg) if msg == "VM is locked"));

        let err = VnicPhase::Inactive
            .after(Err(OvirtError::Authentication("401".to_string())))
            .unwrap_err();
        assert!(matches!(err, OvirtError::Authentication(_)));
    }

    #[test]
    fn test_gone_is_terminal() {
        assert_eq!(VnicPhase::Gone.after(Ok(())).unwrap(), VnicPhase::Gone);
    }
}
