//! Resource handlers
//!
//! Handles: ovirt_vnic

pub mod lifecycle;
pub mod vnic;

pub use lifecycle::VnicPhase;
pub use vnic::VnicResource;
