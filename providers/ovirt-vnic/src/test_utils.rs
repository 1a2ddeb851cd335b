//! Test utilities for unit testing resource handlers
//!
//! This module provides helpers for creating test data and setting up test scenarios.

use crate::resource::VnicResource;
use crate::schema::VnicDesired;
use ovirt_client::{EntityRef, MockOvirtClient, Nic};

/// Base URL used by every mock engine
pub const TEST_ENGINE_URL: &str = "http://test-engine/ovirt-engine/api";

/// Handler wired to a fresh mock, plus a handle on the same mock for assertions
pub fn create_test_resource() -> (VnicResource, MockOvirtClient) {
    let mock = MockOvirtClient::new(TEST_ENGINE_URL);
    let resource = VnicResource::new(Box::new(mock.clone()));
    (resource, mock)
}

/// Helper to create a plugged NIC as the engine would return it
pub fn create_test_nic(vm_id: &str, nic_id: &str, name: &str, profile_id: &str) -> Nic {
    Nic {
        id: Some(nic_id.to_string()),
        href: Some(format!("{}/vms/{}/nics/{}", TEST_ENGINE_URL, vm_id, nic_id)),
        name: Some(name.to_string()),
        interface: Some("virtio".to_string()),
        mac: None,
        plugged: Some(true),
        linked: Some(true),
        vnic_profile: Some(EntityRef::with_id(profile_id)),
        vm: Some(EntityRef::with_id(vm_id)),
    }
}

/// Helper to create the declared configuration used across tests
pub fn create_test_desired(vm_id: &str) -> VnicDesired {
    VnicDesired::new(vm_id, "nic1", "profile-1")
}
