//! Mock OvirtClient for unit testing
//!
//! This module provides a mock implementation of OvirtClientTrait that can be used
//! in unit tests without requiring a running oVirt engine.
//!
//! Besides in-memory VMs and NICs, the mock records every call it receives and
//! can be told to fail the next call of a given operation.

use crate::error::OvirtError;
use crate::models::{EntityRef, Mac, Nic, NicRequest};
use crate::ovirt_trait::OvirtClientTrait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Operations the mock can be scripted to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    /// `validate_connection`
    ValidateConnection,
    /// `add_nic`
    AddNic,
    /// `get_nic`
    GetNic,
    /// `deactivate_nic`
    DeactivateNic,
    /// `remove_nic`
    RemoveNic,
}

/// A call received by the mock, in order of arrival
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    /// Connection check
    ValidateConnection,
    /// NIC attached to a VM
    AddNic {
        /// Target VM
        vm_id: String,
        /// Requested NIC name
        name: String,
        /// Profile id from the request body
        vnic_profile_id: Option<String>,
    },
    /// NIC lookup
    GetNic {
        /// Owning VM
        vm_id: String,
        /// NIC looked up
        nic_id: String,
    },
    /// NIC deactivation
    DeactivateNic {
        /// Owning VM
        vm_id: String,
        /// NIC deactivated
        nic_id: String,
    },
    /// NIC removal
    RemoveNic {
        /// Owning VM
        vm_id: String,
        /// NIC removed
        nic_id: String,
    },
}

#[derive(Debug, Default)]
struct MockState {
    vms: HashSet<String>,
    // Keyed by (vm id, nic id)
    nics: HashMap<(String, String), Nic>,
    failures: HashMap<MockOp, VecDeque<OvirtError>>,
    calls: Vec<MockCall>,
    omit_nic_in_add_response: bool,
    next_nic_ids: VecDeque<String>,
}

/// Mock OvirtClient for testing
///
/// Cloning shares the underlying state, so a test can keep a handle for
/// assertions while the handler under test owns another.
#[derive(Debug, Clone)]
pub struct MockOvirtClient {
    base_url: String,
    state: Arc<Mutex<MockState>>,
}

impl MockOvirtClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a VM (for test setup)
    pub fn add_vm(&self, vm_id: impl Into<String>) {
        self.state().vms.insert(vm_id.into());
    }

    /// Store a NIC under a VM (for test setup); the VM is registered too
    pub fn insert_nic(&self, vm_id: &str, nic: Nic) {
        let nic_id = nic.id.clone().unwrap_or_default();
        let mut state = self.state();
        state.vms.insert(vm_id.to_string());
        state.nics.insert((vm_id.to_string(), nic_id), nic);
    }

    /// Look up a stored NIC without recording a call
    pub fn nic(&self, vm_id: &str, nic_id: &str) -> Option<Nic> {
        self.state()
            .nics
            .get(&(vm_id.to_string(), nic_id.to_string()))
            .cloned()
    }

    /// Number of NICs stored across all VMs
    pub fn nic_count(&self) -> usize {
        self.state().nics.len()
    }

    /// Fail the next call of `op` with `error`. Queued errors are consumed in order.
    pub fn fail_next(&self, op: MockOp, error: OvirtError) {
        self.state().failures.entry(op).or_default().push_back(error);
    }

    /// Make `add_nic` succeed without returning the created NIC
    pub fn omit_nic_in_add_response(&self, omit: bool) {
        self.state().omit_nic_in_add_response = omit;
    }

    /// Use `nic_id` for the next NIC `add_nic` creates instead of a random uuid
    pub fn set_next_nic_id(&self, nic_id: impl Into<String>) {
        self.state().next_nic_ids.push_back(nic_id.into());
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<MockCall> {
        self.state().calls.clone()
    }

    /// Calls received so far for a single operation
    pub fn calls_to(&self, op: MockOp) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|call| call.op() == op)
            .count()
    }

    fn record(&self, call: MockCall) -> Result<(), OvirtError> {
        let op = call.op();
        let mut state = self.state();
        state.calls.push(call);
        match state.failures.get_mut(&op).and_then(VecDeque::pop_front) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl MockCall {
    /// Operation this call belongs to
    pub fn op(&self) -> MockOp {
        match self {
            MockCall::ValidateConnection => MockOp::ValidateConnection,
            MockCall::AddNic { .. } => MockOp::AddNic,
            MockCall::GetNic { .. } => MockOp::GetNic,
            MockCall::DeactivateNic { .. } => MockOp::DeactivateNic,
            MockCall::RemoveNic { .. } => MockOp::RemoveNic,
        }
    }
}

fn nic_not_found(vm_id: &str, nic_id: &str) -> OvirtError {
    OvirtError::NotFound(format!("nic {} of vm {} not found", nic_id, vm_id))
}

#[async_trait::async_trait]
impl OvirtClientTrait for MockOvirtClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn validate_connection(&self) -> Result<(), OvirtError> {
        self.record(MockCall::ValidateConnection)
    }

    async fn add_nic(&self, vm_id: &str, nic: &NicRequest) -> Result<Option<Nic>, OvirtError> {
        self.record(MockCall::AddNic {
            vm_id: vm_id.to_string(),
            name: nic.name.clone(),
            vnic_profile_id: nic.vnic_profile.id.clone(),
        })?;

        let mut state = self.state();
        if !state.vms.contains(vm_id) {
            return Err(OvirtError::NotFound(format!("vm {} not found", vm_id)));
        }

        let nic_id = state
            .next_nic_ids
            .pop_front()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let created = Nic {
            id: Some(nic_id.clone()),
            href: Some(format!("{}/vms/{}/nics/{}", self.base_url, vm_id, nic_id)),
            name: Some(nic.name.clone()),
            interface: Some("virtio".to_string()),
            mac: Some(Mac {
                address: Some("56:6f:00:00:00:01".to_string()),
            }),
            plugged: Some(true),
            linked: Some(true),
            vnic_profile: Some(nic.vnic_profile.clone()),
            vm: Some(EntityRef::with_id(vm_id)),
        };
        state.nics.insert((vm_id.to_string(), nic_id), created.clone());

        if state.omit_nic_in_add_response {
            Ok(None)
        } else {
            Ok(Some(created))
        }
    }

    async fn get_nic(&self, vm_id: &str, nic_id: &str) -> Result<Nic, OvirtError> {
        self.record(MockCall::GetNic {
            vm_id: vm_id.to_string(),
            nic_id: nic_id.to_string(),
        })?;

        self.nic(vm_id, nic_id)
            .ok_or_else(|| nic_not_found(vm_id, nic_id))
    }

    async fn deactivate_nic(&self, vm_id: &str, nic_id: &str) -> Result<(), OvirtError> {
        self.record(MockCall::DeactivateNic {
            vm_id: vm_id.to_string(),
            nic_id: nic_id.to_string(),
        })?;

        let mut state = self.state();
        let nic = state
            .nics
            .get_mut(&(vm_id.to_string(), nic_id.to_string()))
            .ok_or_else(|| nic_not_found(vm_id, nic_id))?;
        nic.plugged = Some(false);
        Ok(())
    }

    async fn remove_nic(&self, vm_id: &str, nic_id: &str) -> Result<(), OvirtError> {
        self.record(MockCall::RemoveNic {
            vm_id: vm_id.to_string(),
            nic_id: nic_id.to_string(),
        })?;

        let mut state = self.state();
        let key = (vm_id.to_string(), nic_id.to_string());
        let plugged = state.nics.get(&key).map(|nic| nic.plugged == Some(true));
        match plugged {
            None => Err(nic_not_found(vm_id, nic_id)),
            Some(true) => Err(OvirtError::Api(format!(
                "nic {} of vm {} (409 Conflict): Cannot remove an active network interface",
                nic_id, vm_id
            ))),
            Some(false) => {
                state.nics.remove(&key);
                Ok(())
            }
        }
    }
}
