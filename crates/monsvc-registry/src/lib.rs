//! In-memory registry of machine records plus the status transition policy
//! applied to status reports.

mod policy;

pub use policy::{Permissive, Progression, TransitionError, TransitionPolicy};

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use monsvc_types::{MachineId, MachineRecord, Status};
use thiserror::Error;

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("machine '{0}' is already registered")]
    AlreadyExists(MachineId),
    #[error("machine '{0}' is not registered")]
    NotFound(MachineId),
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// Outcome of an accepted status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub previous: Status,
    pub current: Status,
}

/// Keyed store of machine records.
///
/// All access goes through a single reader/writer lock: `get` and `get_all`
/// share it, every mutation takes it exclusively. Clones share the same
/// store; use [`Registry::new`] for an isolated one. Callers always receive
/// copies of the stored records.
#[derive(Clone)]
pub struct Registry {
    machines: Arc<RwLock<HashMap<MachineId, MachineRecord>>>,
    policy: Arc<dyn TransitionPolicy>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("machines", &self.read().len())
            .field("policy", &self.policy.name())
            .finish()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::with_policy(Permissive)
    }

    pub fn with_policy(policy: impl TransitionPolicy + 'static) -> Self {
        Self {
            machines: Arc::new(RwLock::new(HashMap::new())),
            policy: Arc::new(policy),
        }
    }

    pub fn policy(&self) -> &dyn TransitionPolicy {
        self.policy.as_ref()
    }

    // Every mutation is a single map operation, so a poisoned lock still
    // guards a consistent map.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<MachineId, MachineRecord>> {
        self.machines.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<MachineId, MachineRecord>> {
        self.machines.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Drop every record.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Insert a record or fully replace the one stored under `record.id`.
    pub fn set(&self, record: MachineRecord) {
        self.write().insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &str) -> Option<MachineRecord> {
        tracing::debug!("retrieving machine record ({id})");
        let record = self.read().get(id).cloned();
        if record.is_none() {
            tracing::debug!("machine record ({id}) not found");
        }
        record
    }

    /// Every stored record, in no particular order.
    pub fn get_all(&self) -> Vec<MachineRecord> {
        tracing::debug!("retrieving list of machine records");
        self.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Register a new machine. An existing record with the same id is left
    /// untouched.
    pub fn create(&self, record: MachineRecord) -> RegistryResult<()> {
        let mut machines = self.write();
        if machines.contains_key(&record.id) {
            return Err(RegistryError::AlreadyExists(record.id));
        }
        machines.insert(record.id.clone(), record);
        Ok(())
    }

    /// Apply a status report to a registered machine.
    ///
    /// The stored address is replaced only when `ip` is `Some`.
    pub fn update_status(
        &self,
        id: &MachineId,
        status: Status,
        ip: Option<IpAddr>,
    ) -> RegistryResult<StatusChange> {
        let mut machines = self.write();
        let record = machines
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;
        self.policy.check(record.status, status)?;
        let previous = record.status;
        record.status = status;
        if ip.is_some() {
            record.ip = ip;
        }
        Ok(StatusChange {
            previous,
            current: status,
        })
    }
}
