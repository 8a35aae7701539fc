use std::net::IpAddr;

use crate::{MachineId, Status};

/// A machine as held by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachineRecord {
    pub id: MachineId,
    pub status: Status,
    pub ip: Option<IpAddr>,
}

impl MachineRecord {
    pub fn new(id: MachineId, status: Status) -> Self {
        Self {
            id,
            status,
            ip: None,
        }
    }

    pub fn with_ip(mut self, ip: Option<IpAddr>) -> Self {
        self.ip = ip;
        self
    }
}
