//! Machine identifiers, provisioning statuses and the JSON payloads exchanged
//! with provisioning tooling.

mod id;
mod ip;
mod payload;
mod record;
mod status;

pub use id::MachineId;
pub use ip::parse_ip;
pub use payload::{MachineList, MachinePayload, MessageResponse, StatusPayload};
pub use record::MachineRecord;
pub use status::Status;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid machine id '{value}': expected a non-empty alphanumeric string")]
    InvalidId { value: String },
    #[error("unknown status '{value}'")]
    UnknownStatus { value: String },
    #[error("invalid ip address '{value}'")]
    InvalidIp { value: String },
}
