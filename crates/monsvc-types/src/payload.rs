use std::net::IpAddr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{MachineId, MachineRecord, Status};

/// Machine description used both for registration and in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MachinePayload {
    pub id: MachineId,
    pub status: Status,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::ip"
    )]
    #[schema(value_type = Option<String>, example = "10.0.0.5")]
    pub ip: Option<IpAddr>,
}

/// Body of a status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusPayload {
    pub status: Status,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::ip"
    )]
    #[schema(value_type = Option<String>, example = "10.0.0.5")]
    pub ip: Option<IpAddr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MachineList {
    pub items: Vec<MachinePayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn ok() -> Self {
        Self::new("ok")
    }
}

impl From<MachinePayload> for MachineRecord {
    fn from(payload: MachinePayload) -> Self {
        MachineRecord::new(payload.id, payload.status).with_ip(payload.ip)
    }
}

impl From<MachineRecord> for MachinePayload {
    fn from(record: MachineRecord) -> Self {
        Self {
            id: record.id,
            status: record.status,
            ip: record.ip,
        }
    }
}

impl FromIterator<MachineRecord> for MachineList {
    fn from_iter<I: IntoIterator<Item = MachineRecord>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(MachinePayload::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn machine_payload_without_ip() {
        let payload: MachinePayload =
            serde_json::from_value(json!({"id": "abc", "status": "init"})).expect("decode");
        assert_eq!(payload.id.as_str(), "abc");
        assert_eq!(payload.status, Status::Init);
        assert_eq!(payload.ip, None);
    }

    #[test]
    fn empty_and_null_ip_decode_as_absent() {
        for body in [
            json!({"id": "abc", "status": "init", "ip": ""}),
            json!({"id": "abc", "status": "init", "ip": null}),
        ] {
            let payload: MachinePayload = serde_json::from_value(body).expect("decode");
            assert_eq!(payload.ip, None);
        }
    }

    #[test]
    fn machine_payload_rejects_invalid_fields() {
        let cases = [
            json!({"status": "init"}),
            json!({"id": "abc"}),
            json!({"id": "", "status": "init"}),
            json!({"id": "a-b", "status": "init"}),
            json!({"id": "abc", "status": "ek_end"}),
            json!({"id": "abc", "status": "init", "ip": "not-an-ip"}),
            json!({"id": 7, "status": "init"}),
        ];
        for body in cases {
            assert!(
                serde_json::from_value::<MachinePayload>(body.clone()).is_err(),
                "{body} should be rejected"
            );
        }
    }

    #[test]
    fn status_payload_ip_is_optional() {
        let payload: StatusPayload =
            serde_json::from_value(json!({"status": "os_start"})).expect("decode");
        assert_eq!(payload.status, Status::OsStart);
        assert_eq!(payload.ip, None);

        let payload: StatusPayload =
            serde_json::from_value(json!({"status": "os_end", "ip": "10.0.0.5"})).expect("decode");
        assert_eq!(payload.ip, Some("10.0.0.5".parse().expect("ip")));

        assert!(serde_json::from_value::<StatusPayload>(json!({"ip": "10.0.0.5"})).is_err());
    }

    #[test]
    fn listing_omits_absent_ip() {
        let with_ip = MachineRecord::new(MachineId::new("abc").expect("id"), Status::OsStart)
            .with_ip(Some("10.0.0.5".parse().expect("ip")));
        let without_ip = MachineRecord::new(MachineId::new("def").expect("id"), Status::Init);
        let list: MachineList = vec![with_ip, without_ip].into_iter().collect();
        assert_eq!(
            serde_json::to_value(&list).expect("encode"),
            json!({"items": [
                {"id": "abc", "status": "os_start", "ip": "10.0.0.5"},
                {"id": "def", "status": "init"},
            ]})
        );
    }
}
