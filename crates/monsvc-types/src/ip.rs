use std::net::IpAddr;

use serde::{Deserialize, Deserializer, Serializer};

use crate::ValidationError;

/// Parse an optional address field: an empty string means "no address".
pub fn parse_ip(raw: &str) -> Result<Option<IpAddr>, ValidationError> {
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse().map(Some).map_err(|_| ValidationError::InvalidIp {
        value: raw.to_string(),
    })
}

// Absent, null and "" all decode to None.
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<IpAddr>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(raw) => parse_ip(&raw).map_err(serde::de::Error::custom),
    }
}

pub(crate) fn serialize<S>(ip: &Option<IpAddr>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match ip {
        Some(ip) => serializer.collect_str(ip),
        None => serializer.serialize_none(),
    }
}
