use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ValidationError;

/// Provisioning lifecycle status reported by a machine.
///
/// The natural progression is
/// `init -> os_start -> {os_fail | os_end} -> ek_start -> {ek_fail | finish}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Init,
    OsStart,
    OsFail,
    OsEnd,
    EkStart,
    EkFail,
    Finish,
}

impl Status {
    pub const ALL: [Status; 7] = [
        Self::Init,
        Self::OsStart,
        Self::OsFail,
        Self::OsEnd,
        Self::EkStart,
        Self::EkFail,
        Self::Finish,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::OsStart => "os_start",
            Self::OsFail => "os_fail",
            Self::OsEnd => "os_end",
            Self::EkStart => "ek_start",
            Self::EkFail => "ek_fail",
            Self::Finish => "finish",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "init" => Some(Self::Init),
            "os_start" => Some(Self::OsStart),
            "os_fail" => Some(Self::OsFail),
            "os_end" => Some(Self::OsEnd),
            "ek_start" => Some(Self::EkStart),
            "ek_fail" => Some(Self::EkFail),
            "finish" => Some(Self::Finish),
            _ => None,
        }
    }

    pub const fn is_failure(self) -> bool {
        matches!(self, Self::OsFail | Self::EkFail)
    }

    /// No further report is expected after a terminal status.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::OsFail | Self::EkFail | Self::Finish)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::parse(s).ok_or_else(|| ValidationError::UnknownStatus {
            value: s.to_string(),
        })
    }
}
