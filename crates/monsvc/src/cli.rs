use std::net::SocketAddr;

use clap::Parser;

use crate::config::{DEFAULT_BIND, LogLevel, PolicyKind, ServiceConfig};

#[derive(Parser, Debug)]
#[command(
    name = "monsvc",
    version,
    about = "Tracks the provisioning status of a fleet of machines"
)]
pub struct Cli {
    /// Logging threshold (env: MONSVC_LOG_LEVEL)
    #[arg(long, value_enum, default_value_t = LogLevel::Info, env = "MONSVC_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Address to serve the HTTP API on (env: MONSVC_BIND)
    #[arg(long, default_value = DEFAULT_BIND, env = "MONSVC_BIND")]
    pub bind: SocketAddr,

    /// Reject status reports that skip or rewind provisioning stages
    #[arg(long, env = "MONSVC_ENFORCE_PROGRESSION")]
    pub enforce_progression: bool,
}

impl Cli {
    pub fn into_config(self) -> ServiceConfig {
        ServiceConfig {
            bind: self.bind,
            log_level: self.log_level,
            policy: if self.enforce_progression {
                PolicyKind::Progression
            } else {
                PolicyKind::Permissive
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn defaults() {
        let config = Cli::try_parse_from(["monsvc"]).expect("parse").into_config();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.bind, ServiceConfig::default().bind);
        assert_eq!(config.policy, PolicyKind::Permissive);
    }

    #[test]
    fn accepts_every_level_name() {
        for name in ["trace", "debug", "info", "warn", "error", "fatal", "panic"] {
            let cli = Cli::try_parse_from(["monsvc", "--log-level", name]).expect(name);
            let parsed = cli.log_level.to_possible_value().expect("visible value");
            assert_eq!(parsed.get_name(), name);
        }
    }

    #[test]
    fn rejects_unknown_level() {
        let err = Cli::try_parse_from(["monsvc", "--log-level", "verbose"]).expect_err("invalid");
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn progression_flag_selects_policy() {
        let config = Cli::try_parse_from(["monsvc", "--enforce-progression", "--bind", "127.0.0.1:9000"])
            .expect("parse")
            .into_config();
        assert_eq!(config.policy, PolicyKind::Progression);
        assert_eq!(config.bind.port(), 9000);
    }
}
