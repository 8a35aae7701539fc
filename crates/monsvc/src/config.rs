use std::net::SocketAddr;

use clap::ValueEnum;
use monsvc_registry::{Permissive, Progression, Registry};
use tracing::level_filters::LevelFilter;

/// The port the provisioning tooling expects the service on.
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind: SocketAddr,
    pub log_level: LogLevel,
    pub policy: PolicyKind,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            log_level: LogLevel::Info,
            policy: PolicyKind::Permissive,
        }
    }
}

impl ServiceConfig {
    /// A fresh, empty registry using the configured transition policy.
    pub fn registry(&self) -> Registry {
        match self.policy {
            PolicyKind::Permissive => Registry::with_policy(Permissive),
            PolicyKind::Progression => Registry::with_policy(Progression),
        }
    }
}

/// Logging threshold, ordered from most to least verbose.
///
/// `fatal` and `panic` are kept for command-line compatibility and both map
/// to the `error` threshold.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Panic,
}

impl LogLevel {
    pub fn filter(self) -> LevelFilter {
        match self {
            Self::Trace => LevelFilter::TRACE,
            Self::Debug => LevelFilter::DEBUG,
            Self::Info => LevelFilter::INFO,
            Self::Warn => LevelFilter::WARN,
            Self::Error | Self::Fatal | Self::Panic => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    #[default]
    Permissive,
    Progression,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bind_matches_constant() {
        let parsed: SocketAddr = DEFAULT_BIND.parse().expect("default bind");
        assert_eq!(ServiceConfig::default().bind, parsed);
    }

    #[test]
    fn compatibility_levels_map_to_error() {
        assert_eq!(LogLevel::Fatal.filter(), LevelFilter::ERROR);
        assert_eq!(LogLevel::Panic.filter(), LevelFilter::ERROR);
        assert_eq!(LogLevel::Trace.filter(), LevelFilter::TRACE);
    }

    #[test]
    fn registry_follows_policy_kind() {
        let config = ServiceConfig {
            policy: PolicyKind::Progression,
            ..ServiceConfig::default()
        };
        assert_eq!(config.registry().policy().name(), "progression");
        assert_eq!(ServiceConfig::default().registry().policy().name(), "permissive");
    }
}
