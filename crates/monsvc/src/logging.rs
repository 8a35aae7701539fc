use tracing_subscriber::EnvFilter;

use crate::config::LogLevel;

/// Install the process-wide subscriber. `RUST_LOG` directives, when present,
/// are layered over the `--log-level` threshold.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.filter().into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();
}
