//! Tracing setup. No HTTP/bot deployment to format logs for here, so a
//! single `fmt` subscriber covers both the CLI demo and the library's own
//! instrumentation rather than switching between pretty and JSON output.

use tracing_subscriber::EnvFilter;

use crate::config::SchedulerConfig;

/// Installs the global tracing subscriber. `RUST_LOG` always wins; absent
/// that, falls back to `config.log_level` scoped to this crate plus `warn`
/// for everything else.
pub fn setup_logging(config: &SchedulerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,course_scheduler={}", config.log_level)));

    tracing_subscriber::fmt()
        .with_target(true)
        .with_env_filter(filter)
        .init();
}
