//! Process-level defaults for the scheduling core, loaded from environment
//! variables via `figment`. Per-request fields (term, course codes, filters,
//! preferences) live on `GenerateRequest`, not here.

use figment::providers::Env;
use figment::Figment;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Log level passed to `EnvFilter` when `RUST_LOG` isn't set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Used by the Orchestrator when a request names neither
    /// `time_limit_seconds` nor `max_solutions`.
    #[serde(default = "default_time_limit_seconds")]
    pub default_time_limit_seconds: u64,
    #[serde(default = "default_num_schedules")]
    pub default_num_schedules: usize,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_time_limit_seconds() -> u64 {
    10
}

fn default_num_schedules() -> usize {
    3
}

impl SchedulerConfig {
    /// Loads configuration from `SCHEDULER_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Env::prefixed("SCHEDULER_"))
            .extract()
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            log_level: default_log_level(),
            default_time_limit_seconds: default_time_limit_seconds(),
            default_num_schedules: default_num_schedules(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane_without_any_env() {
        let config = SchedulerConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.default_num_schedules, 3);
    }
}
