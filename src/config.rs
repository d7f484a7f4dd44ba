//! Runtime configuration from environment variables.
//!
//! Only logging is configurable; engine constants are fixed. Logging is not
//! initialized yet when the configuration is read, so fallbacks are recorded
//! and reported by the caller once the subscriber is up.

/// Log output format variable (`json` or `pretty`).
pub const LOG_FORMAT_ENV: &str = "CLUSTER_TOPOLOGY_LOG_FORMAT";

/// Default log level variable for this crate's directive.
pub const LOG_LEVEL_ENV: &str = "CLUSTER_TOPOLOGY_LOG_LEVEL";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Multi-line human-readable output.
    Pretty,
}

/// Process-level settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub log_format: LogFormat,
    /// Level of the `cluster_topology` filter directive.
    pub log_level: String,
    /// Values that were rejected and replaced by defaults.
    pub fallbacks: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_level: "info".to_string(),
            fallbacks: Vec::new(),
        }
    }
}

impl RuntimeConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through a variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            match format.trim().to_ascii_lowercase().as_str() {
                "json" => config.log_format = LogFormat::Json,
                "pretty" => config.log_format = LogFormat::Pretty,
                _ => config.fallbacks.push(format!(
                    "{} has unknown value '{}', using json",
                    LOG_FORMAT_ENV, format
                )),
            }
        }

        if let Some(level) = lookup(LOG_LEVEL_ENV) {
            let normalized = level.trim().to_ascii_lowercase();
            if LOG_LEVELS.contains(&normalized.as_str()) {
                config.log_level = normalized;
            } else {
                config.fallbacks.push(format!(
                    "{} has unknown value '{}', using info",
                    LOG_LEVEL_ENV, level
                ));
            }
        }

        config
    }

    /// Filter directive for this crate, e.g. `cluster_topology=info`.
    pub fn crate_directive(&self) -> String {
        format!("cluster_topology={}", self.log_level)
    }
}
