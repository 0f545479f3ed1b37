//! Logging and telemetry configuration

use serde::{Deserialize, Serialize};

/// Filter used when neither the caller nor the environment picks one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    pub service_name: String,

    #[serde(default)]
    pub service_version: Option<String>,

    /// OTLP collector, e.g. `http://localhost:4317`. Export is off when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,

    /// Human-readable log lines on stderr
    #[serde(default = "default_console")]
    pub enable_console: bool,

    /// `EnvFilter` directive; falls back to [`DEFAULT_LOG_LEVEL`]
    #[serde(default)]
    pub log_level: Option<String>,
}

fn default_console() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "claudy".to_string(),
            service_version: None,
            otlp_endpoint: None,
            enable_console: true,
            log_level: None,
        }
    }
}

impl ObservabilityConfig {
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    /// Set the level only if nothing (caller or environment) chose one yet.
    pub fn with_default_log_level(mut self, level: impl Into<String>) -> Self {
        if self.log_level.is_none() {
            self.log_level = Some(level.into());
        }
        self
    }

    /// The filter directive that `init` will install.
    pub fn effective_log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Build from environment variables
    ///
    /// Reads:
    /// - `OTEL_SERVICE_NAME` → service_name (default `service_name`)
    /// - `OTEL_SERVICE_VERSION` → service_version
    /// - `OTEL_EXPORTER_OTLP_ENDPOINT` → otlp_endpoint
    /// - `OTEL_LOG_LEVEL` or `RUST_LOG` → log_level
    pub fn from_env(service_name: &str) -> Self {
        Self::from_vars(service_name, |key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(service_name: &str, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        Self {
            service_name: non_empty("OTEL_SERVICE_NAME").unwrap_or_else(|| service_name.to_string()),
            service_version: non_empty("OTEL_SERVICE_VERSION"),
            // Only export when explicitly asked to; a dead collector would otherwise log on every run.
            otlp_endpoint: non_empty("OTEL_EXPORTER_OTLP_ENDPOINT"),
            enable_console: true,
            log_level: non_empty("OTEL_LOG_LEVEL").or_else(|| non_empty("RUST_LOG")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = ObservabilityConfig::from_vars("claudy", vars(&[]));
        assert_eq!(config.service_name, "claudy");
        assert!(config.otlp_endpoint.is_none());
        assert_eq!(config.effective_log_level(), "warn");
    }

    #[test]
    fn test_environment_overrides_verbose_default() {
        let config = ObservabilityConfig::from_vars("claudy", vars(&[("RUST_LOG", "claudy_llms=trace")]))
            .with_default_log_level("debug");
        assert_eq!(config.effective_log_level(), "claudy_llms=trace");

        let config = ObservabilityConfig::from_vars("claudy", vars(&[("RUST_LOG", "")])).with_default_log_level("debug");
        assert_eq!(config.effective_log_level(), "debug");
    }

    #[test]
    fn test_otel_log_level_wins_over_rust_log() {
        let config = ObservabilityConfig::from_vars(
            "claudy",
            vars(&[("OTEL_LOG_LEVEL", "info"), ("RUST_LOG", "trace"), ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317")]),
        );
        assert_eq!(config.effective_log_level(), "info");
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://localhost:4317"));
    }
}
