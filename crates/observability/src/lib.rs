//! Logging and tracing setup for claudy.
//!
//! Log lines are written to stderr so that stdout carries only the suggested
//! command. Spans are exported over OTLP when `OTEL_EXPORTER_OTLP_ENDPOINT`
//! is set.
//!
//! ```no_run
//! use claudy_observability::{init, ObservabilityConfig};
//!
//! let config = ObservabilityConfig::from_env("claudy").with_default_log_level("debug");
//! init(config)?;
//! tracing::debug!("ready");
//! claudy_observability::shutdown();
//! # Ok::<(), claudy_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` - service name
//! - `OTEL_SERVICE_VERSION` - service version
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint
//! - `OTEL_LOG_LEVEL` or `RUST_LOG` - log filter (default `warn`)

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::{ObservabilityConfig, DEFAULT_LOG_LEVEL};
pub use error::ObservabilityError;
pub use telemetry::{init, shutdown};
pub use tracing::{record_duration, record_error};
