//! One-shot suggestion pipeline for claudy.
//!
//! ```text
//! history file ──▶ HistoryContextBuilder ─┐
//! ~/.claudy-prompt ──▶ supplement ────────┼─▶ RequestEnvelopeBuilder ──▶ Provider::stream ──▶ drain ──▶ TokenSink
//! SystemInfo ─────────────────────────────┘
//! ```

pub mod config;
pub mod context;
pub mod emitter;
pub mod error;
pub mod prompt;
pub mod runtime;

pub use config::ClaudyConfig;
pub use context::{Enrichment, HistoryContext, HistoryContextBuilder, SystemInfo};
pub use emitter::{drain, Collector, OutputEmitter, TokenSink};
pub use error::{Result, RuntimeError};
pub use prompt::{RequestEnvelopeBuilder, SYSTEM_INSTRUCTION};
pub use runtime::Runtime;
