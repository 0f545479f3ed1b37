//! Streaming completion client used by claudy.
//!
//! ## Architecture
//!
//! ```text
//! RequestEnvelope ──▶ Provider::stream ──▶ HTTP POST (one attempt)
//!                                              │
//!                                              ▼
//!                              response body (text/event-stream)
//!                                              │  StreamReader, one line at a time
//!                                              ▼
//!                              decode_lines ──▶ TokenStream (text fragments)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use claudy_llms::{AnthropicProvider, Provider, RequestEnvelope, Sampling};
//! use claudy_llms::providers::anthropic::AnthropicConfig;
//! use futures::StreamExt;
//!
//! # async fn run() -> claudy_llms::Result<()> {
//! let provider = AnthropicProvider::new(AnthropicConfig::new("sk-ant-..."))?;
//! let envelope = RequestEnvelope::new(
//!     "claude-haiku-4-5-20251001",
//!     Sampling::new(500, 0.3),
//!     "Return one shell command.",
//!     "List files by size",
//! );
//! let mut tokens = provider.stream(&envelope).await?;
//! while let Some(token) = tokens.next().await {
//!     print!("{}", token?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use provider::Provider;

pub use providers::AnthropicProvider;

pub use types::{Headers, Message, RequestEnvelope, Role, Sampling, TokenStream};
