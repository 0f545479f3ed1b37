//! Anthropic provider module
//!
//! Streams replies from the Messages API.
//! API docs: https://docs.anthropic.com/en/api/messages-streaming

mod convert;
mod provider;
pub mod stream;
mod types;

pub use provider::AnthropicProvider;
pub use stream::{Decoded, SseEvent, decode_lines, decode_payload, parse_sse_line};
pub use types::{AnthropicConfig, AnthropicRequest};
