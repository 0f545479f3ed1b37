//! Anthropic streaming support
//!
//! The Messages API streams server-sent events, one JSON payload per `data: ` line:
//! - `data: {"type":"content_block_delta","delta":{"type":"text_delta","text":"..."}}` carries text
//! - `message_start`, `content_block_start`, `ping`, `message_delta`, `message_stop`, ... carry none
//! - `data: [DONE]` ends the stream (emitted by OpenAI-style gateways in front of the API)
//!
//! Decoding is pull-based: one line is read from the body per step and nothing
//! is buffered ahead of it.

use std::pin::Pin;

use bytes::Bytes;
use futures::{Stream, TryStreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::io::StreamReader;
use tracing::{debug, warn};

use super::types::{AnthropicDelta, AnthropicStreamEvent};
use crate::error::Error;
use crate::types::TokenStream;

/// Prefix of event lines that carry a payload
pub const DATA_PREFIX: &str = "data: ";
/// Payload that ends the stream
pub const DONE_SENTINEL: &str = "[DONE]";

/// One classified line of the event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SseEvent<'a> {
    /// A `data: ` line; holds the text after the prefix
    Data(&'a str),
    /// Blank lines, `event:`/`id:` lines, comments
    Other,
}

/// Result of decoding one `data: ` payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// End-of-stream sentinel
    Done,
    /// Non-empty text fragment
    Token(String),
    /// Well-formed event without emittable text
    Ignored,
    /// Payload was not a recognisable event; the reason is kept for logging
    Malformed(String),
}

/// Classify a raw line. Trailing whitespace (including `\r`) is ignored.
pub fn parse_sse_line(line: &str) -> SseEvent<'_> {
    match line.trim_end().strip_prefix(DATA_PREFIX) {
        Some(payload) => SseEvent::Data(payload),
        None => SseEvent::Other,
    }
}

/// Decode the payload of a `data: ` line.
pub fn decode_payload(payload: &str) -> Decoded {
    if payload == DONE_SENTINEL {
        return Decoded::Done;
    }

    match serde_json::from_str::<AnthropicStreamEvent>(payload) {
        Ok(AnthropicStreamEvent::ContentBlockDelta {
            delta: AnthropicDelta::TextDelta { text },
        }) if !text.is_empty() => Decoded::Token(text),
        Ok(AnthropicStreamEvent::Error { error }) => {
            warn!(
                error.kind = %error.kind,
                error.message = %error.message,
                "Anthropic stream reported an error event"
            );
            Decoded::Ignored
        }
        Ok(_) => Decoded::Ignored,
        Err(e) => Decoded::Malformed(e.to_string()),
    }
}

/// Decode an event-stream body into text fragments, one line at a time.
///
/// The sequence ends on `[DONE]`, at end of input, or after yielding the
/// single error produced by a failed read. Malformed payloads are skipped.
pub fn decode_lines<R>(reader: R) -> TokenStream
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    let stream = async_stream::stream! {
        let mut lines = reader.lines();

        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let SseEvent::Data(payload) = parse_sse_line(&line) else {
                        continue;
                    };

                    match decode_payload(payload) {
                        Decoded::Done => break,
                        Decoded::Token(text) => {
                            yield Ok(text);
                        }
                        Decoded::Ignored => {}
                        Decoded::Malformed(reason) => {
                            debug!(%reason, line = %line, "Skipping malformed stream line");
                        }
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    yield Err(Error::stream_error(format!("Failed to read response: {}", e)));
                    break;
                }
            }
        }
    };

    TokenStream::new(Box::pin(stream))
}

type ByteStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send>>;

/// Adapt a response body into a buffered reader so lines split across
/// network chunks are reassembled before decoding.
pub(crate) fn body_reader(response: reqwest::Response) -> StreamReader<ByteStream, Bytes> {
    let bytes: ByteStream = Box::pin(response.bytes_stream().map_err(std::io::Error::other));
    StreamReader::new(bytes)
}
