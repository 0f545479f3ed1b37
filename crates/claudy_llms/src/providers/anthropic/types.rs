//! Anthropic-specific types

use std::time::Duration;

use claudy_constant::defaults;
use serde::{Deserialize, Serialize};

/// Configuration for the Anthropic provider
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    /// API key sent as `x-api-key`
    pub api_key: String,
    /// Base URL (default: https://api.anthropic.com/v1/)
    pub base_url: String,
    /// Value of the `anthropic-version` header
    pub version: String,
    /// Bound on connecting and receiving response headers
    pub connect_timeout: Duration,
}

impl AnthropicConfig {
    /// Create new config with API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: defaults::BASE_URL.to_string(),
            version: defaults::ANTHROPIC_VERSION.to_string(),
            connect_timeout: Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS),
        }
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

/// Messages API request body
#[derive(Debug, Serialize)]
pub struct AnthropicRequest {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub stream: bool,
    pub system: String,
    pub messages: Vec<AnthropicMessage>,
}

/// Anthropic message
#[derive(Debug, Serialize)]
pub struct AnthropicMessage {
    pub role: String,
    pub content: String,
}

/// One event of the streamed reply, keyed by its `type` field
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicStreamEvent {
    MessageStart {},
    ContentBlockStart {},
    ContentBlockDelta {
        delta: AnthropicDelta,
    },
    ContentBlockStop {},
    MessageDelta {},
    MessageStop {},
    Ping {},
    Error {
        error: AnthropicErrorBody,
    },
    #[serde(other)]
    Unknown,
}

/// Inner delta of a `content_block_delta` event
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnthropicDelta {
    TextDelta {
        #[serde(default)]
        text: String,
    },
    /// `input_json_delta`, `thinking_delta`, `signature_delta`, ...
    #[serde(other)]
    Other,
}

/// Error payload carried by an `error` event
#[derive(Debug, Deserialize)]
pub struct AnthropicErrorBody {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = AnthropicConfig::new("k").with_base_url("http://localhost:8080/v1");
        assert_eq!(config.base_url, "http://localhost:8080/v1/");
    }

    #[test]
    fn test_defaults() {
        let config = AnthropicConfig::new("k");
        assert_eq!(config.base_url, "https://api.anthropic.com/v1/");
        assert_eq!(config.version, "2023-06-01");
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
    }
}
