//! Anthropic provider implementation

use async_trait::async_trait;
use reqwest::Client;
use tokio::time::timeout;

use super::convert::to_anthropic_request;
use super::stream::{body_reader, decode_lines};
use super::types::AnthropicConfig;
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::types::{Headers, RequestEnvelope, TokenStream};

/// Anthropic provider
pub struct AnthropicProvider {
    config: AnthropicConfig,
    client: Client,
}

impl AnthropicProvider {
    /// Environment variable for API key
    pub const API_KEY_ENV: &'static str = claudy_constant::defaults::API_KEY_ENV;

    /// Create a new Anthropic provider
    pub fn new(config: AnthropicConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::MissingApiKey("anthropic".to_string()));
        }

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self { config, client })
    }

    fn messages_url(&self) -> String {
        format!("{}messages", self.config.base_url)
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn provider_id(&self) -> &str {
        "anthropic"
    }

    fn build_headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("x-api-key", self.config.api_key.as_str());
        headers.insert("anthropic-version", self.config.version.as_str());
        headers.insert("content-type", "application/json");
        headers
    }

    async fn stream(&self, request: &RequestEnvelope) -> Result<TokenStream> {
        let url = self.messages_url();
        let body = to_anthropic_request(request, true);
        let headers = self.build_headers();

        let send = self
            .client
            .post(&url)
            .headers(headers.to_reqwest_headers())
            .json(&body)
            .send();

        // Only establishment is bounded; the body may stream for as long as it needs.
        let limit = self.config.connect_timeout;
        let response = timeout(limit, send)
            .await
            .map_err(|_| Error::Timeout(limit))??;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::provider_error(status.as_u16(), error_text));
        }

        tracing::debug!(status = %response.status(), "Anthropic stream opened");
        Ok(decode_lines(body_reader(response)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        let result = AnthropicProvider::new(AnthropicConfig::new(""));
        assert!(matches!(result, Err(Error::MissingApiKey(_))));
    }

    #[test]
    fn test_build_headers() {
        let provider = AnthropicProvider::new(AnthropicConfig::new("sk-test")).unwrap();
        let headers = provider.build_headers();
        assert_eq!(headers.len(), 3);
        assert_eq!(headers.get("x-api-key"), Some("sk-test"));
        assert_eq!(headers.get("anthropic-version"), Some("2023-06-01"));
        assert_eq!(headers.get("content-type"), Some("application/json"));
    }

    #[test]
    fn test_messages_url() {
        let config = AnthropicConfig::new("k").with_base_url("http://127.0.0.1:9/v1");
        let provider = AnthropicProvider::new(config).unwrap();
        assert_eq!(provider.messages_url(), "http://127.0.0.1:9/v1/messages");
    }
}
