//! Error types for the completion client

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing API key for provider '{0}'")]
    MissingApiKey(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("API error {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Stream error: {0}")]
    Stream(String),
}

impl Error {
    pub fn stream_error(message: impl Into<String>) -> Self {
        Error::Stream(message.into())
    }

    pub fn provider_error(status: u16, body: impl Into<String>) -> Self {
        Error::Provider {
            status,
            body: body.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
