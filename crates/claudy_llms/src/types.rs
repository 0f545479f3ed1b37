//! Provider-independent request and stream types

use std::collections::BTreeMap;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use pin_project::pin_project;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

use crate::error::Result;

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
        }
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Sampling parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sampling {
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Sampling {
    pub fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens,
            temperature,
        }
    }
}

/// Outbound completion request.
///
/// Holds exactly one user message. Fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEnvelope {
    model: String,
    sampling: Sampling,
    system: String,
    message: Message,
}

impl RequestEnvelope {
    pub fn new(
        model: impl Into<String>,
        sampling: Sampling,
        system: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            sampling,
            system: system.into(),
            message: Message::user(user_message),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    /// System instruction
    pub fn system(&self) -> &str {
        &self.system
    }

    pub fn user_message(&self) -> &str {
        &self.message.content
    }

    pub fn messages(&self) -> std::slice::Iter<'_, Message> {
        std::slice::from_ref(&self.message).iter()
    }
}

/// Case-insensitive HTTP header set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    entries: BTreeMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header, replacing any existing value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .insert(name.into().to_ascii_lowercase(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Convert to a reqwest header map. Entries that are not valid HTTP headers are dropped.
    pub fn to_reqwest_headers(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(mut value)) => {
                    if name.as_str().contains("key") {
                        value.set_sensitive(true);
                    }
                    map.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Dropping invalid header"),
            }
        }
        map
    }
}

/// Lazy sequence of decoded text fragments, in arrival order.
///
/// Ends after the end-of-stream sentinel, at end of body, or after the first error.
#[pin_project]
pub struct TokenStream {
    #[pin]
    inner: Pin<Box<dyn Stream<Item = Result<String>> + Send>>,
}

impl TokenStream {
    pub fn new(inner: Pin<Box<dyn Stream<Item = Result<String>> + Send>>) -> Self {
        Self { inner }
    }
}

impl Stream for TokenStream {
    type Item = Result<String>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project().inner.poll_next(cx)
    }
}

impl std::fmt::Debug for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenStream").finish_non_exhaustive()
    }
}
