use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Headers, RequestEnvelope, TokenStream};

/// A remote completion endpoint that streams its reply.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short identifier, e.g. `anthropic`
    fn provider_id(&self) -> &str;

    /// Headers sent with every request.
    fn build_headers(&self) -> Headers;

    /// Issue one request and return the decoded reply as a lazy token stream.
    ///
    /// Errors here mean no stream was obtained; errors while reading the
    /// body surface as items of the returned stream.
    async fn stream(&self, request: &RequestEnvelope) -> Result<TokenStream>;
}
