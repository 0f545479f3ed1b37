//! Conversion from the unified envelope to the Anthropic wire request

use super::types::{AnthropicMessage, AnthropicRequest};
use crate::types::RequestEnvelope;

/// Convert unified request to Anthropic request
pub fn to_anthropic_request(req: &RequestEnvelope, stream: bool) -> AnthropicRequest {
    let sampling = req.sampling();
    AnthropicRequest {
        model: req.model().to_string(),
        max_tokens: sampling.max_tokens,
        temperature: sampling.temperature,
        stream,
        system: req.system().to_string(),
        messages: req
            .messages()
            .map(|message| AnthropicMessage {
                role: message.role.as_str().to_string(),
                content: message.content.clone(),
            })
            .collect(),
    }
}
