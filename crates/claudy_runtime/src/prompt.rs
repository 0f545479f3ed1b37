//! Request envelope construction.

use claudy_llms::{RequestEnvelope, Sampling};

use crate::config::ClaudyConfig;
use crate::context::{HistoryContext, SystemInfo};

/// System instruction sent with every request.
pub const SYSTEM_INSTRUCTION: &str = "You are a shell command assistant. Based on the user's command history and request, suggest ONE relevant shell command. Return ONLY the command, no explanation or markdown. It's critical that the command works on the user's system, so consider the system information when constructing commands.";

/// Composes the outbound request. Pure: performs no I/O.
#[derive(Debug, Clone)]
pub struct RequestEnvelopeBuilder {
    model: String,
    sampling: Sampling,
}

impl RequestEnvelopeBuilder {
    pub fn new(model: impl Into<String>, sampling: Sampling) -> Self {
        Self {
            model: model.into(),
            sampling,
        }
    }

    pub fn from_config(config: &ClaudyConfig) -> Self {
        Self::new(
            config.model.clone(),
            Sampling::new(config.max_tokens, config.temperature),
        )
    }

    pub fn build(
        &self,
        system: &SystemInfo,
        history: &HistoryContext,
        supplement: Option<&str>,
        query: &str,
    ) -> RequestEnvelope {
        RequestEnvelope::new(
            self.model.clone(),
            self.sampling,
            SYSTEM_INSTRUCTION,
            build_user_message(&system.describe(), history, supplement, query),
        )
    }
}

/// Build the single user message.
///
/// Sections, in order: system description, recent commands, supplementary
/// context (only when present), and the query. The query is not validated.
pub fn build_user_message(
    system_description: &str,
    history: &HistoryContext,
    supplement: Option<&str>,
    query: &str,
) -> String {
    let additional = supplement
        .map(|text| format!("\n\nAdditional context:\n{text}"))
        .unwrap_or_default();

    format!(
        "System: {system_description}\n\nRecent commands:\n{}{additional}\n\nUser request: {query}\n\nProvide exactly ONE command:",
        history.render()
    )
}
