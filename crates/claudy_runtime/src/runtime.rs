//! One-shot suggestion pipeline: gather context, build the request, stream
//! the reply into a sink.

use std::sync::Arc;
use std::time::Instant;

use claudy_llms::providers::anthropic::AnthropicConfig;
use claudy_llms::{AnthropicProvider, Provider, RequestEnvelope};
use claudy_observability::{record_duration, record_error, request_span};
use futures::StreamExt;
use tracing::{debug, info, Instrument};

use crate::config::ClaudyConfig;
use crate::context::{load_supplement, HistoryContext, HistoryContextBuilder, SystemInfo};
use crate::emitter::{drain, TokenSink};
use crate::error::{Result, RuntimeError};
use crate::prompt::RequestEnvelopeBuilder;

pub struct Runtime {
    config: ClaudyConfig,
    provider: Arc<dyn Provider>,
    system: SystemInfo,
}

impl Runtime {
    pub fn new(config: ClaudyConfig, provider: Arc<dyn Provider>) -> Self {
        let system = SystemInfo::detect(config.shell.clone());
        Self {
            config,
            provider,
            system,
        }
    }

    /// Runtime backed by the Anthropic provider.
    ///
    /// Fails with `MissingCredential` before anything touches the network.
    pub fn from_config(config: ClaudyConfig) -> Result<Self> {
        let api_key = config.require_api_key()?;
        let provider_config = AnthropicConfig::new(api_key)
            .with_base_url(config.base_url.clone())
            .with_connect_timeout(config.connect_timeout);
        let provider = AnthropicProvider::new(provider_config)?;
        Ok(Self::new(config, Arc::new(provider)))
    }

    pub fn with_system_info(mut self, system: SystemInfo) -> Self {
        self.system = system;
        self
    }

    pub fn config(&self) -> &ClaudyConfig {
        &self.config
    }

    pub fn system_info(&self) -> &SystemInfo {
        &self.system
    }

    /// Recent history; empty when the log is missing or unreadable.
    pub fn history(&self) -> HistoryContext {
        HistoryContextBuilder::from_config(&self.config)
            .load(&self.config.history_path)
            .unwrap_or_default()
    }

    /// Assemble the request for `query` from history, supplement and system info.
    pub fn prepare(&self, query: &str) -> RequestEnvelope {
        let history = self.history();
        let supplement = load_supplement(&self.config.prompt_path).into_loaded();
        RequestEnvelopeBuilder::from_config(&self.config).build(
            &self.system,
            &history,
            supplement.as_deref(),
            query,
        )
    }

    /// Ask for one command and stream the reply into `sink`.
    ///
    /// Returns the number of tokens delivered.
    pub async fn suggest(&self, query: &str, sink: &mut dyn TokenSink) -> Result<usize> {
        let envelope = self.prepare(query);
        let request_id = uuid::Uuid::new_v4().to_string();
        let span = request_span!(
            request_id.as_str(),
            self.provider.provider_id(),
            envelope.model()
        );

        self.stream_into(&envelope, sink).instrument(span).await
    }

    async fn stream_into(&self, envelope: &RequestEnvelope, sink: &mut dyn TokenSink) -> Result<usize> {
        if tracing::enabled!(tracing::Level::DEBUG) {
            let body = serde_json::to_string_pretty(envelope).unwrap_or_else(|_| format!("{envelope:?}"));
            debug!(target: "claudy.trace", request = %body, "Completion request");
        }

        let start = Instant::now();
        let stream = match self.provider.stream(envelope).await {
            Ok(stream) => stream,
            Err(e) => {
                let err = RuntimeError::Transport(e);
                record_error(&err);
                return Err(err);
            }
        };
        record_duration("connect_ms", start.elapsed());

        let mut first = true;
        let stream = stream.inspect(move |item| {
            if first && item.is_ok() {
                first = false;
                record_duration("first_token_ms", start.elapsed());
            }
        });

        match drain(stream, sink).await {
            Ok(count) => {
                tracing::Span::current().record("tokens", count as u64);
                info!(tokens = count, elapsed_ms = start.elapsed().as_millis() as u64, "Suggestion streamed");
                Ok(count)
            }
            Err(err) => {
                record_error(&err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::OutputEmitter;
    use async_trait::async_trait;
    use claudy_llms::{Headers, TokenStream};
    use futures::stream;
    use std::sync::Mutex;

    struct MockProvider {
        reply: Vec<&'static str>,
        fail: bool,
        seen: Mutex<Vec<RequestEnvelope>>,
    }

    impl MockProvider {
        fn replying(reply: Vec<&'static str>) -> Self {
            Self {
                reply,
                fail: false,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Vec::new(),
                fail: true,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Provider for MockProvider {
        fn provider_id(&self) -> &str {
            "mock"
        }

        fn build_headers(&self) -> Headers {
            Headers::new()
        }

        async fn stream(&self, request: &RequestEnvelope) -> claudy_llms::Result<TokenStream> {
            self.seen.lock().unwrap().push(request.clone());
            if self.fail {
                return Err(claudy_llms::Error::provider_error(529, "overloaded"));
            }
            let items: Vec<claudy_llms::Result<String>> =
                self.reply.iter().map(|t| Ok(t.to_string())).collect();
            Ok(TokenStream::new(Box::pin(stream::iter(items))))
        }
    }

    fn config_in(dir: &std::path::Path) -> ClaudyConfig {
        ClaudyConfig::new(dir).with_api_key("sk-test").with_shell("/bin/zsh")
    }

    fn runtime(config: ClaudyConfig, provider: Arc<MockProvider>) -> Runtime {
        Runtime::new(config, provider).with_system_info(SystemInfo::new("Linux", "6.1", "/bin/zsh"))
    }

    #[test]
    fn test_from_config_requires_credential() {
        let dir = tempfile::tempdir().unwrap();
        let result = Runtime::from_config(ClaudyConfig::new(dir.path()));
        assert!(matches!(result, Err(RuntimeError::MissingCredential)));
    }

    #[test]
    fn test_prepare_without_history_or_supplement() {
        let dir = tempfile::tempdir().unwrap();
        let rt = runtime(config_in(dir.path()), Arc::new(MockProvider::replying(vec![])));

        let envelope = rt.prepare("list open ports");
        assert_eq!(
            envelope.user_message(),
            "System: OS: Linux 6.1, Shell: /bin/zsh\n\nRecent commands:\n\n\nUser request: list open ports\n\nProvide exactly ONE command:"
        );
    }

    #[test]
    fn test_prepare_with_history_and_supplement() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".zsh_history"),
            ": 1700000000:0;ls -la\n: 1700000001:0;claudy what now\n: 1700000002:0;lsof -i :8080\n",
        )
        .unwrap();
        std::fs::write(dir.path().join(".claudy-prompt"), "Work laptop, no sudo.\n").unwrap();

        let rt = runtime(config_in(dir.path()), Arc::new(MockProvider::replying(vec![])));
        let message = rt.prepare("kill it").user_message().to_string();

        assert!(message.contains(
            "Recent commands:\n- lsof -i :8080\n- ls -la\n\nAdditional context:\nWork laptop, no sudo.\n\nUser request: kill it"
        ));
        assert!(!message.contains("what now"));
    }

    #[tokio::test]
    async fn test_suggest_streams_into_sink() {
        let dir = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockProvider::replying(vec!["git ", "status"]));
        let rt = runtime(config_in(dir.path()), provider.clone());

        let mut emitter = OutputEmitter::new(Vec::new());
        let count = rt.suggest("what changed", &mut emitter).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(emitter.into_inner(), b"git status\n");

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].model(), "claude-haiku-4-5-20251001");
    }

    #[tokio::test]
    async fn test_transport_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let rt = runtime(config_in(dir.path()), Arc::new(MockProvider::failing()));

        let mut emitter = OutputEmitter::new(Vec::new());
        let err = rt.suggest("anything", &mut emitter).await.unwrap_err();

        assert!(matches!(
            err,
            RuntimeError::Transport(claudy_llms::Error::Provider { status: 529, .. })
        ));
        assert!(emitter.into_inner().is_empty());
    }
}
