//! Provider tests against a local mock of the Messages API.

use std::time::{Duration, Instant};

use futures::StreamExt;
use mockito::Matcher;
use serde_json::json;

use crate::error::Error;
use crate::provider::Provider;
use crate::providers::anthropic::AnthropicConfig;
use crate::providers::AnthropicProvider;
use crate::types::{RequestEnvelope, Sampling};

const SSE_BODY: &str = concat!(
    "event: message_start\n",
    "data: {\"type\":\"message_start\",\"message\":{\"id\":\"msg_01\",\"model\":\"claude-haiku-4-5-20251001\"}}\n",
    "\n",
    "event: content_block_start\n",
    "data: {\"type\":\"content_block_start\",\"index\":0,\"content_block\":{\"type\":\"text\",\"text\":\"\"}}\n",
    "\n",
    "event: ping\n",
    "data: {\"type\":\"ping\"}\n",
    "\n",
    "event: content_block_delta\n",
    "data: {\"type\":\"content_block_delta\",\"index\":0,\"delta\":{\"type\":\"text_delta\",\"text\":\"du -sh \"}}\n",
    "\n",
    "event: content_block_delta\n",
    "data: {\"type\":\"content_block_delta\",\"index\":0,\"delta\":{\"type\":\"text_delta\",\"text\":\"* | sort -h\"}}\n",
    "\n",
    "event: content_block_stop\n",
    "data: {\"type\":\"content_block_stop\",\"index\":0}\n",
    "\n",
    "event: message_delta\n",
    "data: {\"type\":\"message_delta\",\"delta\":{\"stop_reason\":\"end_turn\"},\"usage\":{\"output_tokens\":9}}\n",
    "\n",
    "event: message_stop\n",
    "data: {\"type\":\"message_stop\"}\n",
    "\n",
);

fn envelope() -> RequestEnvelope {
    RequestEnvelope::new(
        "claude-haiku-4-5-20251001",
        Sampling::new(500, 0.5),
        "Return one command.",
        "largest directories here",
    )
}

fn provider_for(server: &mockito::ServerGuard) -> AnthropicProvider {
    let config = AnthropicConfig::new("test-key").with_base_url(format!("{}/v1", server.url()));
    AnthropicProvider::new(config).expect("provider")
}

#[tokio::test]
async fn test_stream_yields_text_deltas() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .match_header("x-api-key", "test-key")
        .match_header("anthropic-version", "2023-06-01")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "model": "claude-haiku-4-5-20251001",
            "max_tokens": 500,
            "stream": true,
            "system": "Return one command.",
            "messages": [{ "role": "user", "content": "largest directories here" }],
        })))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(SSE_BODY)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let stream = provider.stream(&envelope()).await.expect("stream");
    let tokens: Vec<String> = stream.map(|t| t.expect("token")).collect().await;

    assert_eq!(tokens, vec!["du -sh ", "* | sort -h"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_status_is_surfaced() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/messages")
        .with_status(401)
        .with_body(r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#)
        .create_async()
        .await;

    let provider = provider_for(&server);
    let err = provider.stream(&envelope()).await.unwrap_err();

    match err {
        Error::Provider { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("authentication_error"));
        }
        other => panic!("expected provider error, got {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_refused_is_http_error() -> anyhow::Result<()> {
    // Bind then drop a listener to get a port nothing is serving on.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };
    let config = AnthropicConfig::new("k").with_base_url(format!("http://127.0.0.1:{port}/v1"));
    let provider = AnthropicProvider::new(config)?;

    let err = provider.stream(&envelope()).await.unwrap_err();
    assert!(matches!(err, Error::Http(_)), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn test_silent_server_times_out() -> anyhow::Result<()> {
    // Accepts connections and never answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();
    let server = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let limit = Duration::from_millis(300);
    let config = AnthropicConfig::new("k")
        .with_base_url(format!("http://127.0.0.1:{port}/v1"))
        .with_connect_timeout(limit);
    let provider = AnthropicProvider::new(config)?;

    let started = Instant::now();
    let err = provider.stream(&envelope()).await.unwrap_err();

    assert!(matches!(err, Error::Timeout(d) if d == limit), "got {err:?}");
    assert!(started.elapsed() < Duration::from_secs(5));
    server.abort();
    Ok(())
}
