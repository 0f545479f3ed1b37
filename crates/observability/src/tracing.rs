//! Span helpers

/// Span around one completion request.
///
/// `connect_ms`, `first_token_ms`, `tokens`, `error` and `error.message` start
/// empty and are filled in with [`record_duration`], [`record_error`] or
/// `Span::record`.
///
/// ```rust
/// use claudy_observability::request_span;
///
/// let span = request_span!("5f0c7a9e", "anthropic", "claude-haiku-4-5-20251001");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! request_span {
    ($request_id:expr, $provider:expr, $model:expr) => {
        tracing::info_span!(
            "llm.request",
            request.id = $request_id,
            provider = $provider,
            model = $model,
            connect_ms = tracing::field::Empty,
            first_token_ms = tracing::field::Empty,
            tokens = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Mark the current span as failed.
///
/// The error is logged at `debug`; reporting it to the user is the caller's job.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::debug!(error = %error, "Request failed");
}

/// Record `duration` in milliseconds under `key` on the current span.
pub fn record_duration(key: &str, duration: std::time::Duration) {
    tracing::Span::current().record(key, duration.as_millis() as u64);
}
