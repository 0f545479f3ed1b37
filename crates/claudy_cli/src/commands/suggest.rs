//! Default command: stream one suggestion to stdout.

use std::io;

use anyhow::Result;
use claudy_runtime::{ClaudyConfig, Collector, OutputEmitter, Runtime, TokenSink};
use indicatif::ProgressBar;

use crate::output;

pub async fn handle(config: ClaudyConfig, query: &str) -> Result<()> {
    let runtime = Runtime::from_config(config)?;

    if output::is_json() {
        let mut collector = Collector::new();
        runtime.suggest(query, &mut collector).await?;
        output::suggestion(collector.text());
        return Ok(());
    }

    let mut sink = SpinnerSink::new(OutputEmitter::stdout(), output::waiting_spinner("Thinking..."));
    runtime.suggest(query, &mut sink).await?;
    Ok(())
}

/// Clears the spinner before the first byte reaches the terminal.
struct SpinnerSink<S> {
    inner: S,
    spinner: Option<ProgressBar>,
}

impl<S: TokenSink> SpinnerSink<S> {
    fn new(inner: S, spinner: Option<ProgressBar>) -> Self {
        Self { inner, spinner }
    }

    fn clear(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl<S: TokenSink> TokenSink for SpinnerSink<S> {
    fn token(&mut self, text: &str) -> io::Result<()> {
        self.clear();
        self.inner.token(text)
    }

    fn finish(&mut self) -> io::Result<()> {
        self.clear();
        self.inner.finish()
    }
}

// Failures before the stream opens never reach `finish`.
impl<S> Drop for SpinnerSink<S> {
    fn drop(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_sink_forwards() {
        let mut sink = SpinnerSink::new(Collector::new(), Some(ProgressBar::hidden()));
        sink.token("ls ").unwrap();
        assert!(sink.spinner.is_none());
        sink.token("-la").unwrap();
        sink.finish().unwrap();

        let inner = std::mem::take(&mut sink.inner);
        assert!(inner.is_finished());
        assert_eq!(inner.text(), "ls -la");
    }
}
