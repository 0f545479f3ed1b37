//! Token output.
//!
//! Tokens are written the moment they arrive. A single line break follows the
//! last token whether the stream ended cleanly or with an error.

use std::io::{self, Write};

use futures::{Stream, StreamExt};

use crate::error::{Result, RuntimeError};

/// Destination for decoded tokens.
pub trait TokenSink {
    fn token(&mut self, text: &str) -> io::Result<()>;

    /// Called once after the last token.
    fn finish(&mut self) -> io::Result<()>;
}

/// Writes each token to `out` and flushes immediately.
#[derive(Debug)]
pub struct OutputEmitter<W: Write> {
    out: W,
}

impl<W: Write> OutputEmitter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl OutputEmitter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TokenSink for OutputEmitter<W> {
    fn token(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

/// Buffers the whole reply, for callers that print it in one piece.
#[derive(Debug, Default)]
pub struct Collector {
    text: String,
    finished: bool,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn into_text(self) -> String {
        self.text
    }
}

impl TokenSink for Collector {
    fn token(&mut self, text: &str) -> io::Result<()> {
        self.text.push_str(text);
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// Pull `stream` to completion, forwarding every token to `sink`.
///
/// `finish` is called on every exit path. Returns the number of tokens written,
/// or the first transport/output error.
pub async fn drain<S>(mut stream: S, sink: &mut dyn TokenSink) -> Result<usize>
where
    S: Stream<Item = claudy_llms::Result<String>> + Unpin,
{
    let mut count = 0usize;

    let outcome = loop {
        match stream.next().await {
            Some(Ok(token)) => {
                if let Err(e) = sink.token(&token) {
                    break Err(RuntimeError::Output(e));
                }
                count += 1;
            }
            Some(Err(e)) => break Err(RuntimeError::Transport(e)),
            None => break Ok(count),
        }
    };

    let finished = sink.finish();
    let count = outcome?;
    finished.map_err(RuntimeError::Output)?;
    Ok(count)
}
