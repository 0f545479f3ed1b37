//! Recent-command context from the shell history log.
//!
//! Two line dialects are understood:
//! - zsh extended history: `: <epoch>:<duration>;<command>`
//! - plain: the whole (trimmed) line is the command
//!
//! The log is append-only, so the newest commands are at the end. Only the
//! tail is read: `limit × over_read` lines, walking backwards from EOF.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use claudy_constant::defaults;
use serde::Serialize;

use super::Enrichment;
use crate::config::ClaudyConfig;

const TAIL_BLOCK: u64 = 8 * 1024;

/// Recent unique commands, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HistoryContext {
    commands: Vec<String>,
}

impl HistoryContext {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.commands.iter()
    }

    /// One `- <command>` line per entry, newest first, joined by `\n`.
    pub fn render(&self) -> String {
        self.commands
            .iter()
            .map(|cmd| format!("- {cmd}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Builds a [`HistoryContext`] from a history log.
#[derive(Debug, Clone)]
pub struct HistoryContextBuilder {
    limit: usize,
    over_read: usize,
    min_len: usize,
    exclude: String,
}

impl HistoryContextBuilder {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            over_read: defaults::HISTORY_OVER_READ,
            min_len: defaults::MIN_COMMAND_LEN,
            exclude: claudy_constant::app::NAME.to_string(),
        }
    }

    pub fn from_config(config: &ClaudyConfig) -> Self {
        Self {
            limit: config.history_limit,
            over_read: config.over_read_factor,
            min_len: config.min_command_len,
            exclude: config.self_name.clone(),
        }
    }

    pub fn with_over_read(mut self, factor: usize) -> Self {
        self.over_read = factor;
        self
    }

    /// Read the tail of `path` and build the context.
    pub fn load(&self, path: &Path) -> Enrichment<HistoryContext> {
        let max_lines = self.limit.saturating_mul(self.over_read);
        let loaded = Enrichment::from_io(read_tail_lines(path, max_lines)).map(|lines| self.build(&lines));

        match &loaded {
            Enrichment::Loaded(context) => {
                tracing::debug!(path = %path.display(), commands = context.len(), "Loaded history context")
            }
            Enrichment::Missing => {
                tracing::debug!(path = %path.display(), "No history file")
            }
            Enrichment::Unreadable(reason) => {
                tracing::debug!(path = %path.display(), %reason, "History file unreadable")
            }
        }

        loaded
    }

    /// Build the context from lines in file order (oldest first).
    pub fn build<S: AsRef<str>>(&self, lines: &[S]) -> HistoryContext {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut commands = Vec::new();

        for line in lines.iter().rev() {
            if commands.len() >= self.limit {
                break;
            }
            let Some(cmd) = extract_command(line.as_ref()) else {
                continue;
            };
            if !self.accepts(cmd) || !seen.insert(cmd) {
                continue;
            }
            commands.push(cmd.to_string());
        }

        HistoryContext { commands }
    }

    /// An empty `exclude` disables the self-name filter.
    fn accepts(&self, cmd: &str) -> bool {
        if cmd.chars().count() < self.min_len {
            return false;
        }
        self.exclude.is_empty() || !cmd.contains(self.exclude.as_str())
    }
}

impl Default for HistoryContextBuilder {
    fn default() -> Self {
        Self::new(defaults::HISTORY_LIMIT)
    }
}

/// Extract the command text from one history line.
///
/// Extended entries without a `;` are truncated and yield nothing, as do blank lines.
pub fn extract_command(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.starts_with(": ") {
        line.split_once(';').map(|(_, cmd)| cmd)
    } else if line.is_empty() {
        None
    } else {
        Some(line)
    }
}

/// Read at most `max_lines` trailing lines of a file.
///
/// Seeks backwards in fixed blocks until enough line breaks are buffered.
/// Invalid UTF-8 sequences are dropped rather than rejected.
pub fn read_tail_lines(path: &Path, max_lines: usize) -> io::Result<Vec<String>> {
    let mut file = File::open(path)?;
    if max_lines == 0 {
        return Ok(Vec::new());
    }

    let mut start = file.metadata()?.len();
    let mut buf: Vec<u8> = Vec::new();
    let mut newlines = 0usize;

    // One extra break marks where the oldest wanted line begins.
    while start > 0 && newlines <= max_lines {
        let step = TAIL_BLOCK.min(start);
        start -= step;
        file.seek(SeekFrom::Start(start))?;

        let mut block = vec![0u8; step as usize];
        file.read_exact(&mut block)?;
        newlines += block.iter().filter(|&&b| b == b'\n').count();
        block.extend_from_slice(&buf);
        buf = block;
    }

    let text: String = buf.utf8_chunks().map(|chunk| chunk.valid()).collect();
    // Unless we reached the start of the file, the first line may be partial.
    let body = if start > 0 {
        text.split_once('\n').map_or("", |(_, rest)| rest)
    } else {
        &text
    };

    let lines: Vec<&str> = body.lines().collect();
    let skip = lines.len().saturating_sub(max_lines);
    Ok(lines[skip..].iter().map(|line| line.to_string()).collect())
}
