//! CLI argument definitions using clap derive macros.

use clap::{Parser, ValueEnum};

/// Suggest one shell command for what you describe, using your recent history
#[derive(Parser, Debug)]
#[command(name = "claudy", about, version)]
pub struct Cli {
    /// What you want to do, in plain words
    #[arg(value_name = "QUERY", trailing_var_arg = true)]
    pub query: Vec<String>,

    /// Log request details to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format: text (streamed) or json (one envelope when done)
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Model to use. Uses CLAUDY_MODEL env if not set.
    #[arg(long)]
    pub model: Option<String>,

    /// Upper bound on reply length. Uses CLAUDY_MAX_TOKENS env if not set.
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Sampling temperature. Uses CLAUDY_TEMPERATURE env if not set.
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Print the history context that would be sent, then exit
    #[arg(long)]
    pub show_context: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tokens streamed to stdout as they arrive
    #[default]
    Text,
    /// Structured JSON for scripts
    Json,
}

impl Cli {
    /// Query words joined by single spaces, or `None` when none were given.
    pub fn query_text(&self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.query.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_words_joined() {
        let cli = Cli::parse_from(["claudy", "find", "large", "files"]);
        assert_eq!(cli.query_text().as_deref(), Some("find large files"));
        assert_eq!(cli.output, OutputFormat::Text);
    }

    #[test]
    fn test_no_query_is_none() {
        let cli = Cli::parse_from(["claudy", "-v"]);
        assert!(cli.verbose);
        assert!(cli.query_text().is_none());
    }

    #[test]
    fn test_flags_before_query() {
        let cli = Cli::parse_from([
            "claudy", "-o", "json", "--model", "claude-x", "--max-tokens", "64", "--temperature", "0", "undo", "commit",
        ]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.model.as_deref(), Some("claude-x"));
        assert_eq!(cli.max_tokens, Some(64));
        assert_eq!(cli.temperature, Some(0.0));
        assert_eq!(cli.query_text().as_deref(), Some("undo commit"));

        // Once the query has started, flag-like words belong to it.
        let cli = Cli::parse_from(["claudy", "list", "-la", "files", "-v"]);
        assert!(!cli.verbose);
        assert_eq!(cli.query_text().as_deref(), Some("list -la files -v"));
    }
}
