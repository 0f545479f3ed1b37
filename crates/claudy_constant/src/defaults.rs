//! Default configuration values and protocol constants.

/// Model used when `CLAUDY_MODEL` is not set
pub const MODEL: &str = "claude-haiku-4-5-20251001";
pub const MAX_TOKENS: u32 = 500;
pub const TEMPERATURE: f32 = 0.3;

pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";
pub const BASE_URL: &str = "https://api.anthropic.com/v1/";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Seconds allowed for connecting and receiving response headers
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// History file, relative to $HOME
pub const HISTORY_FILE: &str = ".zsh_history";
/// Supplementary free-text context, relative to $HOME
pub const PROMPT_FILE: &str = ".claudy-prompt";

/// Unique commands kept in the context window
pub const HISTORY_LIMIT: usize = 200;
/// Trailing lines read per wanted command. Heuristic for duplicate density.
pub const HISTORY_OVER_READ: usize = 4;
/// Commands shorter than this carry too little signal
pub const MIN_COMMAND_LEN: usize = 4;
