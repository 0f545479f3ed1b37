//! Application metadata constants

pub const NAME: &str = "claudy";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Streaming shell command suggestions from your recent history";

/// Directory under $HOME holding the optional `env` file
pub const DATA_DIR: &str = ".claudy";
/// Dotenv file inside DATA_DIR
pub const ENV_FILE: &str = "env";
