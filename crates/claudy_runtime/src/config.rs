//! Runtime configuration for claudy
//!
//! Built once at startup and handed to every component, so nothing below the
//! CLI reads the environment on its own.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use claudy_constant::{app, defaults};

use crate::error::{Result, RuntimeError};

/// Runtime configuration
#[derive(Clone)]
pub struct ClaudyConfig {
    /// Credential for the completion API (None when unset or empty)
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Maximum tokens for the reply
    pub max_tokens: u32,
    pub temperature: f32,
    /// API base URL, always ending in `/`
    pub base_url: String,
    /// Shell history log
    pub history_path: PathBuf,
    /// Optional supplementary context file
    pub prompt_path: PathBuf,
    /// Unique commands kept in the context window
    pub history_limit: usize,
    /// Trailing lines read per wanted command
    pub over_read_factor: usize,
    /// Shorter commands are dropped from the context
    pub min_command_len: usize,
    /// Commands containing this name are dropped from the context
    pub self_name: String,
    /// Bound on establishing the request
    pub connect_timeout: Duration,
    /// User's login shell, as reported by `SHELL`
    pub shell: String,
}

impl ClaudyConfig {
    pub fn new(home: impl AsRef<Path>) -> Self {
        let home = home.as_ref();
        Self {
            api_key: None,
            model: defaults::MODEL.to_string(),
            max_tokens: defaults::MAX_TOKENS,
            temperature: defaults::TEMPERATURE,
            base_url: defaults::BASE_URL.to_string(),
            history_path: home.join(defaults::HISTORY_FILE),
            prompt_path: home.join(defaults::PROMPT_FILE),
            history_limit: defaults::HISTORY_LIMIT,
            over_read_factor: defaults::HISTORY_OVER_READ,
            min_command_len: defaults::MIN_COMMAND_LEN,
            self_name: app::NAME.to_string(),
            connect_timeout: Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS),
            shell: "unknown".to_string(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key = api_key.into();
        self.api_key = (!key.is_empty()).then_some(key);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }

    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }

    pub fn with_prompt_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.prompt_path = path.into();
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_shell(mut self, shell: impl Into<String>) -> Self {
        self.shell = shell.into();
        self
    }

    /// The API key, or `MissingCredential`.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(RuntimeError::MissingCredential)
    }

    /// Load configuration from environment variables
    pub fn from_env(home: impl AsRef<Path>) -> Self {
        Self::from_vars(home, |key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// Values that fail to parse are ignored and the default is kept.
    pub fn from_vars<F>(home: impl AsRef<Path>, var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(home);

        if let Some(key) = var(defaults::API_KEY_ENV) {
            config = config.with_api_key(key);
        }

        if let Some(model) = var("CLAUDY_MODEL").filter(|m| !m.is_empty()) {
            config.model = model;
        }

        if let Some(val) = parsed(&var, "CLAUDY_MAX_TOKENS") {
            config.max_tokens = val;
        }

        if let Some(val) = parsed(&var, "CLAUDY_TEMPERATURE") {
            config.temperature = val;
        }

        if let Some(val) = parsed(&var, "CLAUDY_HISTORY_LIMIT") {
            config.history_limit = val;
        }

        if let Some(url) = var("ANTHROPIC_BASE_URL").filter(|u| !u.is_empty()) {
            config = config.with_base_url(url);
        }

        if let Some(path) = var("CLAUDY_HISTORY_FILE").filter(|p| !p.is_empty()) {
            config.history_path = PathBuf::from(path);
        }

        if let Some(path) = var("CLAUDY_PROMPT_FILE").filter(|p| !p.is_empty()) {
            config.prompt_path = PathBuf::from(path);
        }

        if let Some(shell) = var("SHELL").filter(|s| !s.is_empty()) {
            config.shell = shell;
        }

        config
    }
}

fn parsed<F, T>(var: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let raw = var(key)?;
    match raw.trim().parse() {
        Ok(val) => Some(val),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparseable setting");
            None
        }
    }
}

impl std::fmt::Debug for ClaudyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudyConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url)
            .field("history_path", &self.history_path)
            .field("prompt_path", &self.prompt_path)
            .field("history_limit", &self.history_limit)
            .field("over_read_factor", &self.over_read_factor)
            .field("min_command_len", &self.min_command_len)
            .field("self_name", &self.self_name)
            .field("connect_timeout", &self.connect_timeout)
            .field("shell", &self.shell)
            .finish()
    }
}
