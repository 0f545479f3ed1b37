//! Command dispatch.

pub mod context;
pub mod suggest;

use anyhow::{anyhow, Result};
use claudy_runtime::{ClaudyConfig, RuntimeError};

use crate::cli::Cli;

pub async fn handle(cli: Cli) -> Result<()> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Cannot determine home directory"))?;
    let config = apply_overrides(ClaudyConfig::from_env(&home), &cli);

    if cli.show_context {
        return context::handle(&config);
    }

    let query = cli.query_text().ok_or(RuntimeError::MissingQuery)?;
    suggest::handle(config, &query).await
}

/// Command-line flags take precedence over the environment.
fn apply_overrides(mut config: ClaudyConfig, cli: &Cli) -> ClaudyConfig {
    if let Some(model) = &cli.model {
        config = config.with_model(model.clone());
    }
    if let Some(max_tokens) = cli.max_tokens {
        config = config.with_max_tokens(max_tokens);
    }
    if let Some(temperature) = cli.temperature {
        config = config.with_temperature(temperature);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_flags_override_environment() {
        let config = ClaudyConfig::from_vars("/home/u", |key| match key {
            "CLAUDY_MODEL" => Some("env-model".to_string()),
            "CLAUDY_MAX_TOKENS" => Some("100".to_string()),
            _ => None,
        });
        let cli = Cli::parse_from(["claudy", "--model", "flag-model", "list", "ports"]);

        let config = apply_overrides(config, &cli);
        assert_eq!(config.model, "flag-model");
        assert_eq!(config.max_tokens, 100);
    }
}
