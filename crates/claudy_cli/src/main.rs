//! CLI entry point for claudy.

mod cli;
mod commands;
mod output;

use clap::Parser;
use claudy_constant::app;
use claudy_observability::ObservabilityConfig;

use crate::cli::Cli;

/// Load `~/.claudy/env`. Variables already set in the environment win.
///
/// Returns a description of the failure when the file exists but cannot be loaded.
fn load_env_file() -> Option<String> {
    let path = dirs::home_dir()?.join(app::DATA_DIR).join(app::ENV_FILE);
    if !path.exists() {
        return None;
    }
    dotenvy::from_path(&path)
        .err()
        .map(|e| format!("Could not load {}: {e}", path.display()))
}

fn init_logging(verbose: bool) {
    let mut config = ObservabilityConfig::from_env(app::NAME).with_version(app::VERSION);
    if verbose {
        config = config.with_default_log_level("debug");
    }
    if let Err(e) = claudy_observability::init(config) {
        output::warning(&e.to_string());
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let env_file_error = load_env_file();
    let cli = Cli::parse();
    output::init(cli.output);
    if let Some(message) = env_file_error {
        output::warning(&message);
    }
    init_logging(cli.verbose);

    let result = commands::handle(cli).await;
    claudy_observability::shutdown();

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
