//! `--show-context`: print what would be sent, without contacting the API.

use anyhow::Result;
use claudy_runtime::context::load_supplement;
use claudy_runtime::{ClaudyConfig, Enrichment, HistoryContextBuilder, SystemInfo};

use crate::output;

pub fn handle(config: &ClaudyConfig) -> Result<()> {
    let system = SystemInfo::detect(config.shell.clone());
    let loaded = HistoryContextBuilder::from_config(config).load(&config.history_path);
    let history_status = status(&loaded);
    let history = loaded.unwrap_or_default();
    let supplement = load_supplement(&config.prompt_path);
    let supplement_status = status(&supplement);

    if output::is_json() {
        output::data(
            "context",
            &serde_json::json!({
                "system": system.describe(),
                "history_file": config.history_path.display().to_string(),
                "history_status": history_status,
                "supplement_file": config.prompt_path.display().to_string(),
                "supplement_status": supplement_status,
                "supplement": supplement.into_loaded(),
                "commands": history,
            }),
        );
        return Ok(());
    }

    output::kv("System", &system.describe());
    output::kv("History", &format!("{} ({history_status})", config.history_path.display()));
    output::kv("Extra context", &format!("{} ({supplement_status})", config.prompt_path.display()));

    if history.is_empty() {
        output::dim("No recent commands.");
        return Ok(());
    }

    let mut table = output::table();
    output::table_header(&mut table, "#", "Command");
    for (i, command) in history.iter().enumerate() {
        output::table_row(&mut table, &(i + 1).to_string(), command);
    }
    println!("{table}");
    Ok(())
}

fn status<T>(enrichment: &Enrichment<T>) -> String {
    match enrichment {
        Enrichment::Loaded(_) => "loaded".to_string(),
        Enrichment::Missing => "missing".to_string(),
        Enrichment::Unreadable(reason) => format!("unreadable: {reason}"),
    }
}
