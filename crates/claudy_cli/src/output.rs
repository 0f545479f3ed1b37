//! Terminal output helpers: styled text for humans, structured JSON for scripts.
//!
//! Stdout carries only results (the suggestion, or `--show-context` data).
//! Diagnostics always go to stderr.
//!
//! Uses:
//! - `console` for colors (respects NO_COLOR, auto-disables when piped)
//! - `comfy-table` for the history table
//! - `indicatif` for the waiting spinner

use std::sync::atomic::{AtomicBool, Ordering};

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::cli::OutputFormat;

// ── Global format flag ─────────────────────────────────────────────

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(format: OutputFormat) {
    if matches!(format, OutputFormat::Json) {
        JSON_MODE.store(true, Ordering::Relaxed);
    }
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

// ── JSON envelope ──────────────────────────────────────────────────

#[derive(Serialize)]
struct Msg<'a> {
    level: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a JsonValue>,
}

fn to_json(level: &str, message: &str, data: Option<&JsonValue>) -> String {
    let msg = Msg { level, message, data };
    serde_json::to_string(&msg).unwrap_or_else(|_| format!("{{\"level\":\"{level}\"}}"))
}

// ── Public helpers ─────────────────────────────────────────────────

pub fn error(text: &str) {
    if is_json() {
        eprintln!("{}", to_json("error", text, None));
    } else {
        eprintln!("{} {}", style("✗").red(), style(text).red());
    }
}

pub fn warning(text: &str) {
    if is_json() {
        eprintln!("{}", to_json("warning", text, None));
    } else {
        eprintln!("{} {}", style("!").yellow(), style(text).bright());
    }
}

pub fn dim(text: &str) {
    if !is_json() {
        println!("{}", style(text).dim());
    }
}

/// Print a key-value pair with styled key.
pub fn kv(key: &str, value: &str) {
    if !is_json() {
        println!("  {} {}", style(key).cyan().bold(), value);
    }
}

/// Emit a serializable value as one JSON envelope on stdout.
pub fn data<T: Serialize>(label: &str, value: &T) {
    let json_val = serde_json::to_value(value).unwrap_or(JsonValue::Null);
    println!("{}", to_json("data", label, Some(&json_val)));
}

/// The finished suggestion in JSON mode.
pub fn suggestion(command: &str) {
    data("suggestion", &serde_json::json!({ "command": command }));
}

// ── Tables ─────────────────────────────────────────────────────────

pub fn table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn table_header(table: &mut Table, col1: &str, col2: &str) {
    table.set_header(vec![
        Cell::new(col1).fg(Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
        Cell::new(col2).fg(Color::Cyan).add_attribute(comfy_table::Attribute::Bold),
    ]);
}

pub fn table_row(table: &mut Table, index: &str, value: &str) {
    table.add_row(vec![Cell::new(index).fg(Color::Green), Cell::new(value)]);
}

// ── Spinner ────────────────────────────────────────────────────────

/// Spinner on stderr while the request is in flight.
///
/// `None` in JSON mode or when stderr is not a terminal.
pub fn waiting_spinner(message: &str) -> Option<ProgressBar> {
    if is_json() || !Term::stderr().is_term() {
        return None;
    }

    let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    Some(spinner)
}
