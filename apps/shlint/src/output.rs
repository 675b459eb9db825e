//! Output rendering for `ls`, progress lines, and run summaries.
//!
//! Supports `human` (default) and `json` outputs. Run summaries go to stderr
//! because stdout belongs to the linter.

use crate::models::{Mode, Outcome, ScriptSet};
use crate::utils::{info_prefix, scripts_word};
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::path::Path;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn display_path(path: &Path, root: &Path) -> String {
    pathdiff::diff_paths(path, root)
        .unwrap_or_else(|| path.to_path_buf())
        .to_string_lossy()
        .to_string()
}

/// Print discovered scripts relative to `root`.
pub fn print_scripts(set: &ScriptSet, root: &Path, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_scripts_json(set, root))
                .unwrap_or_else(|_| "{}".to_string())
        ),
        _ => {
            for p in set.iter() {
                println!("{}", display_path(p, root));
            }
        }
    }
}

/// Status line before the first tool runs.
pub fn print_progress(mode: Mode, count: usize, output: &str) {
    if let Some(line) = compose_progress(mode, count, output) {
        eprintln!("{} {}", info_prefix(), line);
    }
}

/// Progress text (pure); the empty-set notice is kept in every output mode.
pub fn compose_progress(mode: Mode, count: usize, output: &str) -> Option<String> {
    if count == 0 {
        Some("No shell scripts found!".to_string())
    } else if output == "json" {
        None
    } else {
        Some(format!("{} {} {}...", mode.verb(), count, scripts_word(count)))
    }
}

/// Summary after a run.
pub fn print_outcome(outcome: &Outcome, output: &str) {
    match output {
        "json" => eprintln!(
            "{}",
            serde_json::to_string_pretty(&compose_outcome_json(outcome))
                .unwrap_or_else(|_| "{}".to_string())
        ),
        _ => {
            if outcome.scripts == 0 {
                return;
            }
            let color = use_colors(output);
            for file in &outcome.patched {
                if color {
                    eprintln!("{} {}", "✏️  patched:".green().bold(), file.bold());
                } else {
                    eprintln!("✏️  patched: {}", file);
                }
            }
            let summary = format!(
                "— Summary — {} {} status={} reported={}",
                outcome.scripts,
                scripts_word(outcome.scripts),
                outcome.status,
                outcome.reported
            );
            if !color {
                eprintln!("{}", summary);
            } else if outcome.status == 0 {
                eprintln!("{}", summary.green().bold());
            } else {
                eprintln!("{}", summary.red().bold());
            }
        }
    }
}

/// Compose `ls` JSON object (pure) for testing/snapshot purposes.
pub fn compose_scripts_json(set: &ScriptSet, root: &Path) -> JsonVal {
    let items: Vec<_> = set.iter().map(|p| display_path(p, root)).collect();
    json!({"scripts": items, "summary": {"total": set.len()}})
}

/// Compose run summary JSON object (pure) for testing/snapshot purposes.
pub fn compose_outcome_json(outcome: &Outcome) -> JsonVal {
    serde_json::to_value(outcome).unwrap_or(JsonVal::Null)
}
