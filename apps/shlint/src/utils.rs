//! Supporting helpers: status-line prefixes and small text utilities.

use owo_colors::OwoColorize;

fn color_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if color_enabled() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn info_prefix() -> String {
    if color_enabled() {
        "info:".blue().bold().to_string()
    } else {
        "info:".to_string()
    }
}

/// `"script"` or `"scripts"` for `n`.
pub fn scripts_word(n: usize) -> &'static str {
    if n == 1 {
        "script"
    } else {
        "scripts"
    }
}
