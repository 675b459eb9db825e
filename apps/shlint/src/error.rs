//! Error type shared by every shlint component.
//!
//! A nonzero linter exit is not an error: it is the expected way findings are
//! reported and travels as the run's exit status instead.

use std::path::PathBuf;
use thiserror::Error;

use crate::tools::ToolKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{tool} not found: '{name}' is not on PATH")]
    ToolNotFound { tool: ToolKind, name: String },

    #[error("script discovery failed: {details}")]
    Discovery { details: String },

    #[error("{tool} failed with {status}")]
    ToolFailed { tool: ToolKind, status: String },

    #[error("patch failed with {status}; the diff does not apply to the working tree")]
    Patch { status: String },

    #[error("git query failed: {details}")]
    Vcs { details: String },

    #[error("invalid config {}: {details}", .path.display())]
    Config { path: PathBuf, details: String },

    #[error("invalid exclude pattern '{pattern}': {details}")]
    Pattern { pattern: String, details: String },

    #[error("could not run {tool}: {source}")]
    Io {
        tool: ToolKind,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(tool: ToolKind, source: std::io::Error) -> Self {
        Self::Io { tool, source }
    }

    /// Describe a child process exit for error messages.
    pub fn describe_status(status: std::process::ExitStatus) -> String {
        match status.code() {
            Some(code) => format!("exit code {code}"),
            None => "a signal".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_not_found_names_the_binary() {
        let err = Error::ToolNotFound {
            tool: ToolKind::Formatter,
            name: "shfmt".into(),
        };
        assert_eq!(err.to_string(), "formatter not found: 'shfmt' is not on PATH");
    }

    #[test]
    fn io_error_keeps_source() {
        let err = Error::io(ToolKind::Linter, std::io::Error::other("denied"));
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("denied"));
    }
}
