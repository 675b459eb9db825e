//! Locating the external executables shlint drives.
//!
//! Lookups go through a `ToolLocator` built once per run. Every configured
//! name is searched at most once, failures included, so later pipeline steps
//! reuse the first answer.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Role an external tool plays in a run.
pub enum ToolKind {
    Formatter,
    Linter,
    Reporter,
    Patch,
    Git,
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ToolKind::Formatter => "formatter",
            ToolKind::Linter => "linter",
            ToolKind::Reporter => "reporter",
            ToolKind::Patch => "patch",
            ToolKind::Git => "git",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A resolved executable.
pub struct ToolHandle {
    pub kind: ToolKind,
    pub name: String,
    pub path: PathBuf,
}

impl ToolHandle {
    /// Start a command for this tool.
    pub fn command(&self) -> Command {
        Command::new(&self.path)
    }
}

/// Memoizing executable lookup.
pub struct ToolLocator {
    search_path: Option<OsString>,
    cwd: PathBuf,
    cache: HashMap<String, Option<PathBuf>>,
}

impl Default for ToolLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolLocator {
    /// Search the process `PATH`.
    pub fn new() -> Self {
        Self {
            search_path: None,
            cwd: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            cache: HashMap::new(),
        }
    }

    /// Search only the given `PATH`-style list instead of the environment.
    pub fn with_search_path(paths: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(paths.into()),
            ..Self::new()
        }
    }

    /// Resolve a tool the current operation cannot run without.
    pub fn resolve(&mut self, kind: ToolKind, name: &str) -> Result<ToolHandle> {
        self.resolve_optional(kind, name)
            .ok_or_else(|| Error::ToolNotFound {
                tool: kind,
                name: name.to_string(),
            })
    }

    /// Resolve a tool whose absence only disables a feature.
    pub fn resolve_optional(&mut self, kind: ToolKind, name: &str) -> Option<ToolHandle> {
        let path = match self.cache.get(name) {
            Some(hit) => hit.clone(),
            None => {
                let found = self.lookup(name);
                match &found {
                    Some(p) => log::debug!("{kind} '{name}' resolved to {}", p.display()),
                    None => log::debug!("{kind} '{name}' not found"),
                }
                self.cache.insert(name.to_string(), found.clone());
                found
            }
        };
        path.map(|path| ToolHandle {
            kind,
            name: name.to_string(),
            path,
        })
    }

    /// Number of distinct names looked up so far.
    pub fn lookups(&self) -> usize {
        self.cache.len()
    }

    fn lookup(&self, name: &str) -> Option<PathBuf> {
        let found = match &self.search_path {
            Some(paths) => which::which_in(name, Some(paths), &self.cwd),
            None => which::which(name),
        };
        found.ok()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::testutil::write_tool;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_finds_tool_in_search_path() {
        let dir = tempdir().unwrap();
        let expected = write_tool(dir.path(), "shfmt", "exit 0");
        let mut locator = ToolLocator::with_search_path(dir.path());
        let handle = locator.resolve(ToolKind::Formatter, "shfmt").unwrap();
        assert_eq!(handle.path, expected);
        assert_eq!(handle.kind, ToolKind::Formatter);
    }

    #[test]
    fn test_missing_required_tool_is_an_error() {
        let dir = tempdir().unwrap();
        let mut locator = ToolLocator::with_search_path(dir.path());
        let err = locator.resolve(ToolKind::Linter, "shellcheck").unwrap_err();
        assert!(matches!(
            err,
            Error::ToolNotFound { tool: ToolKind::Linter, ref name } if name == "shellcheck"
        ));
    }

    #[test]
    fn test_missing_optional_tool_is_none() {
        let dir = tempdir().unwrap();
        let mut locator = ToolLocator::with_search_path(dir.path());
        assert!(locator
            .resolve_optional(ToolKind::Reporter, "reviewdog")
            .is_none());
    }

    #[test]
    fn test_lookups_are_memoized_including_misses() {
        let dir = tempdir().unwrap();
        let mut locator = ToolLocator::with_search_path(dir.path());
        assert!(locator.resolve_optional(ToolKind::Git, "git").is_none());
        // Appearing later does not change a cached answer
        write_tool(dir.path(), "git", "exit 0");
        assert!(locator.resolve_optional(ToolKind::Git, "git").is_none());
        assert_eq!(locator.lookups(), 1);
    }
}
