//! Data passed between discovery, the pipelines, and the printers.

use serde::Serialize;
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered, de-duplicated scripts selected for one run.
pub struct ScriptSet {
    paths: Vec<PathBuf>,
}

impl ScriptSet {
    /// Build from paths in discovery order, dropping repeats.
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let mut seen = HashSet::new();
        let paths = paths
            .into_iter()
            .filter(|p| seen.insert(p.clone()))
            .collect();
        Self { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }

    /// Paths as command-line arguments for a tool running in `root`.
    ///
    /// Root-relative arguments keep the linter's diff headers relative too,
    /// which is what `patch -p1` expects.
    pub fn relative_args(&self, root: &Path) -> Vec<OsString> {
        self.paths
            .iter()
            .map(|p| {
                pathdiff::diff_paths(p, root)
                    .filter(|rel| !rel.as_os_str().is_empty())
                    .unwrap_or_else(|| p.clone())
                    .into_os_string()
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
/// Which pipeline a run executes.
pub enum Mode {
    Check,
    Fix,
}

impl Mode {
    /// Verb used in progress lines.
    pub fn verb(self) -> &'static str {
        match self {
            Mode::Check => "Checking",
            Mode::Fix => "Fixing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Result of a check or fix run.
pub struct Outcome {
    pub mode: Mode,
    pub scripts: usize,
    /// The linter's exit code, or 0 when nothing was linted.
    pub status: i32,
    /// Whether findings were handed to the review reporter.
    pub reported: bool,
    /// Files touched by the linter's autofix diff (fix only).
    pub patched: Vec<String>,
}

impl Outcome {
    pub fn nothing_found(mode: Mode) -> Self {
        Self {
            mode,
            scripts: 0,
            status: 0,
            reported: false,
            patched: Vec::new(),
        }
    }
}
