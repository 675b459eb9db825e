//! `.gitignore`-based exclusion for trees that are not under git.
//!
//! Rule files are collected from a path's directory up to the project root,
//! and a path is excluded when any of them ignores it. There is no precedence
//! between files: a `!pattern` in a nested `.gitignore` does not re-include a
//! path ignored by an ancestor. Negation still works inside a single file.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const IGNORE_FILE: &str = ".gitignore";

/// Cache of accumulated rule sets keyed by `(root, directory)`.
#[derive(Default)]
pub struct IgnoreFilter {
    cache: HashMap<(PathBuf, PathBuf), Vec<Arc<Gitignore>>>,
}

impl IgnoreFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `path` is excluded by a `.gitignore` between its directory and `root`.
    ///
    /// Relative paths are taken relative to `root`. Paths outside `root` have
    /// no applicable rules.
    pub fn is_ignored(&mut self, root: &Path, path: &Path) -> bool {
        let path = if path.is_relative() {
            root.join(path)
        } else {
            path.to_path_buf()
        };
        let Some(dir) = path.parent() else {
            return false;
        };
        if !dir.starts_with(root) {
            return false;
        }
        let is_dir = path.is_dir();
        self.rules_for(root, dir).iter().any(|rules| {
            path.starts_with(rules.path())
                && rules.matched_path_or_any_parents(&path, is_dir).is_ignore()
        })
    }

    /// Number of cached directories.
    pub fn cached_dirs(&self) -> usize {
        self.cache.len()
    }

    fn rules_for(&mut self, root: &Path, dir: &Path) -> Vec<Arc<Gitignore>> {
        let key = (root.to_path_buf(), dir.to_path_buf());
        if let Some(hit) = self.cache.get(&key) {
            return hit.clone();
        }
        let mut rules = Vec::new();
        if let Some(own) = load_rules(dir) {
            rules.push(Arc::new(own));
        }
        if dir != root {
            if let Some(parent) = dir.parent() {
                rules.extend(self.rules_for(root, parent));
            }
        }
        self.cache.insert(key, rules.clone());
        rules
    }
}

/// Compile `<dir>/.gitignore`, keeping whatever lines parsed.
fn load_rules(dir: &Path) -> Option<Gitignore> {
    let file = dir.join(IGNORE_FILE);
    if !file.is_file() {
        return None;
    }
    let mut builder = GitignoreBuilder::new(dir);
    if let Some(err) = builder.add(&file) {
        log::warn!("{}: {err}", file.display());
    }
    match builder.build() {
        Ok(rules) => {
            log::trace!("loaded {} rule(s) from {}", rules.len(), file.display());
            Some(rules)
        }
        Err(err) => {
            log::warn!("ignoring {}: {err}", file.display());
            None
        }
    }
}
