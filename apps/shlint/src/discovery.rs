//! Script discovery: ask the formatter which files are shell scripts, then
//! drop everything the project ignores.
//!
//! Exclusion prefers git's own answer when the root is a work tree and falls
//! back to walking `.gitignore` files otherwise. Configured `exclude` globs
//! apply in both cases.

use crate::error::{Error, Result};
use crate::exec;
use crate::ignores::IgnoreFilter;
use crate::models::ScriptSet;
use crate::tools::{ToolHandle, ToolKind};
use crate::vcs::Git;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

pub struct Discovery {
    formatter: ToolHandle,
    git: Option<Git>,
    exclude: Vec<glob::Pattern>,
    filter: IgnoreFilter,
}

impl Discovery {
    /// `git` should be `None` when version-control exclusion is disabled.
    pub fn new(formatter: ToolHandle, git: Option<Git>, exclude: Vec<glob::Pattern>) -> Self {
        Self {
            formatter,
            git,
            exclude,
            filter: IgnoreFilter::new(),
        }
    }

    /// Produce the scripts for this run under `root`, in formatter order.
    pub fn discover(&mut self, root: &Path) -> Result<ScriptSet> {
        let root = root.canonicalize().map_err(|e| Error::Discovery {
            details: format!("cannot resolve {}: {e}", root.display()),
        })?;
        let listed = self.list(&root)?;
        log::info!("formatter listed {} script(s)", listed.len());

        let candidates: Vec<PathBuf> = listed
            .into_iter()
            .map(|p| if p.is_relative() { root.join(p) } else { p })
            .filter(|p| p.exists())
            .filter(|p| !self.excluded_by_glob(&root, p))
            .collect();

        let kept = match self.git.as_ref().filter(|git| git.is_work_tree(&root)) {
            Some(git) => {
                log::debug!("using git ignore rules for {}", root.display());
                git.filter_not_ignored(&root, candidates)?
            }
            None => {
                log::debug!("using .gitignore files under {}", root.display());
                candidates
                    .into_iter()
                    .filter(|p| {
                        let ignored = self.filter.is_ignored(&root, p);
                        if ignored {
                            log::debug!("ignored {}", p.display());
                        }
                        !ignored
                    })
                    .collect()
            }
        };
        Ok(ScriptSet::new(kept))
    }

    /// `<formatter> -f=0 <root>`: NUL-delimited script paths.
    fn list(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut cmd = self.formatter.command();
        cmd.arg("-f=0").arg(root);
        let out = exec::capture(&mut cmd).map_err(|e| Error::io(ToolKind::Formatter, e))?;
        if !out.status.success() {
            return Err(Error::Discovery {
                details: format!(
                    "{} -f=0 exited with {}",
                    self.formatter.name,
                    Error::describe_status(out.status)
                ),
            });
        }
        Ok(split_nul(&out.stdout).collect())
    }

    fn excluded_by_glob(&self, root: &Path, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let rel = pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf());
        self.exclude.iter().any(|pat| pat.matches_path(&rel))
    }
}

/// Compile `exclude` globs from configuration.
pub fn compile_excludes(patterns: &[String]) -> Result<Vec<glob::Pattern>> {
    patterns
        .iter()
        .map(|p| {
            glob::Pattern::new(p).map_err(|e| Error::Pattern {
                pattern: p.clone(),
                details: e.msg.to_string(),
            })
        })
        .collect()
}

/// Split NUL-delimited output into paths, skipping empty entries.
pub fn split_nul(bytes: &[u8]) -> impl Iterator<Item = PathBuf> + '_ {
    bytes
        .split(|b| *b == 0)
        .filter(|entry| !entry.is_empty())
        .map(bytes_to_path)
}

#[cfg(unix)]
fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Raw bytes of a path for NUL-delimited protocols.
#[cfg(unix)]
pub fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;
    Cow::Borrowed(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
pub fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    match path.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_nul_skips_empty_entries() {
        let paths: Vec<_> = split_nul(b"\0/r/a.sh\0\0/r/b.sh\0").collect();
        assert_eq!(paths, vec![PathBuf::from("/r/a.sh"), PathBuf::from("/r/b.sh")]);
        assert_eq!(split_nul(b"").count(), 0);
    }

    #[test]
    fn test_compile_excludes_rejects_bad_glob() {
        let err = compile_excludes(&["[".to_string()]).unwrap_err();
        assert!(matches!(err, Error::Pattern { ref pattern, .. } if pattern == "["));
    }
}
