//! Queries answered by git when the project is a work tree.

use crate::error::{Error, Result};
use crate::exec;
use crate::tools::{ToolHandle, ToolKind};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Stdio;

#[derive(Clone)]
pub struct Git {
    handle: ToolHandle,
}

impl Git {
    pub fn new(handle: ToolHandle) -> Self {
        Self { handle }
    }

    /// Whether `dir` is inside a git work tree.
    pub fn is_work_tree(&self, dir: &Path) -> bool {
        let mut cmd = self.handle.command();
        cmd.args(["rev-parse", "--is-inside-work-tree"])
            .current_dir(dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        exec::status(&mut cmd).is_ok_and(|s| s.success())
    }

    /// Keep the paths git does not ignore, in their original order.
    pub fn filter_not_ignored(&self, dir: &Path, paths: Vec<PathBuf>) -> Result<Vec<PathBuf>> {
        if paths.is_empty() {
            return Ok(paths);
        }
        let mut input = Vec::new();
        for p in &paths {
            input.extend_from_slice(&crate::discovery::path_bytes(p));
            input.push(0);
        }
        let mut cmd = self.handle.command();
        cmd.args(["check-ignore", "-z", "--stdin"]).current_dir(dir);
        let out = exec::with_input(&mut cmd, &input, true)
            .map_err(|e| Error::io(ToolKind::Git, e))?;
        // 0: some paths ignored, 1: none ignored
        match out.status.code() {
            Some(0) | Some(1) => {}
            _ => {
                return Err(Error::Vcs {
                    details: format!(
                        "check-ignore exited with {}",
                        Error::describe_status(out.status)
                    ),
                })
            }
        }
        let ignored: HashSet<PathBuf> = crate::discovery::split_nul(&out.stdout)
            .map(|p| if p.is_relative() { dir.join(p) } else { p })
            .collect();
        Ok(paths
            .into_iter()
            .filter(|p| {
                let abs = if p.is_relative() { dir.join(p) } else { p.clone() };
                if ignored.contains(&abs) {
                    log::debug!("git ignores {}", p.display());
                    false
                } else {
                    true
                }
            })
            .collect())
    }

    /// `git diff` of the working tree against the index.
    pub fn working_tree_diff(&self, dir: &Path) -> Result<String> {
        let mut cmd = self.handle.command();
        cmd.arg("diff").current_dir(dir);
        let out = exec::capture(&mut cmd).map_err(|e| Error::io(ToolKind::Git, e))?;
        if !out.status.success() {
            return Err(Error::Vcs {
                details: format!("diff exited with {}", Error::describe_status(out.status)),
            });
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::testutil::write_tool;
    use tempfile::tempdir;

    fn git_with(body: &str) -> (tempfile::TempDir, Git) {
        let bin = tempdir().unwrap();
        let path = write_tool(bin.path(), "git", body);
        let handle = ToolHandle {
            kind: ToolKind::Git,
            name: "git".into(),
            path,
        };
        (bin, Git::new(handle))
    }

    #[test]
    fn test_is_work_tree_follows_exit_status() {
        let (_bin, yes) = git_with("exit 0");
        let (_bin2, no) = git_with("exit 128");
        let dir = tempdir().unwrap();
        assert!(yes.is_work_tree(dir.path()));
        assert!(!no.is_work_tree(dir.path()));
    }

    #[test]
    fn test_filter_drops_paths_reported_as_ignored() {
        let (_bin, git) =
            git_with(r#"tr '\000' '\n' | grep '/vendor/' | tr '\n' '\000'; exit 0"#);
        let dir = tempdir().unwrap();
        let paths = vec![
            dir.path().join("a.sh"),
            dir.path().join("vendor/c.sh"),
            dir.path().join("b.sh"),
        ];
        let kept = git.filter_not_ignored(dir.path(), paths).unwrap();
        assert_eq!(kept, vec![dir.path().join("a.sh"), dir.path().join("b.sh")]);
    }

    #[test]
    fn test_filter_accepts_nothing_ignored_status() {
        let (_bin, git) = git_with("cat >/dev/null; exit 1");
        let dir = tempdir().unwrap();
        let paths = vec![dir.path().join("a.sh")];
        let kept = git.filter_not_ignored(dir.path(), paths.clone()).unwrap();
        assert_eq!(kept, paths);
    }

    #[test]
    fn test_filter_fatal_status_is_an_error() {
        let (_bin, git) = git_with("cat >/dev/null; exit 128");
        let dir = tempdir().unwrap();
        let err = git
            .filter_not_ignored(dir.path(), vec![dir.path().join("a.sh")])
            .unwrap_err();
        assert!(matches!(err, Error::Vcs { .. }));
    }
}
