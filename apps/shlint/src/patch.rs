//! Applying the linter's autofix diff with `patch`.

use crate::error::{Error, Result};
use crate::exec;
use crate::tools::{ToolHandle, ToolKind};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

pub struct Patcher {
    handle: ToolHandle,
}

impl Patcher {
    pub fn new(handle: ToolHandle) -> Self {
        Self { handle }
    }

    /// `patch -p<strip>` in `dir` with `diff` on stdin. A blank diff is a no-op.
    pub fn apply(&self, dir: &Path, diff: &str, strip: u32) -> Result<()> {
        if diff.trim().is_empty() {
            log::debug!("empty diff; nothing to patch");
            return Ok(());
        }
        let mut cmd = self.handle.command();
        cmd.arg(format!("-p{strip}")).current_dir(dir);
        let out = exec::with_input(&mut cmd, diff.as_bytes(), false)
            .map_err(|e| Error::io(ToolKind::Patch, e))?;
        if !out.status.success() {
            return Err(Error::Patch {
                status: Error::describe_status(out.status),
            });
        }
        Ok(())
    }
}

/// Target files of a unified diff, in order, without the `b/` prefix.
///
/// A target runs to the end of the line or to the tab before a timestamp.
pub fn changed_files(diff: &str) -> Vec<String> {
    static TARGET: OnceLock<Regex> = OnceLock::new();
    let re = TARGET.get_or_init(|| {
        Regex::new(r"(?m)^\+\+\+ (?:b/)?([^\t\r\n]+)").expect("valid regex")
    });
    let mut files: Vec<String> = Vec::new();
    for cap in re.captures_iter(diff) {
        let file = cap[1].to_string();
        if file != "/dev/null" && !files.contains(&file) {
            files.push(file);
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_files_reads_plus_headers() {
        let diff = "--- a/b.sh\n+++ b/b.sh\n@@ -1 +1 @@\n-echo $x\n+echo \"$x\"\n\
                    --- a/lib/c.sh\n+++ b/lib/c.sh\n@@ -2 +2 @@\n-x\n+y\n";
        assert_eq!(changed_files(diff), vec!["b.sh", "lib/c.sh"]);
        assert!(changed_files("").is_empty());
    }

    #[test]
    fn test_changed_files_keeps_spaces_and_drops_timestamps() {
        let diff = "--- a/my script.sh\n+++ b/my script.sh\t2024-01-01 00:00:00\n\
                    +++ /dev/null\n";
        assert_eq!(changed_files(diff), vec!["my script.sh"]);
    }
}

#[cfg(all(test, unix))]
mod fake_tool_tests {
    use super::*;
    use crate::testutil::{fake_patch, write_tool};
    use tempfile::tempdir;

    #[test]
    fn test_apply_uses_strip_level_and_cwd() {
        let bin = tempdir().unwrap();
        let tree = tempdir().unwrap();
        std::fs::write(tree.path().join("b.sh"), "echo BAD\n").unwrap();
        let patcher = Patcher::new(ToolHandle {
            kind: ToolKind::Patch,
            name: "patch".into(),
            path: fake_patch(bin.path()),
        });
        patcher
            .apply(tree.path(), "--- a/b.sh\n+++ b/b.sh\n", 1)
            .unwrap();
        let args = std::fs::read_to_string(bin.path().join("patch.log")).unwrap();
        assert_eq!(args.trim(), "-p1");
        let fixed = std::fs::read_to_string(tree.path().join("b.sh")).unwrap();
        assert_eq!(fixed, "echo GOOD\n");
    }

    #[test]
    fn test_blank_diff_never_runs_patch() {
        let bin = tempdir().unwrap();
        let patcher = Patcher::new(ToolHandle {
            kind: ToolKind::Patch,
            name: "patch".into(),
            path: fake_patch(bin.path()),
        });
        patcher.apply(bin.path(), "\n", 1).unwrap();
        assert!(!bin.path().join("patch.log").exists());
    }

    #[test]
    fn test_rejected_patch_is_an_error() {
        let bin = tempdir().unwrap();
        let path = write_tool(bin.path(), "patch", "cat >/dev/null; exit 1");
        let patcher = Patcher::new(ToolHandle {
            kind: ToolKind::Patch,
            name: "patch".into(),
            path,
        });
        let err = patcher.apply(bin.path(), "+++ b/x\n", 1).unwrap_err();
        assert!(matches!(err, Error::Patch { .. }));
    }
}
