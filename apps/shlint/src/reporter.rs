//! Posting findings as pull-request review comments through reviewdog.
//!
//! Reporting is a side channel: failures are logged and never change the
//! run's exit status.

use crate::exec;
use crate::tools::ToolHandle;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Input format declared to the reporter.
pub enum ReviewFormat {
    Checkstyle,
    Diff,
}

impl fmt::Display for ReviewFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReviewFormat::Checkstyle => "checkstyle",
            ReviewFormat::Diff => "diff",
        })
    }
}

#[derive(Debug, Clone)]
/// reviewdog invocation settings.
pub struct ReporterSettings {
    pub name: String,
    pub reporter: String,
    pub level: String,
}

impl Default for ReporterSettings {
    fn default() -> Self {
        Self {
            name: "shellcheck".to_string(),
            reporter: "github-pr-review".to_string(),
            level: "warning".to_string(),
        }
    }
}

pub struct Reporter {
    handle: ToolHandle,
    settings: ReporterSettings,
}

impl Reporter {
    pub fn new(handle: ToolHandle, settings: ReporterSettings) -> Self {
        Self { handle, settings }
    }

    fn args(&self, format: ReviewFormat) -> Vec<String> {
        vec![
            format!("-f={format}"),
            format!("-name={}", self.settings.name),
            format!("-reporter={}", self.settings.reporter),
            format!("-level={}", self.settings.level),
            "-fail-level=none".to_string(),
        ]
    }

    /// Hand `payload` to the reporter. Returns whether it accepted it.
    pub fn post(&self, payload: &str, format: ReviewFormat) -> bool {
        let mut cmd = self.handle.command();
        cmd.args(self.args(format));
        match exec::with_input(&mut cmd, payload.as_bytes(), false) {
            Ok(out) if out.status.success() => true,
            Ok(out) => {
                log::warn!(
                    "{} exited with {}; review comments were not posted",
                    self.handle.name,
                    crate::error::Error::describe_status(out.status)
                );
                false
            }
            Err(e) => {
                log::warn!("could not run {}: {e}", self.handle.name);
                false
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::testutil::fake_reviewdog;
    use crate::tools::ToolKind;
    use tempfile::tempdir;

    fn reporter(bin: &std::path::Path, exit: i32) -> Reporter {
        let handle = ToolHandle {
            kind: ToolKind::Reporter,
            name: "reviewdog".into(),
            path: fake_reviewdog(bin, exit),
        };
        Reporter::new(handle, ReporterSettings::default())
    }

    #[test]
    fn test_post_passes_format_and_payload() {
        let bin = tempdir().unwrap();
        assert!(reporter(bin.path(), 0).post("<checkstyle/>", ReviewFormat::Checkstyle));
        let args = std::fs::read_to_string(bin.path().join("reviewdog.log")).unwrap();
        assert_eq!(
            args.trim(),
            "-f=checkstyle -name=shellcheck -reporter=github-pr-review -level=warning -fail-level=none"
        );
        let input = std::fs::read_to_string(bin.path().join("reviewdog.input")).unwrap();
        assert_eq!(input, "<checkstyle/>");
    }

    #[test]
    fn test_post_failure_is_reported_not_raised() {
        let bin = tempdir().unwrap();
        assert!(!reporter(bin.path(), 1).post("diff", ReviewFormat::Diff));
    }
}
