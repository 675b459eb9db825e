//! Check and fix pipelines.
//!
//! Both run `Discovering → {Empty: done | Invoking → Reconciling → done}`.
//! The linter's exit code is the run's status; formatter and patch failures
//! abort with an error, reporter failures are only logged. Every tool runs at
//! most once per run, one after another.

use crate::ci::CiContext;
use crate::config::Effective;
use crate::discovery::{compile_excludes, Discovery};
use crate::error::{Error, Result};
use crate::exec;
use crate::models::{Mode, Outcome, ScriptSet};
use crate::output;
use crate::patch::{changed_files, Patcher};
use crate::reporter::{Reporter, ReviewFormat};
use crate::tools::{ToolHandle, ToolKind, ToolLocator};
use crate::vcs::Git;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

enum Plan {
    Check,
    Fix { patcher: Patcher, strip: u32 },
}

pub struct Pipeline {
    plan: Plan,
    root: PathBuf,
    output: String,
    formatter: ToolHandle,
    linter: ToolHandle,
    git: Option<Git>,
    /// Present only in a pull-request context with reviewdog on PATH.
    reporter: Option<Reporter>,
    discovery: Discovery,
    linter_args: Vec<String>,
    external_sources: bool,
}

/// Build script discovery from configuration; only the formatter is required.
pub fn discovery(eff: &Effective, locator: &mut ToolLocator) -> Result<Discovery> {
    let formatter = locator.resolve(ToolKind::Formatter, &eff.tools.formatter)?;
    let git = if eff.use_vcs {
        locator
            .resolve_optional(ToolKind::Git, &eff.tools.git)
            .map(Git::new)
    } else {
        None
    };
    Ok(Discovery::new(formatter, git, compile_excludes(&eff.exclude)?))
}

impl Pipeline {
    /// Resolve every tool `mode` needs before any discovery work starts.
    pub fn prepare(
        mode: Mode,
        eff: &Effective,
        locator: &mut ToolLocator,
        ci: &CiContext,
    ) -> Result<Self> {
        let formatter = locator.resolve(ToolKind::Formatter, &eff.tools.formatter)?;
        let linter = locator.resolve(ToolKind::Linter, &eff.tools.linter)?;
        let plan = match mode {
            Mode::Check => Plan::Check,
            Mode::Fix => Plan::Fix {
                patcher: Patcher::new(locator.resolve(ToolKind::Patch, &eff.tools.patch)?),
                strip: eff.strip,
            },
        };
        let reporter = if ci.is_pull_request() {
            match locator.resolve_optional(ToolKind::Reporter, &eff.tools.reporter) {
                Some(handle) => Some(Reporter::new(handle, eff.reporter.clone())),
                None => {
                    log::info!(
                        "{} not found; review comments disabled",
                        eff.tools.reporter
                    );
                    None
                }
            }
        } else {
            None
        };
        let git = locator
            .resolve_optional(ToolKind::Git, &eff.tools.git)
            .map(Git::new);
        let discovery = discovery(eff, locator)?;
        Ok(Self {
            plan,
            root: eff.scan_root.clone(),
            output: eff.output.clone(),
            formatter,
            linter,
            git,
            reporter,
            discovery,
            linter_args: eff.linter_args.clone(),
            external_sources: eff.external_sources,
        })
    }

    pub fn mode(&self) -> Mode {
        match self.plan {
            Plan::Check => Mode::Check,
            Plan::Fix { .. } => Mode::Fix,
        }
    }

    pub fn reporting_enabled(&self) -> bool {
        self.reporter.is_some()
    }

    /// Discover scripts and run the pipeline; `extra_args` go to the linter.
    pub fn run(&mut self, extra_args: &[String]) -> Result<Outcome> {
        let mode = self.mode();
        let scripts = self.discovery.discover(&self.root)?;
        output::print_progress(mode, scripts.len(), &self.output);
        if scripts.is_empty() {
            return Ok(Outcome::nothing_found(mode));
        }
        // Tools run in the resolved root with root-relative script arguments
        let root = self.root.canonicalize().map_err(|e| Error::Discovery {
            details: format!("cannot resolve {}: {e}", self.root.display()),
        })?;
        match &self.plan {
            Plan::Check => self.check(&root, &scripts, extra_args),
            Plan::Fix { patcher, strip } => {
                self.fix(&root, &scripts, extra_args, patcher, *strip)
            }
        }
    }

    fn linter_command(&self, root: &Path, format: Option<&str>, extra_args: &[String]) -> Command {
        let mut cmd = self.linter.command();
        cmd.current_dir(root);
        if self.external_sources {
            cmd.arg("-x");
        }
        cmd.args(&self.linter_args).args(extra_args);
        // After caller arguments so the format the pipeline parses always wins
        if let Some(format) = format {
            cmd.arg(format!("--format={format}"));
        }
        cmd
    }

    fn check(&self, root: &Path, scripts: &ScriptSet, extra_args: &[String]) -> Result<Outcome> {
        let args: Vec<OsString> = scripts.relative_args(root);
        let mut outcome = Outcome {
            mode: Mode::Check,
            scripts: scripts.len(),
            status: 0,
            reported: false,
            patched: Vec::new(),
        };
        match &self.reporter {
            Some(reporter) => {
                let mut cmd = self.linter_command(root, Some("checkstyle"), extra_args);
                cmd.args(&args);
                let out = exec::capture(&mut cmd).map_err(|e| Error::io(ToolKind::Linter, e))?;
                outcome.status = exec::code(out.status);
                let payload = String::from_utf8_lossy(&out.stdout);
                outcome.reported = reporter.post(&payload, ReviewFormat::Checkstyle);
            }
            None => {
                let mut cmd = self.linter_command(root, None, extra_args);
                cmd.args(&args);
                let status = exec::status(&mut cmd).map_err(|e| Error::io(ToolKind::Linter, e))?;
                outcome.status = exec::code(status);
            }
        }
        log::info!("{} exited with {}", self.linter.name, outcome.status);
        Ok(outcome)
    }

    fn fix(
        &self,
        root: &Path,
        scripts: &ScriptSet,
        extra_args: &[String],
        patcher: &Patcher,
        strip: u32,
    ) -> Result<Outcome> {
        let args: Vec<OsString> = scripts.relative_args(root);

        let mut fmt = self.formatter.command();
        fmt.current_dir(root).arg("-w").args(&args);
        let status = exec::status(&mut fmt).map_err(|e| Error::io(ToolKind::Formatter, e))?;
        if !status.success() {
            return Err(Error::ToolFailed {
                tool: ToolKind::Formatter,
                status: Error::describe_status(status),
            });
        }

        let mut lint = self.linter_command(root, Some("diff"), extra_args);
        lint.args(&args);
        let out = exec::capture(&mut lint).map_err(|e| Error::io(ToolKind::Linter, e))?;
        let lint_status = exec::code(out.status);
        let diff = String::from_utf8_lossy(&out.stdout).into_owned();
        log::info!("{} exited with {}", self.linter.name, lint_status);

        patcher.apply(root, &diff, strip)?;
        let patched = changed_files(&diff);

        let reported = match &self.reporter {
            Some(reporter) => self.report_working_tree(root, reporter),
            None => false,
        };

        Ok(Outcome {
            mode: Mode::Fix,
            scripts: scripts.len(),
            status: lint_status,
            reported,
            patched,
        })
    }

    fn report_working_tree(&self, root: &Path, reporter: &Reporter) -> bool {
        let Some(git) = self.git.as_ref() else {
            log::warn!("git not found; cannot post the fix diff for review");
            return false;
        };
        match git.working_tree_diff(root) {
            Ok(diff) => reporter.post(&diff, ReviewFormat::Diff),
            Err(e) => {
                log::warn!("{e}; review comments were not posted");
                false
            }
        }
    }
}
