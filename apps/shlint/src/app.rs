//! Command drivers shared by the `shlint`, `check-shell`, and `fix-shell` binaries.

use crate::ci::CiContext;
use crate::cli::{Cli, Commands, RunArgs};
use crate::config;
use crate::error::Result;
use crate::logging;
use crate::models::{Mode, Outcome};
use crate::output;
use crate::pipeline::{self, Pipeline};
use crate::tools::ToolLocator;
use crate::utils::error_prefix;

/// Exit status for configuration errors and aborted runs.
pub const EXIT_FAILURE: i32 = 2;

/// Dispatch a parsed command line; returns the process exit status.
pub fn run(cli: Cli) -> i32 {
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            0
        }
        Commands::Check { run, args } => run_mode(Mode::Check, &run, &args),
        Commands::Fix { run, args } => run_mode(Mode::Fix, &run, &args),
        Commands::Ls { run } => list(&run),
    }
}

/// Run a check or fix pipeline; `linter_args` are appended to shellcheck's argv.
pub fn run_mode(mode: Mode, run: &RunArgs, linter_args: &[String]) -> i32 {
    logging::init(run.verbose);
    exit_status(execute(mode, run, linter_args).map(|outcome| outcome.status))
}

/// Map a command result to the process exit status, printing any error.
fn exit_status(result: Result<i32>) -> i32 {
    match result {
        Ok(status) => status,
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            EXIT_FAILURE
        }
    }
}

fn execute(mode: Mode, run: &RunArgs, linter_args: &[String]) -> Result<Outcome> {
    let eff = config::resolve_effective(
        run.repo_root.as_deref(),
        run.output.as_deref(),
        run.no_vcs,
    )?;
    if !eff.config_found {
        log::info!("no shlint config in {}; using defaults", eff.repo_root.display());
    }
    let ci = CiContext::from_env();
    let mut locator = ToolLocator::new();
    let mut pipeline = Pipeline::prepare(mode, &eff, &mut locator, &ci)?;
    if pipeline.reporting_enabled() {
        log::info!("pull request detected; findings will be posted for review");
    }
    let outcome = pipeline.run(linter_args)?;
    output::print_outcome(&outcome, &eff.output);
    Ok(outcome)
}

fn list(run: &RunArgs) -> i32 {
    logging::init(run.verbose);
    exit_status(list_scripts(run).map(|()| 0))
}

fn list_scripts(run: &RunArgs) -> Result<()> {
    let eff = config::resolve_effective(
        run.repo_root.as_deref(),
        run.output.as_deref(),
        run.no_vcs,
    )?;
    let mut locator = ToolLocator::new();
    let mut discovery = pipeline::discovery(&eff, &mut locator)?;
    let scripts = discovery.discover(&eff.scan_root)?;
    output::print_scripts(&scripts, &eff.scan_root, &eff.output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::tools::ToolKind;

    #[test]
    fn test_linter_status_becomes_exit_status() {
        let mut outcome = Outcome::nothing_found(Mode::Check);
        assert_eq!(exit_status(Ok(outcome.status)), 0);
        outcome.status = 1;
        assert_eq!(exit_status(Ok(outcome.status)), 1);
    }

    #[test]
    fn test_aborted_run_exits_with_failure() {
        let err = Error::ToolNotFound {
            tool: ToolKind::Formatter,
            name: "shfmt".into(),
        };
        assert_eq!(exit_status(Err(err)), EXIT_FAILURE);
        assert_eq!(EXIT_FAILURE, 2);
    }
}
