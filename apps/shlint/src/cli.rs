//! CLI argument parsing via `clap`.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "shlint",
    version,
    about = "Check or fix every shell script in a repository",
    long_about = "shlint — find shell scripts with shfmt, skip ignored paths, and run shellcheck over them.\n\n`check` reports findings; `fix` formats with shfmt and applies shellcheck's autofix diff.\nIn GitHub pull-request workflows findings are also posted through reviewdog when it is on PATH.\n\nConfiguration precedence: CLI > shlint.toml > defaults.",
    after_help = "Examples:\n  shlint check\n  shlint check -- --severity=warning\n  shlint fix --repo-root scripts\n  shlint ls --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Args, Debug, Clone, Default)]
/// Options shared by every command that discovers scripts.
pub struct RunArgs {
    #[arg(long, help = "Repository root (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Use .gitignore files even inside a git work tree")]
    pub no_vcs: bool,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v info, -vv debug)")]
    pub verbose: u8,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current shlint version.")]
    Version,
    /// Lint discovered scripts
    #[command(
        about = "Run shellcheck",
        long_about = "Run shellcheck over every discovered script. The exit status is shellcheck's.",
        after_help = "Examples:\n  shlint check\n  shlint check -- --exclude=SC2086"
    )]
    Check {
        #[command(flatten)]
        run: RunArgs,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, help = "Arguments passed through to shellcheck")]
        args: Vec<String>,
    },
    /// Format and autofix discovered scripts
    #[command(
        about = "Apply shfmt and shellcheck fixes",
        long_about = "Rewrite scripts with shfmt, then apply shellcheck's --format=diff output with patch. The exit status is shellcheck's.",
        after_help = "Examples:\n  shlint fix\n  shlint fix -- --severity=style"
    )]
    Fix {
        #[command(flatten)]
        run: RunArgs,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, help = "Arguments passed through to shellcheck")]
        args: Vec<String>,
    },
    /// List discovered scripts
    #[command(
        about = "List scripts",
        long_about = "Print the scripts check/fix would process, relative to the repository root."
    )]
    Ls {
        #[command(flatten)]
        run: RunArgs,
    },
}
