//! shlint core library.
//!
//! This crate finds the shell scripts in a repository and drives external
//! tools over them: `shfmt` to list and format, `shellcheck` to lint and
//! autofix, `patch` to apply fixes, and `reviewdog` to post findings on pull
//! requests.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binaries use this).
//! - `app`: Command drivers shared by the binaries.
//! - `config`: Discovery and effective configuration resolution.
//! - `tools`: Memoized executable lookup.
//! - `ignores`: `.gitignore` exclusion outside git work trees.
//! - `vcs`: git queries (work tree detection, check-ignore, diff).
//! - `discovery`: Script discovery via `shfmt -f`.
//! - `pipeline`: Check and fix pipelines.
//! - `patch`: Applying shellcheck's autofix diff.
//! - `reporter`: reviewdog review comments.
//! - `ci`: Pull-request context detection.
//! - `models`: Script sets and run outcomes.
//! - `output`: Human/JSON printers.
//! - `utils`: Supporting helpers.
pub mod app;
pub mod ci;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod exec;
pub mod ignores;
pub mod logging;
pub mod models;
pub mod output;
pub mod patch;
pub mod pipeline;
pub mod reporter;
pub mod tools;
pub mod utils;
pub mod vcs;

#[cfg(all(test, unix))]
mod testutil;

pub use error::{Error, Result};
