//! shlint CLI binary entry point.
//! Delegates to the library's command drivers and exits with their status.

use clap::Parser;
use shlint::cli::Cli;

fn main() {
    let cli = Cli::parse();
    std::process::exit(shlint::app::run(cli));
}
