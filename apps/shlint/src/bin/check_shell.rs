//! `check-shell [SHELLCHECK_ARGS...]`: `shlint check` in the current directory.

use shlint::cli::RunArgs;
use shlint::models::Mode;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(shlint::app::run_mode(Mode::Check, &RunArgs::default(), &args));
}
