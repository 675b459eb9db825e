//! `fix-shell [SHELLCHECK_ARGS...]`: `shlint fix` in the current directory.

use shlint::cli::RunArgs;
use shlint::models::Mode;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    std::process::exit(shlint::app::run_mode(Mode::Fix, &RunArgs::default(), &args));
}
