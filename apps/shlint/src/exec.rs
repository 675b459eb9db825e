//! Blocking child-process helpers.

use std::io::{self, Write};
use std::process::{Command, ExitStatus, Output, Stdio};

/// Run to completion with inherited stdio.
pub fn status(cmd: &mut Command) -> io::Result<ExitStatus> {
    log::debug!("running {cmd:?}");
    cmd.status()
}

/// Run to completion capturing stdout; stderr stays on the terminal.
pub fn capture(cmd: &mut Command) -> io::Result<Output> {
    log::debug!("running {cmd:?}");
    cmd.stdout(Stdio::piped()).stderr(Stdio::inherit()).output()
}

/// Run with `input` on stdin.
///
/// stdin is fed from a scoped thread so a child that writes before draining
/// its input cannot fill both pipes.
pub fn with_input(cmd: &mut Command, input: &[u8], capture_stdout: bool) -> io::Result<Output> {
    log::debug!("running {cmd:?} with {} byte(s) on stdin", input.len());
    cmd.stdin(Stdio::piped());
    if capture_stdout {
        cmd.stdout(Stdio::piped());
    }
    let mut child = cmd.spawn()?;
    let stdin = child.stdin.take();
    std::thread::scope(|scope| {
        let writer = scope.spawn(move || -> io::Result<()> {
            if let Some(mut stdin) = stdin {
                match stdin.write_all(input) {
                    // Child exited without reading everything; its status says why
                    Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {}
                    other => other?,
                }
            }
            Ok(())
        });
        let output = child.wait_with_output();
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("stdin writer panicked")));
        let output = output?;
        written?;
        Ok(output)
    })
}

/// Exit code of a finished process; a signal-terminated process counts as 1.
pub fn code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
