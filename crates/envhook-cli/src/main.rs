//! CLI entrypoint for envhook.
//!
//! The binary delegates to [`envhook_cli::run`], which loads configuration,
//! installs telemetry, and dispatches the requested subcommand.

use std::io::{self, StderrLock, StdinLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdin: StdinLock<'static> = io::stdin().lock();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    envhook_cli::run(std::env::args_os(), stdin, &mut stdout, &mut stderr)
}
