//! Out-of-process command execution.
//!
//! Both the repository-root query and the environment export are external
//! programs. [`CommandRunner`] abstracts running one of them so tests can
//! substitute canned output without spawning real processes. The production
//! implementation is [`SystemCommandRunner`].

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::Arc;

use tracing::debug;

use crate::error::CommandError;

/// Tracing target for command execution.
const COMMAND_TARGET: &str = "envhook_core::command";

/// A single program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: OsString,
    args: Vec<OsString>,
    working_dir: PathBuf,
}

impl Invocation {
    /// Creates an invocation of `program` running in `working_dir`.
    pub fn new(program: impl Into<OsString>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.into(),
        }
    }

    /// Appends an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Program to run.
    #[must_use]
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// Arguments passed to the program.
    #[must_use]
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Directory the program runs in.
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}

/// Captured result of a program that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    success: bool,
    code: Option<i32>,
    stdout: String,
    stderr: String,
}

impl CommandOutput {
    /// Output of a program that exited successfully.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Output of a program that exited with a failure status.
    pub fn failure(code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Replaces the captured standard error.
    #[must_use]
    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    /// Whether the program exited successfully.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Exit code, absent when the process was terminated by a signal.
    #[must_use]
    pub const fn code(&self) -> Option<i32> {
        self.code
    }

    /// Standard output, decoded lossily.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Standard error, decoded lossily.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Runs external programs on behalf of the resolution pipeline.
///
/// # Example
///
/// ```
/// use envhook_core::command::{CommandOutput, CommandRunner, Invocation};
/// use envhook_core::error::CommandError;
///
/// struct Canned;
///
/// impl CommandRunner for Canned {
///     fn run(&self, _invocation: &Invocation) -> Result<CommandOutput, CommandError> {
///         Ok(CommandOutput::success("{}"))
///     }
/// }
/// ```
pub trait CommandRunner {
    /// Runs the invocation to completion and captures its output.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NotInstalled`] when the program cannot be
    /// found and [`CommandError::Launch`] for any other spawn failure. A
    /// program that starts and exits unsuccessfully is not an error; inspect
    /// [`CommandOutput::is_success`].
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, CommandError>;
}

/// Runs programs with [`std::process::Command`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandOutput, CommandError> {
        debug!(
            target: COMMAND_TARGET,
            program = %invocation.program().to_string_lossy(),
            working_dir = %invocation.working_dir().display(),
            "running external program"
        );

        let output = Command::new(invocation.program())
            .args(invocation.args())
            .current_dir(invocation.working_dir())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|err| launch_error(invocation.program(), err))?;

        let captured = CommandOutput::from(output);
        debug!(
            target: COMMAND_TARGET,
            program = %invocation.program().to_string_lossy(),
            code = ?captured.code(),
            stdout_bytes = captured.stdout().len(),
            "external program exited"
        );
        Ok(captured)
    }
}

fn launch_error(program: &OsStr, err: io::Error) -> CommandError {
    let name = program.to_string_lossy().into_owned();
    if err.kind() == io::ErrorKind::NotFound {
        CommandError::NotInstalled { program: name }
    } else {
        CommandError::Launch {
            program: name,
            source: Arc::new(err),
        }
    }
}

#[cfg(test)]
mod tests;
