//! Command-line host for envhook.
//!
//! The binary plays the role of the host application: it delivers
//! session-start triggers to the core, applies the result to its own process
//! environment, and surfaces notifications. Three subcommands are offered:
//!
//! - `resolve` resolves one directory and prints the report as JSON.
//! - `exec` resolves one directory and then runs a command that inherits the
//!   merged environment.
//! - `listen` reads JSONL host events from stdin and writes one JSONL
//!   notification per event that produces one.
//!
//! Configuration flags (see `--log-filter`, `--direnv-program`, ...) must
//! precede the subcommand.

use std::env;
use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use envhook_config::Config;
use envhook_core::{
    HostEvent, ProcessEnvironment, SessionReport, SessionStarted, SystemOrchestrator,
};
use thiserror::Error;
use tracing::{debug, warn};

mod config;
pub mod telemetry;

use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
use telemetry::TelemetryError;

/// Tracing target for the CLI runtime.
const CLI_TARGET: &str = "envhook_cli";

/// Errors surfaced by the CLI runtime.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    /// Telemetry could not be installed.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    /// The working directory could not be determined.
    #[error("failed to determine the current directory: {0}")]
    CurrentDirectory(#[source] io::Error),
    /// Writing to stdout or stderr failed.
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
    /// Reading host events from stdin failed.
    #[error("failed to read host events: {0}")]
    ReadInput(#[source] io::Error),
    /// A report could not be serialised.
    #[error("failed to serialise output: {0}")]
    Serialise(#[source] serde_json::Error),
    /// The command passed to `exec` could not be started.
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// Program that was launched.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Parser)]
#[command(
    name = "envhook",
    version,
    about = "Load direnv environments at session start"
)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Resolve a directory once and print the report as JSON.
    Resolve {
        /// Session directory; defaults to the current directory.
        #[arg(long, short = 'C')]
        directory: Option<PathBuf>,
    },
    /// Resolve a directory, then run a command with the merged environment.
    Exec {
        /// Session directory; defaults to the current directory.
        #[arg(long, short = 'C')]
        directory: Option<PathBuf>,
        /// Command and arguments to run.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<OsString>,
    },
    /// Read JSONL host events from stdin and emit JSONL notifications.
    Listen,
}

/// Runs the CLI with the given arguments and IO streams.
pub fn run<I, R, W, E>(args: I, stdin: R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdin, stdout, stderr, &OrthoConfigLoader)
}

fn run_with_loader<I, R, W, E, L>(
    args: I,
    stdin: R,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    R: BufRead,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let collected: Vec<OsString> = args.into_iter().collect();
    let split = split_config_arguments(&collected);

    let cli = match Cli::try_parse_from(&split.command_arguments) {
        Ok(cli) => cli,
        Err(err) => {
            let rendered = err.render().to_string();
            let written = if err.use_stderr() {
                stderr.write_all(rendered.as_bytes())
            } else {
                stdout.write_all(rendered.as_bytes())
            };
            if written.is_err() {
                return ExitCode::FAILURE;
            }
            return u8::try_from(err.exit_code()).map_or(ExitCode::FAILURE, ExitCode::from);
        }
    };

    let outcome = loader
        .load(&split.config_arguments)
        .and_then(|config| {
            telemetry::initialise(&config)?;
            Ok(config)
        })
        .and_then(|config| dispatch(&config, cli.command, stdin, stdout, stderr));

    match outcome {
        Ok(code) => code,
        Err(err) => {
            // Nothing more can be reported if stderr itself is gone.
            drop(writeln!(stderr, "envhook: {err}"));
            ExitCode::FAILURE
        }
    }
}

fn dispatch<R, W, E>(
    config: &Config,
    command: CliCommand,
    stdin: R,
    stdout: &mut W,
    stderr: &mut E,
) -> Result<ExitCode, AppError>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let orchestrator = SystemOrchestrator::system(config);
    match command {
        CliCommand::Resolve { directory } => {
            let session_dir = session_directory(directory)?;
            let report = start_session(&orchestrator, &session_dir);
            write_json_line(stdout, &report)?;
            Ok(ExitCode::SUCCESS)
        }
        CliCommand::Exec { directory, command } => {
            let session_dir = session_directory(directory)?;
            let report = start_session(&orchestrator, &session_dir);
            if let Some(notification) = report.notification() {
                writeln!(
                    stderr,
                    "{}: {}",
                    notification.severity(),
                    notification.message()
                )
                .map_err(AppError::Output)?;
            }
            run_child(&command, &session_dir)
        }
        CliCommand::Listen => {
            listen(&orchestrator, stdin, stdout)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn session_directory(directory: Option<PathBuf>) -> Result<PathBuf, AppError> {
    let current = env::current_dir().map_err(AppError::CurrentDirectory)?;
    Ok(match directory {
        Some(path) if path.is_absolute() => path,
        Some(path) => current.join(path),
        None => current,
    })
}

fn start_session(orchestrator: &SystemOrchestrator, directory: &Path) -> SessionReport {
    let trigger = SessionStarted::new(directory);
    orchestrator.on_session_started(&trigger, &mut ProcessEnvironment)
}

fn run_child(command: &[OsString], directory: &Path) -> Result<ExitCode, AppError> {
    let Some((program, args)) = command.split_first() else {
        return Ok(ExitCode::SUCCESS);
    };

    debug!(
        target: CLI_TARGET,
        program = %program.to_string_lossy(),
        "running command with merged environment"
    );
    let status = Command::new(program)
        .args(args)
        .current_dir(directory)
        .status()
        .map_err(|source| AppError::Spawn {
            program: program.to_string_lossy().into_owned(),
            source,
        })?;

    Ok(status
        .code()
        .and_then(|code| u8::try_from(code).ok())
        .map_or(ExitCode::FAILURE, ExitCode::from))
}

fn listen<R, W>(orchestrator: &SystemOrchestrator, stdin: R, stdout: &mut W) -> Result<(), AppError>
where
    R: BufRead,
    W: Write,
{
    for line in stdin.lines() {
        let line = line.map_err(AppError::ReadInput)?;
        if line.trim().is_empty() {
            continue;
        }

        let event: HostEvent = match serde_json::from_str(&line) {
            Ok(event) => event,
            Err(err) => {
                warn!(target: CLI_TARGET, error = %err, "ignoring malformed host event");
                continue;
            }
        };

        let notification = orchestrator
            .handle_event(&anchor_event(event)?, &mut ProcessEnvironment)
            .and_then(SessionReport::into_notification);
        if let Some(notification) = notification {
            write_json_line(stdout, &notification)?;
        }
    }
    Ok(())
}

/// Resolves a relative session directory against the working directory,
/// matching how `--directory` is treated.
fn anchor_event(event: HostEvent) -> Result<HostEvent, AppError> {
    match event {
        HostEvent::SessionCreated(trigger) if trigger.directory().is_relative() => {
            let anchored = session_directory(Some(trigger.directory().to_path_buf()))?;
            Ok(HostEvent::SessionCreated(SessionStarted::new(anchored)))
        }
        other => Ok(other),
    }
}

fn write_json_line<W, T>(stdout: &mut W, value: &T) -> Result<(), AppError>
where
    W: Write,
    T: serde::Serialize + ?Sized,
{
    serde_json::to_writer(&mut *stdout, value).map_err(AppError::Serialise)?;
    stdout.write_all(b"\n").map_err(AppError::Output)?;
    stdout.flush().map_err(AppError::Output)
}
