//! Errors raised inside the resolution pipeline.
//!
//! None of these escape the orchestrator: each failure is logged and folded
//! into a [`ResolutionOutcome`](crate::ResolutionOutcome) or a silent stop.
//! I/O errors are wrapped in `Arc` to satisfy the `result_large_err` Clippy
//! lint and keep the enums `Send + Sync`.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Failures launching an external program.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program could not be found on `PATH`.
    #[error("program '{program}' is not installed")]
    NotInstalled {
        /// Program that was looked up.
        program: String,
    },

    /// The program exists but could not be started.
    #[error("failed to launch '{program}': {source}")]
    Launch {
        /// Program that was launched.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
}

/// Failures probing the filesystem for a declaration file.
#[derive(Debug, Error)]
pub enum LocateError {
    /// The existence check itself failed.
    #[error("failed to probe {path}: {source}")]
    Probe {
        /// Candidate declaration path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },
}

/// Failures exporting a directory environment.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The export program could not be launched.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// The export program ran and reported a failure.
    #[error("export exited with status {status:?}: {stderr}")]
    Failed {
        /// Exit code, when the process was not killed by a signal.
        status: Option<i32>,
        /// Diagnostic text written to stderr.
        stderr: String,
    },

    /// The export payload did not have the expected shape.
    #[error("malformed export payload: {message}")]
    Malformed {
        /// Description of the shape violation.
        message: String,
        /// Underlying JSON error, when parsing failed outright.
        #[source]
        source: Option<serde_json::Error>,
    },
}
