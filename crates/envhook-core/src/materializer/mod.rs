//! Environment materialization through `direnv export json`.
//!
//! Every failure is folded into a [`ResolutionOutcome`]: an unapproved
//! declaration becomes [`ResolutionOutcome::Blocked`]; a missing tool, a
//! failed run, or an unusable payload becomes [`ResolutionOutcome::NotFound`].
//! Swallowing unexpected failures keeps the feature best-effort; they are
//! still visible at `debug` level.

mod payload;

use std::ffi::OsString;

use tracing::debug;

use crate::command::{CommandRunner, Invocation};
use crate::error::ExportError;
use crate::locator::Declaration;
use crate::outcome::{ResolutionOutcome, Variables};

use self::payload::parse_export;

/// Tracing target for materialization.
const MATERIALIZER_TARGET: &str = "envhook_core::materializer";

/// Diagnostic fragment the export tool emits for unapproved declarations.
pub const BLOCKED_MARKER: &str = "is blocked";

/// Computes the variables a declaration file exports.
pub trait Materializer {
    /// Materializes `declaration`, never failing past this boundary.
    fn materialize(&self, declaration: &Declaration) -> ResolutionOutcome;
}

/// Materializes declarations by running `direnv export json`.
#[derive(Debug, Clone)]
pub struct DirenvMaterializer<R> {
    runner: R,
    program: OsString,
}

impl<R> DirenvMaterializer<R> {
    /// Creates a materializer that runs `program` through `runner`.
    pub fn new(runner: R, program: impl Into<OsString>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }
}

impl<R: CommandRunner> DirenvMaterializer<R> {
    /// Runs the export and parses its payload.
    fn export(&self, declaration: &Declaration) -> Result<Option<Variables>, ExportError> {
        let invocation = Invocation::new(self.program.clone(), declaration.directory())
            .arg("export")
            .arg("json");

        let output = self.runner.run(&invocation)?;
        if !output.is_success() {
            return Err(ExportError::Failed {
                status: output.code(),
                stderr: output.stderr().to_owned(),
            });
        }

        parse_export(output.stdout())
    }
}

impl<R: CommandRunner> Materializer for DirenvMaterializer<R> {
    fn materialize(&self, declaration: &Declaration) -> ResolutionOutcome {
        match self.export(declaration) {
            Ok(Some(variables)) => {
                debug!(
                    target: MATERIALIZER_TARGET,
                    declaration = %declaration.path().display(),
                    count = variables.len(),
                    "export produced variables"
                );
                ResolutionOutcome::Loaded(variables)
            }
            Ok(None) => {
                debug!(target: MATERIALIZER_TARGET, "export produced no output");
                ResolutionOutcome::NotFound
            }
            Err(ExportError::Failed { ref stderr, .. }) if is_blocked(stderr) => {
                debug!(
                    target: MATERIALIZER_TARGET,
                    declaration = %declaration.path().display(),
                    "declaration is blocked"
                );
                ResolutionOutcome::Blocked(declaration.path().to_path_buf())
            }
            Err(err) => {
                debug!(
                    target: MATERIALIZER_TARGET,
                    declaration = %declaration.path().display(),
                    error = %err,
                    "export unavailable"
                );
                ResolutionOutcome::NotFound
            }
        }
    }
}

/// Reports whether diagnostic text carries the blocked signature.
#[must_use]
pub fn is_blocked(diagnostic: &str) -> bool {
    diagnostic.contains(BLOCKED_MARKER)
}
