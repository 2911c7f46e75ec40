//! Enclosing repository root discovery.
//!
//! The root bounds the upward declaration search so a project never picks up
//! a declaration file from outside its own checkout. Failing to find a root
//! is not an error: the search simply runs to the filesystem root.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::command::{CommandRunner, Invocation};

/// Tracing target for boundary resolution.
const BOUNDARY_TARGET: &str = "envhook_core::boundary";

/// Finds the directory that bounds the declaration search.
pub trait BoundaryResolver {
    /// Returns the enclosing repository root for `start_dir`, if any.
    fn resolve(&self, start_dir: &Path) -> Option<PathBuf>;
}

/// Resolves the boundary with `git rev-parse --show-toplevel`.
#[derive(Debug, Clone)]
pub struct GitBoundary<R> {
    runner: R,
    program: OsString,
}

impl<R> GitBoundary<R> {
    /// Creates a resolver that runs `program` through `runner`.
    pub fn new(runner: R, program: impl Into<OsString>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }
}

impl<R: CommandRunner> BoundaryResolver for GitBoundary<R> {
    fn resolve(&self, start_dir: &Path) -> Option<PathBuf> {
        let invocation = Invocation::new(self.program.clone(), start_dir)
            .arg("rev-parse")
            .arg("--show-toplevel");

        let output = match self.runner.run(&invocation) {
            Ok(output) => output,
            Err(err) => {
                debug!(target: BOUNDARY_TARGET, error = %err, "repository query unavailable");
                return None;
            }
        };

        if !output.is_success() {
            debug!(
                target: BOUNDARY_TARGET,
                code = ?output.code(),
                start_dir = %start_dir.display(),
                "no enclosing repository"
            );
            return None;
        }

        let root = parse_toplevel(output.stdout());
        debug!(target: BOUNDARY_TARGET, root = ?root, "resolved search boundary");
        root
    }
}

/// Normalises `rev-parse --show-toplevel` output into an absolute path
/// without a trailing separator.
pub(crate) fn parse_toplevel(stdout: &str) -> Option<PathBuf> {
    let line = stdout.lines().next()?.trim();
    if line.is_empty() {
        return None;
    }

    let trimmed = line.trim_end_matches(std::path::MAIN_SEPARATOR);
    let path = if trimmed.is_empty() {
        PathBuf::from(line)
    } else {
        PathBuf::from(trimmed)
    };

    path.is_absolute().then_some(path)
}
