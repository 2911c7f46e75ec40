//! Upward search for the nearest declaration file.
//!
//! The search starts in the session directory and walks towards the
//! filesystem root, stopping at the repository boundary when one is known.
//! The nearest declaration wins over any declared by an ancestor.
//!
//! The start directory and the boundary are canonicalised before the walk.
//! The repository tool reports the boundary with symlinks resolved, so a
//! session opened through a symlinked path must be compared in that form.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::LocateError;

/// Tracing target for declaration lookup.
const LOCATOR_TARGET: &str = "envhook_core::locator";

/// Filesystem queries needed by the locator.
pub trait Filesystem {
    /// Reports whether `path` names an existing regular file.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when existence cannot be determined.
    /// A missing path is `Ok(false)`, not an error.
    fn is_file(&self, path: &Path) -> io::Result<bool>;

    /// Resolves `path` to its canonical form, following symlinks.
    ///
    /// The default leaves the path untouched.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the path cannot be resolved.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        Ok(path.to_path_buf())
    }
}

/// [`Filesystem`] backed by the host filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFilesystem;

impl Filesystem for HostFilesystem {
    fn is_file(&self, path: &Path) -> io::Result<bool> {
        match fs::metadata(path) {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(err) if matches!(err.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        fs::canonicalize(path)
    }
}

/// A located declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    path: PathBuf,
}

impl Declaration {
    /// Wraps the path of a declaration file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the declaration file itself.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the declaration file.
    #[must_use]
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }
}

/// Walks ancestor directories looking for a declaration file.
#[derive(Debug, Clone)]
pub struct DeclarationLocator<F> {
    filesystem: F,
    file_name: OsString,
}

impl<F> DeclarationLocator<F> {
    /// Creates a locator searching for `file_name`.
    pub fn new(filesystem: F, file_name: impl Into<OsString>) -> Self {
        Self {
            filesystem,
            file_name: file_name.into(),
        }
    }
}

impl<F: Filesystem> DeclarationLocator<F> {
    /// Returns the nearest declaration at or above `start_dir`.
    ///
    /// Both `start_dir` and `boundary` are canonicalised first; a path that
    /// cannot be resolved is used as given.
    ///
    /// The walk stops after checking `boundary` (when present) or the
    /// filesystem root. It also stops as soon as a directory has no distinct
    /// parent, so it terminates even when `boundary` is not an ancestor of
    /// `start_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`LocateError::Probe`] when an existence check fails for a
    /// reason other than the file being absent.
    pub fn locate(
        &self,
        start_dir: &Path,
        boundary: Option<&Path>,
    ) -> Result<Option<Declaration>, LocateError> {
        let start = self.resolve(start_dir);
        let resolved_boundary = boundary.map(|path| self.resolve(path));
        let boundary_dir = resolved_boundary.as_deref();
        let mut current = start.as_path();

        loop {
            let candidate = current.join(&self.file_name);
            trace!(target: LOCATOR_TARGET, candidate = %candidate.display(), "probing");

            let found = self
                .filesystem
                .is_file(&candidate)
                .map_err(|source| LocateError::Probe {
                    path: candidate.clone(),
                    source: Arc::new(source),
                })?;
            if found {
                debug!(target: LOCATOR_TARGET, path = %candidate.display(), "declaration found");
                return Ok(Some(Declaration::new(candidate)));
            }

            if boundary_dir == Some(current) {
                debug!(target: LOCATOR_TARGET, boundary = %current.display(), "reached boundary");
                return Ok(None);
            }

            match current.parent() {
                Some(parent) if parent != current => current = parent,
                _ => {
                    debug!(target: LOCATOR_TARGET, "reached filesystem root");
                    return Ok(None);
                }
            }
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.filesystem.canonicalize(path).unwrap_or_else(|err| {
            debug!(
                target: LOCATOR_TARGET,
                path = %path.display(),
                error = %err,
                "using path as given"
            );
            path.to_path_buf()
        })
    }
}
