//! Per-directory environment loading for interactive sessions.
//!
//! When a host application starts a session in some working directory,
//! `envhook` finds the nearest `.envrc` between that directory and the
//! enclosing git repository root, asks `direnv` to export it, and merges the
//! resulting variables into the process environment so that subprocesses
//! spawned afterwards inherit them. Each directory is resolved at most once
//! per process.
//!
//! # Architecture
//!
//! - [`GitBoundary`] bounds the search at the repository root.
//! - [`DeclarationLocator`] walks upwards for the nearest declaration file.
//! - [`DirenvMaterializer`] runs `direnv export json` and classifies the
//!   result as a [`ResolutionOutcome`].
//! - [`SessionGate`] remembers which directories were already handled.
//! - [`SessionOrchestrator`] composes them and merges the variables into an
//!   injected [`EnvironmentStore`], returning a [`SessionReport`] carrying
//!   the [`Notification`] for the host to display.
//!
//! External programs run through the [`CommandRunner`] seam so every stage
//! can be exercised without `git` or `direnv` installed.
//!
//! # Example
//!
//! ```rust,no_run
//! use envhook_core::{MemoryEnvironment, SessionOrchestrator, SessionStarted};
//! use envhook_config::Config;
//!
//! let orchestrator = SessionOrchestrator::system(&Config::default());
//! let mut env = MemoryEnvironment::new();
//! let report = orchestrator.on_session_started(&SessionStarted::new("/proj"), &mut env);
//! if let Some(notification) = report.notification() {
//!     eprintln!("{}: {}", notification.severity(), notification.message());
//! }
//! ```

pub mod boundary;
pub mod command;
pub mod environment;
pub mod error;
pub mod event;
pub mod gate;
pub mod locator;
pub mod materializer;
pub mod notification;
pub mod orchestrator;
pub mod outcome;

#[cfg(test)]
mod tests;

pub use self::boundary::{BoundaryResolver, GitBoundary};
pub use self::command::{CommandOutput, CommandRunner, Invocation, SystemCommandRunner};
pub use self::environment::{
    EnvironmentStore, MemoryEnvironment, ProcessEnvironment, apply_variables,
};
pub use self::error::{CommandError, ExportError, LocateError};
pub use self::event::{HostEvent, SessionStarted};
pub use self::gate::{SessionGate, SessionKey};
pub use self::locator::{Declaration, DeclarationLocator, Filesystem, HostFilesystem};
pub use self::materializer::{DirenvMaterializer, Materializer};
pub use self::notification::{Notification, Severity};
pub use self::orchestrator::{Disposition, SessionOrchestrator, SessionReport, SystemOrchestrator};
pub use self::outcome::{ResolutionOutcome, Variables};
