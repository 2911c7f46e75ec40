//! Session-start handling.
//!
//! [`SessionOrchestrator`] composes the gate, boundary resolver, locator and
//! materializer. Each call returns a [`SessionReport`] describing what
//! happened and which notification, if any, the host should show. The only
//! side effect it performs itself is merging variables into the injected
//! [`EnvironmentStore`].

use std::path::PathBuf;

use envhook_config::Config;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::boundary::{BoundaryResolver, GitBoundary};
use crate::command::SystemCommandRunner;
use crate::environment::{EnvironmentStore, apply_variables};
use crate::event::{HostEvent, SessionStarted};
use crate::gate::{SessionGate, SessionKey};
use crate::locator::{DeclarationLocator, Filesystem, HostFilesystem};
use crate::materializer::{DirenvMaterializer, Materializer};
use crate::notification::Notification;
use crate::outcome::ResolutionOutcome;

/// Tracing target for session orchestration.
const ORCHESTRATOR_TARGET: &str = "envhook_core::orchestrator";

/// What a session-start trigger resulted in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Disposition {
    /// The directory was resolved earlier in this process.
    AlreadyProcessed,
    /// No declaration file between the directory and its boundary.
    NoDeclaration,
    /// Variables were merged into the environment.
    Loaded {
        /// Declaration file that was exported.
        declaration: PathBuf,
        /// Names of the variables applied.
        variables: Vec<String>,
    },
    /// The declaration needs approval before it can be exported.
    Blocked {
        /// Declaration file awaiting approval.
        declaration: PathBuf,
    },
    /// A declaration exists but the export produced nothing usable.
    Unavailable {
        /// Declaration file that was found.
        declaration: PathBuf,
    },
}

/// Result of handling one session-start trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    #[serde(flatten)]
    disposition: Disposition,
    #[serde(skip_serializing_if = "Option::is_none")]
    notification: Option<Notification>,
}

impl SessionReport {
    const fn silent(disposition: Disposition) -> Self {
        Self {
            disposition,
            notification: None,
        }
    }

    const fn notify(disposition: Disposition, notification: Notification) -> Self {
        Self {
            disposition,
            notification: Some(notification),
        }
    }

    /// What happened.
    #[must_use]
    pub const fn disposition(&self) -> &Disposition {
        &self.disposition
    }

    /// Notification the host should display, if any.
    #[must_use]
    pub const fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    /// Consumes the report, returning its notification.
    #[must_use]
    pub fn into_notification(self) -> Option<Notification> {
        self.notification
    }
}

/// Orchestrator wired to git, the host filesystem and direnv.
pub type SystemOrchestrator = SessionOrchestrator<
    GitBoundary<SystemCommandRunner>,
    HostFilesystem,
    DirenvMaterializer<SystemCommandRunner>,
>;

/// Resolves each session directory at most once and applies the result.
#[derive(Debug)]
pub struct SessionOrchestrator<B, F, M> {
    gate: SessionGate,
    boundary: B,
    locator: DeclarationLocator<F>,
    materializer: M,
}

impl SystemOrchestrator {
    /// Builds the production wiring from configuration.
    #[must_use]
    pub fn system(config: &Config) -> Self {
        Self::new(
            GitBoundary::new(SystemCommandRunner, config.git_program()),
            DeclarationLocator::new(HostFilesystem, config.declaration_file()),
            DirenvMaterializer::new(SystemCommandRunner, config.direnv_program()),
        )
    }
}

impl<B, F, M> SessionOrchestrator<B, F, M> {
    /// Creates an orchestrator with an empty session gate.
    pub fn new(boundary: B, locator: DeclarationLocator<F>, materializer: M) -> Self {
        Self {
            gate: SessionGate::new(),
            boundary,
            locator,
            materializer,
        }
    }

    /// Gate recording the directories already handled.
    #[must_use]
    pub const fn gate(&self) -> &SessionGate {
        &self.gate
    }
}

impl<B, F, M> SessionOrchestrator<B, F, M>
where
    B: BoundaryResolver,
    F: Filesystem,
    M: Materializer,
{
    /// Dispatches a host event, returning a report for session starts.
    pub fn handle_event<S>(&self, event: &HostEvent, store: &mut S) -> Option<SessionReport>
    where
        S: EnvironmentStore + ?Sized,
    {
        match event {
            HostEvent::SessionCreated(trigger) => Some(self.on_session_started(trigger, store)),
            HostEvent::Other => None,
        }
    }

    /// Handles a session start in `trigger.directory()`.
    ///
    /// The directory is marked as processed before anything else runs, so a
    /// second trigger for it is a no-op whatever this one finds.
    pub fn on_session_started<S>(&self, trigger: &SessionStarted, store: &mut S) -> SessionReport
    where
        S: EnvironmentStore + ?Sized,
    {
        let directory = trigger.directory();
        if !self.gate.claim(SessionKey::from_directory(directory)) {
            debug!(
                target: ORCHESTRATOR_TARGET,
                directory = %directory.display(),
                "directory already processed"
            );
            return SessionReport::silent(Disposition::AlreadyProcessed);
        }

        let boundary = self.boundary.resolve(directory);
        let declaration = match self.locator.locate(directory, boundary.as_deref()) {
            Ok(Some(declaration)) => declaration,
            Ok(None) => {
                debug!(
                    target: ORCHESTRATOR_TARGET,
                    directory = %directory.display(),
                    "no declaration file"
                );
                return SessionReport::silent(Disposition::NoDeclaration);
            }
            Err(err) => {
                warn!(target: ORCHESTRATOR_TARGET, error = %err, "declaration lookup failed");
                return SessionReport::silent(Disposition::NoDeclaration);
            }
        };

        match self.materializer.materialize(&declaration) {
            ResolutionOutcome::Loaded(variables) => {
                let applied = apply_variables(store, &variables);
                info!(
                    target: ORCHESTRATOR_TARGET,
                    declaration = %declaration.path().display(),
                    count = applied.len(),
                    "environment loaded"
                );
                SessionReport::notify(
                    Disposition::Loaded {
                        declaration: declaration.path().to_path_buf(),
                        variables: applied,
                    },
                    Notification::loaded(),
                )
            }
            ResolutionOutcome::Blocked(path) => {
                warn!(
                    target: ORCHESTRATOR_TARGET,
                    declaration = %path.display(),
                    "declaration is blocked"
                );
                let notification = Notification::blocked(&path);
                SessionReport::notify(Disposition::Blocked { declaration: path }, notification)
            }
            ResolutionOutcome::NotFound => SessionReport::silent(Disposition::Unavailable {
                declaration: declaration.path().to_path_buf(),
            }),
        }
    }
}
