//! Crate-level test doubles and behavioural tests.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use mockall::mock;

use crate::boundary::BoundaryResolver;
use crate::command::{CommandOutput, CommandRunner, Invocation};
use crate::error::CommandError;
use crate::locator::{Declaration, Filesystem};
use crate::materializer::Materializer;
use crate::outcome::ResolutionOutcome;


static ENV_MUTEX: OnceLock<Mutex<()>> = OnceLock::new();

/// Serialises tests that touch the real process environment.
pub(crate) fn lock_env() -> MutexGuard<'static, ()> {
    ENV_MUTEX
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

mock! {
    pub Runner {}
    impl CommandRunner for Runner {
        fn run(&self, invocation: &Invocation) -> Result<CommandOutput, CommandError>;
    }
}

/// Boundary resolver returning a fixed answer.
pub(crate) struct StubBoundary(pub(crate) Option<PathBuf>);

impl StubBoundary {
    pub(crate) fn at(path: &str) -> Self {
        Self(Some(PathBuf::from(path)))
    }

    pub(crate) const fn none() -> Self {
        Self(None)
    }
}

impl BoundaryResolver for StubBoundary {
    fn resolve(&self, _start_dir: &Path) -> Option<PathBuf> {
        self.0.clone()
    }
}

/// Filesystem containing a fixed set of files.
#[derive(Default)]
pub(crate) struct StaticFilesystem {
    files: HashSet<PathBuf>,
    failing: bool,
}

impl StaticFilesystem {
    pub(crate) fn with_files(files: &[&str]) -> Self {
        Self {
            files: files.iter().map(PathBuf::from).collect(),
            failing: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            files: HashSet::new(),
            failing: true,
        }
    }
}

impl Filesystem for StaticFilesystem {
    fn is_file(&self, path: &Path) -> io::Result<bool> {
        if self.failing {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        Ok(self.files.contains(path))
    }
}

/// Materializer returning a scripted outcome and recording its calls.
pub(crate) struct ScriptedMaterializer {
    outcome: ResolutionOutcome,
    calls: Cell<usize>,
    seen: RefCell<Vec<PathBuf>>,
}

impl ScriptedMaterializer {
    pub(crate) fn new(outcome: ResolutionOutcome) -> Self {
        Self {
            outcome,
            calls: Cell::new(0),
            seen: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }

    pub(crate) fn seen(&self) -> Vec<PathBuf> {
        self.seen.borrow().clone()
    }
}

impl Materializer for &ScriptedMaterializer {
    fn materialize(&self, declaration: &Declaration) -> ResolutionOutcome {
        self.calls.set(self.calls.get() + 1);
        self.seen.borrow_mut().push(declaration.path().to_path_buf());
        self.outcome.clone()
    }
}
