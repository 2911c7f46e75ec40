//! Once-per-directory memoization of resolution attempts.
//!
//! A key is marked before resolution runs, so a directory without a
//! declaration, or one whose export failed, is never retried in the same
//! process. Nothing expires and nothing persists across restarts.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Memoization unit derived from a session's start directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionKey(PathBuf);

impl SessionKey {
    /// Derives the key for sessions starting in `directory`.
    #[must_use]
    pub fn from_directory(directory: &Path) -> Self {
        Self(directory.components().collect())
    }

    /// Directory the key was derived from.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.0
    }
}

/// Process-lifetime set of directories that have already been resolved.
#[derive(Debug, Default)]
pub struct SessionGate {
    seen: Mutex<HashSet<SessionKey>>,
}

impl SessionGate {
    /// Creates an empty gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `key` has not been processed yet.
    #[must_use]
    pub fn should_process(&self, key: &SessionKey) -> bool {
        !self.seen().contains(key)
    }

    /// Records `key` as processed.
    pub fn mark_processed(&self, key: SessionKey) {
        self.seen().insert(key);
    }

    /// Checks and marks `key` under one lock acquisition.
    ///
    /// Returns `true` for exactly one caller per key, even when triggers for
    /// the same directory race on different threads.
    #[must_use]
    pub fn claim(&self, key: SessionKey) -> bool {
        self.seen().insert(key)
    }

    /// Number of keys processed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.seen().len()
    }

    /// Whether no key has been processed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen().is_empty()
    }

    fn seen(&self) -> MutexGuard<'_, HashSet<SessionKey>> {
        // The set stays consistent across a panic in another holder.
        self.seen.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
