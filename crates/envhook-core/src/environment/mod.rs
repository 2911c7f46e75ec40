//! Targets for merging exported variables.
//!
//! The orchestrator never touches the process environment directly; it
//! merges into an injected [`EnvironmentStore`]. Hosts pass
//! [`ProcessEnvironment`] so spawned subprocesses inherit the result, and
//! tests pass [`MemoryEnvironment`].

use std::collections::BTreeMap;
use std::env;

use tracing::warn;

use crate::outcome::Variables;

/// Tracing target for environment merges.
const ENVIRONMENT_TARGET: &str = "envhook_core::environment";

/// A mutable key/value environment.
pub trait EnvironmentStore {
    /// Current value of `key`, if set and valid Unicode.
    fn var(&self, key: &str) -> Option<String>;

    /// Sets `key` to `value`, replacing any existing value.
    ///
    /// Callers must only pass entries accepted by [`is_representable`].
    fn set_var(&mut self, key: &str, value: &str);
}

/// The real environment of the running process.
///
/// Mutation is process-wide and visible to every subprocess spawned
/// afterwards. Hosts must not read or write the environment from other
/// threads while a merge runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl EnvironmentStore for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    fn set_var(&mut self, key: &str, value: &str) {
        // Environment mutation is unsafe under edition 2024; callers hold
        // the single logical thread that owns session start handling.
        unsafe { env::set_var(key, value) };
    }
}

/// In-memory environment for tests and dry runs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryEnvironment {
    vars: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryEnvironment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All variables currently set.
    #[must_use]
    pub const fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Number of `set_var` calls observed.
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryEnvironment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
            writes: 0,
        }
    }
}

impl EnvironmentStore for MemoryEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn set_var(&mut self, key: &str, value: &str) {
        self.writes += 1;
        self.vars.insert(key.to_owned(), value.to_owned());
    }
}

/// Whether the platform can hold `key=value` in a process environment.
#[must_use]
pub fn is_representable(key: &str, value: &str) -> bool {
    !key.is_empty() && !key.contains(['=', '\0']) && !value.contains('\0')
}

/// Merges `variables` into `store`, overwriting existing values.
///
/// Entries the platform cannot represent are skipped with a warning. Returns
/// the names that were applied.
pub fn apply_variables<S>(store: &mut S, variables: &Variables) -> Vec<String>
where
    S: EnvironmentStore + ?Sized,
{
    let mut applied = Vec::with_capacity(variables.len());
    for (key, value) in variables {
        if !is_representable(key, value) {
            warn!(
                target: ENVIRONMENT_TARGET,
                variable = %key.escape_debug(),
                "skipping variable the process environment cannot hold"
            );
            continue;
        }
        store.set_var(key, value);
        applied.push(key.clone());
    }
    applied
}
