//! Result of one resolution attempt.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Variables exported for a directory, keyed by name.
pub type Variables = BTreeMap<String, String>;

/// Outcome of materializing a declaration file.
///
/// Exactly one variant holds per attempt; a blocked declaration never carries
/// variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// The export succeeded and produced these variables.
    Loaded(Variables),
    /// The declaration exists but has not been approved.
    Blocked(PathBuf),
    /// Nothing to apply: no declaration, no tool, or no usable output.
    NotFound,
}

impl ResolutionOutcome {
    /// Short lowercase label for logs and reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Loaded(_) => "loaded",
            Self::Blocked(_) => "blocked",
            Self::NotFound => "not_found",
        }
    }
}
