//! User-facing notifications requested from the host.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Severity of a host notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Confirmation that something happened.
    Info,
    /// Something needs the user's attention.
    Warning,
}

impl Severity {
    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification for the host to display, e.g. as a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    message: String,
    severity: Severity,
}

impl Notification {
    /// Creates a notification.
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    /// Warning asking the user to approve a blocked declaration.
    #[must_use]
    pub fn blocked(declaration: &Path) -> Self {
        Self::new(
            format!(
                "direnv: {} is blocked. Run `direnv allow` to enable.",
                declaration.display()
            ),
            Severity::Warning,
        )
    }

    /// Confirmation that the environment was loaded.
    #[must_use]
    pub fn loaded() -> Self {
        Self::new("direnv: environment loaded", Severity::Info)
    }

    /// Text to display.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Display severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }
}
