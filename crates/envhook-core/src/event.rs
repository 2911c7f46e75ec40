//! Host events that can start a resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Trigger delivered when the host starts a new interactive session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStarted {
    directory: PathBuf,
}

impl SessionStarted {
    /// Creates a trigger for a session in `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Working directory of the new session.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

/// An event from the host's plugin event stream, tagged by `type`.
///
/// ```
/// use envhook_core::HostEvent;
///
/// let event: HostEvent =
///     serde_json::from_str(r#"{"type":"session.created","directory":"/proj"}"#).unwrap();
/// assert!(matches!(event, HostEvent::SessionCreated(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostEvent {
    /// A new session started.
    #[serde(rename = "session.created")]
    SessionCreated(SessionStarted),
    /// Any other event; ignored.
    #[serde(other)]
    Other,
}
