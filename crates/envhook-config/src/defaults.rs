use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Name of the per-directory environment declaration file.
pub const DEFAULT_DECLARATION_FILE: &str = ".envrc";

/// Program invoked to export a directory environment.
pub const DEFAULT_DIRENV_PROGRAM: &str = "direnv";

/// Program queried for the enclosing repository root.
pub const DEFAULT_GIT_PROGRAM: &str = "git";

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Owned declaration file name.
#[must_use]
pub fn default_declaration_file() -> String {
    DEFAULT_DECLARATION_FILE.to_owned()
}

/// Owned direnv program name.
#[must_use]
pub fn default_direnv_program() -> String {
    DEFAULT_DIRENV_PROGRAM.to_owned()
}

/// Owned git program name.
#[must_use]
pub fn default_git_program() -> String {
    DEFAULT_GIT_PROGRAM.to_owned()
}
