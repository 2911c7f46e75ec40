//! Shared configuration for the envhook workspace.
//!
//! Configuration is layered by `ortho_config`: built-in defaults, then an
//! optional configuration file (`--config-path` or `ENVHOOK_CONFIG_PATH`),
//! then `ENVHOOK_*` environment variables, then command-line flags. The
//! resolved [`Config`] tells the core which declaration file to look for and
//! which external programs to invoke, and tells the binary how to log.

mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_DECLARATION_FILE, DEFAULT_DIRENV_PROGRAM, DEFAULT_GIT_PROGRAM, DEFAULT_LOG_FILTER,
    default_declaration_file, default_direnv_program, default_git_program, default_log_filter,
    default_log_filter_string, default_log_format,
};
pub use logging::{LogFormat, LogFormatParseError};

/// Resolved envhook configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ENVHOOK")]
pub struct Config {
    /// `tracing` filter expression applied to log output.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for log lines.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// File name searched for in each ancestor directory.
    #[ortho_config(default = default_declaration_file())]
    pub declaration_file: String,
    /// Program used to export the directory environment.
    #[ortho_config(default = default_direnv_program())]
    pub direnv_program: String,
    /// Program used to find the enclosing repository root.
    #[ortho_config(default = default_git_program())]
    pub git_program: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            declaration_file: default_declaration_file(),
            direnv_program: default_direnv_program(),
            git_program: default_git_program(),
        }
    }
}

impl Config {
    /// Filter expression for the tracing subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Declaration file name, e.g. `.envrc`.
    #[must_use]
    pub fn declaration_file(&self) -> &str {
        &self.declaration_file
    }

    /// Program invoked for `export json`.
    #[must_use]
    pub fn direnv_program(&self) -> &str {
        &self.direnv_program
    }

    /// Program invoked for `rev-parse --show-toplevel`.
    #[must_use]
    pub fn git_program(&self) -> &str {
        &self.git_program
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_builtin_values() {
        let config = Config::default();
        assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert_eq!(config.declaration_file(), ".envrc");
        assert_eq!(config.direnv_program(), "direnv");
        assert_eq!(config.git_program(), "git");
    }
}
