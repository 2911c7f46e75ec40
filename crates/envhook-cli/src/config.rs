//! Configuration loading helpers for the CLI.
//!
//! Configuration flags precede the subcommand. The split below forwards
//! those flags to `ortho_config` and leaves the remaining tokens for the
//! subcommand parser.

use std::ffi::{OsStr, OsString};

use envhook_config::Config;
use ortho_config::OrthoConfig;

use crate::AppError;

/// CLI flags recognised by the configuration loader.
///
/// Keep in sync with the fields of [`Config`].
pub(crate) const CONFIG_CLI_FLAGS: &[&str] = &[
    "--config-path",
    "--log-filter",
    "--log-format",
    "--declaration-file",
    "--direnv-program",
    "--git-program",
];

pub(crate) trait ConfigLoader {
    /// Loads configuration from the filtered configuration arguments.
    fn load(&self, args: &[OsString]) -> Result<Config, AppError>;
}

pub(crate) struct OrthoConfigLoader;

impl ConfigLoader for OrthoConfigLoader {
    fn load(&self, args: &[OsString]) -> Result<Config, AppError> {
        Config::load_from_iter(args.iter().cloned()).map_err(AppError::LoadConfiguration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlagAction {
    Include { needs_value: bool },
    Skip,
}

fn process_config_flag(argument: &OsStr) -> FlagAction {
    let argument_text = argument.to_string_lossy();
    if !argument_text.starts_with("--") {
        return FlagAction::Skip;
    }

    let (flag, has_inline_value) = match argument_text.split_once('=') {
        Some((flag, _)) => (flag, true),
        None => (&*argument_text, false),
    };

    if CONFIG_CLI_FLAGS.contains(&flag) {
        return FlagAction::Include {
            needs_value: !has_inline_value,
        };
    }

    FlagAction::Skip
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ConfigArgumentSplit {
    pub(crate) config_arguments: Vec<OsString>,
    pub(crate) command_arguments: Vec<OsString>,
}

/// Splits leading configuration flags from the subcommand tokens.
///
/// Both halves keep `argv[0]` so each can be handed to a parser directly.
pub(crate) fn split_config_arguments(args: &[OsString]) -> ConfigArgumentSplit {
    let Some((program, rest)) = args.split_first() else {
        return ConfigArgumentSplit {
            config_arguments: Vec::new(),
            command_arguments: Vec::new(),
        };
    };

    let mut config_arguments = vec![program.clone()];
    let mut remaining = rest.iter();
    let mut command_arguments = vec![program.clone()];

    while let Some(argument) = remaining.next() {
        match process_config_flag(argument) {
            FlagAction::Include { needs_value } => {
                config_arguments.push(argument.clone());
                if needs_value {
                    config_arguments.extend(remaining.next().cloned());
                }
            }
            FlagAction::Skip => {
                command_arguments.push(argument.clone());
                command_arguments.extend(remaining.by_ref().cloned());
                break;
            }
        }
    }

    ConfigArgumentSplit {
        config_arguments,
        command_arguments,
    }
}
