//! Behavioural coverage for configuration layering.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use ortho_config::OrthoConfig;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tempfile::TempDir;

use envhook_config::{
    Config, default_declaration_file, default_direnv_program, default_git_program,
    default_log_filter, default_log_format,
};

static ENV_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

struct Harness {
    temp_dir: TempDir,
    cli_args: RefCell<Vec<OsString>>,
    env_overrides: RefCell<Vec<(String, Option<OsString>)>>,
    loaded: RefCell<Option<Config>>,
    error: RefCell<Option<String>>,
    _env_lock: MutexGuard<'static, ()>,
}

impl Harness {
    fn new() -> Self {
        let env_lock = ENV_MUTEX.lock().unwrap_or_else(PoisonError::into_inner);
        let temp_dir = match TempDir::new() {
            Ok(dir) => dir,
            Err(error) => panic!("failed to create temporary directory: {error}"),
        };
        Self {
            temp_dir,
            cli_args: RefCell::new(vec![OsString::from("envhook")]),
            env_overrides: RefCell::new(Vec::new()),
            loaded: RefCell::new(None),
            error: RefCell::new(None),
            _env_lock: env_lock,
        }
    }

    fn write_config(&self, direnv_program: &str) {
        let path = self.temp_dir.path().join("envhook.toml");
        let toml = format!("direnv_program = \"{direnv_program}\"\n");
        if let Err(error) = fs::write(&path, toml) {
            panic!("failed to write configuration: {error}");
        }

        let mut args = self.cli_args.borrow_mut();
        args.push(OsString::from("--config-path"));
        args.push(path.into_os_string());
    }

    fn set_env(&self, key: &str, value: &str) {
        let previous = std::env::var_os(key);
        // Restored in `Drop`; the harness holds the environment mutex.
        unsafe { std::env::set_var(key, value) };
        self.env_overrides
            .borrow_mut()
            .push((key.to_owned(), previous));
    }

    fn push_cli_arg(&self, arg: impl Into<OsString>) {
        self.cli_args.borrow_mut().push(arg.into());
    }

    fn load(&self) {
        if self.loaded.borrow().is_some() || self.error.borrow().is_some() {
            return;
        }

        let args = self.cli_args.borrow().clone();
        match Config::load_from_iter(args) {
            Ok(config) => {
                *self.loaded.borrow_mut() = Some(config);
            }
            Err(error) => {
                *self.error.borrow_mut() = Some(error.to_string());
            }
        }
    }

    fn loaded_config(&self) -> Config {
        self.load();
        if let Some(error) = self.error.borrow().as_ref() {
            panic!("configuration failed to load: {error}");
        }
        match self.loaded.borrow().as_ref() {
            Some(config) => config.clone(),
            None => panic!("configuration was not loaded"),
        }
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        let mut overrides = self.env_overrides.borrow_mut();
        while let Some((key, value)) = overrides.pop() {
            if let Some(os_value) = value {
                unsafe { std::env::set_var(&key, os_value) };
            } else {
                unsafe { std::env::remove_var(&key) };
            }
        }
    }
}

#[fixture]
fn harness() -> Harness {
    Harness::new()
}

#[given("a configuration file setting the direnv program to \"{program}\"")]
fn given_configuration_file(harness: &Harness, program: String) {
    harness.write_config(&program);
}

#[given("the environment overrides the direnv program to \"{program}\"")]
fn given_environment_override(harness: &Harness, program: String) {
    harness.set_env("ENVHOOK_DIRENV_PROGRAM", &program);
}

#[when("the CLI sets the direnv program to \"{program}\"")]
fn when_cli_override(harness: &Harness, program: String) {
    harness.push_cli_arg("--direnv-program");
    harness.push_cli_arg(OsString::from(&program));
}

#[when("the configuration loads without overrides")]
fn when_load_without_overrides(harness: &Harness) {
    harness.load();
}

#[then("loading the configuration resolves the direnv program to \"{program}\"")]
fn then_resolved_program(harness: &Harness, program: String) {
    let config = harness.loaded_config();
    assert_eq!(config.direnv_program(), program);
}

#[then("loading the configuration applies the built-in defaults")]
fn then_defaults_applied(harness: &Harness) {
    let config = harness.loaded_config();
    assert_eq!(config.log_filter(), default_log_filter());
    assert_eq!(config.log_format(), default_log_format());
    assert_eq!(config.declaration_file(), default_declaration_file());
    assert_eq!(config.direnv_program(), default_direnv_program());
    assert_eq!(config.git_program(), default_git_program());
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Built-in defaults apply without overrides"
)]
fn defaults_apply_without_overrides(#[from(harness)] harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Configuration file overrides the defaults"
)]
fn file_overrides_defaults(#[from(harness)] harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "Environment overrides the configuration file"
)]
fn environment_overrides_file(#[from(harness)] harness: Harness) {
    drop(harness);
}

#[scenario(
    path = "tests/features/configuration_precedence.feature",
    name = "CLI overrides the environment"
)]
fn cli_overrides_environment(#[from(harness)] harness: Harness) {
    drop(harness);
}
