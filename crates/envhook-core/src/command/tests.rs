//! Unit tests for the command seam.

use std::path::Path;

use rstest::rstest;
use tempfile::TempDir;

use super::*;

#[test]
fn invocation_collects_arguments_in_order() {
    let invocation = Invocation::new("git", "/work")
        .arg("rev-parse")
        .arg("--show-toplevel");
    assert_eq!(invocation.program(), "git");
    assert_eq!(invocation.args(), ["rev-parse", "--show-toplevel"]);
    assert_eq!(invocation.working_dir(), Path::new("/work"));
}

#[rstest]
#[case::success(CommandOutput::success("ok"), true, Some(0))]
#[case::failure(CommandOutput::failure(Some(2), "bad"), false, Some(2))]
#[case::signalled(CommandOutput::failure(None, ""), false, None)]
fn output_reports_status(
    #[case] output: CommandOutput,
    #[case] success: bool,
    #[case] code: Option<i32>,
) {
    assert_eq!(output.is_success(), success);
    assert_eq!(output.code(), code);
}

#[test]
fn missing_program_is_reported_as_not_installed() {
    let dir = TempDir::new().expect("temp dir");
    let invocation = Invocation::new("envhook-definitely-missing-program", dir.path());
    let err = SystemCommandRunner
        .run(&invocation)
        .expect_err("missing program should fail");
    assert!(
        matches!(err, CommandError::NotInstalled { ref program } if program == "envhook-definitely-missing-program"),
        "unexpected error: {err}"
    );
}

#[cfg(unix)]
#[test]
fn captures_stdout_and_working_directory() {
    let dir = TempDir::new().expect("temp dir");
    let invocation = Invocation::new("pwd", dir.path());
    let output = SystemCommandRunner.run(&invocation).expect("pwd runs");
    assert!(output.is_success());
    let reported = Path::new(output.stdout().trim())
        .canonicalize()
        .expect("canonical pwd");
    let expected = dir.path().canonicalize().expect("canonical temp dir");
    assert_eq!(reported, expected);
}

#[cfg(unix)]
#[test]
fn captures_stderr_of_failing_program() {
    let dir = TempDir::new().expect("temp dir");
    let invocation = Invocation::new("sh", dir.path())
        .arg("-c")
        .arg("echo 'direnv: error .envrc is blocked' >&2; exit 1");
    let output = SystemCommandRunner.run(&invocation).expect("sh runs");
    assert!(!output.is_success());
    assert_eq!(output.code(), Some(1));
    assert!(output.stderr().contains("is blocked"));
}
