// tests/cli.rs
//! Integration tests for the `rill` binary.

use std::process::{Command, Output};

fn rill(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rill"))
        .args(args)
        .args(["--color", "never"])
        .env_remove("RILL_LOG")
        .output()
        .expect("Failed to run rill")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn times_eager() {
    let output = rill(&["times", "3"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "0\n1\n2\n=> 3\n");
}

#[test]
fn upto_with_negative_start() {
    let output = rill(&["upto", "-1", "1", "--to-a"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "[-1, 0, 1]\n");
}

#[test]
fn exclusive_range_skips_last() {
    let output = rill(&["each", "1", "4", "--exclusive"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1\n2\n3\n=> 1...4\n");
}

#[test]
fn lazy_take_on_endless_range() {
    let output = rill(&["each", "10", "--take", "3"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "10\n11\n12\n");
}

#[test]
fn string_range_to_a() {
    let output = rill(&["each", "y", "ab", "--to-a"]);
    assert!(output.status.success());
    // "y" sorts after "ab", so the range is empty.
    assert_eq!(stdout(&output), "[]\n");

    let output = rill(&["each", "az", "bb", "--to-a"]);
    assert_eq!(stdout(&output), "[\"az\", \"ba\", \"bb\"]\n");
}

#[test]
fn float_range_fails_with_diagnostic() {
    let output = rill(&["each", "1.5", "4"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    let err = stderr(&output);
    assert!(err.contains("E4001"), "stderr: {err}");
    assert!(err.contains("can't iterate from Float"), "stderr: {err}");
}

#[test]
fn empty_float_range_still_fails() {
    let output = rill(&["each", "4.5", "1", "--lazy"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("can't iterate from Float"));
}

#[test]
fn endless_range_without_take_is_refused() {
    let output = rill(&["each", "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("E5001"));
}

#[test]
fn version_reports_package_version() {
    let output = rill(&["version"]);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with(&format!("rill {}", env!("CARGO_PKG_VERSION"))));
}

#[test]
fn help_lists_subcommands() {
    let output = rill(&["--help"]);
    let text = stdout(&output);
    for cmd in ["times", "upto", "each", "version"] {
        assert!(text.contains(cmd), "missing {cmd} in help: {text}");
    }
}
