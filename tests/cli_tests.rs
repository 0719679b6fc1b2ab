//! CLI integration tests using the real gsd-install binary

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_help_exits_zero() {
    let env = TestEnv::new();
    env.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--global"))
        .stdout(predicate::str::contains("--config-dir"))
        .stdout(predicate::str::contains("--force-statusline"));
}

#[test]
fn test_version_exits_zero() {
    let env = TestEnv::new();
    env.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("gsd-install"));
}

#[test]
fn test_unknown_flag_exits_one() {
    let env = TestEnv::new();
    env.cmd().arg("--bogus").assert().failure().code(1);
}

#[test]
fn test_conflicting_scope_flags_exit_one_and_write_nothing() {
    let env = TestEnv::new();
    env.cmd()
        .args(["--global", "--local"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("cannot be combined"));

    assert!(!env.claude_root().exists());
    assert!(!env.project.join(".claude").exists());
}

#[test]
fn test_config_dir_with_local_exits_one() {
    let env = TestEnv::new();
    env.cmd()
        .args(["--local", "--config-dir", "/tmp/anywhere"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("--config-dir"));

    assert!(!env.project.join(".claude").exists());
}

#[test]
fn test_empty_config_dir_exits_one() {
    let env = TestEnv::new();
    env.cmd()
        .arg("--config-dir=")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("non-empty"));
}

#[test]
fn test_config_dir_missing_value_exits_one() {
    let env = TestEnv::new();
    env.cmd().arg("--config-dir").assert().failure().code(1);
}
