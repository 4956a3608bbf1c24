mod harness;

use harness::{DEFAULT_CONFIG, TestContext};
use predicates::prelude::*;
use std::fs;

#[test]
fn init_writes_starter_config_once() {
    let ctx = TestContext::new();
    let dir = ctx.root().join("fresh");

    ctx.cli()
        .args(["init", "--dir", "fresh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    let content = fs::read_to_string(dir.join("scrapesync.toml")).unwrap();
    assert!(content.contains("[job]"));
    assert!(content.contains("script_timeout_secs = 900"));

    ctx.cli()
        .args(["init", "--dir", "fresh"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already exists"));

    ctx.cli().args(["init", "--dir", "fresh", "--force"]).assert().success();
}

#[test]
fn cron_prints_entry_with_absolute_paths() {
    let ctx = TestContext::new();
    ctx.write_config(&format!("{}\n[schedule]\ncron = \"*/30 * * * *\"\n", DEFAULT_CONFIG));

    let expected_config = format!("--config {}", ctx.config_path().display());
    let expected_log = format!(">> {} 2>&1", ctx.root().join("scrapesync.log").display());
    ctx.cli()
        .arg("cron")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("*/30 * * * * "))
        .stdout(predicate::str::contains(" run "))
        .stdout(predicate::str::contains(expected_config))
        .stdout(predicate::str::contains(expected_log));
}

#[test]
fn cron_rejects_malformed_schedule() {
    let ctx = TestContext::new();
    ctx.write_config(&format!("{}\n[schedule]\ncron = \"hourly\"\n", DEFAULT_CONFIG));

    ctx.cli().arg("cron").assert().code(1).stderr(predicate::str::contains("5 fields"));
}

#[test]
fn doctor_passes_on_prepared_checkout() {
    let ctx = TestContext::new();

    ctx.cli()
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed."));
}

#[test]
fn doctor_reports_missing_remote_and_venv() {
    let ctx = TestContext::new();
    ctx.write_config(
        r#"[job]
workdir = "work"
remote = "upstream"
script_extension = "sh"

[environment]
interpreter = "sh"
venv = "venv"
"#,
    );

    ctx.cli()
        .arg("doctor")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("remote 'upstream' is not configured"))
        .stdout(predicate::str::contains("does not exist"))
        .stderr(predicate::str::contains("2 problem(s)"));
}

#[test]
fn missing_explicit_config_is_a_setup_error() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["run", "--config", "nope.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn config_can_come_from_environment() {
    let ctx = TestContext::new();
    let alt = ctx.root().join("alt.toml");
    fs::write(&alt, DEFAULT_CONFIG.replace("script_timeout_secs = 30", "script_timeout_secs = 0")).unwrap();

    ctx.cli()
        .arg("run")
        .env("SCRAPESYNC_CONFIG", &alt)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("script_timeout_secs must be greater than 0"));
}

#[test]
fn unknown_config_keys_are_rejected() {
    let ctx = TestContext::new();
    ctx.write_config("[job]\nworkdir = \"work\"\nretries = 3\n");

    ctx.cli().arg("run").assert().code(1).stderr(predicate::str::contains("unknown field"));
}

#[test]
fn non_repository_workdir_is_a_setup_error() {
    let ctx = TestContext::new();
    fs::create_dir_all(ctx.root().join("plain")).unwrap();

    ctx.cli()
        .args(["run", "--workdir", "plain"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Not a git repository"));
}
