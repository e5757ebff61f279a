//! Integration tests for the `plancal` CLI.
//!
//! Each test points `plancal` at a temp data directory, runs it as a
//! subprocess, and checks stdout and/or the saved task file.

use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

/// Run `plancal` against `dir`, returning (stdout, stderr, success).
fn run_plancal(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_plancal"))
        .arg("--data-dir")
        .arg(dir)
        .args(args)
        // keep the user's config out of the way
        .env("XDG_CONFIG_HOME", dir.join("config"))
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run plancal");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run expecting success, return stdout.
fn run_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_plancal(dir, args);
    if !success {
        panic!(
            "plancal {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

/// Run expecting failure, return stderr.
fn run_err(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_plancal(dir, args);
    if success {
        panic!("plancal {:?} should have failed:\nstdout: {}", args, stdout);
    }
    stderr
}

fn saved(dir: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(dir.join("tasks.json")).unwrap()).unwrap()
}

fn add(dir: &Path, name: &str, start: &str, end: &str, category: &str) -> String {
    run_ok(
        dir,
        &["add", name, "--start", start, "--end", end, "--category", category],
    )
    .trim()
    .to_string()
}

#[test]
fn add_prints_id_and_persists() {
    let tmp = TempDir::new().unwrap();
    let id = add(tmp.path(), "Design Review", "3", "5", "review");
    assert!(id.parse::<u64>().is_ok(), "not an id: {}", id);

    let tasks = saved(tmp.path());
    assert_eq!(tasks.as_array().unwrap().len(), 1);
    assert_eq!(tasks[0]["name"], "Design Review");
    assert_eq!(tasks[0]["category"], "Review");
    assert_eq!(tasks[0]["startDay"], 3);
    assert_eq!(tasks[0]["endDay"], 5);
    assert_eq!(tasks[0]["id"].as_u64().unwrap().to_string(), id);
}

#[test]
fn add_rejects_blank_name_and_bad_ranges() {
    let tmp = TempDir::new().unwrap();
    let err = run_err(tmp.path(), &["add", "   ", "--start", "3"]);
    assert!(err.contains("name must not be empty"), "{}", err);
    let err = run_err(tmp.path(), &["add", "x", "--start", "5", "--end", "2"]);
    assert!(err.contains("after day"), "{}", err);
    let err = run_err(tmp.path(), &["add", "x", "--start", "0"]);
    assert!(err.contains("between 1 and 31"), "{}", err);
    assert!(!tmp.path().join("tasks.json").exists());
}

#[test]
fn list_filters_like_the_calendar() {
    let tmp = TempDir::new().unwrap();
    add(tmp.path(), "Design Review", "3", "5", "review");
    add(tmp.path(), "Write notes", "12", "16", "in-progress");
    add(tmp.path(), "Ship it", "20", "20", "done");

    let out = run_ok(tmp.path(), &["list"]);
    assert!(out.contains("Showing 3 of 3 tasks"), "{}", out);

    let out = run_ok(tmp.path(), &["list", "--hide", "completed"]);
    assert!(!out.contains("Ship it"));
    assert!(out.contains("Showing 2 of 3 tasks"));

    let out = run_ok(tmp.path(), &["list", "--search", "REVIEW"]);
    assert!(out.contains("Design Review"));
    assert!(out.contains("Showing 1 of 3 tasks"));

    // today = 1, one week → start days up to 8
    let out = run_ok(tmp.path(), &["list", "--within", "1", "--today", "1"]);
    assert!(out.contains("Showing 1 of 3 tasks"), "{}", out);

    let json: Value =
        serde_json::from_str(&run_ok(tmp.path(), &["--json", "list", "--within", "2", "--today", "1"]))
            .unwrap();
    assert_eq!(json["showing"], 2);
    assert_eq!(json["total"], 3);
    assert_eq!(json["tasks"][1]["days"], 5);
}

#[test]
fn mv_keeps_duration() {
    let tmp = TempDir::new().unwrap();
    let id = add(tmp.path(), "Design Review", "3", "5", "review");
    run_ok(tmp.path(), &["mv", &id, "10"]);
    let tasks = saved(tmp.path());
    assert_eq!(tasks[0]["startDay"], 10);
    assert_eq!(tasks[0]["endDay"], 12);
    assert_eq!(tasks[0]["id"].as_u64().unwrap().to_string(), id);
}

#[test]
fn resize_never_inverts() {
    let tmp = TempDir::new().unwrap();
    let id = add(tmp.path(), "Task", "5", "7", "todo");

    run_ok(tmp.path(), &["resize", &id, "--end", "9"]);
    assert_eq!(saved(tmp.path())[0]["endDay"], 9);

    let err = run_err(tmp.path(), &["resize", &id, "--end", "2"]);
    assert!(err.contains("before the start day"), "{}", err);
    let err = run_err(tmp.path(), &["resize", &id, "--start", "10"]);
    assert!(err.contains("after the end day"), "{}", err);

    let tasks = saved(tmp.path());
    assert_eq!(tasks[0]["startDay"], 5);
    assert_eq!(tasks[0]["endDay"], 9);
}

#[test]
fn edit_changes_name_and_category() {
    let tmp = TempDir::new().unwrap();
    let id = add(tmp.path(), "Draft", "1", "2", "todo");
    let out = run_ok(tmp.path(), &["edit", &id, "--name", "Final", "--category", "review"]);
    assert!(out.contains("Final"));
    let tasks = saved(tmp.path());
    assert_eq!(tasks[0]["name"], "Final");
    assert_eq!(tasks[0]["category"], "Review");

    let err = run_err(tmp.path(), &["edit", &id]);
    assert!(err.contains("nothing to change"));
    let err = run_err(tmp.path(), &["edit", "12345", "--name", "x"]);
    assert!(err.contains("task not found"));
}

#[test]
fn month_shows_counts() {
    let tmp = TempDir::new().unwrap();
    add(tmp.path(), "A", "3", "5", "todo");
    add(tmp.path(), "B", "5", "5", "todo");
    let out = run_ok(tmp.path(), &["month", "2026-02"]);
    assert!(out.starts_with("February 2026\n"), "{}", out);
    assert!(out.contains(" 5 2"));
    assert!(out.contains("2 tasks, up to 2 on one day"));

    let json: Value = serde_json::from_str(&run_ok(tmp.path(), &["--json", "month", "2026-10"])).unwrap();
    assert_eq!(json["first_weekday"], 4);
    assert_eq!(json["days"].as_array().unwrap().len(), 31);

    let err = run_err(tmp.path(), &["month", "2026-13"]);
    assert!(err.contains("expected YYYY-MM"));
}

#[test]
fn clear_needs_confirmation() {
    let tmp = TempDir::new().unwrap();
    add(tmp.path(), "A", "1", "1", "todo");
    let err = run_err(tmp.path(), &["clear"]);
    assert!(err.contains("--yes"));
    assert_eq!(saved(tmp.path()).as_array().unwrap().len(), 1);

    let out = run_ok(tmp.path(), &["clear", "--yes"]);
    assert!(out.contains("Cleared 1 task(s)"));
    assert_eq!(saved(tmp.path()), serde_json::json!([]));
}

#[test]
fn malformed_store_is_set_aside() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("tasks.json"), "not json").unwrap();

    // writes refuse to clobber the broken file
    run_err(tmp.path(), &["add", "A", "--start", "1"]);
    assert_eq!(
        fs::read_to_string(tmp.path().join("tasks.json")).unwrap(),
        "not json"
    );

    // reads fail soft and keep a backup
    let out = run_ok(tmp.path(), &["list"]);
    assert!(out.contains("Showing 0 of 0 tasks"));
    assert!(tmp.path().join("tasks.json.bak").exists());

    let log = run_ok(tmp.path(), &["recovery"]);
    assert!(log.contains("could not load tasks.json"), "{}", log);
}

#[test]
fn recovery_empty() {
    let tmp = TempDir::new().unwrap();
    let out = run_ok(tmp.path(), &["recovery"]);
    assert_eq!(out.trim(), "No recovery entries");
}
