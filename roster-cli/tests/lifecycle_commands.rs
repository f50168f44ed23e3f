//! Integration tests for init, demo, backup and restore.
//!
//! Tests that need the `sqlite3` shell return early when it is missing.

mod common;

use common::{sqlite3_available, TestEnv};
use predicates::prelude::*;

#[test]
fn test_init_reports_every_step() {
    let env = TestEnv::new();

    env.command()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("create students table"))
        .stdout(predicate::str::contains("install GetStudentsByDepartment"));

    assert!(env.database.exists());
}

#[test]
fn test_init_is_idempotent() {
    let env = TestEnv::new();
    env.add_student("S1", "Ada", "Lovelace", "Mathematics");

    env.command().arg("init").assert().success();
    env.command().arg("init").assert().success();

    assert_eq!(env.list_json().len(), 1);
}

#[test]
fn test_init_dry_run_creates_nothing() {
    let env = TestEnv::new();

    env.command()
        .args(["init", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry-run mode"));

    assert!(!env.database.exists());
}

#[test]
fn test_demo_enrolls_rohan_and_prints_names() {
    let env = TestEnv::new();

    env.command()
        .args(["demo", "--skip-backup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rohan Rana"));

    let enrollments = env.run(&["enrollments", "1", "--format", "csv"]);
    assert_eq!(enrollments.lines().count(), 3, "header plus two rows");

    let cs = env.run(&["by-department", "Computer Science"]);
    assert!(cs.contains("STU101"));
}

#[test]
fn test_demo_twice_reports_duplicate_and_continues() {
    let env = TestEnv::new();
    env.command().args(["demo", "--skip-backup"]).assert().success();

    env.command()
        .args(["demo", "--skip-backup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rohan Rana"))
        .stderr(predicate::str::contains("Adding student failed"));

    assert_eq!(env.list_json().len(), 1);
}

#[test]
fn test_demo_writes_backup() {
    if !sqlite3_available() {
        eprintln!("skipping: sqlite3 not found");
        return;
    }

    let env = TestEnv::new();
    env.command().arg("demo").assert().success();

    let backup = std::fs::read_to_string(env.path().join("backup.sql")).unwrap();
    assert!(backup.contains("STU101"));
}

#[test]
fn test_backup_and_restore_round_trip() {
    if !sqlite3_available() {
        eprintln!("skipping: sqlite3 not found");
        return;
    }

    let env = TestEnv::new();
    let id = env.add_student("S1", "Ada", "Lovelace", "Mathematics");
    let file = env.path().join("snapshot.sql");
    let file = file.to_str().unwrap();

    env.command().args(["backup", "--file", file]).assert().success();
    env.command().args(["delete", &id.to_string()]).assert().success();
    env.add_student("S2", "Alan", "Turing", "Computer Science");

    env.command().args(["restore", "--file", file]).assert().success();

    let students = env.list_json();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["student_id"], "S1");
}

#[test]
fn test_backup_with_missing_tool_exits_4() {
    let env = TestEnv::new();
    env.command().arg("init").assert().success();

    env.command()
        .args(["backup", "--tool", "no-such-dump-tool"])
        .assert()
        .code(4);
}

#[test]
fn test_failing_tool_exits_5() {
    if !std::path::Path::new("/bin/false").exists() {
        return;
    }

    let env = TestEnv::new();
    env.command().arg("init").assert().success();

    env.command()
        .args(["backup", "--tool", "/bin/false"])
        .assert()
        .code(5);
}

#[test]
fn test_restore_missing_file_exits_4() {
    let env = TestEnv::new();
    env.command()
        .args(["restore", "--file", "nowhere.sql"])
        .assert()
        .code(4);
}
