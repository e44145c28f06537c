// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for the in-process `sweep` and `check` commands.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::common::*;

#[test]
fn sweep_marks_exactly_the_past_due_issues() {
    let temp = TempDir::new().unwrap();
    let urgent = create_issue(&temp, "Urgent", &["--urgent", "--created-at", MONDAY]);
    let normal = create_issue(&temp, "Normal", &["--created-at", MONDAY]);
    let closed = create_issue(&temp, "Closed", &["--urgent", "--created-at", MONDAY]);
    dd(&temp).args(["close", &closed]).assert().success();

    dd(&temp)
        .args(["sweep", "--now", "2025-03-12T12:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked 1 issue overdue (2 evaluated)"));

    assert_eq!(status_of(&temp, &urgent), "overdue");
    assert_eq!(status_of(&temp, &normal), "open");
    assert_eq!(status_of(&temp, &closed), "closed");
}

#[test]
fn sweep_is_idempotent() {
    let temp = TempDir::new().unwrap();
    create_issue(&temp, "Urgent", &["--urgent", "--created-at", MONDAY]);

    dd(&temp)
        .args(["sweep", "--now", "2025-03-12T12:00:00Z", "-o", "id"])
        .assert()
        .success()
        .stdout("1\n");
    dd(&temp)
        .args(["sweep", "--now", "2025-03-12T12:00:00Z", "-o", "id"])
        .assert()
        .success()
        .stdout("0\n");
}

#[test]
fn sweep_json_report() {
    let temp = TempDir::new().unwrap();
    create_issue(&temp, "Normal", &["--created-at", MONDAY]);

    let output = dd(&temp)
        .args(["sweep", "--now", "2025-03-18T00:00:00Z", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["evaluated"], 1);
    assert_eq!(value["transitioned"], 1);
}

#[test]
fn sweep_on_empty_database() {
    let temp = TempDir::new().unwrap();
    dd(&temp)
        .arg("sweep")
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked 0 issues overdue"));
}

#[test]
fn check_marks_single_issue() {
    let temp = TempDir::new().unwrap();
    let first = create_issue(&temp, "First", &["--urgent", "--created-at", MONDAY]);
    let second = create_issue(&temp, "Second", &["--urgent", "--created-at", MONDAY]);

    dd(&temp)
        .args(["check", &first, "--now", "2025-03-10T09:01:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{first}: overdue")));

    // Only the checked issue changed
    assert_eq!(status_of(&temp, &second), "urgent");
}

#[test]
fn check_before_due_leaves_status() {
    let temp = TempDir::new().unwrap();
    let id = create_issue(&temp, "Urgent", &["--urgent", "--created-at", MONDAY]);

    dd(&temp)
        .args(["check", &id, "--now", "2025-03-10T08:59:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{id}: urgent (due today)")));
}

#[test]
fn check_missing_issue_fails() {
    let temp = TempDir::new().unwrap();
    dd(&temp)
        .args(["check", "dd-00000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("issue not found"));
}

#[test]
fn overdue_issue_is_never_regressed_by_check() {
    let temp = TempDir::new().unwrap();
    let id = create_issue(&temp, "Urgent", &["--urgent", "--created-at", MONDAY]);
    dd(&temp)
        .args(["sweep", "--now", "2025-03-12T12:00:00Z"])
        .assert()
        .success();

    // Evaluated at an earlier instant, the issue stays overdue
    dd(&temp)
        .args(["check", &id, "--now", "2025-03-04T12:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{id}: overdue")));
}

#[test]
fn invalid_config_is_reported() {
    let temp = TempDir::new().unwrap();
    std::fs::write(
        temp.path().join("config.toml"),
        "[sweep]\ninterval_secs = 0\n",
    )
    .unwrap();

    dd(&temp)
        .arg("sweep")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn configured_window_is_used() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("config.toml"), "[sla]\nurgent_days = 1\n").unwrap();
    let id = create_issue(&temp, "Urgent", &["--urgent", "--created-at", MONDAY]);

    dd(&temp)
        .args(["due", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("due 2025-03-04T09:00:00+00:00"));
}
