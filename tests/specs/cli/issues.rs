// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for issue commands: `new`, `list`, `show`, `assign`, `close`, `due`.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::common::*;

// =============================================================================
// new
// =============================================================================

#[test]
fn new_outputs_id_with_default_prefix() {
    let temp = TempDir::new().unwrap();
    let id = create_monday_issue(&temp, "Refund not received", &[]);
    assert!(id.starts_with("dd-"), "unexpected id {id}");
    assert_eq!(id.len(), 11);
    assert!(temp.path().join("issues.db").exists());
}

#[test]
fn new_text_reports_due_date() {
    let temp = TempDir::new().unwrap();
    dd(&temp)
        .args(["new", "Server down", "--urgent", "--created-at", MONDAY])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created [urgent]"))
        .stdout(predicate::str::contains("Server down"))
        .stdout(predicate::str::contains("due 2025-03-10 09:00"));
}

#[test]
fn new_json_has_priority_status_and_due() {
    let temp = TempDir::new().unwrap();
    let output = dd(&temp)
        .args(["new", "VPN access", "-c", "IT", "--by", "alice", "--created-at", MONDAY])
        .args(["-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["subject"], "VPN access");
    assert_eq!(value["category"], "IT");
    assert_eq!(value["submitted_by"], "alice");
    assert_eq!(value["priority"], "normal");
    assert_eq!(value["status"], "open");
    assert_eq!(value["due_at"], "2025-03-17T09:00:00Z");
}

#[test]
fn new_rejects_bad_timestamp() {
    let temp = TempDir::new().unwrap();
    dd(&temp)
        .args(["new", "Refund", "--created-at", "last tuesday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("RFC 3339"));
}

#[test]
fn new_rejects_bad_prefix() {
    let temp = TempDir::new().unwrap();
    dd(&temp)
        .args(["new", "Refund", "--prefix", "X"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid prefix"));
}

// =============================================================================
// list / show
// =============================================================================

#[test]
fn list_empty_database() {
    let temp = TempDir::new().unwrap();
    dd(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn list_filters_by_status() {
    let temp = TempDir::new().unwrap();
    let urgent = create_monday_issue(&temp, "Urgent one", &["--urgent"]);
    let normal = create_monday_issue(&temp, "Normal one", &[]);

    dd(&temp)
        .args(["list", "--status", "urgent", "-o", "id"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&urgent))
        .stdout(predicate::str::contains(&normal).not());
}

#[test]
fn list_overdue_uses_due_date_not_stored_status() {
    let temp = TempDir::new().unwrap();
    let old = create_monday_issue(&temp, "Old one", &[]);
    let fresh_output = dd(&temp)
        .args(["new", "Fresh one", "-o", "id"])
        .output()
        .unwrap();
    let fresh = String::from_utf8_lossy(&fresh_output.stdout).trim().to_string();

    dd(&temp)
        .args(["list", "--overdue", "-o", "id"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&old))
        .stdout(predicate::str::contains(&fresh).not());
}

#[test]
fn show_includes_due_line() {
    let temp = TempDir::new().unwrap();
    let id = create_monday_issue(&temp, "Refund", &["--urgent"]);

    dd(&temp)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("[urgent] {id}")))
        .stdout(predicate::str::contains("Due: 2025-03-10 09:00"));
}

#[test]
fn show_missing_issue_fails() {
    let temp = TempDir::new().unwrap();
    dd(&temp)
        .args(["show", "dd-00000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("issue not found: dd-00000000"));
}

// =============================================================================
// assign / close / due
// =============================================================================

#[test]
fn assign_moves_to_pending_and_keeps_window() {
    let temp = TempDir::new().unwrap();
    let id = create_monday_issue(&temp, "Refund", &["--urgent"]);

    dd(&temp)
        .args(["assign", &id, "bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pending"));

    // Still on the 5-day window after assignment
    dd(&temp)
        .args(["due", &id, "--at", "2025-03-10T09:01:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("due 2025-03-10T09:00:00+00:00: overdue"));
}

#[test]
fn close_then_assign_fails() {
    let temp = TempDir::new().unwrap();
    let id = create_monday_issue(&temp, "Refund", &[]);

    dd(&temp).args(["close", &id]).assert().success();
    dd(&temp)
        .args(["assign", &id, "bob"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("it is closed"));
}

#[test]
fn due_before_and_after_boundary() {
    let temp = TempDir::new().unwrap();
    let id = create_monday_issue(&temp, "Refund", &["--urgent"]);

    dd(&temp)
        .args(["due", &id, "--at", "2025-03-10T08:59:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("due today\n"));
    dd(&temp)
        .args(["due", &id, "--at", "2025-03-10T09:01:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("overdue\n"));
}
