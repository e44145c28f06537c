// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test files,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::path::PathBuf;

use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

/// Monday 09:00 UTC.
pub const MONDAY: &str = "2025-03-03T09:00:00Z";

/// Path of the built `duedesk` binary.
pub fn duedesk_binary() -> PathBuf {
    #[allow(deprecated)]
    assert_cmd::cargo::cargo_bin("duedesk")
}

/// `duedesk` with its state directory pointed at `temp`.
pub fn dd(temp: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("duedesk").unwrap();
    cmd.env("DUEDESK_STATE_DIR", temp.path())
        .env_remove("RUST_LOG");
    cmd
}

/// Create an issue and return its id.
pub fn create_issue(temp: &TempDir, subject: &str, opts: &[&str]) -> String {
    let output = dd(temp)
        .arg("new")
        .arg(subject)
        .args(opts)
        .args(["-o", "id"])
        .output()
        .unwrap();
    assert!(output.status.success(), "new failed: {:?}", output);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Create an issue stamped Monday 09:00 UTC.
pub fn create_monday_issue(temp: &TempDir, subject: &str, opts: &[&str]) -> String {
    let mut args = opts.to_vec();
    args.extend(["--created-at", MONDAY]);
    create_issue(temp, subject, &args)
}

/// Current status of an issue as reported by `show -o json`.
pub fn status_of(temp: &TempDir, id: &str) -> String {
    let output = dd(temp).args(["show", id, "-o", "json"]).output().unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    value["status"].as_str().unwrap().to_string()
}
