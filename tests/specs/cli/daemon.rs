// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for `duedesk daemon` commands.
//!
//! The lifecycle test drives a real duedeskd found next to the duedesk
//! binary and is skipped when the daemon has not been built.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::path::PathBuf;

use super::common::*;

fn daemon_binary() -> Option<PathBuf> {
    let path = duedesk_binary().with_file_name("duedeskd");
    path.exists().then_some(path)
}

/// Stops the daemon when the test ends, pass or fail.
struct DaemonGuard<'a>(&'a TempDir);

impl Drop for DaemonGuard<'_> {
    fn drop(&mut self) {
        let _ = dd(self.0).args(["daemon", "stop"]).output();
    }
}

#[test]
fn status_when_not_running() {
    let temp = TempDir::new().unwrap();
    dd(&temp)
        .args(["daemon", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: not running"));
}

#[test]
fn stop_when_not_running() {
    let temp = TempDir::new().unwrap();
    dd(&temp)
        .args(["daemon", "stop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daemon is not running."));
}

#[test]
fn sweep_requires_running_daemon() {
    let temp = TempDir::new().unwrap();
    dd(&temp)
        .args(["daemon", "sweep"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("daemon is not running"));
}

#[test]
fn logs_when_missing() {
    let temp = TempDir::new().unwrap();
    dd(&temp)
        .args(["daemon", "logs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No daemon logs found"));
}

#[test]
fn start_sweeps_and_serves_requests() {
    let Some(binary) = daemon_binary() else {
        eprintln!("skipping: duedeskd not built");
        return;
    };
    let temp = TempDir::new().unwrap();

    let old = create_issue(&temp, "Ancient", &["--created-at", "2020-01-06T09:00:00Z"]);
    let fresh = create_issue(&temp, "Fresh", &[]);

    let _guard = DaemonGuard(&temp);
    dd(&temp)
        .env("DUEDESK_DAEMON_BINARY", &binary)
        .args(["daemon", "start"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daemon started"));

    dd(&temp)
        .args(["daemon", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status: running"))
        .stdout(predicate::str::contains("Sweep interval: 3600s"));

    // Overlaps with the startup sweep are refused rather than queued
    let output = dd(&temp).args(["daemon", "sweep"]).output().unwrap();
    if output.status.success() {
        assert!(String::from_utf8_lossy(&output.stdout).contains("overdue"));
    } else {
        assert!(String::from_utf8_lossy(&output.stderr).contains("already running"));
    }

    dd(&temp)
        .args(["daemon", "check", &old])
        .assert()
        .success()
        .stdout(format!("{old}: overdue\n"));
    dd(&temp)
        .args(["daemon", "check", &fresh])
        .assert()
        .success()
        .stdout(format!("{fresh}: open\n"));
    dd(&temp)
        .args(["daemon", "check", "dd-00000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("issue not found"));

    dd(&temp)
        .args(["daemon", "stop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daemon stopped."));
    assert!(!temp.path().join("daemon.sock").exists());
}
