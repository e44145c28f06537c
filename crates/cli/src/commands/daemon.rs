// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon management commands.
//!
//! Commands for controlling duedeskd, which runs the hourly overdue sweep.

use std::path::Path;
use std::time::Duration;

use dd_core::Config;
use dd_ipc::{DaemonStatus, SweepOutcome};

use crate::daemon::{self, DaemonClient};
use crate::error::{Error, Result};

/// Extra time allowed beyond the sweep budget for the daemon to reply.
const REPLY_GRACE: Duration = Duration::from_secs(5);

/// Show daemon status.
pub fn status() -> Result<()> {
    let state_dir = dd_core::config::state_dir();

    if daemon::detect_daemon(&state_dir)?.is_none() {
        println!("Status: not running");
        return Ok(());
    }

    match connect(&state_dir, daemon::DEFAULT_TIMEOUT).and_then(|mut c| c.status()) {
        Ok(status) => println!("{}", format_status(&status)),
        Err(e) => println!("Status: error ({})", e),
    }
    Ok(())
}

pub(crate) fn format_status(status: &DaemonStatus) -> String {
    let mut lines = vec![
        "Status: running".to_string(),
        format!("PID: {}", status.pid),
        format!("Uptime: {}s", status.uptime_secs),
        format!("Sweep interval: {}s", status.interval_secs),
    ];
    match &status.last_sweep {
        None => lines.push("Last sweep: none yet".to_string()),
        Some(SweepOutcome::Completed(summary)) => lines.push(format!(
            "Last sweep: {} ({} transitioned, {} evaluated, {} invalid, {}ms)",
            summary.finished_at.format("%Y-%m-%d %H:%M:%S"),
            summary.transitioned,
            summary.evaluated,
            summary.invalid,
            summary.duration_ms
        )),
        Some(SweepOutcome::Failed { at, message }) => lines.push(format!(
            "Last sweep: {} failed: {}",
            at.format("%Y-%m-%d %H:%M:%S"),
            message
        )),
    }
    lines.join("\n")
}

/// Stop the daemon.
pub fn stop() -> Result<()> {
    let state_dir = dd_core::config::state_dir();

    if daemon::detect_daemon(&state_dir)?.is_none() {
        println!("Daemon is not running.");
        return Ok(());
    }

    match daemon::stop_daemon_forcefully(&state_dir) {
        Ok(()) => println!("Daemon stopped."),
        Err(e) => println!("Failed to stop daemon: {}", e),
    }
    Ok(())
}

/// Start the daemon.
pub fn start() -> Result<()> {
    let state_dir = dd_core::config::state_dir();

    match daemon::detect_daemon(&state_dir)? {
        Some(info) => println!("Daemon is already running (PID: {})", info.pid),
        None => {
            let info = daemon::spawn_daemon(&state_dir)
                .map_err(|e| Error::Daemon(format!("failed to start daemon: {}", e)))?;
            println!("Daemon started (PID: {})", info.pid);
        }
    }
    Ok(())
}

/// Ask the running daemon for an immediate sweep.
pub fn sweep() -> Result<()> {
    let state_dir = dd_core::config::state_dir();
    let config = Config::load(&state_dir)?;
    let summary = connect(&state_dir, config.sweep.timeout() + REPLY_GRACE)?.sweep()?;
    println!(
        "Marked {} overdue ({} evaluated, {}ms)",
        summary.transitioned, summary.evaluated, summary.duration_ms
    );
    Ok(())
}

/// Ask the running daemon to check one issue.
pub fn check(id: &str) -> Result<()> {
    let state_dir = dd_core::config::state_dir();
    let issue = connect(&state_dir, daemon::DEFAULT_TIMEOUT)?.check(id)?;
    println!("{}: {}", issue.id, issue.status);
    Ok(())
}

fn connect(state_dir: &Path, timeout: Duration) -> Result<DaemonClient> {
    let socket = daemon::get_socket_path(state_dir);
    if !socket.exists() {
        return Err(Error::DaemonNotRunning);
    }
    DaemonClient::connect(&socket, timeout)
}

/// View daemon logs.
pub fn logs(follow: bool) -> Result<()> {
    let log_path = dd_core::config::state_dir().join("daemon.log");

    if !log_path.exists() {
        println!("No daemon logs found at {}", log_path.display());
        return Ok(());
    }

    if follow {
        let status = std::process::Command::new("tail")
            .arg("-f")
            .arg(&log_path)
            .status()?;

        if !status.success() {
            return Err(Error::Io(std::io::Error::other("tail command failed")));
        }
    } else {
        print!("{}", std::fs::read_to_string(&log_path)?);
    }

    Ok(())
}

#[cfg(test)]
#[path = "daemon_tests.rs"]
mod tests;
