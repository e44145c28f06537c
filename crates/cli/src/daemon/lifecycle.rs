// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: spawn, detect, cleanup.
//!
//! duedeskd is spawned as a background process and communicates via Unix
//! socket. PID and socket files live in the state directory
//! (~/.local/state/duedesk/ by default).

use std::fs;
use std::io::{BufRead, BufReader};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use dd_ipc::{framing, DaemonRequest, DaemonResponse};

use crate::error::{Error, Result};

/// Socket filename within the state directory.
const SOCKET_NAME: &str = "daemon.sock";
/// PID filename within the state directory.
const PID_NAME: &str = "daemon.pid";
/// Daemon binary name.
const DAEMON_BIN: &str = "duedeskd";

/// Information about a running daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaemonInfo {
    /// Process ID of the daemon.
    pub pid: u32,
}

/// Get the socket path for the given state directory.
pub fn get_socket_path(state_dir: &Path) -> PathBuf {
    state_dir.join(SOCKET_NAME)
}

/// Get the PID file path for the given state directory.
pub fn get_pid_path(state_dir: &Path) -> PathBuf {
    state_dir.join(PID_NAME)
}

/// Detect if a daemon is running for the given state directory.
///
/// Returns Some(DaemonInfo) if a daemon is running and responding,
/// None otherwise. Cleans up stale PID/socket files if found.
pub fn detect_daemon(state_dir: &Path) -> Result<Option<DaemonInfo>> {
    let socket_path = get_socket_path(state_dir);
    let pid_path = get_pid_path(state_dir);

    if !socket_path.exists() {
        if pid_path.exists() {
            let _ = fs::remove_file(&pid_path);
        }
        return Ok(None);
    }

    let Ok(mut stream) = UnixStream::connect(&socket_path) else {
        cleanup_stale_files(state_dir);
        return Ok(None);
    };
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    if framing::write_request(&mut stream, &DaemonRequest::Ping).is_err() {
        cleanup_stale_files(state_dir);
        return Ok(None);
    }

    match framing::read_response(&mut stream) {
        // PID file missing means the daemon is still starting up
        Ok(DaemonResponse::Pong) => Ok(read_pid_file(&pid_path)
            .filter(|pid| *pid > 0)
            .map(|pid| DaemonInfo { pid })),
        _ => {
            cleanup_stale_files(state_dir);
            Ok(None)
        }
    }
}

/// Find the duedeskd binary.
fn find_daemon_binary() -> PathBuf {
    if let Some(path) = dd_core::env::daemon_binary() {
        return path;
    }

    if let Ok(exe) = std::env::current_exe() {
        let sibling = exe.with_file_name(DAEMON_BIN);
        if sibling.exists() {
            return sibling;
        }
    }

    PathBuf::from(DAEMON_BIN)
}

/// Spawn a new daemon process for the given state directory.
///
/// Returns the running daemon if there already is one. The daemon itself
/// holds an flock so only one instance runs per state directory.
pub fn spawn_daemon(state_dir: &Path) -> Result<DaemonInfo> {
    if let Some(info) = detect_daemon(state_dir)? {
        return Ok(info);
    }

    fs::create_dir_all(state_dir)?;

    let binary = find_daemon_binary();
    let mut child = Command::new(&binary)
        .arg("--state-dir")
        .arg(state_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            Error::Daemon(format!(
                "failed to start {} ({}): {}",
                DAEMON_BIN,
                binary.display(),
                e
            ))
        })?;

    // Wait for the daemon to write "READY" to stdout
    if let Some(stdout) = child.stdout.take() {
        let reader = BufReader::new(stdout);
        for line in reader.lines() {
            match line {
                Ok(line) if line == "READY" => break,
                Ok(_) => continue,
                Err(_) => break,
            }
        }
    }

    for _ in 0..150 {
        if let Ok(Some(status)) = child.try_wait() {
            let stderr_output = if let Some(mut stderr) = child.stderr.take() {
                use std::io::Read;
                let mut output = String::new();
                let _ = stderr.read_to_string(&mut output);
                output
            } else {
                String::new()
            };
            return Err(Error::Daemon(format!(
                "daemon process exited with status: {}\n{}",
                status,
                stderr_output.trim()
            )));
        }

        if let Some(info) = detect_daemon(state_dir)? {
            return Ok(info);
        }
        std::thread::sleep(Duration::from_millis(10));
    }

    Err(Error::Daemon(
        "daemon failed to start: could not connect after multiple attempts".to_string(),
    ))
}

/// Clean up stale socket and PID files.
fn cleanup_stale_files(state_dir: &Path) {
    let _ = fs::remove_file(get_socket_path(state_dir));
    let _ = fs::remove_file(get_pid_path(state_dir));
}

/// Read PID from the PID file.
fn read_pid_file(pid_path: &Path) -> Option<u32> {
    fs::read_to_string(pid_path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
}

/// Stop the daemon, killing it if graceful shutdown fails.
pub fn stop_daemon_forcefully(state_dir: &Path) -> Result<()> {
    let pid = read_pid_file(&get_pid_path(state_dir));

    let graceful = super::DaemonClient::connect(&get_socket_path(state_dir), Duration::from_secs(2))
        .and_then(|mut client| client.shutdown());

    match graceful {
        Ok(()) => {
            if let Some(pid) = pid {
                wait_for_process_exit(pid, Duration::from_secs(1));
            }
        }
        Err(e) => {
            tracing::debug!("graceful shutdown failed: {}", e);
            if let Some(pid) = pid {
                let _ = Command::new("kill").arg("-9").arg(pid.to_string()).output();
                std::thread::sleep(Duration::from_millis(100));
            }
        }
    }

    cleanup_stale_files(state_dir);
    Ok(())
}

/// Wait for a process to exit, with timeout.
fn wait_for_process_exit(pid: u32, timeout: Duration) {
    let start = std::time::Instant::now();

    while start.elapsed() < timeout {
        let result = Command::new("kill").arg("-0").arg(pid.to_string()).output();

        match result {
            Ok(output) if !output.status.success() => return,
            Err(_) => return,
            _ => {}
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}
