// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! duedeskd - The duedesk sweep daemon.
//!
//! Owns the periodic overdue sweep for the issue database in the state
//! directory (`~/.local/state/duedesk/` by default). Listens on a Unix socket
//! for status and on-demand sweep requests from `duedesk` CLI processes.
//!
//! Usage:
//!   duedeskd --state-dir <path>

use std::fs;
use std::io::Write;
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use dd_core::Config;
use dd_ipc::{framing, DaemonRequest, DaemonResponse, DaemonStatus};

mod db;
mod scheduler;

use db::Database;
use scheduler::{Scheduler, SharedState, SweepRunner};

/// Socket filename within daemon directory.
const SOCKET_NAME: &str = "daemon.sock";
/// PID filename within daemon directory.
const PID_NAME: &str = "daemon.pid";
/// Lock filename for single instance guarantee.
const LOCK_NAME: &str = "daemon.lock";
/// Log filename within daemon directory.
const LOG_NAME: &str = "daemon.log";

/// Everything a request handler needs.
struct Daemon {
    db: Database,
    runner: Arc<SweepRunner>,
    config: Config,
    start_time: Instant,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let state_dir = parse_state_dir(&args);

    if let Err(e) = fs::create_dir_all(&state_dir) {
        eprintln!("failed to create {}: {}", state_dir.display(), e);
        std::process::exit(1);
    }

    setup_logging(&state_dir.join(LOG_NAME));

    tracing::info!("duedeskd starting, state_dir={}", state_dir.display());

    let config = match Config::load(&state_dir) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Acquire file lock for single instance
    let lock_path = state_dir.join(LOCK_NAME);
    let lock_file = match acquire_lock(&lock_path) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!("failed to acquire lock: {}", e);
            std::process::exit(1);
        }
    };

    let pid_path = state_dir.join(PID_NAME);
    if let Err(e) = write_pid_file(&pid_path) {
        tracing::error!("failed to write PID file: {}", e);
        std::process::exit(1);
    }

    let db_path = dd_core::config::db_path(&state_dir);
    let db = match Database::open(&db_path) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("failed to open {}: {}", db_path.display(), e);
            let _ = fs::remove_file(&pid_path);
            std::process::exit(1);
        }
    };

    let socket_path = state_dir.join(SOCKET_NAME);
    // Remove stale socket if it exists
    let _ = fs::remove_file(&socket_path);

    let listener = match UnixListener::bind(&socket_path) {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("failed to bind socket: {}", e);
            cleanup(&pid_path, &socket_path);
            std::process::exit(1);
        }
    };

    let runner = Arc::new(SweepRunner::new(
        Arc::new(SharedState::default()),
        config.sla,
        config.sweep.timeout(),
    ));
    let scheduler = match Scheduler::spawn(db_path, Arc::clone(&runner), config.sweep.interval_secs)
    {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("failed to start scheduler: {}", e);
            cleanup(&pid_path, &socket_path);
            std::process::exit(1);
        }
    };

    tracing::info!(
        "listening on {}, sweeping every {}s",
        socket_path.display(),
        config.sweep.interval_secs
    );

    // Signal readiness to parent process
    println!("READY");
    let _ = std::io::stdout().flush();

    let mut daemon = Daemon {
        db,
        runner,
        config,
        start_time: Instant::now(),
    };

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
                let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));

                match framing::read_request(&mut stream) {
                    Ok(request) => {
                        let response = handle_request(&mut daemon, request);
                        let should_shutdown = matches!(response, DaemonResponse::ShuttingDown);
                        if let Err(e) = framing::write_response(&mut stream, &response) {
                            tracing::warn!("failed to write response: {}", e);
                        }
                        if should_shutdown {
                            tracing::info!("shutting down");
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("failed to read request: {}", e);
                    }
                }
            }
            Err(e) => {
                tracing::warn!("failed to accept connection: {}", e);
            }
        }
    }

    scheduler.stop();
    cleanup(&pid_path, &socket_path);
    drop(lock_file);
    tracing::info!("duedeskd stopped");
}

fn handle_request(daemon: &mut Daemon, request: DaemonRequest) -> DaemonResponse {
    match request {
        DaemonRequest::Ping => DaemonResponse::Pong,
        DaemonRequest::Status => {
            let pid = std::process::id();
            let uptime_secs = daemon.start_time.elapsed().as_secs();
            DaemonResponse::Status(
                DaemonStatus::new(pid, uptime_secs, daemon.config.sweep.interval_secs)
                    .with_last_sweep(daemon.runner.shared().last_sweep()),
            )
        }
        DaemonRequest::Shutdown => DaemonResponse::ShuttingDown,
        DaemonRequest::Hello { version: _ } => DaemonResponse::Hello {
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        DaemonRequest::Sweep => {
            tracing::info!("on-demand sweep requested");
            daemon.db.sweep(&daemon.runner, Utc::now())
        }
        DaemonRequest::Check { id } => daemon.db.check(&daemon.config.sla, &id, Utc::now()),
    }
}

fn parse_state_dir(args: &[String]) -> PathBuf {
    for i in 0..args.len() {
        if args[i] == "--state-dir" {
            if let Some(dir) = args.get(i + 1) {
                return PathBuf::from(dir);
            }
        }
    }
    dd_core::config::state_dir()
}

fn setup_logging(log_path: &Path) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Try to open log file, fall back to stderr
    if let Ok(file) = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

fn acquire_lock(lock_path: &Path) -> std::io::Result<fs::File> {
    use fs2::FileExt;

    let file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(lock_path)?;
    file.try_lock_exclusive()
        .map_err(|_| std::io::Error::other("another daemon instance is already running"))?;
    Ok(file)
}

fn write_pid_file(pid_path: &Path) -> std::io::Result<()> {
    fs::write(pid_path, format!("{}", std::process::id()))
}

fn cleanup(pid_path: &Path, socket_path: &Path) {
    let _ = fs::remove_file(pid_path);
    let _ = fs::remove_file(socket_path);
}
