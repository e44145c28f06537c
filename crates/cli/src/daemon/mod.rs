// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management for the duedeskd process.
//!
//! The CLI talks to duedeskd over a Unix socket in the state directory to
//! query its status and to trigger sweeps and single-issue checks.

mod client;
mod lifecycle;

pub use client::{DaemonClient, DEFAULT_TIMEOUT};
pub use lifecycle::{detect_daemon, get_socket_path, spawn_daemon, stop_daemon_forcefully};
