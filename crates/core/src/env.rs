// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables read by the CLI and daemon are named
//! here with typed accessor functions.

use std::path::PathBuf;

/// Environment variable names.
pub mod vars {
    /// Override the duedesk state directory.
    pub const DUEDESK_STATE_DIR: &str = "DUEDESK_STATE_DIR";
    /// XDG base directory for state data.
    pub const XDG_STATE_HOME: &str = "XDG_STATE_HOME";
    /// Path to the duedeskd binary used by `duedesk daemon start`.
    pub const DUEDESK_DAEMON_BINARY: &str = "DUEDESK_DAEMON_BINARY";
    /// Controls log level filtering (used by tracing-subscriber).
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Returns the value of `DUEDESK_STATE_DIR` if set.
pub fn state_dir() -> Option<PathBuf> {
    std::env::var(vars::DUEDESK_STATE_DIR).ok().map(PathBuf::from)
}

/// Returns the value of `XDG_STATE_HOME` if set.
pub fn xdg_state_home() -> Option<PathBuf> {
    std::env::var(vars::XDG_STATE_HOME).ok().map(PathBuf::from)
}

/// Returns the value of `DUEDESK_DAEMON_BINARY` if set.
pub fn daemon_binary() -> Option<PathBuf> {
    std::env::var(vars::DUEDESK_DAEMON_BINARY)
        .ok()
        .map(PathBuf::from)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
