// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// All possible errors that can occur in the ddrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("issue not found: {0}")]
    IssueNotFound(String),

    #[error("invalid prefix: must be 2+ lowercase alphanumeric with at least one letter")]
    InvalidPrefix,

    #[error("invalid timestamp '{value}'\n  hint: use RFC 3339, e.g. 2025-03-03T09:00:00Z")]
    InvalidTimestamp { value: String },

    #[error("{field} cannot be empty")]
    FieldEmpty { field: &'static str },

    #[error("cannot {action} issue {id}: it is {status}")]
    TerminalIssue {
        action: &'static str,
        id: String,
        status: String,
    },

    #[error("{0}")]
    Core(dd_core::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("daemon error: {0}")]
    Daemon(String),

    #[error("daemon is not running\n  hint: start it with 'duedesk daemon start'")]
    DaemonNotRunning,
}

impl From<dd_core::Error> for Error {
    fn from(e: dd_core::Error) -> Self {
        match e {
            dd_core::Error::IssueNotFound(id) => Error::IssueNotFound(id),
            other => Error::Core(other),
        }
    }
}

/// A specialized Result type for ddrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
