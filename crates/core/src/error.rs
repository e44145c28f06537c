// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for dd-core operations.

use thiserror::Error;

/// All possible errors that can occur in dd-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("issue not found: {0}")]
    IssueNotFound(String),

    #[error("invalid status: '{0}'\n  hint: valid statuses are: open, pending, urgent, overdue, closed")]
    InvalidStatus(String),

    #[error("invalid priority: '{0}'\n  hint: valid priorities are: normal, urgent")]
    InvalidPriority(String),

    #[error("invalid record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    #[error("{0}")]
    InvalidInput(String),

    #[error("invalid config: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if the underlying issue store failed (connection, query, or write).
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Error::Database(_) | Error::Io(_))
    }
}

/// A specialized Result type for dd-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
