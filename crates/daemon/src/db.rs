// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Database adapter for the daemon.
//!
//! Thin wrapper over [`dd_core::Database`] that serves sweep and check
//! requests from the socket, converting results into IPC responses.

use std::path::Path;

use chrono::{DateTime, Utc};
use dd_core::{check_one, Error, SlaPolicy};
use dd_ipc::{DaemonResponse, SweepOutcome};

use crate::scheduler::SweepRunner;

/// Request-side connection, separate from the scheduler's.
pub struct Database {
    core: dd_core::Database,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, String> {
        let core = dd_core::Database::open(path).map_err(|e| e.to_string())?;
        Ok(Database { core })
    }

    #[cfg(test)]
    fn from_core(core: dd_core::Database) -> Self {
        Database { core }
    }

    /// Run an on-demand sweep through the shared runner.
    pub fn sweep(&mut self, runner: &SweepRunner, now: DateTime<Utc>) -> DaemonResponse {
        match runner.run(&mut self.core, now) {
            Some(SweepOutcome::Completed(summary)) => DaemonResponse::Swept(summary),
            Some(SweepOutcome::Failed { message, .. }) => DaemonResponse::Error { message },
            None => DaemonResponse::Error {
                message: "a sweep is already running".to_string(),
            },
        }
    }

    /// Evaluate a single issue, marking it overdue if its window has closed.
    pub fn check(&mut self, policy: &SlaPolicy, id: &str, now: DateTime<Utc>) -> DaemonResponse {
        match check_one(&mut self.core, policy, id, now) {
            Ok(issue) => DaemonResponse::Checked { issue },
            Err(Error::IssueNotFound(id)) => DaemonResponse::NotFound { id },
            Err(e) => {
                tracing::error!("check of {} failed: {}", id, e);
                DaemonResponse::Error {
                    message: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
