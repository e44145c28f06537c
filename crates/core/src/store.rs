// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The issue store boundary consumed by the sweeper.
//!
//! [`IssueStore`] is the narrow interface the SLA core needs: read the
//! non-terminal population, read one issue, and write statuses. The SQLite
//! [`Database`](crate::db::Database) implements it; tests substitute their own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::issue::{Issue, Priority, Status};
use crate::sla::SlaSubject;

/// An issue projection exactly as the store holds it.
///
/// Fields are kept raw so one bad record can be rejected on its own
/// without failing the whole fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRecord {
    pub id: String,
    pub created_at: Option<String>,
    pub status: String,
    pub priority: Option<String>,
}

impl IssueRecord {
    /// Parse the raw fields into a typed projection.
    pub fn validate(&self) -> Result<TrackedIssue> {
        let created_raw = self
            .created_at
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| self.invalid("missing created_at".to_string()))?;

        let created_at = DateTime::parse_from_rfc3339(created_raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| self.invalid(format!("malformed created_at '{created_raw}'")))?;

        let status: Status = self
            .status
            .parse()
            .map_err(|_| self.invalid(format!("invalid status '{}'", self.status)))?;

        let priority: Priority = match self.priority.as_deref() {
            None => return Err(self.invalid("missing priority".to_string())),
            Some(p) => p
                .parse()
                .map_err(|_| self.invalid(format!("invalid priority '{p}'")))?,
        };

        Ok(TrackedIssue {
            id: self.id.clone(),
            created_at,
            status,
            priority,
        })
    }

    fn invalid(&self, reason: String) -> Error {
        Error::InvalidRecord {
            id: self.id.clone(),
            reason,
        }
    }
}

/// A validated projection of an issue: just what SLA evaluation reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedIssue {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub status: Status,
    pub priority: Priority,
}

impl SlaSubject for TrackedIssue {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn status(&self) -> Status {
        self.status
    }
}

/// A conditional status write: applied only if the issue is still in `expected`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub id: String,
    pub expected: Status,
    pub status: Status,
}

impl StatusUpdate {
    /// Move an issue from its current status to `Overdue`.
    pub fn overdue(id: &str, current: Status) -> Self {
        StatusUpdate {
            id: id.to_string(),
            expected: current,
            status: Status::Overdue,
        }
    }
}

/// Storage operations the SLA core depends on.
pub trait IssueStore {
    /// All issues whose status is not terminal (closed or overdue).
    fn find_non_terminal_issues(&self) -> Result<Vec<IssueRecord>>;

    /// Fetch a single issue, or [`Error::IssueNotFound`].
    fn find_issue_by_id(&self, id: &str) -> Result<Issue>;

    /// Apply conditional updates one document at a time.
    ///
    /// Returns how many documents actually changed. Updates whose
    /// `expected` status no longer matches are silently skipped. Writes
    /// applied before a failure are kept.
    fn bulk_set_status(&mut self, updates: &[StatusUpdate]) -> Result<usize>;

    /// Unconditionally set an issue's status and return the updated record.
    fn set_status(&mut self, id: &str, status: Status) -> Result<Issue>;
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
