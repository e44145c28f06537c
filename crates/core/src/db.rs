// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed database for issue storage.
//!
//! The [`Database`] struct provides the workflow writes (create, assign,
//! resolve) and implements [`IssueStore`] for the sweeper.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, InterruptHandle, OptionalExtension};
use std::path::Path;

use crate::error::{Error, Result};
use crate::issue::{Issue, Status};
use crate::store::{IssueRecord, IssueStore, StatusUpdate};

/// SQL schema for the issue database.
pub const SCHEMA: &str = r#"
-- Issues; priority is captured at creation and never rewritten by workflow
CREATE TABLE IF NOT EXISTS issues (
    id TEXT PRIMARY KEY,
    subject TEXT NOT NULL,
    category TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'open',
    priority TEXT,
    submitted_by TEXT NOT NULL,
    assigned_to TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_issues_status ON issues(status);
CREATE INDEX IF NOT EXISTS idx_issues_created ON issues(created_at);
"#;

const ISSUE_COLUMNS: &str = "id, subject, category, status, priority, submitted_by, assigned_to,
     created_at, updated_at";

/// Run schema creation and all migrations on a database connection.
///
/// Shared by the CLI and the daemon so both see the same shape.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    migrate_add_priority(conn)?;
    migrate_backfill_priority(conn)?;
    Ok(())
}

/// Migration: Add priority column to databases created before it existed.
fn migrate_add_priority(conn: &Connection) -> Result<()> {
    let has_priority: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM pragma_table_info('issues') WHERE name = 'priority'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);

    if !has_priority {
        conn.execute("ALTER TABLE issues ADD COLUMN priority TEXT", [])?;
    }
    Ok(())
}

/// Migration: Capture a priority for rows that never had one.
///
/// Legacy rows used the `urgent` status as their priority. The status present
/// now is recorded once; later status changes no longer affect the window.
fn migrate_backfill_priority(conn: &Connection) -> Result<()> {
    conn.execute(
        "UPDATE issues
         SET priority = CASE WHEN lower(status) = 'urgent' THEN 'urgent' ELSE 'normal' END
         WHERE priority IS NULL",
        [],
    )?;
    Ok(())
}

/// An issue row with every column still in storage form.
struct IssueRow {
    id: String,
    subject: String,
    category: String,
    status: String,
    priority: Option<String>,
    submitted_by: String,
    assigned_to: Option<String>,
    created_at: String,
    updated_at: String,
}

impl IssueRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(IssueRow {
            id: row.get(0)?,
            subject: row.get(1)?,
            category: row.get(2)?,
            status: row.get(3)?,
            priority: row.get(4)?,
            submitted_by: row.get(5)?,
            assigned_to: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn into_issue(self) -> Result<Issue> {
        let status = self
            .status
            .parse()
            .map_err(|_| self.corrupt(format!("invalid status '{}'", self.status)))?;
        let priority = match self.priority.as_deref() {
            Some(p) => p
                .parse()
                .map_err(|_| self.corrupt(format!("invalid priority '{p}'")))?,
            None => return Err(self.corrupt("missing priority".to_string())),
        };
        let created_at = self.timestamp(&self.created_at, "created_at")?;
        let updated_at = self.timestamp(&self.updated_at, "updated_at")?;

        Ok(Issue {
            id: self.id,
            subject: self.subject,
            category: self.category,
            status,
            priority,
            submitted_by: self.submitted_by,
            assigned_to: self.assigned_to,
            created_at,
            updated_at,
        })
    }

    fn timestamp(&self, value: &str, column: &str) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| self.corrupt(format!("invalid timestamp '{value}' in column '{column}'")))
    }

    fn corrupt(&self, reason: String) -> Error {
        Error::InvalidRecord {
            id: self.id.clone(),
            reason,
        }
    }
}

/// SQLite database connection with issue operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // WAL lets the daemon's scheduler and request threads share the file
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Handle that aborts whatever statement this connection is running.
    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.conn.get_interrupt_handle()
    }

    /// Create a new issue.
    pub fn create_issue(&self, issue: &Issue) -> Result<()> {
        self.conn.execute(
            "INSERT INTO issues (id, subject, category, status, priority, submitted_by,
             assigned_to, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                issue.id,
                issue.subject,
                issue.category,
                issue.status.as_str(),
                issue.priority.as_str(),
                issue.submitted_by,
                issue.assigned_to,
                issue.created_at.to_rfc3339(),
                issue.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Get an issue by ID.
    pub fn get_issue(&self, id: &str) -> Result<Issue> {
        let sql = format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = ?1");
        let row = self
            .conn
            .query_row(&sql, params![id], IssueRow::from_row)
            .optional()?;

        match row {
            Some(row) => row.into_issue(),
            None => Err(Error::IssueNotFound(id.to_string())),
        }
    }

    /// Check if an issue exists.
    pub fn issue_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM issues WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// List issues, newest first, optionally filtered by status.
    ///
    /// Rows that fail to decode are logged and left out.
    pub fn list_issues(&self, status: Option<Status>) -> Result<Vec<Issue>> {
        let mut sql = format!("SELECT {ISSUE_COLUMNS} FROM issues");
        let mut params_vec: Vec<String> = Vec::new();

        if let Some(s) = status {
            sql.push_str(" WHERE lower(status) = ?");
            params_vec.push(s.as_str().to_string());
        }

        sql.push_str(" ORDER BY created_at DESC, id");

        let mut stmt = self.conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();

        let rows = stmt
            .query_map(params_refs.as_slice(), IssueRow::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut issues = Vec::with_capacity(rows.len());
        for row in rows {
            match row.into_issue() {
                Ok(issue) => issues.push(issue),
                // One corrupt row must not hide every other issue
                Err(e) => tracing::warn!("skipping issue in listing: {}", e),
            }
        }
        Ok(issues)
    }

    /// Update issue status.
    pub fn update_issue_status(&mut self, id: &str, status: Status) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE issues SET status = ?1, updated_at = ?2 WHERE id = ?3",
            params![status.as_str(), Utc::now().to_rfc3339(), id],
        )?;

        if affected == 0 {
            return Err(Error::IssueNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Assign an issue to a staff member.
    ///
    /// Active issues move to `pending`; overdue and closed issues keep their status.
    pub fn assign_issue(&mut self, id: &str, assignee: &str) -> Result<Issue> {
        let affected = self.conn.execute(
            "UPDATE issues
             SET assigned_to = ?1,
                 status = CASE WHEN lower(status) IN ('overdue', 'closed') THEN status ELSE 'pending' END,
                 updated_at = ?2
             WHERE id = ?3",
            params![assignee, Utc::now().to_rfc3339(), id],
        )?;

        if affected == 0 {
            return Err(Error::IssueNotFound(id.to_string()));
        }
        self.get_issue(id)
    }
}

impl IssueStore for Database {
    fn find_non_terminal_issues(&self) -> Result<Vec<IssueRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, created_at, status, priority FROM issues
             WHERE lower(status) NOT IN ('overdue', 'closed')
             ORDER BY created_at, id",
        )?;

        let records = stmt
            .query_map([], |row| {
                Ok(IssueRecord {
                    id: row.get(0)?,
                    created_at: row.get(1)?,
                    status: row.get(2)?,
                    priority: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn find_issue_by_id(&self, id: &str) -> Result<Issue> {
        self.get_issue(id)
    }

    fn bulk_set_status(&mut self, updates: &[StatusUpdate]) -> Result<usize> {
        let now = Utc::now().to_rfc3339();
        let mut stmt = self.conn.prepare_cached(
            "UPDATE issues SET status = ?1, updated_at = ?2
             WHERE id = ?3 AND lower(status) = ?4",
        )?;

        // No enclosing transaction: each row commits on its own
        let mut modified = 0;
        for update in updates {
            modified += stmt.execute(params![
                update.status.as_str(),
                now,
                update.id,
                update.expected.as_str(),
            ])?;
        }
        Ok(modified)
    }

    fn set_status(&mut self, id: &str, status: Status) -> Result<Issue> {
        self.update_issue_status(id, status)?;
        self.get_issue(id)
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
