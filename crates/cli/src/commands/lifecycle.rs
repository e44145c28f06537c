// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use dd_core::{Database, Issue, IssueStore, Status};

use super::open_db;
use crate::error::{Error, Result};

pub fn assign(id: &str, assignee: &str) -> Result<()> {
    let (mut db, _, _) = open_db()?;
    let issue = assign_impl(&mut db, id, assignee)?;
    println!("Assigned {} to {} ({})", issue.id, assignee, issue.status);
    Ok(())
}

/// Internal implementation that accepts db for testing.
///
/// Active issues move to `pending`. Overdue issues stay overdue.
pub(crate) fn assign_impl(db: &mut Database, id: &str, assignee: &str) -> Result<Issue> {
    let assignee = assignee.trim();
    if assignee.is_empty() {
        return Err(Error::FieldEmpty { field: "assignee" });
    }

    let issue = db.get_issue(id)?;
    if issue.status == Status::Closed {
        return Err(Error::TerminalIssue {
            action: "assign",
            id: issue.id,
            status: issue.status.to_string(),
        });
    }

    Ok(db.assign_issue(id, assignee)?)
}

pub fn close(id: &str) -> Result<()> {
    let (mut db, _, _) = open_db()?;
    let issue = close_impl(&mut db, id)?;
    println!("Closed {}", issue.id);
    Ok(())
}

/// Internal implementation that accepts db for testing.
pub(crate) fn close_impl(db: &mut Database, id: &str) -> Result<Issue> {
    let issue = db.get_issue(id)?;
    if issue.status == Status::Closed {
        return Err(Error::TerminalIssue {
            action: "close",
            id: issue.id,
            status: issue.status.to_string(),
        });
    }
    Ok(db.set_status(id, Status::Closed)?)
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
