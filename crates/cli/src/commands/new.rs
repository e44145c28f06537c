// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use dd_core::{Database, Issue, Priority, SlaPolicy};

use super::{open_db, resolve_now};
use crate::cli::OutputFormat;
use crate::display::{due_phrase, Deadline, IssueJson};
use crate::error::{Error, Result};
use crate::id::{generate_unique_id, DEFAULT_PREFIX};

/// Fields for a new issue, as given on the command line.
pub struct NewIssue {
    pub subject: String,
    pub category: String,
    pub submitted_by: String,
    pub urgent: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub prefix: Option<String>,
}

pub fn run(new: NewIssue, output: OutputFormat) -> Result<()> {
    let (db, config, _) = open_db()?;
    let issue = run_impl(&db, new)?;

    let now = Utc::now();
    let deadline = Deadline::compute(&config.sla, &issue, now);
    match output {
        OutputFormat::Id => println!("{}", issue.id),
        OutputFormat::Json => {
            let json = IssueJson {
                issue: &issue,
                deadline,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => println!("{}", created_line(&config.sla, &issue, now)),
    }
    Ok(())
}

/// Internal implementation that accepts db for testing.
pub(crate) fn run_impl(db: &Database, new: NewIssue) -> Result<Issue> {
    let subject = new.subject.trim();
    if subject.is_empty() {
        return Err(Error::FieldEmpty { field: "subject" });
    }
    let created_at = resolve_now(new.created_at);
    let prefix = new.prefix.as_deref().unwrap_or(DEFAULT_PREFIX);

    let id = generate_unique_id(prefix, subject, &new.submitted_by, &created_at, |id| {
        Ok(db.issue_exists(id)?)
    })?;

    let priority = if new.urgent {
        Priority::Urgent
    } else {
        Priority::Normal
    };
    let issue = Issue::new(
        id,
        subject.to_string(),
        new.category.trim().to_string(),
        new.submitted_by.trim().to_string(),
        priority,
        created_at,
    );
    db.create_issue(&issue)?;
    tracing::debug!("created issue {} ({})", issue.id, issue.priority);
    Ok(issue)
}

pub(crate) fn created_line(policy: &SlaPolicy, issue: &Issue, now: DateTime<Utc>) -> String {
    let deadline = Deadline::compute(policy, issue, now);
    format!(
        "Created [{}] {}: {} (due {}, {})",
        issue.priority,
        issue.id,
        issue.subject,
        deadline.due_at.format("%Y-%m-%d %H:%M"),
        due_phrase(issue.status, &deadline)
    )
}

#[cfg(test)]
#[path = "new_tests.rs"]
mod tests;
