// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use dd_core::{Database, Issue, SlaPolicy, Status};
use serde::Serialize;

use super::open_db;
use crate::cli::OutputFormat;
use crate::display::{format_issue_line, Deadline, IssueJson};
use crate::error::Result;

/// JSON output structure for the list command.
#[derive(Serialize)]
struct ListOutputJson<'a> {
    issues: Vec<IssueJson<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    filters_applied: Vec<String>,
}

pub fn run(status: Option<Status>, overdue: bool, output: OutputFormat) -> Result<()> {
    let (db, config, _) = open_db()?;
    let now = Utc::now();
    let issues = run_impl(&db, &config.sla, status, overdue, now)?;
    print!("{}", render(&config.sla, &issues, status, overdue, now, output)?);
    Ok(())
}

/// Internal implementation that accepts db for testing.
///
/// `overdue` keeps only issues past due at `now` that are not closed,
/// whether or not a sweep has marked them yet.
pub(crate) fn run_impl(
    db: &Database,
    policy: &SlaPolicy,
    status: Option<Status>,
    overdue: bool,
    now: DateTime<Utc>,
) -> Result<Vec<Issue>> {
    let mut issues = db.list_issues(status)?;
    if overdue {
        issues.retain(|issue| policy.is_overdue(issue, now));
    }
    Ok(issues)
}

fn render(
    policy: &SlaPolicy,
    issues: &[Issue],
    status: Option<Status>,
    overdue: bool,
    now: DateTime<Utc>,
    output: OutputFormat,
) -> Result<String> {
    let mut out = String::new();
    match output {
        OutputFormat::Text => {
            for issue in issues {
                let deadline = Deadline::compute(policy, issue, now);
                out.push_str(&format_issue_line(issue, &deadline));
                out.push('\n');
            }
        }
        OutputFormat::Id => {
            for issue in issues {
                out.push_str(&issue.id);
                out.push('\n');
            }
        }
        OutputFormat::Json => {
            let mut filters_applied = Vec::new();
            if let Some(status) = status {
                filters_applied.push(format!("status:{}", status));
            }
            if overdue {
                filters_applied.push("overdue".to_string());
            }
            let json = ListOutputJson {
                issues: issues
                    .iter()
                    .map(|issue| IssueJson {
                        issue,
                        deadline: Deadline::compute(policy, issue, now),
                    })
                    .collect(),
                filters_applied,
            };
            out.push_str(&serde_json::to_string_pretty(&json)?);
            out.push('\n');
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
