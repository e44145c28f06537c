// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use dd_core::{Database, SlaPolicy};

use super::open_db;
use crate::cli::OutputFormat;
use crate::display::{format_issue_details, Deadline, IssueJson};
use crate::error::Result;

pub fn run(id: &str, output: OutputFormat) -> Result<()> {
    let (db, config, _) = open_db()?;
    println!("{}", run_impl(&db, &config.sla, id, output, Utc::now())?);
    Ok(())
}

/// Internal implementation that accepts db for testing.
pub(crate) fn run_impl(
    db: &Database,
    policy: &SlaPolicy,
    id: &str,
    output: OutputFormat,
    now: DateTime<Utc>,
) -> Result<String> {
    let issue = db.get_issue(id)?;
    let deadline = Deadline::compute(policy, &issue, now);
    match output {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&IssueJson {
            issue: &issue,
            deadline,
        })?),
        OutputFormat::Id => Ok(issue.id),
        OutputFormat::Text => Ok(format_issue_details(&issue, &deadline)),
    }
}

#[cfg(test)]
#[path = "show_tests.rs"]
mod tests;
