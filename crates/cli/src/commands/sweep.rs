// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-process sweep and single-issue check.
//!
//! These run the same core operations as duedeskd against the local
//! database, without a daemon.

use chrono::{DateTime, Utc};
use dd_core::{check_one, sweep_all, Database, SlaPolicy, SweepReport};

use super::{open_db, resolve_now};
use crate::cli::OutputFormat;
use crate::display::{due_phrase, format_sweep_report, Deadline, IssueJson};
use crate::error::Result;

pub fn sweep(now: Option<DateTime<Utc>>, output: OutputFormat) -> Result<()> {
    let (mut db, config, _) = open_db()?;
    let report = sweep_impl(&mut db, &config.sla, resolve_now(now))?;
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Id => println!("{}", report.transitioned),
        OutputFormat::Text => println!("{}", format_sweep_report(&report)),
    }
    Ok(())
}

/// Internal implementation that accepts db for testing.
pub(crate) fn sweep_impl(
    db: &mut Database,
    policy: &SlaPolicy,
    now: DateTime<Utc>,
) -> Result<SweepReport> {
    Ok(sweep_all(db, policy, now)?)
}

pub fn check(id: &str, now: Option<DateTime<Utc>>, output: OutputFormat) -> Result<()> {
    let (mut db, config, _) = open_db()?;
    println!(
        "{}",
        check_impl(&mut db, &config.sla, id, resolve_now(now), output)?
    );
    Ok(())
}

/// Internal implementation that accepts db for testing.
pub(crate) fn check_impl(
    db: &mut Database,
    policy: &SlaPolicy,
    id: &str,
    now: DateTime<Utc>,
    output: OutputFormat,
) -> Result<String> {
    let issue = check_one(db, policy, id, now)?;
    let deadline = Deadline::compute(policy, &issue, now);
    match output {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&IssueJson {
            issue: &issue,
            deadline,
        })?),
        OutputFormat::Id => Ok(issue.id),
        OutputFormat::Text => Ok(format!(
            "{}: {} ({})",
            issue.id,
            issue.status,
            due_phrase(issue.status, &deadline)
        )),
    }
}

#[cfg(test)]
#[path = "sweep_tests.rs"]
mod tests;
