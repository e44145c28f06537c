// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Overdue sweeper.
//!
//! Two entry points share one verdict:
//! - [`sweep_all`] evaluates every non-terminal issue and writes all
//!   transitions in one bulk call (the periodic trigger).
//! - [`check_one`] evaluates a single issue on demand and returns the
//!   resulting record.
//!
//! Both are safe to run concurrently with each other: the verdict depends only
//! on `created_at`, the priority at creation, and `now`, and every write is a
//! conditional update on the status that was read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::issue::Issue;
use crate::sla::SlaPolicy;
use crate::store::{IssueStore, StatusUpdate};

/// Outcome of one bulk sweep pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
    /// The instant issues were evaluated against.
    pub now: DateTime<Utc>,
    /// Records that validated and were evaluated.
    pub evaluated: usize,
    /// Transitions staged for the bulk write.
    pub staged: usize,
    /// Records the store actually modified.
    pub transitioned: usize,
    /// IDs of records skipped because they failed validation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invalid: Vec<String>,
}

impl SweepReport {
    fn new(now: DateTime<Utc>) -> Self {
        SweepReport {
            now,
            evaluated: 0,
            staged: 0,
            transitioned: 0,
            invalid: Vec::new(),
        }
    }
}

/// Transition every past-due, non-terminal issue to `Overdue`.
///
/// Invalid records are logged and skipped. A store failure during the fetch
/// or the bulk write fails the whole pass; rows already written stay written.
pub fn sweep_all<S>(store: &mut S, policy: &SlaPolicy, now: DateTime<Utc>) -> Result<SweepReport>
where
    S: IssueStore + ?Sized,
{
    let records = store.find_non_terminal_issues()?;
    let mut report = SweepReport::new(now);
    let mut staged = Vec::new();

    for record in &records {
        let tracked = match record.validate() {
            Ok(tracked) => tracked,
            Err(e) => {
                tracing::warn!("skipping issue {}: {}", record.id, e);
                report.invalid.push(record.id.clone());
                continue;
            }
        };

        report.evaluated += 1;
        if policy.needs_transition(&tracked, now) {
            staged.push(StatusUpdate::overdue(&tracked.id, tracked.status));
        }
    }

    report.staged = staged.len();
    if !staged.is_empty() {
        report.transitioned = store.bulk_set_status(&staged)?;
    }

    tracing::debug!(
        "sweep at {}: evaluated={} staged={} transitioned={} invalid={}",
        now.to_rfc3339(),
        report.evaluated,
        report.staged,
        report.transitioned,
        report.invalid.len()
    );

    Ok(report)
}

/// Evaluate one issue and persist its transition if it is past due.
///
/// Returns the issue as stored afterwards, which may reflect a concurrent
/// writer if the conditional update lost a race.
pub fn check_one<S>(store: &mut S, policy: &SlaPolicy, id: &str, now: DateTime<Utc>) -> Result<Issue>
where
    S: IssueStore + ?Sized,
{
    let issue = store.find_issue_by_id(id)?;
    if !policy.needs_transition(&issue, now) {
        return Ok(issue);
    }

    let modified = store.bulk_set_status(&[StatusUpdate::overdue(&issue.id, issue.status)])?;
    if modified == 0 {
        tracing::debug!("issue {} changed before it could be marked overdue", issue.id);
    } else {
        tracing::info!("issue {} marked overdue", issue.id);
    }

    store.find_issue_by_id(id)
}

#[cfg(test)]
#[path = "sweep_tests.rs"]
mod tests;
