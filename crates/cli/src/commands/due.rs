// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use dd_core::{Database, SlaPolicy};

use super::{open_db, resolve_now};
use crate::display::{format_due_verdict, Deadline};
use crate::error::Result;

pub fn run(id: &str, at: Option<DateTime<Utc>>) -> Result<()> {
    let (db, config, _) = open_db()?;
    println!("{}", run_impl(&db, &config.sla, id, resolve_now(at))?);
    Ok(())
}

/// Read-only: reports the verdict without changing the stored status.
pub(crate) fn run_impl(
    db: &Database,
    policy: &SlaPolicy,
    id: &str,
    at: DateTime<Utc>,
) -> Result<String> {
    let issue = db.get_issue(id)?;
    let deadline = Deadline::compute(policy, &issue, at);
    Ok(format_due_verdict(&issue, &deadline))
}

#[cfg(test)]
#[path = "due_tests.rs"]
mod tests;
