// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use dd_core::{working_days_between, Issue, SlaPolicy, Status, SweepReport};
use serde::Serialize;

/// Where an issue stands against its SLA window at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Deadline {
    pub due_at: DateTime<Utc>,
    /// Business days from `now` to the due date; negative once past it.
    pub business_days_left: i64,
    pub overdue: bool,
}

impl Deadline {
    pub fn compute(policy: &SlaPolicy, issue: &Issue, now: DateTime<Utc>) -> Self {
        let due_at = policy.due_date(issue);
        Deadline {
            due_at,
            business_days_left: working_days_between(now, due_at),
            overdue: policy.is_overdue(issue, now),
        }
    }
}

/// JSON shape shared by commands that print an issue.
#[derive(Serialize)]
pub struct IssueJson<'a> {
    #[serde(flatten)]
    pub issue: &'a Issue,
    #[serde(flatten)]
    pub deadline: Deadline,
}

fn business_days(n: i64) -> String {
    if n.abs() == 1 {
        format!("{} business day", n.abs())
    } else {
        format!("{} business days", n.abs())
    }
}

/// Short human phrase for a deadline, e.g. "due in 3 business days".
pub fn due_phrase(status: Status, deadline: &Deadline) -> String {
    if status == Status::Closed {
        return "closed".to_string();
    }
    match (deadline.overdue, deadline.business_days_left) {
        (true, n) if n < 0 => format!("overdue by {}", business_days(n)),
        (true, _) => "overdue".to_string(),
        (false, n) if n > 0 => format!("due in {}", business_days(n)),
        (false, _) => "due today".to_string(),
    }
}

/// Format a single issue line for list output.
pub fn format_issue_line(issue: &Issue, deadline: &Deadline) -> String {
    let status_display = match &issue.assigned_to {
        Some(assignee) => format!("{}, @{}", issue.status, assignee),
        None => issue.status.to_string(),
    };
    format!(
        "- [{}] ({}) {}: {} ({})",
        issue.priority,
        status_display,
        issue.id,
        issue.subject,
        due_phrase(issue.status, deadline)
    )
}

/// Format issue details for the show command.
pub fn format_issue_details(issue: &Issue, deadline: &Deadline) -> String {
    let mut output = Vec::new();

    output.push(format!("[{}] {}", issue.priority, issue.id));
    output.push(format!("Subject: {}", issue.subject));
    output.push(format!("Category: {}", issue.category));
    output.push(format!("Status: {}", issue.status));
    output.push(format!("Submitted by: {}", issue.submitted_by));
    if let Some(assignee) = &issue.assigned_to {
        output.push(format!("Assigned to: {}", assignee));
    }
    output.push(format!(
        "Created: {}",
        issue.created_at.format("%Y-%m-%d %H:%M")
    ));
    output.push(format!(
        "Updated: {}",
        issue.updated_at.format("%Y-%m-%d %H:%M")
    ));
    output.push(format!(
        "Due: {} ({})",
        deadline.due_at.format("%Y-%m-%d %H:%M"),
        due_phrase(issue.status, deadline)
    ));

    output.join("\n")
}

/// One-line verdict for the due command.
pub fn format_due_verdict(issue: &Issue, deadline: &Deadline) -> String {
    format!(
        "{} due {}: {}",
        issue.id,
        deadline.due_at.to_rfc3339(),
        due_phrase(issue.status, deadline)
    )
}

/// Summary of a sweep pass.
pub fn format_sweep_report(report: &SweepReport) -> String {
    let mut output = vec![format!(
        "Marked {} overdue ({} evaluated)",
        plural(report.transitioned, "issue"),
        report.evaluated
    )];
    if !report.invalid.is_empty() {
        output.push(format!(
            "Skipped {} with invalid data: {}",
            plural(report.invalid.len(), "issue"),
            report.invalid.join(", ")
        ));
    }
    output.join("\n")
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
