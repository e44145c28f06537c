// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::TimeZone;
use dd_core::Priority;
use yare::parameterized;

fn at(d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, d, h, 0, 0).unwrap()
}

/// Urgent issue created Monday 2025-03-03 09:00, due Monday 2025-03-10 09:00.
fn urgent_issue() -> Issue {
    Issue::new(
        "dd-1234abcd".to_string(),
        "Refund not received".to_string(),
        "Finance".to_string(),
        "alice".to_string(),
        Priority::Urgent,
        at(3, 9),
    )
}

#[test]
fn test_deadline_compute() {
    let deadline = Deadline::compute(&SlaPolicy::default(), &urgent_issue(), at(5, 12));
    assert_eq!(deadline.due_at, at(10, 9));
    assert_eq!(deadline.business_days_left, 3);
    assert!(!deadline.overdue);
}

#[parameterized(
    wednesday_before = { 5, 12, "due in 3 business days" },
    friday_before = { 7, 12, "due in 1 business day" },
    due_day_morning = { 10, 8, "due today" },
    due_day_after = { 10, 10, "overdue" },
    two_days_late = { 12, 12, "overdue by 2 business days" },
)]
fn test_due_phrase(day: u32, hour: u32, expected: &str) {
    let issue = urgent_issue();
    let deadline = Deadline::compute(&SlaPolicy::default(), &issue, at(day, hour));
    assert_eq!(due_phrase(issue.status, &deadline), expected);
}

#[test]
fn test_due_phrase_closed() {
    let mut issue = urgent_issue();
    issue.status = Status::Closed;
    let deadline = Deadline::compute(&SlaPolicy::default(), &issue, at(12, 12));
    assert!(!deadline.overdue);
    assert_eq!(due_phrase(issue.status, &deadline), "closed");
}

#[test]
fn test_format_issue_line() {
    let issue = urgent_issue();
    let deadline = Deadline::compute(&SlaPolicy::default(), &issue, at(5, 12));
    let line = format_issue_line(&issue, &deadline);
    assert_eq!(
        line,
        "- [urgent] (urgent) dd-1234abcd: Refund not received (due in 3 business days)"
    );
}

#[test]
fn test_format_issue_line_with_assignee() {
    let mut issue = urgent_issue();
    issue.status = Status::Pending;
    issue.assigned_to = Some("bob".to_string());
    let deadline = Deadline::compute(&SlaPolicy::default(), &issue, at(5, 12));
    assert!(format_issue_line(&issue, &deadline).contains("(pending, @bob)"));
}

#[test]
fn test_format_issue_details() {
    let issue = urgent_issue();
    let deadline = Deadline::compute(&SlaPolicy::default(), &issue, at(12, 12));
    let details = format_issue_details(&issue, &deadline);
    assert!(details.starts_with("[urgent] dd-1234abcd"));
    assert!(details.contains("Subject: Refund not received"));
    assert!(details.contains("Category: Finance"));
    assert!(details.contains("Submitted by: alice"));
    assert!(!details.contains("Assigned to"));
    assert!(details.contains("Due: 2025-03-10 09:00 (overdue by 2 business days)"));
}

#[test]
fn test_format_due_verdict() {
    let issue = urgent_issue();
    let deadline = Deadline::compute(&SlaPolicy::default(), &issue, at(10, 8));
    assert_eq!(
        format_due_verdict(&issue, &deadline),
        "dd-1234abcd due 2025-03-10T09:00:00+00:00: due today"
    );
}

#[test]
fn test_format_sweep_report() {
    let report = SweepReport {
        now: at(12, 12),
        evaluated: 4,
        staged: 1,
        transitioned: 1,
        invalid: vec![],
    };
    assert_eq!(format_sweep_report(&report), "Marked 1 issue overdue (4 evaluated)");
}

#[test]
fn test_format_sweep_report_lists_invalid() {
    let report = SweepReport {
        now: at(12, 12),
        evaluated: 2,
        staged: 2,
        transitioned: 2,
        invalid: vec!["dd-bad1".to_string(), "dd-bad2".to_string()],
    };
    let text = format_sweep_report(&report);
    assert!(text.contains("Marked 2 issues overdue"));
    assert!(text.contains("Skipped 2 issues with invalid data: dd-bad1, dd-bad2"));
}
