// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SLA evaluation: priority windows, due dates, and the overdue verdict.
//!
//! The due date is a pure function of `created_at` and the priority captured
//! at creation. The issue's current status only decides whether a transition
//! is still wanted, never how long the window is, so two evaluators racing on
//! the same issue at the same `now` always agree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::add_working_days;
use crate::issue::{Issue, Priority, Status};

/// Default business-day window for urgent issues.
pub const DEFAULT_URGENT_DAYS: u32 = 5;
/// Default business-day window for every other issue.
pub const DEFAULT_NORMAL_DAYS: u32 = 10;
/// Largest window a policy may configure, about fourteen years of business days.
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// Business days allowed before an issue becomes overdue, per priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaPolicy {
    pub urgent_days: u32,
    pub normal_days: u32,
}

impl Default for SlaPolicy {
    fn default() -> Self {
        SlaPolicy {
            urgent_days: DEFAULT_URGENT_DAYS,
            normal_days: DEFAULT_NORMAL_DAYS,
        }
    }
}

/// The fields the evaluator reads from an issue.
///
/// Implemented for [`Issue`] and for the sweeper's validated projection.
pub trait SlaSubject {
    fn created_at(&self) -> DateTime<Utc>;
    fn priority(&self) -> Priority;
    fn status(&self) -> Status;
}

impl SlaSubject for Issue {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn status(&self) -> Status {
        self.status
    }
}

impl SlaPolicy {
    /// Business days allowed for the given priority.
    pub fn allowed_days(&self, priority: Priority) -> u32 {
        match priority {
            Priority::Urgent => self.urgent_days,
            Priority::Normal => self.normal_days,
        }
    }

    /// When the issue's SLA window closes.
    pub fn due_date<S: SlaSubject + ?Sized>(&self, issue: &S) -> DateTime<Utc> {
        add_working_days(issue.created_at(), self.allowed_days(issue.priority()))
    }

    /// True once `now` is strictly past the due date and the issue is not closed.
    pub fn is_overdue<S: SlaSubject + ?Sized>(&self, issue: &S, now: DateTime<Utc>) -> bool {
        issue.status() != Status::Closed && now > self.due_date(issue)
    }

    /// True if the sweeper should move the issue to `Overdue`.
    ///
    /// Issues already in a terminal state (closed or overdue) are left alone.
    pub fn needs_transition<S: SlaSubject + ?Sized>(&self, issue: &S, now: DateTime<Utc>) -> bool {
        issue.status().is_active() && self.is_overdue(issue, now)
    }
}

#[cfg(test)]
#[path = "sla_tests.rs"]
mod tests;
