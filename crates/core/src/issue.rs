// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core issue types for the duedesk tracker.
//!
//! This module contains the fundamental data types: Issue, Status, and
//! Priority. Status is the workflow state; Priority is captured once at
//! creation and drives the SLA window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Workflow status of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Newly raised, not yet picked up. Initial state for normal issues.
    Open,
    /// Assigned and being worked on.
    Pending,
    /// Raised as urgent. Initial state for urgent issues.
    Urgent,
    /// Past its SLA due date without being closed.
    Overdue,
    /// Resolved.
    Closed,
}

impl Status {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::Pending => "pending",
            Status::Urgent => "urgent",
            Status::Overdue => "overdue",
            Status::Closed => "closed",
        }
    }

    /// Returns true if the sweeper must never move an issue out of this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Overdue | Status::Closed)
    }

    /// Returns true if this is an active state (still subject to SLA sweeping).
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Statuses the sweeper never transitions, as stored.
    pub fn terminal() -> [Status; 2] {
        [Status::Overdue, Status::Closed]
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "open" => Ok(Status::Open),
            "pending" => Ok(Status::Pending),
            "urgent" => Ok(Status::Urgent),
            "overdue" => Ok(Status::Overdue),
            "closed" => Ok(Status::Closed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// Priority class captured when the issue was raised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Normal,
    Urgent,
}

impl Priority {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Normal => "normal",
            Priority::Urgent => "urgent",
        }
    }

    /// The status a freshly raised issue of this priority starts in.
    pub fn initial_status(&self) -> Status {
        match self {
            Priority::Normal => Status::Open,
            Priority::Urgent => Status::Urgent,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Priority::Normal),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(Error::InvalidPriority(s.to_string())),
        }
    }
}

/// A tracked issue raised against the approval workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique identifier (format: `{prefix}-{hash}`).
    pub id: String,
    /// Short description of the problem.
    pub subject: String,
    /// Free-form grouping (e.g. "Technical", "Finance").
    pub category: String,
    /// Current workflow state.
    pub status: Status,
    /// Priority at creation. Never changed by workflow transitions.
    pub priority: Priority,
    /// Who raised the issue.
    pub submitted_by: String,
    /// Staff member the issue is assigned to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    /// When the issue was created.
    pub created_at: DateTime<Utc>,
    /// When the issue was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Creates a new unassigned issue in the initial status for its priority.
    pub fn new(
        id: String,
        subject: String,
        category: String,
        submitted_by: String,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Self {
        Issue {
            id,
            subject,
            category,
            status: priority.initial_status(),
            priority,
            submitted_by,
            assigned_to: None,
            created_at,
            updated_at: created_at,
        }
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
