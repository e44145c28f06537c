// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! dd-core: Shared library for the duedesk SLA tracker
//!
//! This crate provides the issue model, business-day arithmetic, SLA
//! evaluation, the issue store, and the overdue sweeper used by both the
//! `duedesk` CLI and the `duedeskd` daemon.

pub mod calendar;
pub mod config;
pub mod db;
pub mod env;
pub mod error;
pub mod issue;
pub mod sla;
pub mod store;
pub mod sweep;

pub use calendar::{add_working_days, is_weekend, working_days_between};
pub use config::{Config, SweepConfig};
pub use db::Database;
pub use error::{Error, Result};
pub use issue::{Issue, Priority, Status};
pub use sla::{SlaPolicy, SlaSubject};
pub use store::{IssueRecord, IssueStore, StatusUpdate, TrackedIssue};
pub use sweep::{check_one, sweep_all, SweepReport};
