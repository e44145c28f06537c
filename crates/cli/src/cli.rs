// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use dd_core::Status;

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Parse an RFC 3339 timestamp into UTC.
pub(crate) fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected RFC 3339 (e.g. 2025-03-03T09:00:00Z): {e}"))
}

fn parse_status(s: &str) -> Result<Status, String> {
    s.parse::<Status>().map_err(|e| e.to_string())
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    #[value(alias = "ids")]
    Id,
}

#[derive(Parser)]
#[command(name = "duedesk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Business-day SLA tracking for help desk issues")]
#[command(
    long_about = "Business-day SLA tracking for help desk issues.\n\n\
    Urgent issues are due 5 business days after creation, all others 10. \
    Issues past due are marked overdue by a sweep, run on demand or hourly by duedeskd."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new issue
    #[command(after_help = "\
Examples:
  duedesk new \"Refund not received\"                Normal issue, due in 10 business days
  duedesk new \"Server down\" --urgent               Urgent issue, due in 5 business days
  duedesk new \"VPN access\" -c IT --by alice        With category and submitter
  duedesk new \"Backdated\" --created-at 2025-03-03T09:00:00Z
  duedesk new \"Task\" -o id                         Output only the ID")]
    New {
        /// Issue subject
        #[arg(value_parser = non_empty_string)]
        subject: String,

        /// Category (e.g. Finance, IT)
        #[arg(long, short = 'c', default_value = "General", value_parser = non_empty_string)]
        category: String,

        /// Submitter
        #[arg(long = "by", short = 'b', default_value = "anonymous", value_parser = non_empty_string)]
        submitted_by: String,

        /// Mark as urgent (5 business day window instead of 10)
        #[arg(long, short = 'u')]
        urgent: bool,

        /// Creation timestamp (RFC 3339), defaults to now
        #[arg(long = "created-at", value_parser = parse_timestamp)]
        created_at: Option<DateTime<Utc>>,

        /// ID prefix
        #[arg(long, short = 'p')]
        prefix: Option<String>,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List issues, newest first
    List {
        /// Only issues with this status
        #[arg(long, short = 's', value_parser = parse_status)]
        status: Option<Status>,

        /// Only issues past their due date that are not closed
        #[arg(long)]
        overdue: bool,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Show an issue with its due date
    Show {
        /// Issue ID
        id: String,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Assign an issue (moves it to pending)
    Assign {
        /// Issue ID
        id: String,

        /// Assignee
        #[arg(value_parser = non_empty_string)]
        assignee: String,
    },

    /// Close an issue
    Close {
        /// Issue ID
        id: String,
    },

    /// Print an issue's due date and whether it is overdue
    Due {
        /// Issue ID
        id: String,

        /// Evaluate at this instant (RFC 3339) instead of now
        #[arg(long, value_parser = parse_timestamp)]
        at: Option<DateTime<Utc>>,
    },

    /// Mark every past-due issue overdue
    Sweep {
        /// Sweep as of this instant (RFC 3339) instead of now
        #[arg(long, value_parser = parse_timestamp)]
        now: Option<DateTime<Utc>>,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Evaluate one issue and mark it overdue if past due
    Check {
        /// Issue ID
        id: String,

        /// Evaluate at this instant (RFC 3339) instead of now
        #[arg(long, value_parser = parse_timestamp)]
        now: Option<DateTime<Utc>>,

        /// Output format
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Manage the duedeskd sweep daemon
    #[command(subcommand)]
    Daemon(DaemonCommand),
}

/// Daemon management commands.
#[derive(Subcommand)]
pub enum DaemonCommand {
    /// Show daemon status and the last sweep
    Status,
    /// Stop the daemon
    Stop,
    /// Start the daemon
    Start,
    /// Ask the daemon to sweep now
    Sweep,
    /// Ask the daemon to check one issue
    Check {
        /// Issue ID
        id: String,
    },
    /// View daemon logs
    Logs {
        /// Follow log output (tail -f)
        #[arg(long)]
        follow: bool,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
