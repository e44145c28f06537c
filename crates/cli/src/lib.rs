// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ddrs - Library behind the `duedesk` CLI.
//!
//! Issues are stored in a SQLite database in the state directory
//! (`~/.local/state/duedesk/issues.db` by default). Each issue has a
//! business-day SLA window fixed by its priority at creation: urgent issues
//! are due 5 business days after creation, all others 10. A sweep marks
//! every past-due issue overdue; it runs hourly in `duedeskd` or on demand.
//!
//! # Main Components
//!
//! - [`Cli`] / [`Command`] - command-line definition
//! - [`run`] - command dispatch
//! - [`id`] - issue ID generation
//! - [`Error`] - error type for all commands

mod cli;
mod commands;
mod daemon;
mod display;

pub mod error;
pub mod id;

pub use cli::{Cli, Command, DaemonCommand, OutputFormat};
pub use error::{Error, Result};

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::New {
            subject,
            category,
            submitted_by,
            urgent,
            created_at,
            prefix,
            output,
        } => commands::new::run(
            commands::new::NewIssue {
                subject,
                category,
                submitted_by,
                urgent,
                created_at,
                prefix,
            },
            output,
        ),
        Command::List {
            status,
            overdue,
            output,
        } => commands::list::run(status, overdue, output),
        Command::Show { id, output } => commands::show::run(&id, output),
        Command::Assign { id, assignee } => commands::lifecycle::assign(&id, &assignee),
        Command::Close { id } => commands::lifecycle::close(&id),
        Command::Due { id, at } => commands::due::run(&id, at),
        Command::Sweep { now, output } => commands::sweep::sweep(now, output),
        Command::Check { id, now, output } => commands::sweep::check(&id, now, output),
        Command::Daemon(cmd) => match cmd {
            DaemonCommand::Status => commands::daemon::status(),
            DaemonCommand::Stop => commands::daemon::stop(),
            DaemonCommand::Start => commands::daemon::start(),
            DaemonCommand::Sweep => commands::daemon::sweep(),
            DaemonCommand::Check { id } => commands::daemon::check(&id),
            DaemonCommand::Logs { follow } => commands::daemon::logs(follow),
        },
    }
}
