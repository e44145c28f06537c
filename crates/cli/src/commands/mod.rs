// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod daemon;
pub mod due;
pub mod lifecycle;
pub mod list;
pub mod new;
pub mod show;
pub mod sweep;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use dd_core::{Config, Database};

use crate::error::Result;

/// Helper to open the database in the state directory.
pub fn open_db() -> Result<(Database, Config, PathBuf)> {
    let state_dir = dd_core::config::state_dir();
    let config = Config::load(&state_dir)?;
    let db = Database::open(&dd_core::config::db_path(&state_dir))?;
    Ok((db, config, state_dir))
}

/// The evaluation instant: the explicit override, or the current time.
pub(crate) fn resolve_now(now: Option<DateTime<Utc>>) -> DateTime<Utc> {
    now.unwrap_or_else(Utc::now)
}
