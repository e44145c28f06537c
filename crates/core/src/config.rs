// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime configuration.
//!
//! Configuration is stored in `config.toml` inside the state directory:
//! - `[sla]`: business days allowed per priority
//! - `[sweep]`: how often the daemon sweeps and how long one pass may run
//!
//! A missing file or section falls back to defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env;
use crate::error::{Error, Result};
use crate::sla::{SlaPolicy, MAX_WINDOW_DAYS};

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DB_FILE_NAME: &str = "issues.db";
const STATE_DIR_NAME: &str = "duedesk";

/// Sweep cadence, hourly by default.
pub const DEFAULT_INTERVAL_SECS: u64 = 3600;
/// Budget for a single sweep pass.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Top-level configuration stored in `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sla: SlaPolicy,
    pub sweep: SweepConfig,
}

/// Scheduling parameters for the periodic sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Seconds between sweeps; ticks land on multiples of this since the epoch.
    pub interval_secs: u64,
    /// Seconds a sweep may run before it is interrupted.
    pub timeout_secs: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        SweepConfig {
            interval_secs: DEFAULT_INTERVAL_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl SweepConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load `config.toml` from the state directory, or defaults if absent.
    pub fn load(state_dir: &Path) -> Result<Self> {
        let path = state_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(&path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration text.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration to `config.toml` in the state directory.
    pub fn save(&self, state_dir: &Path) -> Result<()> {
        self.validate()?;
        fs::create_dir_all(state_dir)?;
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        fs::write(state_dir.join(CONFIG_FILE_NAME), content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for (key, days) in [
            ("sla.urgent_days", self.sla.urgent_days),
            ("sla.normal_days", self.sla.normal_days),
        ] {
            if days > MAX_WINDOW_DAYS {
                return Err(Error::Config(format!(
                    "{key} must be at most {MAX_WINDOW_DAYS} business days, got {days}"
                )));
            }
        }
        if self.sweep.interval_secs == 0 {
            return Err(Error::Config(
                "sweep.interval_secs must be greater than zero".to_string(),
            ));
        }
        if self.sweep.timeout_secs == 0 {
            return Err(Error::Config(
                "sweep.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Path of the issue database inside a state directory.
pub fn db_path(state_dir: &Path) -> PathBuf {
    state_dir.join(DB_FILE_NAME)
}

/// Resolve the state directory from the environment.
///
/// `DUEDESK_STATE_DIR`, then `$XDG_STATE_HOME/duedesk`, then
/// `~/.local/state/duedesk`.
pub fn state_dir() -> PathBuf {
    choose_state_dir(env::state_dir(), env::xdg_state_home(), dirs::home_dir())
}

fn choose_state_dir(
    explicit: Option<PathBuf>,
    xdg_state_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    if let Some(dir) = xdg_state_home {
        return dir.join(STATE_DIR_NAME);
    }
    home.map(|h| h.join(".local/state").join(STATE_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".local/state").join(STATE_DIR_NAME))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
