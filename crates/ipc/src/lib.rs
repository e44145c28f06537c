// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared IPC protocol for CLI-daemon communication.
//!
//! This crate defines the message types and framing protocol used between
//! the `duedesk` CLI and the `duedeskd` daemon. Messages are serialized as
//! JSON with length-prefixed framing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use dd_core::{Issue, SweepReport};

/// Request sent from CLI to daemon.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum DaemonRequest {
    /// Get daemon status.
    Status,
    /// Graceful shutdown.
    Shutdown,
    /// Ping to check if daemon is alive.
    Ping,
    /// Version handshake request.
    Hello { version: String },
    /// Run a bulk overdue sweep now.
    Sweep,
    /// Evaluate one issue and mark it overdue if past due.
    Check { id: String },
}

/// Response sent from daemon to CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum DaemonResponse {
    /// Status response.
    Status(DaemonStatus),
    /// Shutdown acknowledged.
    ShuttingDown,
    /// Pong response.
    Pong,
    /// Error response.
    Error { message: String },
    /// Version handshake response.
    Hello { version: String },
    /// Bulk sweep finished.
    Swept(SweepSummary),
    /// Single check finished; the issue as stored afterwards.
    Checked { issue: Issue },
    /// The requested issue does not exist.
    NotFound { id: String },
}

/// Condensed result of one sweep pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SweepSummary {
    /// When the pass finished.
    pub finished_at: DateTime<Utc>,
    /// Issues moved to overdue.
    pub transitioned: usize,
    /// Issues evaluated.
    pub evaluated: usize,
    /// Records skipped as invalid.
    pub invalid: usize,
    /// Wall time of the pass in milliseconds.
    pub duration_ms: u64,
}

impl SweepSummary {
    /// Summarize a sweep report.
    pub fn from_report(report: &SweepReport, finished_at: DateTime<Utc>, duration_ms: u64) -> Self {
        SweepSummary {
            finished_at,
            transitioned: report.transitioned,
            evaluated: report.evaluated,
            invalid: report.invalid.len(),
            duration_ms,
        }
    }
}

/// How the most recent sweep ended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SweepOutcome {
    /// The pass wrote its transitions.
    Completed(SweepSummary),
    /// The pass aborted (store failure or timeout).
    Failed { at: DateTime<Utc>, message: String },
}

/// Daemon status information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaemonStatus {
    /// Current daemon PID.
    pub pid: u32,
    /// Uptime in seconds.
    pub uptime_secs: u64,
    /// Seconds between scheduled sweeps.
    pub interval_secs: u64,
    /// Result of the most recent sweep, if any has run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sweep: Option<SweepOutcome>,
}

impl DaemonStatus {
    /// Create a new status with the given parameters.
    pub fn new(pid: u32, uptime_secs: u64, interval_secs: u64) -> Self {
        Self {
            pid,
            uptime_secs,
            interval_secs,
            last_sweep: None,
        }
    }

    /// Attach the most recent sweep outcome (builder pattern).
    pub fn with_last_sweep(mut self, last_sweep: Option<SweepOutcome>) -> Self {
        self.last_sweep = last_sweep;
        self
    }
}

// ============================================================================
// Message framing
// ============================================================================

/// IPC message framing.
///
/// Messages are framed as:
/// - 4 bytes: message length (big-endian u32)
/// - N bytes: JSON-encoded message
pub mod framing {
    use std::io::{Read, Write};

    use serde::de::DeserializeOwned;
    use serde::Serialize;

    use super::{DaemonRequest, DaemonResponse};

    /// Maximum message size (1MB) to prevent malformed messages from causing hangs.
    const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

    /// Write a serializable message to the given writer.
    pub fn write_message<W: Write, T: Serialize>(
        writer: &mut W,
        message: &T,
    ) -> std::io::Result<()> {
        let json = serde_json::to_vec(message)
            .map_err(|e| std::io::Error::other(format!("serialize error: {}", e)))?;
        let len =
            u32::try_from(json.len()).map_err(|_| std::io::Error::other("message too large"))?;
        writer.write_all(&len.to_be_bytes())?;
        writer.write_all(&json)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a deserializable message from the given reader.
    pub fn read_message<R: Read, T: DeserializeOwned>(reader: &mut R) -> std::io::Result<T> {
        let mut len_buf = [0u8; 4];
        reader.read_exact(&mut len_buf)?;
        let len = u32::from_be_bytes(len_buf) as usize;

        if len > MAX_MESSAGE_SIZE {
            return Err(std::io::Error::other(format!(
                "message too large: {} bytes (max {})",
                len, MAX_MESSAGE_SIZE
            )));
        }

        let mut buf = vec![0u8; len];
        reader.read_exact(&mut buf)?;

        serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::other(format!("deserialize error: {}", e)))
    }

    /// Write a request (client side).
    pub fn write_request<W: Write>(writer: &mut W, request: &DaemonRequest) -> std::io::Result<()> {
        write_message(writer, request)
    }

    /// Read a request (daemon side).
    pub fn read_request<R: Read>(reader: &mut R) -> std::io::Result<DaemonRequest> {
        read_message(reader)
    }

    /// Write a response (daemon side).
    pub fn write_response<W: Write>(
        writer: &mut W,
        response: &DaemonResponse,
    ) -> std::io::Result<()> {
        write_message(writer, response)
    }

    /// Read a response (client side).
    pub fn read_response<R: Read>(reader: &mut R) -> std::io::Result<DaemonResponse> {
        read_message(reader)
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
