// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! IPC client for communicating with the duedeskd daemon.

use std::os::unix::net::UnixStream;
use std::path::Path;
use std::time::Duration;

use dd_core::Issue;
use dd_ipc::{framing, DaemonRequest, DaemonResponse, DaemonStatus, SweepSummary};

use crate::error::{Error, Result};

/// Timeout for requests that do not wait on a sweep.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// A client connection to the daemon.
pub struct DaemonClient {
    stream: UnixStream,
}

impl DaemonClient {
    /// Connect to the daemon at the given socket path.
    ///
    /// `timeout` bounds each read and write on the connection.
    pub fn connect(socket_path: &Path, timeout: Duration) -> Result<Self> {
        let stream = UnixStream::connect(socket_path)
            .map_err(|e| Error::Daemon(format!("failed to connect to daemon: {}", e)))?;

        stream
            .set_read_timeout(Some(timeout))
            .map_err(|e| Error::Daemon(format!("failed to set read timeout: {}", e)))?;
        stream
            .set_write_timeout(Some(timeout))
            .map_err(|e| Error::Daemon(format!("failed to set write timeout: {}", e)))?;

        Ok(DaemonClient { stream })
    }

    /// Send a request and receive a response.
    fn request(&mut self, request: DaemonRequest) -> Result<DaemonResponse> {
        framing::write_request(&mut self.stream, &request)?;
        Ok(framing::read_response(&mut self.stream)?)
    }

    pub fn status(&mut self) -> Result<DaemonStatus> {
        match self.request(DaemonRequest::Status)? {
            DaemonResponse::Status(status) => Ok(status),
            other => Err(unexpected(other)),
        }
    }

    pub fn shutdown(&mut self) -> Result<()> {
        match self.request(DaemonRequest::Shutdown)? {
            DaemonResponse::ShuttingDown => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Run a sweep in the daemon and return its summary.
    pub fn sweep(&mut self) -> Result<SweepSummary> {
        match self.request(DaemonRequest::Sweep)? {
            DaemonResponse::Swept(summary) => Ok(summary),
            other => Err(unexpected(other)),
        }
    }

    /// Check a single issue in the daemon and return it as stored afterwards.
    pub fn check(&mut self, id: &str) -> Result<Issue> {
        match self.request(DaemonRequest::Check { id: id.to_string() })? {
            DaemonResponse::Checked { issue } => Ok(issue),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(response: DaemonResponse) -> Error {
    match response {
        DaemonResponse::Error { message } => Error::Daemon(message),
        DaemonResponse::NotFound { id } => Error::IssueNotFound(id),
        other => Error::Daemon(format!("unexpected response: {:?}", other)),
    }
}
