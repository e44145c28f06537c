// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Periodic overdue sweeping.
//!
//! A dedicated thread wakes on wall-clock multiples of the configured
//! interval (the top of every hour by default) and runs one sweep pass on its
//! own connection. Passes are serialized through [`SharedState`]: a tick or
//! request that finds a pass already in flight is skipped, not queued. Each
//! pass runs under a [`Watchdog`] that interrupts the connection once the
//! timeout elapses.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use dd_core::{sweep_all, Database, SlaPolicy};
use dd_ipc::{SweepOutcome, SweepSummary};
use rusqlite::InterruptHandle;

/// State shared between the scheduler thread and the request loop.
#[derive(Default)]
pub struct SharedState {
    in_flight: AtomicBool,
    last_sweep: Mutex<Option<SweepOutcome>>,
}

/// Marks a sweep as running until dropped.
pub struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl SharedState {
    /// Claim the sweep slot, or `None` if a pass is already running.
    pub fn try_begin(&self) -> Option<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight {
                flag: &self.in_flight,
            })
    }

    pub fn record(&self, outcome: SweepOutcome) {
        *self.slot() = Some(outcome);
    }

    pub fn last_sweep(&self) -> Option<SweepOutcome> {
        self.slot().clone()
    }

    fn slot(&self) -> MutexGuard<'_, Option<SweepOutcome>> {
        // A panicked writer leaves a complete value behind; keep using it
        match self.last_sweep.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Interrupts a connection if a pass outlives its budget.
pub struct Watchdog {
    disarm: Sender<()>,
    thread: JoinHandle<bool>,
}

impl Watchdog {
    pub fn arm(handle: InterruptHandle, timeout: Duration) -> std::io::Result<Self> {
        let (disarm, rx) = mpsc::channel::<()>();
        let thread = thread::Builder::new()
            .name("sweep-watchdog".to_string())
            .spawn(move || match rx.recv_timeout(timeout) {
                Err(RecvTimeoutError::Timeout) => {
                    handle.interrupt();
                    true
                }
                _ => false,
            })?;
        Ok(Watchdog { disarm, thread })
    }

    /// Stop watching. Returns true if the watchdog had already fired.
    pub fn disarm(self) -> bool {
        let _ = self.disarm.send(());
        self.thread.join().unwrap_or(false)
    }
}

/// Runs sweep passes with the configured policy and budget.
pub struct SweepRunner {
    shared: Arc<SharedState>,
    policy: SlaPolicy,
    timeout: Duration,
}

impl SweepRunner {
    pub fn new(shared: Arc<SharedState>, policy: SlaPolicy, timeout: Duration) -> Self {
        SweepRunner {
            shared,
            policy,
            timeout,
        }
    }

    pub fn shared(&self) -> &SharedState {
        &self.shared
    }

    /// Run one pass at `now`. Returns `None` if another pass holds the slot.
    pub fn run(&self, db: &mut Database, now: DateTime<Utc>) -> Option<SweepOutcome> {
        let _in_flight = self.shared.try_begin()?;
        let started = Instant::now();

        let watchdog = match Watchdog::arm(db.interrupt_handle(), self.timeout) {
            Ok(w) => Some(w),
            Err(e) => {
                tracing::warn!("failed to start sweep watchdog, running unbounded: {}", e);
                None
            }
        };
        let result = sweep_all(db, &self.policy, now);
        let timed_out = watchdog.map(Watchdog::disarm).unwrap_or(false);

        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let outcome = match result {
            Ok(report) => {
                tracing::info!(
                    "sweep complete: {} transitioned, {} evaluated, {} invalid in {}ms",
                    report.transitioned,
                    report.evaluated,
                    report.invalid.len(),
                    duration_ms
                );
                SweepOutcome::Completed(SweepSummary::from_report(&report, Utc::now(), duration_ms))
            }
            Err(e) => {
                let message = if timed_out {
                    format!("timed out after {}s: {}", self.timeout.as_secs(), e)
                } else {
                    e.to_string()
                };
                tracing::error!("sweep failed: {}", message);
                SweepOutcome::Failed {
                    at: Utc::now(),
                    message,
                }
            }
        };

        self.shared.record(outcome.clone());
        Some(outcome)
    }
}

/// The first wall-clock tick strictly after `now`.
///
/// Ticks fall on multiples of `interval_secs` since the Unix epoch, so an
/// hourly interval fires at the top of each hour.
pub fn next_tick(now: DateTime<Utc>, interval_secs: u64) -> DateTime<Utc> {
    let interval = i64::try_from(interval_secs.max(1)).unwrap_or(i64::MAX);
    let next = now
        .timestamp()
        .div_euclid(interval)
        .saturating_add(1)
        .saturating_mul(interval);
    DateTime::from_timestamp(next, 0).unwrap_or(now)
}

/// Open the scheduler's connection. A failure is recorded as a failed pass
/// and retried on the next tick.
fn open_for_sweep(db_path: &Path, shared: &SharedState) -> Option<Database> {
    match Database::open(db_path) {
        Ok(db) => Some(db),
        Err(e) => {
            let message = format!("cannot open {}: {}", db_path.display(), e);
            tracing::error!("sweep failed: {}", message);
            shared.record(SweepOutcome::Failed {
                at: Utc::now(),
                message,
            });
            None
        }
    }
}

/// Handle to the running scheduler thread.
pub struct Scheduler {
    stop: Sender<()>,
    thread: JoinHandle<()>,
}

impl Scheduler {
    /// Start the scheduler. It sweeps once immediately, then on every tick.
    pub fn spawn(
        db_path: PathBuf,
        runner: Arc<SweepRunner>,
        interval_secs: u64,
    ) -> std::io::Result<Self> {
        let (stop, stop_rx) = mpsc::channel::<()>();
        let thread = thread::Builder::new()
            .name("sweep-scheduler".to_string())
            .spawn(move || {
                let mut db: Option<Database> = None;

                loop {
                    if db.is_none() {
                        db = open_for_sweep(&db_path, runner.shared());
                    }
                    if let Some(db) = db.as_mut() {
                        if runner.run(db, Utc::now()).is_none() {
                            tracing::warn!("previous sweep still running, skipping tick");
                        }
                    }

                    let now = Utc::now();
                    let tick = next_tick(now, interval_secs);
                    let wait = (tick - now).to_std().unwrap_or(Duration::ZERO);
                    tracing::debug!("next sweep at {}", tick.to_rfc3339());

                    match stop_rx.recv_timeout(wait) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        _ => break,
                    }
                }
                tracing::info!("scheduler stopped");
            })?;
        Ok(Scheduler { stop, thread })
    }

    /// Signal the thread and wait for the current pass to finish.
    pub fn stop(self) {
        let _ = self.stop.send(());
        let _ = self.thread.join();
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
