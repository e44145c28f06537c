// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for IPC protocol types and framing.

#![allow(clippy::unwrap_used)]

use std::io::Cursor;

use chrono::TimeZone;
use dd_core::Priority;

use super::*;
use yare::parameterized;

fn summary() -> SweepSummary {
    SweepSummary {
        finished_at: Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap(),
        transitioned: 3,
        evaluated: 12,
        invalid: 1,
        duration_ms: 42,
    }
}

fn sample_issue() -> Issue {
    Issue::new(
        "dd-a1b2c3d4".to_string(),
        "Mandate rejected".to_string(),
        "Finance".to_string(),
        "alice".to_string(),
        Priority::Urgent,
        Utc.with_ymd_and_hms(2025, 3, 3, 9, 0, 0).unwrap(),
    )
}

#[parameterized(
    status = { DaemonRequest::Status },
    shutdown = { DaemonRequest::Shutdown },
    ping = { DaemonRequest::Ping },
    hello = { DaemonRequest::Hello { version: "0.1.0".to_string() } },
    sweep = { DaemonRequest::Sweep },
    check = { DaemonRequest::Check { id: "dd-1".to_string() } },
)]
fn framing_roundtrip_request(request: DaemonRequest) {
    let mut buf = Vec::new();
    framing::write_request(&mut buf, &request).unwrap();

    let mut cursor = Cursor::new(buf);
    let decoded = framing::read_request(&mut cursor).unwrap();
    assert_eq!(request, decoded);
}

#[parameterized(
    status = { DaemonResponse::Status(DaemonStatus::new(1000, 100, 3600)) },
    shutting_down = { DaemonResponse::ShuttingDown },
    pong = { DaemonResponse::Pong },
    error = { DaemonResponse::Error { message: "test".to_string() } },
    swept = { DaemonResponse::Swept(summary()) },
    checked = { DaemonResponse::Checked { issue: sample_issue() } },
    not_found = { DaemonResponse::NotFound { id: "dd-x".to_string() } },
)]
fn framing_roundtrip_response(response: DaemonResponse) {
    let mut buf = Vec::new();
    framing::write_response(&mut buf, &response).unwrap();

    let mut cursor = Cursor::new(buf);
    let decoded = framing::read_response(&mut cursor).unwrap();
    assert_eq!(response, decoded);
}

#[test]
fn request_wire_shape_is_tagged() {
    let json = serde_json::to_string(&DaemonRequest::Check {
        id: "dd-1".to_string(),
    })
    .unwrap();
    assert_eq!(json, r#"{"type":"Check","id":"dd-1"}"#);
}

#[test]
fn status_with_last_sweep_serializes_outcome_tag() {
    let status = DaemonStatus::new(5678, 7200, 3600)
        .with_last_sweep(Some(SweepOutcome::Completed(summary())));
    let json = serde_json::to_string(&DaemonResponse::Status(status.clone())).unwrap();
    assert!(json.contains(r#""outcome":"completed""#));

    let parsed: DaemonResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, DaemonResponse::Status(status));
}

#[test]
fn status_without_last_sweep_omits_field() {
    let json = serde_json::to_string(&DaemonStatus::new(1, 2, 3600)).unwrap();
    assert!(!json.contains("last_sweep"));
}

#[test]
fn summary_from_report() {
    let report = SweepReport {
        now: Utc.with_ymd_and_hms(2025, 3, 10, 9, 59, 59).unwrap(),
        evaluated: 12,
        staged: 4,
        transitioned: 3,
        invalid: vec!["dd-bad".to_string()],
    };
    let summary =
        SweepSummary::from_report(&report, Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap(), 42);
    assert_eq!(summary, self::summary());
}

#[test]
fn read_rejects_oversized_message() {
    let len = (2 * 1024 * 1024u32).to_be_bytes();
    let mut cursor = Cursor::new(len.to_vec());
    let err = framing::read_response(&mut cursor).unwrap_err();
    assert!(err.to_string().contains("message too large"));
}

#[test]
fn read_rejects_truncated_message() {
    let mut buf = Vec::new();
    framing::write_request(&mut buf, &DaemonRequest::Ping).unwrap();
    buf.truncate(buf.len() - 1);
    assert!(framing::read_request(&mut Cursor::new(buf)).is_err());
}

#[test]
fn read_rejects_garbage_json() {
    let body = b"not json";
    let mut buf = (body.len() as u32).to_be_bytes().to_vec();
    buf.extend_from_slice(body);
    let err = framing::read_request(&mut Cursor::new(buf)).unwrap_err();
    assert!(err.to_string().contains("deserialize error"));
}
