// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end specs for the `duedesk` CLI.
//!
//! Run with `cargo test -p specs` after building the workspace binaries.

#[cfg(test)]
mod cli;
