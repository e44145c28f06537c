// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// Prefix used when `new` is not given one.
pub const DEFAULT_PREFIX: &str = "dd";

/// Derive an issue ID from its subject, submitter, and creation time.
/// Format: {prefix}-{hash} where hash is the first 8 hex chars of SHA256.
pub fn generate_id(
    prefix: &str,
    subject: &str,
    submitted_by: &str,
    created_at: &DateTime<Utc>,
) -> String {
    let input = format!("{}\n{}\n{}", subject, submitted_by, created_at.to_rfc3339());
    let hash = Sha256::digest(input.as_bytes());
    format!("{}-{}", prefix, hex::encode(&hash[..4]))
}

/// Generate an ID not yet taken, appending `-2`, `-3`, ... on collision.
///
/// `exists` is consulted for each candidate; its errors are propagated.
pub fn generate_unique_id<F>(
    prefix: &str,
    subject: &str,
    submitted_by: &str,
    created_at: &DateTime<Utc>,
    mut exists: F,
) -> Result<String>
where
    F: FnMut(&str) -> Result<bool>,
{
    if !validate_prefix(prefix) {
        return Err(Error::InvalidPrefix);
    }

    let base_id = generate_id(prefix, subject, submitted_by, created_at);
    if !exists(&base_id)? {
        return Ok(base_id);
    }

    let mut suffix = 2u32;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id)? {
            return Ok(id);
        }
        suffix += 1;
    }
}

/// Validate that a prefix is valid (2+ lowercase alphanumeric with at least one letter)
pub fn validate_prefix(prefix: &str) -> bool {
    prefix.len() >= 2
        && prefix
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && prefix.chars().any(|c| c.is_ascii_lowercase())
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
