// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Business-day arithmetic.
//!
//! A business day is any calendar day that is not a Saturday or Sunday.
//! There is no holiday calendar. All weekday decisions are made in UTC so
//! results do not depend on the host timezone.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc, Weekday};

/// Returns true if the date falls on a Saturday or Sunday (UTC).
pub fn is_weekend(date: DateTime<Utc>) -> bool {
    is_weekend_date(date.date_naive())
}

fn is_weekend_date(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns the timestamp `days` business days after `start`.
///
/// Walks forward one calendar day at a time, counting only weekdays, and
/// keeps the time-of-day of `start`. Zero days returns `start` itself.
pub fn add_working_days(start: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    let mut result = start;
    let mut added = 0;

    while added < days {
        match result.checked_add_days(Days::new(1)) {
            Some(next) => result = next,
            None => break,
        }
        if !is_weekend(result) {
            added += 1;
        }
    }

    result
}

/// Counts business days from `from` to `to` by calendar date.
///
/// Days strictly after `from`'s date up to and including `to`'s date are
/// counted. The result is negative when `to` is earlier than `from`.
pub fn working_days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let (start, end, sign) = if to >= from {
        (from.date_naive(), to.date_naive(), 1)
    } else {
        (to.date_naive(), from.date_naive(), -1)
    };

    let count = start
        .iter_days()
        .skip(1)
        .take_while(|d| *d <= end)
        .filter(|d| !is_weekend_date(*d))
        .count();

    sign * count as i64
}

#[cfg(test)]
#[path = "calendar_tests.rs"]
mod tests;
