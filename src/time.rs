// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Helper functions around time.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{TimeZone, Utc};

use crate::constants::{MILLIS_PER_DAY, MJD_OFFSET, UNIX_EPOCH_JD};

/// Convert Unix milliseconds into the LOFAR-convention Modified Julian Day.
///
/// The milliseconds are floor-divided into whole days before the epoch offset
/// is applied, so the result always ends in .5. e.g. the Unix epoch is MJD
/// 40587.5.
pub fn mjd_from_unix_millis(unix_millis: i64) -> f64 {
    unix_millis.div_euclid(MILLIS_PER_DAY) as f64 + UNIX_EPOCH_JD - MJD_OFFSET
}

/// The current time as Unix milliseconds. A clock before the Unix epoch is
/// reported as negative milliseconds.
pub fn now_unix_millis() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(d) => d.as_millis() as i64,
        Err(e) => -(e.duration().as_millis() as i64),
    }
}

/// Format Unix milliseconds as a human-readable UTC timestamp, e.g.
/// "1970-01-01 00:00:00 UTC".
pub fn format_utc(unix_millis: i64) -> String {
    match Utc.timestamp_millis_opt(unix_millis).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        // Only reachable for timestamps hundreds of thousands of years away.
        None => format!("{unix_millis} ms since the Unix epoch"),
    }
}
