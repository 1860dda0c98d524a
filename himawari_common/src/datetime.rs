/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, TimeDelta, Timelike, Utc};

use crate::errors::{Result, time_parse_error};

// chrono TimeDelta ctors are fallible for large values. Our use cases are all small acquisition
// intervals so we provide infallible shortcuts
#[inline] pub fn secs (n: i64)->TimeDelta { TimeDelta::seconds(n) }
#[inline] pub fn minutes (n: i64)->TimeDelta { TimeDelta::minutes(n) }
#[inline] pub fn hours (n: i64)->TimeDelta { TimeDelta::hours(n) }

/// this should be used wherever we might have to use sim clock instead of wall clock
#[inline]
pub fn utc_now()->DateTime<Utc> {
    Utc::now()
}

/// drop sub-second precision
#[inline]
pub fn truncate_to_secs (dt: DateTime<Utc>)->DateTime<Utc> {
    dt.trunc_subsecs(0)
}

/// return the full minute for given DateTime (seconds and nanos zeroed)
pub fn full_minute (dt: DateTime<Utc>)->DateTime<Utc> {
    let dt = truncate_to_secs(dt);
    dt - secs( dt.second() as i64)
}

/// floor to the last full minute that is a multiple of `n` minutes within the hour (n > 0).
/// `floor_to_minutes(12:37:15, 10)` is 12:30:00
pub fn floor_to_minutes (dt: DateTime<Utc>, n: u32)->DateTime<Utc> {
    let dt = full_minute(dt);
    let n = n.max(1);
    dt - minutes( (dt.minute() % n) as i64)
}

/// all times `start + k*step` that are `<= end`, in ascending order. Empty if `end < start`
/// or `step` is not positive
pub fn time_steps (start: DateTime<Utc>, end: DateTime<Utc>, step: TimeDelta)->Vec<DateTime<Utc>> {
    let mut steps = Vec::new();
    if step > TimeDelta::zero() {
        let mut t = start;
        while t <= end {
            steps.push(t);
            t = t + step;
        }
    }
    steps
}

/// compact human readable representation of (small) time deltas, e.g. "2m30s"
pub fn format_delta (td: TimeDelta)->String {
    let total = td.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    let (h, m, s) = (total / 3600, (total % 3600) / 60, total % 60);

    let mut out = sign.to_string();
    if h > 0 { out.push_str( &format!("{h}h")) }
    if m > 0 { out.push_str( &format!("{m}m")) }
    if s > 0 || (h == 0 && m == 0) { out.push_str( &format!("{s}s")) }
    out
}

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y%m%d%H%M%S",
    "%Y%m%d%H%M",
];

/// parse a UTC time spec such as "2021-01-01 00:10:00", "2021-01-01T00:10", RFC 3339 with
/// explicit offset or a plain date "2021-01-01" (midnight)
pub fn parse_utc_datetime (s: &str)->Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok( dt.to_utc() )
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok( ndt.and_utc() )
        }
    }

    if let Ok(nd) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
    && let Some(ndt) = nd.and_hms_opt(0, 0, 0) {
        return Ok( ndt.and_utc() )
    }

    Err( time_parse_error( format!("not a valid time spec '{s}' (use 'YYYY-MM-DD hh:mm:ss')")))
}
