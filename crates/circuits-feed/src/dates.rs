// Copyright 2026 circuits-feed contributors
// SPDX-License-Identifier: Apache-2.0

//! Date parsing and the publication-date fallback chain.

use crate::types::DateSource;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::borrow::Cow;

/// Zone-less timestamp layouts, interpreted as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Zoned ISO layouts that RFC 3339 parsing rejects: minute precision, or
/// an offset without a colon.
const ZONED_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M%z",
];

/// Parse an ISO 8601 or RFC 2822 date string into UTC.
///
/// Accepts RFC 3339 with `Z` or a numeric offset, ISO timestamps with
/// minute precision or hour-only offsets, ISO timestamps without a zone
/// (taken as UTC), bare `YYYY-MM-DD` dates (midnight UTC), and mail/HTTP
/// dates such as `Wed, 21 Oct 2015 07:28:00 GMT` or `... 09:00:00 UTC`.
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(&rfc2822_zone(s)) {
        return Some(dt.with_timezone(&Utc));
    }
    let zoned = iso_offset(s);
    for fmt in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(&zoned, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// chrono's RFC 2822 parser knows `GMT` and `UT` but not `UTC`.
fn rfc2822_zone(s: &str) -> Cow<'_, str> {
    match s.strip_suffix(" UTC") {
        Some(head) => Cow::Owned(format!("{head} GMT")),
        None => Cow::Borrowed(s),
    }
}

/// Spell out an ISO offset in full: `Z` becomes `+00:00` and an hour-only
/// offset such as `+02` becomes `+02:00`.
fn iso_offset(s: &str) -> Cow<'_, str> {
    if let Some(head) = s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        return Cow::Owned(format!("{head}+00:00"));
    }

    let bytes = s.as_bytes();
    let n = bytes.len();
    let hour_only = s.contains('T')
        && n > 3
        && matches!(bytes[n - 3], b'+' | b'-')
        && bytes[n - 2].is_ascii_digit()
        && bytes[n - 1].is_ascii_digit()
        && bytes[n - 4].is_ascii_digit();
    if hour_only {
        Cow::Owned(format!("{s}:00"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Apply the fallback chain: structured page date, then `Last-Modified`,
/// then the run's current instant. First present value wins.
pub fn resolve_published_at(
    structured: Option<DateTime<Utc>>,
    last_modified: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> (DateTime<Utc>, DateSource) {
    if let Some(dt) = structured {
        return (dt, DateSource::Structured);
    }
    if let Some(dt) = last_modified {
        return (dt, DateSource::LastModified);
    }
    (now, DateSource::RunTime)
}
