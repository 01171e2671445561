//! Fixed-timezone clock for report timestamps.
//!
//! All timestamps in reports and artifact names are civil time at UTC+9.
//! The offset is a constant; the zone has no daylight saving.

use chrono::{DateTime, FixedOffset, Utc};

use crate::engine::report::ReportLog;
use crate::engine::types::EngineResult;

/// Civil timezone offset for all report timestamps, in hours east of UTC
const UTC_OFFSET_HOURS: i32 = 9;

/// Format of the canonical report timestamp
pub const REPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A point in time decomposed into zero-padded decimal string fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalTimestamp {
    /// Canonical form, `YYYY-MM-DD HH:MM:SS`
    pub full: String,
    /// Four-digit year, e.g. "2025"
    pub year: String,
    /// Two-digit month, e.g. "08"
    pub month: String,
    /// Two-digit day, e.g. "11"
    pub day: String,
    /// Two-digit hour, e.g. "18"
    pub hour: String,
    /// Two-digit minute, e.g. "59"
    pub minute: String,
    /// Two-digit second, e.g. "00"
    pub second: String,
}

impl LocalTimestamp {
    /// Decompose a datetime into zero-padded string fields
    pub fn from_datetime(dt: DateTime<FixedOffset>) -> Self {
        Self {
            full: dt.format(REPORT_TIME_FORMAT).to_string(),
            year: dt.format("%Y").to_string(),
            month: dt.format("%m").to_string(),
            day: dt.format("%d").to_string(),
            hour: dt.format("%H").to_string(),
            minute: dt.format("%M").to_string(),
            second: dt.format("%S").to_string(),
        }
    }
}

fn report_offset() -> FixedOffset {
    FixedOffset::east_opt(UTC_OFFSET_HOURS * 3600).expect("UTC+9 is a valid offset")
}

/// Current time in the report timezone
pub fn now_datetime() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&report_offset())
}

/// Current time decomposed into calendar fields
pub fn now() -> LocalTimestamp {
    LocalTimestamp::from_datetime(now_datetime())
}

/// Current canonical timestamp string, `YYYY-MM-DD HH:MM:SS`
pub fn now_string() -> String {
    now_datetime().format(REPORT_TIME_FORMAT).to_string()
}

/// Current time, optionally recorded as a comment line in the report first
pub fn now_reported(report: &ReportLog, comment: bool) -> EngineResult<LocalTimestamp> {
    let now = now();
    if comment {
        report.comment(&format!("現在の日付時刻: {}", now.full))?;
    }
    Ok(now)
}
