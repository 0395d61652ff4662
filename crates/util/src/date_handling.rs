//! Date formatting for run picker labels.

use chrono::{DateTime, Utc};

/// Placeholder shown when a run carries no start timestamp.
const MISSING_START: &str = "-\t-";

/// Formats a run's start timestamp for its picker label.
///
/// The output is `YYYY-MM-DD<TAB>hh:mm:ssam` (12-hour clock, lowercase
/// meridiem), matching the tab-separated columns the run picker renders.
/// Absent timestamps become a `-` placeholder pair so the column count is
/// stable.
pub fn format_run_start(start_time: Option<DateTime<Utc>>) -> String {
    match start_time {
        Some(start) => start.format("%Y-%m-%d\t%I:%M:%S%P").to_string(),
        None => MISSING_START.to_string(),
    }
}
