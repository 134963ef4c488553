use chrono::{DateTime, Utc};

/// Below this many seconds the countdown switches to its warning style.
pub const WARNING_THRESHOLD_SECS: u32 = 5 * 60;

/// `mm:ss`, minutes unbounded (90 minutes renders as `90:00`).
#[must_use]
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[must_use]
pub fn is_warning(seconds: u32) -> bool {
    seconds < WARNING_THRESHOLD_SECS
}

/// Elapsed time between two instants as `mm:ss`; `None` if either is missing.
#[must_use]
pub fn format_elapsed(
    started: Option<DateTime<Utc>>,
    finished: Option<DateTime<Utc>>,
) -> Option<String> {
    let elapsed = finished? - started?;
    let seconds = u32::try_from(elapsed.num_seconds().max(0)).unwrap_or(u32::MAX);
    Some(format_countdown(seconds))
}
