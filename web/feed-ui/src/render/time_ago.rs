//! Relative timestamps for post footers.

use chrono::{DateTime, Utc};

/// Format `timestamp` relative to `now`
///
/// Under a minute reads "Just now", then minutes, hours and days up to a
/// week; anything older falls back to a calendar date (`M/D/YYYY`).
/// Timestamps ahead of `now` are treated as "Just now".
pub fn format_time_ago(now: DateTime<Utc>, timestamp: DateTime<Utc>) -> String {
    let minutes = (now - timestamp).num_minutes();

    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h ago", hours);
    }

    let days = hours / 24;
    if days < 7 {
        return format!("{}d ago", days);
    }

    timestamp.format("%-m/%-d/%Y").to_string()
}
