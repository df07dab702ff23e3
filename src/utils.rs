//! Utility functions

// ============================================================================
// Time Formatting
// ============================================================================

/// Format seconds as `m:ss` (minutes are not padded, e.g. "65:04")
///
/// Fractions are truncated; negative and non-finite values show as "0:00".
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format a position against a duration, e.g. "1:05 / 3:20"
pub fn format_progress(position: f64, duration: f64) -> String {
    format!("{} / {}", format_time(position), format_time(duration))
}
