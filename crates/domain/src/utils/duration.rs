//! Human-readable durations for day summaries.

/// Render a minute count as `"H hr M min"`.
///
/// ```
/// use logchecker_domain::format_duration;
///
/// assert_eq!(format_duration(0), "0 hr 0 min");
/// assert_eq!(format_duration(135), "2 hr 15 min");
/// ```
#[must_use]
pub fn format_duration(minutes: i32) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let magnitude = minutes.unsigned_abs();
    format!("{sign}{} hr {} min", magnitude / 60, magnitude % 60)
}
