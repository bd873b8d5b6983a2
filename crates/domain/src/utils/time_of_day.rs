//! Time-of-day extraction for server duty intervals.
//!
//! Only the wall-clock time matters when laying an interval onto a day grid;
//! any date or offset part of the input is ignored.

use crate::constants::MINUTES_PER_DAY;

/// Minutes since midnight for `HH:MM`, `HH:MM:SS` or an ISO date-time.
///
/// `24:00` is accepted as the end of the day (1440). Returns `None` for
/// anything that does not carry a valid hour and minute.
///
/// ```
/// use logchecker_domain::parse_time_of_day;
///
/// assert_eq!(parse_time_of_day("08:30"), Some(510));
/// assert_eq!(parse_time_of_day("2024-01-01T08:30:00+05:45"), Some(510));
/// assert_eq!(parse_time_of_day("soon"), None);
/// ```
#[must_use]
pub fn parse_time_of_day(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    let time_part = match trimmed.split_once(['T', 't', ' ']) {
        Some((_, time)) => time,
        None => trimmed,
    };
    let clock = time_part.split(['+', '-', 'Z', 'z', '.']).next()?;

    let mut fields = clock.split(':');
    let hour = parse_field(fields.next()?)?;
    let minute = parse_field(fields.next()?)?;
    if let Some(second) = fields.next() {
        if parse_field(second)? >= 60 {
            return None;
        }
    }
    if fields.next().is_some() || minute >= 60 {
        return None;
    }

    let total = hour * 60 + minute;
    (total <= MINUTES_PER_DAY).then_some(total)
}

fn parse_field(field: &str) -> Option<u32> {
    if field.is_empty() || field.len() > 2 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}
