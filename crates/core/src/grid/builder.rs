//! Day-grid construction for a date range.

use chrono::FixedOffset;
use logchecker_domain::{DateRange, DaySchedule};

/// One all-`Unset` [`DaySchedule`] per day of `range`, in date order.
///
/// `offset` is captured once by the caller and stamped on every slot of every
/// day, so a range spanning a daylight-saving change stays internally
/// consistent. An inverted range (`start > end`) yields no days.
pub fn build_schedules(range: DateRange, offset: FixedOffset) -> Vec<DaySchedule> {
    range.days().map(|date| DaySchedule::blank(date, offset)).collect()
}
