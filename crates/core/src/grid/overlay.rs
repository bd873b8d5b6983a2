//! Server-data overlay
//!
//! Lays the API's per-day duty intervals onto freshly built grids. Only the
//! time of day of an interval is compared against slot starts, so an interval
//! that wraps past midnight matches nothing; intervals are applied in the
//! order received and the last one touching a slot wins.

use chrono::FixedOffset;
use logchecker_domain::{
    parse_time_of_day, DateRange, DaySchedule, DayTimeline, DutyTotals, SlotState,
    TimelineResponse,
};
use tracing::{debug, warn};

use super::builder::build_schedules;

/// Counts from laying one day's intervals onto its grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayReport {
    /// Intervals that parsed and were laid onto the grid.
    pub applied: usize,
    /// Intervals skipped because a bound was missing or unreadable.
    pub skipped: usize,
}

/// Build the grids for `range` and overlay whatever `response` carries for
/// each day. Days absent from the response stay all-`Unset`.
pub fn reconcile(
    range: DateRange,
    offset: FixedOffset,
    response: &TimelineResponse,
) -> Vec<DaySchedule> {
    let mut schedules = build_schedules(range, offset);

    for schedule in &mut schedules {
        if let Some(day) = response.timeline.get(&schedule.date_key()) {
            let report = overlay_day(schedule, day);
            debug!(
                date = %schedule.date(),
                applied = report.applied,
                skipped = report.skipped,
                "overlaid server intervals"
            );
        }
    }

    schedules
}

/// Overlay one day's intervals onto `schedule`, then adopt the server's
/// aggregate as the day's totals.
///
/// A day without a summary gets totals counted from its slots, not zero.
/// Out-of-range summary values saturate instead of overflowing.
pub fn overlay_day(schedule: &mut DaySchedule, day: &DayTimeline) -> OverlayReport {
    let mut report = OverlayReport::default();

    for (position, interval) in day.timeline.iter().enumerate() {
        let bounds = interval
            .start_time
            .as_deref()
            .and_then(parse_time_of_day)
            .zip(interval.end_time.as_deref().and_then(parse_time_of_day));

        let Some((start, end)) = bounds else {
            warn!(
                date = %schedule.date(),
                position,
                start_time = ?interval.start_time,
                end_time = ?interval.end_time,
                "skipping malformed duty interval"
            );
            report.skipped += 1;
            continue;
        };

        if start >= end {
            debug!(date = %schedule.date(), position, start, end, "interval covers no slot start");
        }

        let state = SlotState::from(interval.state);
        let covered: Vec<usize> = schedule
            .slots()
            .iter()
            .filter(|slot| (start..end).contains(&slot.minute_of_day()))
            .map(|slot| slot.index)
            .collect();
        for index in covered {
            schedule.assign(index, state);
        }
        report.applied += 1;
    }

    let totals = match day.summary {
        Some(summary) => DutyTotals::from(summary),
        None => schedule.counted_totals(),
    };
    schedule.set_reported_totals(totals);

    report
}
