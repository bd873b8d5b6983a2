//! Interactive edits on a single day grid.
//!
//! Both operations move the day's aggregates slot by slot through
//! [`DaySchedule::assign`], so repeated edits never drift the totals away
//! from whatever baseline the load established.

use std::ops::RangeInclusive;

use logchecker_domain::constants::SLOTS_PER_DAY;
use logchecker_domain::{DaySchedule, DutyState, LogCheckerError, Result, SlotState};

/// Outcome of a drag-paint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintResult {
    /// State written to every slot of `range`.
    pub state: DutyState,
    /// Normalised inclusive index range that was painted.
    pub range: RangeInclusive<usize>,
}

fn check_index(schedule: &DaySchedule, index: usize) -> Result<()> {
    if index < SLOTS_PER_DAY {
        Ok(())
    } else {
        Err(LogCheckerError::InvalidInput(format!(
            "slot index {index} out of range for {} (0-{})",
            schedule.date(),
            SLOTS_PER_DAY - 1
        )))
    }
}

/// Cycle one slot between Work and Rest. An `Unset` slot becomes Work.
///
/// # Errors
/// `InvalidInput` when `index` is not a slot of the day.
pub fn toggle_slot(schedule: &mut DaySchedule, index: usize) -> Result<DutyState> {
    check_index(schedule, index)?;
    let current = schedule.slot(index).map(|slot| slot.state).unwrap_or_default();
    let next = current.toggled();
    schedule.assign(index, SlotState::from(next));
    Ok(next)
}

/// Paint `start..=end` (either direction) with the start slot's state,
/// or Work when the start slot is `Unset`.
///
/// # Errors
/// `InvalidInput` when either bound is not a slot of the day.
pub fn paint_range(schedule: &mut DaySchedule, start: usize, end: usize) -> Result<PaintResult> {
    check_index(schedule, start)?;
    check_index(schedule, end)?;

    let target = schedule.slot(start).map(|slot| slot.state).unwrap_or_default().paint_target();
    let range = start.min(end)..=start.max(end);
    for index in range.clone() {
        schedule.assign(index, SlotState::from(target));
    }

    Ok(PaintResult { state: target, range })
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, NaiveDate};
    use logchecker_domain::DutyTotals;

    use super::*;

    fn blank() -> DaySchedule {
        DaySchedule::blank(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            FixedOffset::east_opt(0).unwrap(),
        )
    }

    #[test]
    fn toggle_from_unset_never_returns_to_unset() {
        let mut schedule = blank();

        assert_eq!(toggle_slot(&mut schedule, 7).unwrap(), DutyState::Work);
        assert_eq!(toggle_slot(&mut schedule, 7).unwrap(), DutyState::Rest);
        assert_eq!(toggle_slot(&mut schedule, 7).unwrap(), DutyState::Work);
        assert_eq!(schedule.slot(7).unwrap().state, SlotState::Work);
        assert_eq!(schedule.totals(), DutyTotals::new(15, 0));
    }

    #[test]
    fn double_toggle_between_duty_states_is_identity() {
        let mut schedule = blank();
        schedule.assign(3, SlotState::Rest);
        let before = schedule.clone();

        toggle_slot(&mut schedule, 3).unwrap();
        toggle_slot(&mut schedule, 3).unwrap();

        assert_eq!(schedule, before);
    }

    #[test]
    fn toggle_rejects_out_of_range_index() {
        let mut schedule = blank();

        let err = toggle_slot(&mut schedule, SLOTS_PER_DAY).unwrap_err();

        assert!(matches!(err, LogCheckerError::InvalidInput(_)));
        assert_eq!(schedule.totals(), DutyTotals::default());
    }

    #[test]
    fn paint_normalises_direction_and_defaults_to_work() {
        let mut schedule = blank();

        let result = paint_range(&mut schedule, 10, 6).unwrap();

        assert_eq!(result, PaintResult { state: DutyState::Work, range: 6..=10 });
        assert_eq!(schedule.totals(), DutyTotals::new(75, 0));
        assert_eq!(schedule.slot(5).unwrap().state, SlotState::Unset);
        assert_eq!(schedule.slot(11).unwrap().state, SlotState::Unset);
    }

    #[test]
    fn paint_extends_start_slot_state() {
        let mut schedule = blank();
        schedule.assign(20, SlotState::Rest);
        schedule.assign(22, SlotState::Work);

        let result = paint_range(&mut schedule, 20, 23).unwrap();

        assert_eq!(result.state, DutyState::Rest);
        assert_eq!(schedule.totals(), DutyTotals::new(0, 60));
        assert_eq!(schedule.totals(), schedule.counted_totals());
    }

    #[test]
    fn repainting_is_idempotent() {
        let mut schedule = blank();
        paint_range(&mut schedule, 0, 95).unwrap();
        let once = schedule.clone();

        paint_range(&mut schedule, 0, 95).unwrap();

        assert_eq!(schedule, once);
        assert_eq!(schedule.totals(), DutyTotals::new(1440, 0));
    }

    #[test]
    fn single_index_paint_assigns_without_cycling() {
        let mut schedule = blank();
        schedule.assign(4, SlotState::Work);

        paint_range(&mut schedule, 4, 4).unwrap();

        assert_eq!(schedule.slot(4).unwrap().state, SlotState::Work);
        assert_eq!(schedule.totals(), DutyTotals::new(15, 0));
    }
}
