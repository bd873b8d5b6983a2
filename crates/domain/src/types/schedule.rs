//! Fifteen-minute duty grid types
//!
//! A [`DaySchedule`] is the editable unit: exactly 96 [`Slot`]s for one
//! calendar day plus the Work/Rest aggregates shown next to it. Aggregates are
//! only ever moved through [`DaySchedule::assign`] (incremental) or
//! [`DaySchedule::set_reported_totals`] (server summary after a load).

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::constants::{DATE_FORMAT, SLOTS_PER_DAY, SLOT_MINUTES};
use crate::impl_state_conversions;

/// State of a single grid slot. `Unset` means "no data" and is distinct from
/// both duty states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SlotState {
    Work,
    Rest,
    #[default]
    Unset,
}

impl_state_conversions!(SlotState {
    Work => "Work",
    Rest => "Rest",
    Unset => "Unset",
});

impl SlotState {
    /// The duty state carried by this slot, if any.
    pub fn duty(self) -> Option<DutyState> {
        match self {
            Self::Work => Some(DutyState::Work),
            Self::Rest => Some(DutyState::Rest),
            Self::Unset => None,
        }
    }

    /// Next state for a single click. Cycles between the two duty states
    /// only; `Unset` is never produced.
    pub fn toggled(self) -> DutyState {
        match self {
            Self::Work => DutyState::Rest,
            Self::Rest | Self::Unset => DutyState::Work,
        }
    }

    /// State a drag starting on this slot paints with.
    pub fn paint_target(self) -> DutyState {
        self.duty().unwrap_or(DutyState::Work)
    }

    /// One-character rendering used by the day strip.
    pub fn symbol(self) -> char {
        match self {
            Self::Work => 'W',
            Self::Rest => 'R',
            Self::Unset => '.',
        }
    }
}

/// Duty state reported by the API and emitted in change events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub enum DutyState {
    Work,
    Rest,
}

impl_state_conversions!(DutyState {
    Work => "Work",
    Rest => "Rest",
});

impl From<DutyState> for SlotState {
    fn from(value: DutyState) -> Self {
        match value {
            DutyState::Work => Self::Work,
            DutyState::Rest => Self::Rest,
        }
    }
}

/// One fifteen-minute cell of a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub index: usize,
    /// Nominal start of the slot, carrying the offset fixed at grid
    /// construction.
    pub wall_clock_start: DateTime<FixedOffset>,
    pub state: SlotState,
}

impl Slot {
    /// Minutes since local midnight at which this slot starts.
    pub fn minute_of_day(&self) -> u32 {
        // index < 96, the cast cannot truncate
        self.index as u32 * SLOT_MINUTES
    }

    /// `HH:MM` label of the slot start.
    pub fn label(&self) -> String {
        let minute = self.minute_of_day();
        format!("{:02}:{:02}", minute / 60, minute % 60)
    }
}

/// Work/Rest aggregate in minutes.
///
/// Signed because a server-reported summary may disagree with the slots it
/// accompanies; incremental edits on top of such a summary can then dip below
/// zero, and that drift is preserved rather than clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DutyTotals {
    pub work_minutes: i32,
    pub rest_minutes: i32,
}

impl DutyTotals {
    pub fn new(work_minutes: i32, rest_minutes: i32) -> Self {
        Self { work_minutes, rest_minutes }
    }

    /// Apply the aggregate delta of one slot moving from `old` to `new`.
    pub fn apply_transition(&mut self, old: SlotState, new: SlotState) {
        let step = SLOT_MINUTES as i32;
        match old {
            SlotState::Work => self.work_minutes = self.work_minutes.saturating_sub(step),
            SlotState::Rest => self.rest_minutes = self.rest_minutes.saturating_sub(step),
            SlotState::Unset => {}
        }
        match new {
            SlotState::Work => self.work_minutes = self.work_minutes.saturating_add(step),
            SlotState::Rest => self.rest_minutes = self.rest_minutes.saturating_add(step),
            SlotState::Unset => {}
        }
    }
}

/// One calendar day's full grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    date: NaiveDate,
    slots: Vec<Slot>,
    totals: DutyTotals,
}

impl DaySchedule {
    /// Build an all-`Unset` day whose slot timestamps start at local midnight
    /// and carry `offset`.
    pub fn blank(date: NaiveDate, offset: FixedOffset) -> Self {
        let local_midnight = date.and_time(NaiveTime::MIN);
        let utc_midnight = local_midnight - Duration::seconds(i64::from(offset.local_minus_utc()));

        let slots = (0..SLOTS_PER_DAY)
            .map(|index| {
                let utc = utc_midnight + Duration::minutes(index as i64 * i64::from(SLOT_MINUTES));
                Slot {
                    index,
                    wall_clock_start: DateTime::from_naive_utc_and_offset(utc, offset),
                    state: SlotState::Unset,
                }
            })
            .collect();

        Self { date, slots, totals: DutyTotals::default() }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// `YYYY-MM-DD` key used by the API's per-day timeline map.
    pub fn date_key(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn totals(&self) -> DutyTotals {
        self.totals
    }

    pub fn total_work_minutes(&self) -> i32 {
        self.totals.work_minutes
    }

    pub fn total_rest_minutes(&self) -> i32 {
        self.totals.rest_minutes
    }

    /// Replace the aggregates with a server-supplied summary.
    pub fn set_reported_totals(&mut self, totals: DutyTotals) {
        self.totals = totals;
    }

    /// Set a slot's state, moving the aggregates by the slot-level delta.
    ///
    /// Returns the previous state, or `None` when `index` is outside the day.
    pub fn assign(&mut self, index: usize, state: SlotState) -> Option<SlotState> {
        let slot = self.slots.get_mut(index)?;
        let previous = slot.state;
        slot.state = state;
        self.totals.apply_transition(previous, state);
        Some(previous)
    }

    /// Aggregates recomputed from the slots themselves.
    pub fn counted_totals(&self) -> DutyTotals {
        let step = SLOT_MINUTES as i32;
        self.slots.iter().fold(DutyTotals::default(), |mut acc, slot| {
            match slot.state {
                SlotState::Work => acc.work_minutes += step,
                SlotState::Rest => acc.rest_minutes += step,
                SlotState::Unset => {}
            }
            acc
        })
    }

    /// 96-character `W`/`R`/`.` rendering of the day.
    pub fn state_strip(&self) -> String {
        self.slots.iter().map(|slot| slot.state.symbol()).collect()
    }
}
