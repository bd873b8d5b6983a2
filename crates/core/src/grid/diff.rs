//! Change-event derivation for save.

use logchecker_domain::{ChangeEvent, DaySchedule, SlotState};
use tracing::trace;

use super::modifications::ModificationSet;

/// Run boundaries of every day that holds at least one user-modified slot,
/// sorted by timestamp.
///
/// Within a day an event is emitted on entering a Work or Rest run, i.e. on
/// every duty slot whose state differs from the slot before it (the first
/// slot of a day always counts as entering). Entering `Unset` emits nothing.
/// Days without modifications contribute nothing at all.
pub fn compute_changes(schedules: &[DaySchedule], modifications: &ModificationSet) -> Vec<ChangeEvent> {
    if modifications.is_empty() {
        return Vec::new();
    }

    let dates = modifications.dates();
    let mut events: Vec<ChangeEvent> = schedules
        .iter()
        .filter(|schedule| dates.contains(&schedule.date()))
        .flat_map(day_boundaries)
        .collect();

    events.sort_by_key(|event| event.timestamp);
    trace!(days = dates.len(), events = events.len(), "computed change events");
    events
}

fn day_boundaries(schedule: &DaySchedule) -> Vec<ChangeEvent> {
    let mut previous: Option<SlotState> = None;
    let mut events = Vec::new();

    for slot in schedule.slots() {
        if let Some(duty) = slot.state.duty() {
            if previous != Some(slot.state) {
                events.push(ChangeEvent { timestamp: slot.wall_clock_start, event_type: duty });
            }
        }
        previous = Some(slot.state);
    }

    events
}
