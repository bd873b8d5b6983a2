//! Domain types and models
//!
//! `schedule` holds the in-memory editing grid; `timeline` holds the REST
//! wire contracts exchanged with the duty-log API.

pub mod schedule;
pub mod timeline;

pub use schedule::{DaySchedule, DutyState, DutyTotals, Slot, SlotState};
pub use timeline::{
    ApiEnvelope, ChangeEvent, DateRange, DayTimeline, DaySummary, Driver, DriverRef, DutyInterval,
    HoursMinutes, TimelineRequest, TimelineResponse,
};
