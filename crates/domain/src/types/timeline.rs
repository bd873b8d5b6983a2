//! REST wire contracts for the duty-log API
//!
//! Field names follow the API's camelCase JSON. Everything the server may
//! omit is defaulted so a partially filled day never fails the whole
//! response.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::schedule::{DutyState, DutyTotals};
use crate::errors::{LogCheckerError, Result};

/// `{ message, data }` wrapper used by every GET endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub message: String,
    pub data: T,
}

/// Driver as listed by the driver directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct Driver {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub license_number: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
}

/// Driver identity echoed back by the timeline endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct DriverRef {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub license_number: String,
}

/// Inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `days` consecutive days beginning at `start`.
    ///
    /// # Errors
    /// Returns `InvalidInput` when `days` is zero or the range leaves the
    /// supported calendar.
    pub fn starting_at(start: NaiveDate, days: u32) -> Result<Self> {
        if days == 0 {
            return Err(LogCheckerError::InvalidInput("date range needs at least one day".into()));
        }
        let end = start
            .checked_add_signed(Duration::days(i64::from(days) - 1))
            .ok_or_else(|| LogCheckerError::InvalidInput(format!("date range overflows: {start}")))?;
        Ok(Self { start, end })
    }

    /// True when `start > end`; such a range yields no days.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every calendar day in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        std::iter::successors(Some(self.start), |d| d.succ_opt()).take_while(move |d| *d <= end)
    }

    pub fn day_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            // bounded by the calendar range, fits comfortably in usize
            (self.end - self.start).num_days() as usize + 1
        }
    }
}

/// One server-reported duty segment. Times may be missing on malformed
/// records; the overlay skips those individually.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct DutyInterval {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    pub state: DutyState,
    #[serde(default)]
    pub duration: Option<f64>,
}

impl DutyInterval {
    pub fn new(start_time: &str, end_time: &str, state: DutyState) -> Self {
        Self {
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
            state,
            duration: None,
        }
    }
}

/// `{ hours, minutes }` aggregate as the API reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct HoursMinutes {
    #[serde(default)]
    pub hours: i32,
    #[serde(default)]
    pub minutes: i32,
}

impl HoursMinutes {
    /// Saturates at the `i32` bounds for out-of-range server values.
    pub fn total_minutes(&self) -> i32 {
        self.hours.saturating_mul(60).saturating_add(self.minutes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct DaySummary {
    #[serde(default)]
    pub total_work: HoursMinutes,
    #[serde(default)]
    pub total_rest: HoursMinutes,
}

impl From<DaySummary> for DutyTotals {
    fn from(summary: DaySummary) -> Self {
        DutyTotals::new(summary.total_work.total_minutes(), summary.total_rest.total_minutes())
    }
}

/// Per-day payload of the timeline endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct DayTimeline {
    #[serde(default)]
    pub timeline: Vec<DutyInterval>,
    #[serde(default)]
    pub summary: Option<DaySummary>,
}

/// Response body of `GET /api/timeline`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct TimelineResponse {
    pub driver: DriverRef,
    pub date_range: DateRange,
    /// Keyed by `YYYY-MM-DD`; a missing date means no server-known data.
    #[serde(default)]
    pub timeline: BTreeMap<String, DayTimeline>,
}

/// A Work/Rest run boundary sent back on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct ChangeEvent {
    #[serde(rename = "startTime")]
    #[cfg_attr(feature = "ts-gen", ts(type = "string"))]
    pub timestamp: DateTime<FixedOffset>,
    pub event_type: DutyState,
}

/// Request body of `POST /api/timeline`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct TimelineRequest {
    pub driver_id: i64,
    pub date_range: DateRange,
    pub timeline: Vec<ChangeEvent>,
}
