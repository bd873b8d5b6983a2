//! Plain-text and JSON views of loaded timelines.

use std::fmt;

use chrono::NaiveDate;
use logchecker_core::SaveState;
use logchecker_domain::constants::SLOTS_PER_HOUR;
use logchecker_domain::{format_duration, ChangeEvent, DateRange, DaySchedule, DriverRef};
use serde::Serialize;

/// One line of the day summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayReport {
    pub date: NaiveDate,
    pub work_minutes: i32,
    pub rest_minutes: i32,
    /// 96 characters, one per slot: `W`, `R` or `.`.
    pub strip: String,
}

impl From<&DaySchedule> for DayReport {
    fn from(schedule: &DaySchedule) -> Self {
        Self {
            date: schedule.date(),
            work_minutes: schedule.total_work_minutes(),
            rest_minutes: schedule.total_rest_minutes(),
            strip: schedule.state_strip(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineReport {
    pub driver: Option<DriverRef>,
    pub range: DateRange,
    pub days: Vec<DayReport>,
    /// Set when the grid is a fallback rather than server data.
    pub notice: Option<String>,
}

impl TimelineReport {
    pub fn new(driver: Option<DriverRef>, range: DateRange, schedules: &[DaySchedule]) -> Self {
        Self { driver, range, days: schedules.iter().map(DayReport::from).collect(), notice: None }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditReport {
    pub timeline: TimelineReport,
    pub events: Vec<ChangeEvent>,
    pub state: SaveState,
    pub dry_run: bool,
    pub status: String,
}

fn ruler() -> String {
    (0..24).map(|hour| format!("{:<width$}", hour, width = SLOTS_PER_HOUR)).collect()
}

impl fmt::Display for TimelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(driver) = &self.driver {
            write!(f, "{}", driver.name)?;
            if !driver.license_number.is_empty() {
                write!(f, " ({})", driver.license_number)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{} to {}", self.range.start, self.range.end)?;
        if let Some(notice) = &self.notice {
            writeln!(f, "{notice}")?;
        }

        writeln!(f, "{:<12}{}", "", ruler())?;
        for day in &self.days {
            writeln!(
                f,
                "{:<12}{}  Work {:>14}  Rest {:>14}",
                day.date.format("%a %m-%d").to_string(),
                day.strip,
                format_duration(day.work_minutes),
                format_duration(day.rest_minutes),
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for EditReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.timeline)?;
        writeln!(f)?;
        if self.events.is_empty() {
            writeln!(f, "No change events")?;
        } else {
            writeln!(f, "Change events:")?;
            for event in &self.events {
                writeln!(f, "  {}  {}", event.timestamp.to_rfc3339(), event.event_type)?;
            }
        }
        write!(f, "{}", self.status)
    }
}
