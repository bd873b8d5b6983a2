//! Shared test helpers for `logchecker-core` integration tests.
//!
//! In-memory port implementations plus a few fixtures so the service tests
//! can focus on behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod ports;

use std::collections::BTreeMap;

use chrono::{FixedOffset, NaiveDate};
use logchecker_domain::{
    DateRange, DaySummary, DayTimeline, Driver, DriverRef, DutyInterval, HoursMinutes,
    TimelineResponse,
};

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn driver(id: i64, name: &str) -> Driver {
    Driver {
        id,
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: String::new(),
        license_number: format!("LIC-{id:04}"),
        is_active: true,
        created_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

/// Response carrying `days` for `driver`, each as `(date key, intervals)`.
pub fn timeline_response(
    driver: &Driver,
    range: DateRange,
    days: Vec<(&str, Vec<DutyInterval>)>,
) -> TimelineResponse {
    let timeline: BTreeMap<String, DayTimeline> = days
        .into_iter()
        .map(|(key, intervals)| {
            let summary = summarise(&intervals);
            (key.to_string(), DayTimeline { timeline: intervals, summary: Some(summary) })
        })
        .collect();

    TimelineResponse {
        driver: DriverRef {
            id: driver.id,
            name: driver.name.clone(),
            license_number: driver.license_number.clone(),
        },
        date_range: range,
        timeline,
    }
}

fn summarise(intervals: &[DutyInterval]) -> DaySummary {
    let minutes = |state| -> i32 {
        intervals
            .iter()
            .filter(|i| i.state == state)
            .filter_map(|i| {
                let start = logchecker_domain::parse_time_of_day(i.start_time.as_deref()?)?;
                let end = logchecker_domain::parse_time_of_day(i.end_time.as_deref()?)?;
                Some(end.saturating_sub(start) as i32)
            })
            .sum()
    };
    let hm = |m: i32| HoursMinutes { hours: m / 60, minutes: m % 60 };
    DaySummary {
        total_work: hm(minutes(logchecker_domain::DutyState::Work)),
        total_rest: hm(minutes(logchecker_domain::DutyState::Rest)),
    }
}
