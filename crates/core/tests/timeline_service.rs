//! Integration tests for `TimelineService` against in-memory ports.

mod support;

use std::sync::Arc;

use chrono::{FixedOffset, TimeZone};
use logchecker_core::{
    DriverDirectory, LoadOutcome, SaveOutcome, SaveState, TimelineService, TimelineSink,
    TimelineSource,
};
use logchecker_domain::{DateRange, DutyInterval, DutyState, LogCheckerError, SlotState};
use support::ports::{MockDriverDirectory, MockTimelineSink, MockTimelineSource};
use support::{date, driver, timeline_response, utc};

struct Harness {
    service: TimelineService,
    source: Arc<MockTimelineSource>,
    sink: Arc<MockTimelineSink>,
    directory: Arc<MockDriverDirectory>,
}

fn harness_with(source: MockTimelineSource, directory: MockDriverDirectory, offset: FixedOffset) -> Harness {
    let source = Arc::new(source);
    let sink = Arc::new(MockTimelineSink::new());
    let directory = Arc::new(directory);
    let service = TimelineService::new(
        Arc::clone(&source) as Arc<dyn TimelineSource>,
        Arc::clone(&sink) as Arc<dyn TimelineSink>,
        Arc::clone(&directory) as Arc<dyn DriverDirectory>,
        offset,
    );
    Harness { service, source, sink, directory }
}

fn week() -> DateRange {
    DateRange::new(date(2024, 1, 1), date(2024, 1, 7))
}

fn ana_harness() -> Harness {
    let ana = driver(1, "Ana Lima");
    let response = timeline_response(
        &ana,
        week(),
        vec![(
            "2024-01-02",
            vec![
                DutyInterval::new("06:00", "10:00", DutyState::Work),
                DutyInterval::new("10:00", "10:30", DutyState::Rest),
            ],
        )],
    );
    harness_with(
        MockTimelineSource::new().with_response(1, response),
        MockDriverDirectory::new(vec![ana, driver(2, "Bo Chen")]),
        utc(),
    )
}

#[tokio::test]
async fn load_by_name_overlays_server_intervals() {
    let h = ana_harness();

    let outcome = h.service.load("  ana lima ", week()).await;

    let LoadOutcome::Loaded { driver, days } = outcome else {
        panic!("expected Loaded, got {outcome:?}");
    };
    assert_eq!(driver.id, 1);
    assert_eq!(days, 7);
    assert_eq!(h.source.calls(), vec![(1, week())]);

    let schedules = h.service.schedules();
    assert_eq!(schedules.iter().map(|s| s.slots().len()).sum::<usize>(), 7 * 96);
    let day = &schedules[1];
    assert_eq!(day.slot(24).unwrap().state, SlotState::Work);
    assert_eq!(day.slot(39).unwrap().state, SlotState::Work);
    assert_eq!(day.slot(40).unwrap().state, SlotState::Rest);
    assert_eq!(day.slot(42).unwrap().state, SlotState::Unset);
    assert_eq!(day.total_work_minutes(), 240);
    assert_eq!(day.total_rest_minutes(), 30);
    assert_eq!(h.service.state(), SaveState::Clean);
}

#[tokio::test]
async fn unknown_driver_shows_empty_grid() {
    let h = ana_harness();

    assert_eq!(h.service.load("Nobody", week()).await, LoadOutcome::DriverNotFound);

    assert!(h.source.calls().is_empty());
    assert_eq!(h.service.schedules().len(), 7);
    assert!(matches!(h.service.last_error(), Some(LogCheckerError::NotFound(_))));

    h.service.toggle(week().start, 0).unwrap();
    let err = h.service.save().await.unwrap_err();
    assert_eq!(err.to_string(), "Not found: Error: Driver not found");
    assert!(h.sink.submitted().is_empty());
}

#[tokio::test]
async fn fetch_failure_falls_back_to_editable_grid() {
    let h = harness_with(
        MockTimelineSource::new().with_failure(1, LogCheckerError::Network("timeout".into())),
        MockDriverDirectory::new(vec![driver(1, "Ana Lima")]),
        utc(),
    );

    let outcome = h.service.load("Ana Lima", week()).await;

    assert!(matches!(outcome, LoadOutcome::Fallback { error: LogCheckerError::Network(_) }));
    assert!(h.service.schedules().iter().flat_map(|s| s.slots()).all(|s| s.state == SlotState::Unset));
    h.service.toggle(date(2024, 1, 3), 10).unwrap();
    assert_eq!(h.service.state(), SaveState::Dirty);
}

#[tokio::test]
async fn directory_failure_falls_back_to_empty_grid() {
    let h = harness_with(MockTimelineSource::new(), MockDriverDirectory::unavailable(), utc());

    let outcome = h.service.load("Ana Lima", week()).await;

    assert!(matches!(outcome, LoadOutcome::Fallback { .. }));
    assert_eq!(h.service.schedules().len(), 7);
}

#[tokio::test]
async fn single_toggle_saves_one_event() {
    let offset = FixedOffset::east_opt(5 * 3600 + 45 * 60).unwrap();
    let ana = driver(1, "Ana Lima");
    let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 1));
    let h = harness_with(
        MockTimelineSource::new().with_response(1, timeline_response(&ana, range, vec![])),
        MockDriverDirectory::new(vec![ana]),
        offset,
    );
    h.service.load("Ana Lima", range).await;

    assert_eq!(h.service.toggle(date(2024, 1, 1), 0).unwrap(), DutyState::Work);
    assert_eq!(h.service.save().await.unwrap(), SaveOutcome::Saved { events: 1 });

    let submitted = h.sink.submitted();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0].driver_id, 1);
    assert_eq!(submitted[0].date_range, range);
    assert_eq!(submitted[0].timeline.len(), 1);
    assert_eq!(
        submitted[0].timeline[0].timestamp,
        offset.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    );
    assert_eq!(submitted[0].timeline[0].event_type, DutyState::Work);
    assert_eq!(h.service.state(), SaveState::Clean);
    assert_eq!(h.directory.invalidations(), 1);
}

#[tokio::test]
async fn paint_then_toggle_emits_two_run_starts() {
    let h = ana_harness();
    h.service.load("Ana Lima", week()).await;
    let monday = date(2024, 1, 1);

    h.service.paint(monday, 0, 3).unwrap();
    h.service.toggle(monday, 5).unwrap();

    let events = h.service.pending_changes();
    let starts = h.service.schedules()[0].slots().to_vec();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].timestamp, starts[0].wall_clock_start);
    assert_eq!(events[1].timestamp, starts[5].wall_clock_start);
    assert!(events.iter().all(|e| e.event_type == DutyState::Work));
}

#[tokio::test]
async fn save_without_edits_never_reaches_sink() {
    let h = ana_harness();
    h.service.load("Ana Lima", week()).await;

    let outcome = h.service.save().await.unwrap();

    assert_eq!(outcome, SaveOutcome::NoChanges);
    assert_eq!(outcome.message(), "No changes to save");
    assert!(h.sink.submitted().is_empty());
    assert_eq!(h.directory.invalidations(), 0);
}

#[tokio::test]
async fn failed_save_keeps_edits_for_retry() {
    let h = ana_harness();
    h.service.load("Ana Lima", week()).await;
    h.service.toggle(date(2024, 1, 2), 0).unwrap();
    h.sink.set_failing(true);

    let outcome = h.service.save().await.unwrap();

    assert!(matches!(outcome, SaveOutcome::Failed(LogCheckerError::Network(_))));
    assert_eq!(h.service.state(), SaveState::Dirty);
    assert_eq!(h.directory.invalidations(), 0);

    h.sink.set_failing(false);
    assert_eq!(h.service.save().await.unwrap(), SaveOutcome::Saved { events: 3 });
    assert_eq!(h.sink.submitted().len(), 2);
    assert_eq!(h.sink.submitted()[0], h.sink.submitted()[1]);
}

#[tokio::test]
async fn reset_restores_loaded_grid_without_sink() {
    let h = ana_harness();
    h.service.load("Ana Lima", week()).await;
    let loaded = h.service.schedules();

    h.service.paint(date(2024, 1, 2), 30, 60).unwrap();
    assert_ne!(h.service.schedules(), loaded);
    assert!(h.service.reset().unwrap());

    assert_eq!(h.service.schedules(), loaded);
    assert_eq!(h.service.state(), SaveState::Clean);
    assert!(h.sink.submitted().is_empty());
}

#[tokio::test]
async fn stale_response_does_not_clobber_newer_selection() {
    let ana = driver(1, "Ana Lima");
    let bo = driver(2, "Bo Chen");
    let ana_day = timeline_response(
        &ana,
        week(),
        vec![("2024-01-01", vec![DutyInterval::new("00:00", "12:00", DutyState::Work)])],
    );
    let bo_day = timeline_response(
        &bo,
        week(),
        vec![("2024-01-01", vec![DutyInterval::new("00:00", "12:00", DutyState::Rest)])],
    );
    let source = MockTimelineSource::new().with_response(1, ana_day).with_response(2, bo_day);
    let gate = source.gate(1);
    let h = harness_with(source, MockDriverDirectory::new(vec![ana, bo]), utc());

    let slow = h.service.load_driver(1, week());
    let fast = async {
        gate.entered.notified().await;
        let outcome = h.service.load_driver(2, week()).await;
        gate.release.notify_one();
        outcome
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(slow, LoadOutcome::Superseded);
    assert!(matches!(fast, LoadOutcome::Loaded { ref driver, .. } if driver.id == 2));
    assert_eq!(h.service.schedules()[0].slot(0).unwrap().state, SlotState::Rest);
}

#[tokio::test]
async fn slow_name_lookup_does_not_clobber_newer_selection() {
    let ana = driver(1, "Ana Lima");
    let bo = driver(2, "Bo Chen");
    let ana_day = timeline_response(
        &ana,
        week(),
        vec![("2024-01-01", vec![DutyInterval::new("00:00", "12:00", DutyState::Rest)])],
    );
    let bo_day = timeline_response(
        &bo,
        week(),
        vec![("2024-01-01", vec![DutyInterval::new("00:00", "12:00", DutyState::Work)])],
    );
    let directory = MockDriverDirectory::new(vec![ana, bo]);
    let gate = directory.gate("Ana Lima");
    let h = harness_with(
        MockTimelineSource::new().with_response(1, ana_day).with_response(2, bo_day),
        directory,
        utc(),
    );

    let slow = h.service.load("Ana Lima", week());
    let fast = async {
        gate.entered.notified().await;
        let outcome = h.service.load("Bo Chen", week()).await;
        gate.release.notify_one();
        outcome
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(slow, LoadOutcome::Superseded);
    assert!(matches!(fast, LoadOutcome::Loaded { ref driver, .. } if driver.id == 2));
    assert_eq!(h.source.calls().iter().map(|(id, _)| *id).collect::<Vec<_>>(), vec![2]);
    assert_eq!(h.service.schedules()[0].slot(0).unwrap().state, SlotState::Work);
}

#[tokio::test]
async fn slow_unknown_name_does_not_overwrite_loaded_driver() {
    let h = ana_harness();
    let gate = h.directory.gate("Nobody");

    let slow = h.service.load("Nobody", week());
    let fast = async {
        gate.entered.notified().await;
        let outcome = h.service.load("Ana Lima", week()).await;
        gate.release.notify_one();
        outcome
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(slow, LoadOutcome::Superseded);
    assert!(matches!(fast, LoadOutcome::Loaded { .. }));
    assert!(h.service.last_error().is_none());
    assert_eq!(h.service.schedules()[1].slot(24).unwrap().state, SlotState::Work);
}

#[tokio::test]
async fn edits_outside_range_are_rejected() {
    let h = ana_harness();
    h.service.load("Ana Lima", week()).await;

    assert!(matches!(h.service.toggle(date(2024, 2, 1), 0), Err(LogCheckerError::InvalidInput(_))));
    assert!(matches!(h.service.paint(date(2024, 1, 1), 90, 96), Err(LogCheckerError::InvalidInput(_))));
    assert_eq!(h.service.state(), SaveState::Clean);
}
