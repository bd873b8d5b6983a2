//! Mock port implementations for testing
//!
//! Each mock records what it was asked so tests can assert on port traffic
//! as well as session state.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use logchecker_core::{DriverDirectory, TimelineSink, TimelineSource};
use logchecker_domain::{
    DateRange, Driver, LogCheckerError, Result as DomainResult, TimelineRequest, TimelineResponse,
};
use parking_lot::Mutex;
use tokio::sync::Notify;

/// Pauses a fetch until the test releases it.
#[derive(Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

/// In-memory mock for `TimelineSource`.
#[derive(Default)]
pub struct MockTimelineSource {
    responses: Mutex<HashMap<i64, DomainResult<TimelineResponse>>>,
    gates: Mutex<HashMap<i64, Arc<Gate>>>,
    calls: Mutex<Vec<(i64, DateRange)>>,
}

impl MockTimelineSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, driver_id: i64, response: TimelineResponse) -> Self {
        self.responses.lock().insert(driver_id, Ok(response));
        self
    }

    pub fn with_failure(self, driver_id: i64, error: LogCheckerError) -> Self {
        self.responses.lock().insert(driver_id, Err(error));
        self
    }

    /// Make fetches for `driver_id` wait on the returned gate.
    pub fn gate(&self, driver_id: i64) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.gates.lock().insert(driver_id, Arc::clone(&gate));
        gate
    }

    pub fn calls(&self) -> Vec<(i64, DateRange)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl TimelineSource for MockTimelineSource {
    async fn fetch_timeline(&self, driver_id: i64, range: DateRange) -> DomainResult<TimelineResponse> {
        self.calls.lock().push((driver_id, range));

        let gate = self.gates.lock().get(&driver_id).cloned();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        self.responses
            .lock()
            .get(&driver_id)
            .cloned()
            .unwrap_or_else(|| Err(LogCheckerError::NotFound(format!("timeline for {driver_id}"))))
    }
}

/// In-memory mock for `TimelineSink`.
#[derive(Default)]
pub struct MockTimelineSink {
    fail: AtomicBool,
    submitted: Mutex<Vec<TimelineRequest>>,
}

impl MockTimelineSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn submitted(&self) -> Vec<TimelineRequest> {
        self.submitted.lock().clone()
    }
}

#[async_trait]
impl TimelineSink for MockTimelineSink {
    async fn submit_timeline(&self, request: &TimelineRequest) -> DomainResult<()> {
        self.submitted.lock().push(request.clone());
        if self.fail.load(Ordering::SeqCst) {
            Err(LogCheckerError::Network("HTTP 500: server error".into()))
        } else {
            Ok(())
        }
    }
}

/// In-memory mock for `DriverDirectory`.
#[derive(Default)]
pub struct MockDriverDirectory {
    drivers: Vec<Driver>,
    unavailable: bool,
    invalidations: AtomicUsize,
    gates: Mutex<HashMap<String, Arc<Gate>>>,
}

impl MockDriverDirectory {
    pub fn new(drivers: Vec<Driver>) -> Self {
        Self { drivers, ..Self::default() }
    }

    pub fn unavailable() -> Self {
        Self { unavailable: true, ..Self::default() }
    }

    /// Make lookups of `name` wait on the returned gate.
    pub fn gate(&self, name: &str) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.gates.lock().insert(name.to_lowercase(), Arc::clone(&gate));
        gate
    }

    pub fn invalidations(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DriverDirectory for MockDriverDirectory {
    async fn list_drivers(&self) -> DomainResult<Vec<Driver>> {
        if self.unavailable {
            return Err(LogCheckerError::Network("connection refused".into()));
        }
        Ok(self.drivers.clone())
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Driver>> {
        let wanted = name.trim().to_lowercase();
        let gate = self.gates.lock().get(&wanted).cloned();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        Ok(self.list_drivers().await?.into_iter().find(|d| d.name.to_lowercase() == wanted))
    }

    async fn invalidate(&self) {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
    }
}
