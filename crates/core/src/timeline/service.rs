//! Timeline service - orchestrates ports around a [`TimelineSession`]
//!
//! The session lock is only ever held for synchronous work; every port call
//! happens between a ticket being issued and its result being handed back.

use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate};
use logchecker_domain::{
    ChangeEvent, DateRange, DaySchedule, Driver, DriverRef, DutyState, LogCheckerError, Result,
};
use parking_lot::Mutex;
use tracing::{info, warn};

use super::ports::{DriverDirectory, TimelineSink, TimelineSource};
use crate::grid::PaintResult;
use crate::session::{LoadTicket, SavePlan, SaveOutcome, SaveState, TimelineSession};

/// What a load ended up showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { driver: DriverRef, days: usize },
    /// The name matched no known driver; an empty grid is shown.
    DriverNotFound,
    /// The fetch failed; an empty grid is shown.
    Fallback { error: LogCheckerError },
    /// A newer load was started before this one finished.
    Superseded,
}

/// Timeline editing service
pub struct TimelineService {
    source: Arc<dyn TimelineSource>,
    sink: Arc<dyn TimelineSink>,
    directory: Arc<dyn DriverDirectory>,
    session: Arc<Mutex<TimelineSession>>,
}

impl TimelineService {
    /// Create a service whose grids all carry `offset`.
    pub fn new(
        source: Arc<dyn TimelineSource>,
        sink: Arc<dyn TimelineSink>,
        directory: Arc<dyn DriverDirectory>,
        offset: FixedOffset,
    ) -> Self {
        Self {
            source,
            sink,
            directory,
            session: Arc::new(Mutex::new(TimelineSession::new(offset))),
        }
    }

    pub async fn drivers(&self) -> Result<Vec<Driver>> {
        self.directory.list_drivers().await
    }

    pub async fn resolve_driver(&self, name: &str) -> Result<Option<Driver>> {
        self.directory.find_by_name(name).await
    }

    /// Resolve `name` and load that driver's timeline for `range`.
    ///
    /// The selection is taken before the name lookup, so a later selection
    /// always wins even when this lookup is the slower one. Never fails on
    /// data problems: an unknown driver or a failed directory or timeline
    /// fetch leaves an editable empty grid.
    pub async fn load(&self, name: &str, range: DateRange) -> LoadOutcome {
        let ticket = self.session.lock().select(None, range);
        let lookup = self.directory.find_by_name(name).await;

        let ticket = {
            let mut session = self.session.lock();
            match lookup {
                Ok(Some(driver)) => match session.bind_driver(&ticket, driver.id) {
                    Some(bound) => bound,
                    None => return LoadOutcome::Superseded,
                },
                Ok(None) => {
                    if !session.apply_driver_not_found(&ticket, name) {
                        return LoadOutcome::Superseded;
                    }
                    warn!(driver = name, "driver not found");
                    return LoadOutcome::DriverNotFound;
                }
                Err(error) => {
                    if !session.apply_load_failure(&ticket, &error) {
                        return LoadOutcome::Superseded;
                    }
                    return LoadOutcome::Fallback { error };
                }
            }
        };

        self.fetch(ticket).await
    }

    /// Load a driver by id. Only the most recently started load is applied.
    pub async fn load_driver(&self, driver_id: i64, range: DateRange) -> LoadOutcome {
        let ticket = self.session.lock().select(Some(driver_id), range);
        self.fetch(ticket).await
    }

    async fn fetch(&self, ticket: LoadTicket) -> LoadOutcome {
        let Some(driver_id) = ticket.driver_id else {
            return LoadOutcome::DriverNotFound;
        };
        let result = self.source.fetch_timeline(driver_id, ticket.range).await;

        let mut session = self.session.lock();
        match result {
            Ok(response) => {
                if !session.apply_load(&ticket, &response) {
                    return LoadOutcome::Superseded;
                }
                info!(driver_id, days = ticket.range.day_count(), "timeline loaded");
                LoadOutcome::Loaded { driver: response.driver, days: session.schedules().len() }
            }
            Err(error) => {
                if !session.apply_load_failure(&ticket, &error) {
                    return LoadOutcome::Superseded;
                }
                LoadOutcome::Fallback { error }
            }
        }
    }

    pub fn toggle(&self, date: NaiveDate, index: usize) -> Result<DutyState> {
        self.session.lock().toggle(date, index)
    }

    pub fn paint(&self, date: NaiveDate, start: usize, end: usize) -> Result<PaintResult> {
        self.session.lock().paint(date, start, end)
    }

    pub fn pending_changes(&self) -> Vec<ChangeEvent> {
        self.session.lock().pending_changes()
    }

    /// Submit the pending changes.
    ///
    /// # Errors
    /// `InvalidState` when a save is already running or no driver is loaded.
    /// A sink failure is not an error here; it comes back as
    /// [`SaveOutcome::Failed`] with the edits kept.
    pub async fn save(&self) -> Result<SaveOutcome> {
        let plan = self.session.lock().begin_save()?;
        let ticket = match plan {
            SavePlan::NoChanges => {
                info!("no changes to save");
                return Ok(SaveOutcome::NoChanges);
            }
            SavePlan::Submit(ticket) => ticket,
        };

        let result = self.sink.submit_timeline(&ticket.request).await;
        if result.is_ok() {
            self.directory.invalidate().await;
        }

        Ok(self.session.lock().finish_save(&ticket, result))
    }

    pub fn reset(&self) -> Result<bool> {
        self.session.lock().reset()
    }

    pub fn state(&self) -> SaveState {
        self.session.lock().state()
    }

    pub fn schedules(&self) -> Vec<DaySchedule> {
        self.session.lock().schedules().to_vec()
    }

    pub fn last_error(&self) -> Option<LogCheckerError> {
        self.session.lock().last_error().cloned()
    }
}
