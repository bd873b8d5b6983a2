//! Editing session over a loaded date range
//!
//! [`TimelineSession`] owns the on-screen grids, the snapshot they are reset
//! to, and the [`ModificationSet`]. It never performs I/O: the service layer
//! asks it for a [`LoadTicket`] or [`SaveTicket`], awaits the port call with
//! no lock held, and hands the result back. Tickets carry the generation they
//! were issued under so that only the most recently initiated load can land.

use chrono::{FixedOffset, NaiveDate};
use logchecker_domain::constants::{
    MSG_DRIVER_NOT_FOUND, MSG_NO_CHANGES, MSG_RESET, MSG_SAVED, MSG_SAVE_FAILED, MSG_SAVE_STALE,
};
use logchecker_domain::{
    ChangeEvent, DateRange, DaySchedule, DutyState, LogCheckerError, Result, TimelineRequest,
    TimelineResponse,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::grid::{
    build_schedules, compute_changes, paint_range, reconcile, toggle_slot, ModificationSet,
    PaintResult,
};

/// Save/reset lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SaveState {
    Clean,
    Dirty,
    Saving,
}

/// Issued by [`TimelineSession::select`]; only the latest ticket may apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    pub driver_id: Option<i64>,
    pub range: DateRange,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A submission in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveTicket {
    id: u64,
    load_generation: u64,
    pub request: TimelineRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavePlan {
    /// Nothing was modified; the sink must not be contacted.
    NoChanges,
    Submit(SaveTicket),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    NoChanges,
    Saved { events: usize },
    /// The sink rejected the submission; edits are kept.
    Failed(LogCheckerError),
    /// A newer selection replaced the grids while the save was in flight.
    Stale,
}

impl SaveOutcome {
    /// User-facing status line.
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoChanges => MSG_NO_CHANGES,
            Self::Saved { .. } => MSG_SAVED,
            Self::Failed(_) => MSG_SAVE_FAILED,
            Self::Stale => MSG_SAVE_STALE,
        }
    }
}

#[derive(Debug)]
pub struct TimelineSession {
    offset: FixedOffset,
    generation: u64,
    driver_id: Option<i64>,
    range: Option<DateRange>,
    schedules: Vec<DaySchedule>,
    snapshot: Vec<DaySchedule>,
    modifications: ModificationSet,
    next_save_id: u64,
    saving: Option<u64>,
    last_error: Option<LogCheckerError>,
}

impl TimelineSession {
    /// Empty session; every grid it builds carries `offset`.
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            generation: 0,
            driver_id: None,
            range: None,
            schedules: Vec::new(),
            snapshot: Vec::new(),
            modifications: ModificationSet::new(),
            next_save_id: 0,
            saving: None,
            last_error: None,
        }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Switch to a new driver/range selection.
    ///
    /// The grids are replaced by blank ones immediately and unsaved edits are
    /// discarded. Any ticket issued before this call becomes stale, including
    /// an in-flight save.
    pub fn select(&mut self, driver_id: Option<i64>, range: DateRange) -> LoadTicket {
        self.generation += 1;
        self.driver_id = driver_id;
        self.range = Some(range);
        self.install(build_schedules(range, self.offset));
        self.saving = None;
        self.last_error = None;
        debug!(generation = self.generation, ?driver_id, start = %range.start, end = %range.end, "selection changed");

        LoadTicket { generation: self.generation, driver_id, range }
    }

    /// Attach the driver a name resolved to. Returns the ticket to fetch
    /// with, or `None` when a newer selection started during the lookup.
    pub fn bind_driver(&mut self, ticket: &LoadTicket, driver_id: i64) -> Option<LoadTicket> {
        if !self.is_current(ticket) {
            debug!(stale = ticket.generation, current = self.generation, "discarding stale driver lookup");
            return None;
        }
        self.driver_id = Some(driver_id);
        Some(LoadTicket { generation: ticket.generation, driver_id: Some(driver_id), range: ticket.range })
    }

    /// Record that the selected name matched no driver. The blank grids from
    /// [`select`](Self::select) stay. Returns `false` for a stale ticket.
    pub fn apply_driver_not_found(&mut self, ticket: &LoadTicket, name: &str) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.last_error = Some(LogCheckerError::NotFound(format!("driver {name}")));
        true
    }

    /// Land a fetch result. Returns `false` when a newer selection exists and
    /// the response was dropped.
    pub fn apply_load(&mut self, ticket: &LoadTicket, response: &TimelineResponse) -> bool {
        if !self.is_current(ticket) {
            debug!(stale = ticket.generation, current = self.generation, "discarding stale timeline");
            return false;
        }
        self.install(reconcile(ticket.range, self.offset, response));
        self.last_error = None;
        true
    }

    /// Record a failed fetch: the range falls back to blank grids so it stays
    /// editable. Returns `false` for a stale ticket.
    pub fn apply_load_failure(&mut self, ticket: &LoadTicket, error: &LogCheckerError) -> bool {
        if !self.is_current(ticket) {
            debug!(stale = ticket.generation, current = self.generation, "discarding stale load failure");
            return false;
        }
        warn!(error = %error, "timeline load failed, showing empty grid");
        self.install(build_schedules(ticket.range, self.offset));
        self.last_error = Some(error.clone());
        true
    }

    pub fn toggle(&mut self, date: NaiveDate, index: usize) -> Result<DutyState> {
        self.ensure_editable()?;
        let schedule = self.schedule_mut(date)?;
        let state = toggle_slot(schedule, index)?;
        self.modifications.insert(date, index);
        Ok(state)
    }

    pub fn paint(&mut self, date: NaiveDate, start: usize, end: usize) -> Result<PaintResult> {
        self.ensure_editable()?;
        let schedule = self.schedule_mut(date)?;
        let result = paint_range(schedule, start, end)?;
        self.modifications.insert_range(date, result.range.clone());
        Ok(result)
    }

    /// Events a save would submit right now.
    pub fn pending_changes(&self) -> Vec<ChangeEvent> {
        compute_changes(&self.schedules, &self.modifications)
    }

    /// Move to `Saving` and hand out the request to submit, or report that
    /// there is nothing to send.
    ///
    /// # Errors
    /// `InvalidState` when a save is already in flight or no driver is
    /// selected.
    pub fn begin_save(&mut self) -> Result<SavePlan> {
        if self.saving.is_some() {
            return Err(LogCheckerError::InvalidState("save already in progress".into()));
        }

        let timeline = self.pending_changes();
        if timeline.is_empty() {
            return Ok(SavePlan::NoChanges);
        }

        let (Some(driver_id), Some(date_range)) = (self.driver_id, self.range) else {
            return Err(LogCheckerError::NotFound(MSG_DRIVER_NOT_FOUND.into()));
        };

        self.next_save_id += 1;
        self.saving = Some(self.next_save_id);
        info!(driver_id, events = timeline.len(), "submitting timeline changes");

        Ok(SavePlan::Submit(SaveTicket {
            id: self.next_save_id,
            load_generation: self.generation,
            request: TimelineRequest { driver_id, date_range, timeline },
        }))
    }

    /// Settle a save. Success snapshots the grids and clears the
    /// modifications; failure returns to `Dirty` with everything kept.
    pub fn finish_save(&mut self, ticket: &SaveTicket, result: Result<()>) -> SaveOutcome {
        if ticket.load_generation != self.generation || self.saving != Some(ticket.id) {
            debug!(save = ticket.id, "save settled after selection changed");
            return SaveOutcome::Stale;
        }
        self.saving = None;

        match result {
            Ok(()) => {
                self.snapshot = self.schedules.clone();
                self.modifications.clear();
                self.last_error = None;
                SaveOutcome::Saved { events: ticket.request.timeline.len() }
            }
            Err(error) => {
                warn!(error = %error, "timeline save failed, edits kept");
                self.last_error = Some(error.clone());
                SaveOutcome::Failed(error)
            }
        }
    }

    /// Restore the last loaded or saved grids. Returns whether anything was
    /// discarded.
    pub fn reset(&mut self) -> Result<bool> {
        self.ensure_editable()?;
        let discarded = !self.modifications.is_empty();
        self.schedules = self.snapshot.clone();
        self.modifications.clear();
        if discarded {
            info!("{MSG_RESET}");
        }
        Ok(discarded)
    }

    pub fn state(&self) -> SaveState {
        if self.saving.is_some() {
            SaveState::Saving
        } else if self.modifications.is_empty() {
            SaveState::Clean
        } else {
            SaveState::Dirty
        }
    }

    pub fn schedules(&self) -> &[DaySchedule] {
        &self.schedules
    }

    /// Grids as of the last load, save or reset.
    pub fn original(&self) -> &[DaySchedule] {
        &self.snapshot
    }

    pub fn modifications(&self) -> &ModificationSet {
        &self.modifications
    }

    pub fn driver_id(&self) -> Option<i64> {
        self.driver_id
    }

    pub fn range(&self) -> Option<DateRange> {
        self.range
    }

    pub fn last_error(&self) -> Option<&LogCheckerError> {
        self.last_error.as_ref()
    }

    /// Remember an error that did not come from a load or save, such as an
    /// unknown driver name.
    pub fn record_error(&mut self, error: LogCheckerError) {
        self.last_error = Some(error);
    }

    fn is_current(&self, ticket: &LoadTicket) -> bool {
        ticket.generation == self.generation
    }

    fn install(&mut self, schedules: Vec<DaySchedule>) {
        self.snapshot = schedules.clone();
        self.schedules = schedules;
        self.modifications.clear();
    }

    fn ensure_editable(&self) -> Result<()> {
        if self.saving.is_some() {
            Err(LogCheckerError::InvalidState("timeline is being saved".into()))
        } else {
            Ok(())
        }
    }

    fn schedule_mut(&mut self, date: NaiveDate) -> Result<&mut DaySchedule> {
        self.schedules
            .iter_mut()
            .find(|schedule| schedule.date() == date)
            .ok_or_else(|| LogCheckerError::InvalidInput(format!("{date} is not in the loaded range")))
    }
}
