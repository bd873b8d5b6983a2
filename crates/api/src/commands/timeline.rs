//! Timeline display and editing commands

use std::str::FromStr;
use std::time::Instant;

use chrono::NaiveDate;
use logchecker_core::{LoadOutcome, SaveOutcome};
use logchecker_domain::constants::{DATE_FORMAT, MSG_DRIVER_NOT_FOUND, MSG_LOAD_FAILED};
use logchecker_domain::{DateRange, DriverRef, LogCheckerError, Result};
use tracing::{info, warn};

use crate::context::AppContext;
use crate::report::{EditReport, TimelineReport};
use crate::utils::logging::{error_label, log_command_execution};

/// A single grid edit given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    /// `DATE:INDEX`
    Toggle { date: NaiveDate, index: usize },
    /// `DATE:FROM-TO`, painted with the state of `FROM`
    Paint { date: NaiveDate, from: usize, to: usize },
}

impl FromStr for EditOp {
    type Err = LogCheckerError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = |why: &str| LogCheckerError::InvalidInput(format!("invalid edit '{s}': {why}"));

        let (date, slots) = s.trim().split_once(':').ok_or_else(|| invalid("expected DATE:SLOT"))?;
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| invalid("bad date"))?;
        let index = |raw: &str| raw.trim().parse::<usize>().map_err(|_| invalid("bad slot index"));

        match slots.split_once('-') {
            Some((from, to)) => Ok(Self::Paint { date, from: index(from)?, to: index(to)? }),
            None => Ok(Self::Toggle { date, index: index(slots)? }),
        }
    }
}

/// Interleave edits gathered from separate flags by their command-line
/// position. Ties keep `toggles` first.
pub fn merge_by_position(
    toggles: impl IntoIterator<Item = (usize, EditOp)>,
    paints: impl IntoIterator<Item = (usize, EditOp)>,
) -> Vec<EditOp> {
    let mut positioned: Vec<(usize, EditOp)> = toggles.into_iter().chain(paints).collect();
    positioned.sort_by_key(|(position, _)| *position);
    positioned.into_iter().map(|(_, op)| op).collect()
}

#[derive(Debug, Clone)]
pub struct ShowRequest {
    pub driver: String,
    pub range: DateRange,
}

#[derive(Debug, Clone)]
pub struct EditRequest {
    pub driver: String,
    pub range: DateRange,
    /// Applied one after another; toggles and paints do not commute.
    pub edits: Vec<EditOp>,
    pub dry_run: bool,
}

/// Load and summarise a driver's timeline.
pub async fn show_timeline(ctx: &AppContext, request: ShowRequest) -> Result<TimelineReport> {
    let command_name = "timeline::show";
    let start = Instant::now();

    let result = load(ctx, &request.driver, request.range).await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(error_label));
    result
}

/// Load a driver's timeline, apply edits and save the resulting changes.
///
/// With `dry_run` the change events are computed and reported but nothing
/// is submitted.
pub async fn edit_timeline(ctx: &AppContext, request: EditRequest) -> Result<EditReport> {
    let command_name = "timeline::edit";
    let start = Instant::now();

    let result = run_edit(ctx, request).await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(error_label));
    result
}

async fn load(ctx: &AppContext, driver: &str, range: DateRange) -> Result<TimelineReport> {
    let outcome = ctx.timeline.load(driver, range).await;
    let schedules = ctx.timeline.schedules();

    match outcome {
        LoadOutcome::Loaded { driver, .. } => Ok(TimelineReport::new(Some(driver), range, &schedules)),
        LoadOutcome::DriverNotFound => {
            Err(LogCheckerError::NotFound(format!("{MSG_DRIVER_NOT_FOUND}: {driver}")))
        }
        LoadOutcome::Fallback { error } => {
            warn!(error = %error, "showing empty grid");
            let mut report = TimelineReport::new(None, range, &schedules);
            report.notice = Some(format!("{MSG_LOAD_FAILED}: {error}"));
            Ok(report)
        }
        LoadOutcome::Superseded => {
            Err(LogCheckerError::InvalidState("load superseded by a newer selection".into()))
        }
    }
}

async fn run_edit(ctx: &AppContext, request: EditRequest) -> Result<EditReport> {
    let loaded = load(ctx, &request.driver, request.range).await?;
    let driver: Option<DriverRef> = loaded.driver.clone();

    for op in &request.edits {
        match *op {
            EditOp::Toggle { date, index } => {
                let state = ctx.timeline.toggle(date, index)?;
                info!(%date, index, %state, "toggled slot");
            }
            EditOp::Paint { date, from, to } => {
                let painted = ctx.timeline.paint(date, from, to)?;
                info!(%date, from, to, state = %painted.state, "painted slots");
            }
        }
    }

    let events = ctx.timeline.pending_changes();
    let status = if request.dry_run {
        format!("Dry run: {} change event(s) not submitted", events.len())
    } else {
        match ctx.timeline.save().await? {
            SaveOutcome::Failed(error) => return Err(error),
            outcome => outcome.message().to_string(),
        }
    };

    let mut timeline = TimelineReport::new(driver, request.range, &ctx.timeline.schedules());
    timeline.notice = loaded.notice;

    Ok(EditReport {
        timeline,
        events,
        state: ctx.timeline.state(),
        dry_run: request.dry_run,
        status,
    })
}
