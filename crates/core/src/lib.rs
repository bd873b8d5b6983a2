//! # LogChecker Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The 96-slot grid reconciler (construction, overlay, edits, diff)
//! - The editing session and its save/reset state machine
//! - Port interfaces (traits) for the duty-log API
//! - The timeline service tying ports and session together
//!
//! ## Architecture Principles
//! - Only depends on `logchecker-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Timezone offset is always an explicit input

pub mod grid;
pub mod session;
pub mod timeline;

pub use grid::{
    build_schedules, compute_changes, overlay_day, paint_range, reconcile, toggle_slot,
    ModificationSet, OverlayReport, PaintResult,
};
pub use session::{LoadTicket, SaveOutcome, SavePlan, SaveState, SaveTicket, TimelineSession};
pub use timeline::ports::{DriverDirectory, TimelineSink, TimelineSource};
pub use timeline::{LoadOutcome, TimelineService};
