//! Grid reconciliation
//!
//! Builds the fixed 96-slot day grids, lays server duty intervals over them,
//! applies interactive edits and derives the change events sent back on
//! save.
//!
//! Every function here is synchronous and pure with respect to I/O; the
//! session and service layers decide when they run.

pub mod builder;
pub mod diff;
pub mod edit;
pub mod modifications;
pub mod overlay;

pub use builder::build_schedules;
pub use diff::compute_changes;
pub use edit::{paint_range, toggle_slot, PaintResult};
pub use modifications::ModificationSet;
pub use overlay::{overlay_day, reconcile, OverlayReport};
