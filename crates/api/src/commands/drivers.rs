//! Driver directory commands

use std::time::Instant;

use logchecker_domain::{Driver, Result};
use tracing::info;

use crate::context::AppContext;
use crate::utils::logging::{error_label, log_command_execution};

/// List every driver known to the API.
pub async fn list_drivers(ctx: &AppContext) -> Result<Vec<Driver>> {
    let command_name = "drivers::list";
    let start = Instant::now();

    let result = ctx.timeline.drivers().await;
    if let Ok(drivers) = &result {
        info!(command = command_name, count = drivers.len(), "listed drivers");
    }

    log_command_execution(command_name, start.elapsed(), result.as_ref().err().map(error_label));
    result
}
