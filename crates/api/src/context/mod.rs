//! Application context - dependency injection container

use std::sync::Arc;
use std::time::Duration;

use chrono::{FixedOffset, Local, NaiveDate, Offset, Utc};
use logchecker_core::{DriverDirectory, TimelineService};
use logchecker_domain::{Config, DateRange, LogCheckerError, Result};
use logchecker_infra::{ApiClient, ApiClientConfig, CachedDriverDirectory, TimelineApi};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    /// Offset stamped on every grid built during this run.
    pub offset: FixedOffset,
    pub directory: Arc<dyn DriverDirectory>,
    pub timeline: Arc<TimelineService>,
}

impl AppContext {
    /// Wire the context from configuration. Without a configured
    /// `grid.utc_offset` the machine's current local offset is captured once.
    ///
    /// # Errors
    /// `Config` when the offset or the API base URL is invalid.
    pub fn new(config: Config) -> Result<Self> {
        let local = Local::now().offset().fix();
        let offset = config.grid.resolve_offset(local)?;
        Self::with_offset(config, offset)
    }

    /// Wire the context with an explicit grid offset.
    pub fn with_offset(config: Config, offset: FixedOffset) -> Result<Self> {
        let client = ApiClient::new(ApiClientConfig::from(&config.api))
            .map_err(|e| LogCheckerError::Config(e.to_string()))?;
        let api = Arc::new(TimelineApi::new(Arc::new(client)));

        let directory: Arc<dyn DriverDirectory> = Arc::new(CachedDriverDirectory::new(
            api.clone(),
            Duration::from_secs(config.api.driver_cache_ttl_seconds),
        ));
        let timeline = Arc::new(TimelineService::new(
            api.clone(),
            api,
            Arc::clone(&directory),
            offset,
        ));

        info!(base_url = %config.api.base_url, %offset, "application context ready");
        Ok(Self { config, offset, directory, timeline })
    }

    /// Today's date in the grid offset.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }

    /// Range to show when the caller gives only some bounds.
    ///
    /// A missing start is today; a missing end extends the start by
    /// `grid.default_range_days`.
    pub fn resolve_range(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<DateRange> {
        let start = start.unwrap_or_else(|| self.today());
        let range = match end {
            Some(end) => DateRange::new(start, end),
            None => DateRange::starting_at(start, self.config.grid.default_range_days)?,
        };
        if range.is_empty() {
            return Err(LogCheckerError::InvalidInput(format!(
                "start date {} is after end date {}",
                range.start, range.end
            )));
        }
        Ok(range)
    }
}
