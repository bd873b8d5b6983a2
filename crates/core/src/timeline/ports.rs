//! Port interfaces for the duty-log API
//!
//! The service only talks to the outside world through these traits; infra
//! provides the HTTP adapters and tests provide in-memory ones.

use async_trait::async_trait;
use logchecker_domain::{DateRange, Driver, Result, TimelineRequest, TimelineResponse};

/// Read side: a driver's intervals and summaries for a date range.
#[async_trait]
pub trait TimelineSource: Send + Sync {
    async fn fetch_timeline(&self, driver_id: i64, range: DateRange) -> Result<TimelineResponse>;
}

/// Write side: accepts one whole submission or fails it entirely.
#[async_trait]
pub trait TimelineSink: Send + Sync {
    async fn submit_timeline(&self, request: &TimelineRequest) -> Result<()>;
}

/// Known drivers, used to resolve names to ids.
#[async_trait]
pub trait DriverDirectory: Send + Sync {
    async fn list_drivers(&self) -> Result<Vec<Driver>>;

    /// Case-insensitive exact name lookup.
    async fn find_by_name(&self, name: &str) -> Result<Option<Driver>> {
        let wanted = name.trim().to_lowercase();
        Ok(self.list_drivers().await?.into_iter().find(|d| d.name.trim().to_lowercase() == wanted))
    }

    /// Drop any cached listing. Called after a successful save.
    async fn invalidate(&self) {}
}
