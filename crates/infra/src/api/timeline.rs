//! HTTP adapters for the timeline ports.

use std::sync::Arc;

use async_trait::async_trait;
use logchecker_core::{DriverDirectory, TimelineSink, TimelineSource};
use logchecker_domain::constants::{DATE_FORMAT, DRIVERS_PATH, TIMELINE_PATH};
use logchecker_domain::{
    ApiEnvelope, DateRange, Driver, Result, TimelineRequest, TimelineResponse,
};
use serde::Deserialize;
use tracing::{debug, info};

use super::client::ApiClient;

/// Acknowledgement body of `POST /api/timeline`.
#[derive(Debug, Deserialize)]
struct SaveAck {
    #[serde(default)]
    message: String,
}

/// Implements every timeline port against the REST API.
#[derive(Clone)]
pub struct TimelineApi {
    client: Arc<ApiClient>,
}

impl TimelineApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TimelineSource for TimelineApi {
    async fn fetch_timeline(&self, driver_id: i64, range: DateRange) -> Result<TimelineResponse> {
        let query = [
            ("driverId", driver_id.to_string()),
            ("startDate", range.start.format(DATE_FORMAT).to_string()),
            ("endDate", range.end.format(DATE_FORMAT).to_string()),
        ];

        let envelope: ApiEnvelope<TimelineResponse> =
            self.client.get_with_query(TIMELINE_PATH, &query).await?;
        debug!(driver_id, days = envelope.data.timeline.len(), "fetched timeline");
        Ok(envelope.data)
    }
}

#[async_trait]
impl TimelineSink for TimelineApi {
    async fn submit_timeline(&self, request: &TimelineRequest) -> Result<()> {
        let ack: Option<SaveAck> = self.client.post(TIMELINE_PATH, request).await?;
        info!(
            driver_id = request.driver_id,
            events = request.timeline.len(),
            server_message = ack.map(|a| a.message).unwrap_or_default(),
            "timeline accepted"
        );
        Ok(())
    }
}

#[async_trait]
impl DriverDirectory for TimelineApi {
    async fn list_drivers(&self) -> Result<Vec<Driver>> {
        let envelope: ApiEnvelope<Vec<Driver>> = self.client.get(DRIVERS_PATH).await?;
        debug!(count = envelope.data.len(), "fetched drivers");
        Ok(envelope.data)
    }
}
