//! Driver directory with a TTL cache in front of it.
//!
//! The listing changes rarely, so one fetch is reused until it expires or a
//! save invalidates it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use logchecker_core::DriverDirectory;
use logchecker_domain::{Driver, LogCheckerError, Result};
use moka::future::Cache;
use tracing::debug;

/// Default TTL for the cached listing (10 minutes).
pub const DEFAULT_DIRECTORY_TTL: Duration = Duration::from_secs(600);

#[derive(Clone)]
pub struct CachedDriverDirectory {
    inner: Arc<dyn DriverDirectory>,
    cache: Cache<(), Arc<Vec<Driver>>>,
}

impl CachedDriverDirectory {
    #[must_use]
    pub fn new(inner: Arc<dyn DriverDirectory>, ttl: Duration) -> Self {
        Self { inner, cache: Cache::builder().time_to_live(ttl).max_capacity(1).build() }
    }
}

#[async_trait]
impl DriverDirectory for CachedDriverDirectory {
    async fn list_drivers(&self) -> Result<Vec<Driver>> {
        let inner = Arc::clone(&self.inner);
        let drivers = self
            .cache
            .try_get_with((), async move {
                debug!("driver directory cache miss");
                inner.list_drivers().await.map(Arc::new)
            })
            .await
            .map_err(|err: Arc<LogCheckerError>| (*err).clone())?;

        Ok(drivers.as_ref().clone())
    }

    async fn invalidate(&self) {
        debug!("invalidating driver directory cache");
        self.cache.invalidate(&()).await;
    }
}
