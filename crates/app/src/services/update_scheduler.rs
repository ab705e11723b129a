//! Update scheduler: refreshes every registered sensor on a fixed cadence.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use nilan_domain::error::{NilanError, ValidationError};

use crate::ports::{EventPublisher, NilanDevice};
use crate::services::entity_registry::EntityRegistry;

/// Background task calling [`EntityRegistry::refresh_all`] every interval.
///
/// The first pass runs one interval after start, since registration already
/// refreshed each entity once. The interval is measured from the end of one
/// pass to the start of the next, so a slow pass never causes a burst.
pub struct UpdateScheduler<D, EP> {
    registry: Arc<EntityRegistry<D, EP>>,
    interval: Duration,
}

impl<D, EP> UpdateScheduler<D, EP>
where
    D: NilanDevice + 'static,
    EP: EventPublisher + Send + Sync + 'static,
{
    /// Spawn the scheduler. Abort the returned handle to stop it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::ZeroScanInterval`] when `interval` is zero.
    pub fn start(
        registry: Arc<EntityRegistry<D, EP>>,
        interval: Duration,
    ) -> Result<JoinHandle<()>, NilanError> {
        if interval.is_zero() {
            return Err(ValidationError::ZeroScanInterval.into());
        }
        let scheduler = Self { registry, interval };
        Ok(tokio::spawn(scheduler.run()))
    }

    /// Continuous update loop: waits for the interval, refreshes, repeats.
    async fn run(self) {
        loop {
            tokio::time::sleep(self.interval).await;
            let summary = self.registry.refresh_all().await;
            if summary.failed > 0 {
                tracing::warn!(
                    refreshed = summary.refreshed,
                    failed = summary.failed,
                    "sensor update pass finished with failures"
                );
            } else {
                tracing::debug!(refreshed = summary.refreshed, "sensor update pass finished");
            }
        }
    }
}
