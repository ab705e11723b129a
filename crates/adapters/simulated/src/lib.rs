//! # nilan-adapter-simulated
//!
//! A stand-in for the real controller handle. It performs no protocol work:
//! platform assignments and getter values come from [`SimulatedConfig`] and
//! can be changed at runtime with [`SimulatedDevice::set_value`].
//!
//! ## Dependency rule
//!
//! Depends on `nilan-app` (port traits) and `nilan-domain` only.

mod config;
mod error;

pub use config::SimulatedConfig;
pub use error::SimulatedError;

use std::collections::HashMap;
use std::future::Future;
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use nilan_app::ports::NilanDevice;
use nilan_domain::error::NilanError;
use nilan_domain::platform::Platform;
use nilan_domain::value::SensorValue;

/// Simulated controller answering getters from an in-memory table.
pub struct SimulatedDevice {
    name: String,
    latency: Duration,
    assigned: HashMap<Platform, Vec<String>>,
    values: RwLock<HashMap<String, SensorValue>>,
}

impl SimulatedDevice {
    /// Create a device from its configuration.
    #[must_use]
    pub fn new(config: SimulatedConfig) -> Self {
        tracing::debug!(
            name = %config.name,
            values = config.values.len(),
            "simulated device created"
        );
        Self {
            name: config.name,
            latency: Duration::from_millis(config.latency_ms),
            assigned: config.assigned,
            values: RwLock::new(config.values),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Change what the getter `attribute` returns from now on.
    pub fn set_value(&self, attribute: impl Into<String>, value: impl Into<SensorValue>) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(attribute.into(), value.into());
    }

    /// Make the getter `attribute` fail from now on.
    pub fn remove_value(&self, attribute: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(attribute);
    }

    fn lookup(&self, attribute: &str) -> Result<SensorValue, SimulatedError> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(attribute)
            .cloned()
            .ok_or_else(|| SimulatedError::UnsupportedAttribute(attribute.to_string()))
    }
}

impl Default for SimulatedDevice {
    fn default() -> Self {
        Self::new(SimulatedConfig::default())
    }
}

impl NilanDevice for SimulatedDevice {
    fn assigned(&self, platform: Platform) -> Vec<String> {
        self.assigned.get(&platform).cloned().unwrap_or_default()
    }

    fn read(
        &self,
        attribute: &str,
    ) -> impl Future<Output = Result<SensorValue, NilanError>> + Send {
        let latency = self.latency;
        let result = self.lookup(attribute);
        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            result.map_err(NilanError::from)
        }
    }
}
