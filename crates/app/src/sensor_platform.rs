//! Sensor platform: turns assigned device attributes into sensor entities.
//!
//! Setup asks the device which getters it assigns to [`Platform::Sensor`],
//! keeps the ones the [`catalog`] describes and builds one [`SensorEntity`]
//! per descriptor. Each entity then refreshes by forwarding a single getter
//! call to the shared device handle.

use std::sync::Arc;

use nilan_domain::error::NilanError;
use nilan_domain::platform::Platform;
use nilan_domain::sensor::{SensorDescriptor, SensorState, catalog};
use nilan_domain::time::{Timestamp, now};
use nilan_domain::value::SensorValue;

use crate::ports::{EntityRegistrar, NilanDevice, Registration};

/// One sensor bound to one descriptor and the shared device handle.
pub struct SensorEntity<D> {
    device: Arc<D>,
    attribute: String,
    descriptor: &'static SensorDescriptor,
    native_value: Option<SensorValue>,
    last_updated: Option<Timestamp>,
    available: bool,
}

impl<D> SensorEntity<D> {
    /// Bind `descriptor` to the getter `attribute` of `device`.
    pub fn new(
        device: Arc<D>,
        attribute: impl Into<String>,
        descriptor: &'static SensorDescriptor,
    ) -> Self {
        Self {
            device,
            attribute: attribute.into(),
            descriptor,
            native_value: None,
            last_updated: None,
            available: true,
        }
    }

    /// Stable identifier, equal to the descriptor name.
    #[must_use]
    pub fn unique_id(&self) -> &'static str {
        self.descriptor.name
    }

    /// Translation key, equal to the descriptor name.
    #[must_use]
    pub fn translation_key(&self) -> &'static str {
        self.descriptor.name
    }

    /// Name of the device getter this entity reads.
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    #[must_use]
    pub fn descriptor(&self) -> &'static SensorDescriptor {
        self.descriptor
    }

    /// Value returned by the last successful refresh.
    #[must_use]
    pub fn native_value(&self) -> Option<&SensorValue> {
        self.native_value.as_ref()
    }

    #[must_use]
    pub fn last_updated(&self) -> Option<Timestamp> {
        self.last_updated
    }

    #[must_use]
    pub fn available(&self) -> bool {
        self.available
    }

    /// Availability is owned by the host, which flips it on refresh outcomes.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Snapshot of identity, metadata and current value.
    #[must_use]
    pub fn state(&self) -> SensorState {
        let mut state = SensorState::new(&self.attribute, self.descriptor);
        state.available = self.available;
        state.native_value.clone_from(&self.native_value);
        state.last_updated = self.last_updated;
        state
    }
}

impl<D: NilanDevice> SensorEntity<D> {
    /// Fetch the current value from the device and store it unmodified.
    ///
    /// # Errors
    ///
    /// Returns whatever the device getter returned; the stored value is left
    /// untouched in that case.
    pub async fn update(&mut self) -> Result<(), NilanError> {
        let value = self.device.read(&self.attribute).await?;
        tracing::trace!(unique_id = self.unique_id(), %value, "sensor refreshed");
        self.native_value = Some(value);
        self.last_updated = Some(now());
        Ok(())
    }
}

impl<D> std::fmt::Debug for SensorEntity<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorEntity")
            .field("attribute", &self.attribute)
            .field("descriptor", self.descriptor)
            .field("native_value", &self.native_value)
            .field("available", &self.available)
            .finish_non_exhaustive()
    }
}

/// Build one entity per descriptor of every known sensor attribute the
/// device assigns.
///
/// Attributes without a descriptor are skipped without error.
pub fn build_entities<D: NilanDevice>(device: &Arc<D>) -> Vec<SensorEntity<D>> {
    build_entities_with(device, catalog::descriptors_for)
}

/// Same as [`build_entities`], resolving descriptors through `lookup`
/// instead of the Nilan catalog.
pub fn build_entities_with<D, F>(device: &Arc<D>, lookup: F) -> Vec<SensorEntity<D>>
where
    D: NilanDevice,
    F: Fn(&str) -> &'static [SensorDescriptor],
{
    let mut entities = Vec::new();
    for attribute in device.assigned(Platform::Sensor) {
        let descriptors = lookup(&attribute);
        if descriptors.is_empty() {
            tracing::debug!(%attribute, "no sensor descriptor for attribute, skipping");
            continue;
        }
        entities.extend(
            descriptors
                .iter()
                .map(|descriptor| SensorEntity::new(Arc::clone(device), attribute.as_str(), descriptor)),
        );
    }
    entities
}

/// Set up the sensor platform for one device.
///
/// Builds the entities and hands them to `registrar`, asking for a refresh
/// before they are first shown.
///
/// # Errors
///
/// Propagates the registrar's error.
pub async fn setup_entry<D, R>(device: Arc<D>, registrar: &R) -> Result<Registration, NilanError>
where
    D: NilanDevice,
    R: EntityRegistrar<D>,
{
    let entities = build_entities(&device);
    tracing::info!(count = entities.len(), "setting up sensor platform");
    registrar.add_entities(entities, true).await
}
