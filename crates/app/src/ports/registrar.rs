//! Registrar port: how the sensor platform hands entities to the host.

use std::future::Future;

use nilan_domain::error::{NilanError, ValidationError};

use crate::sensor_platform::SensorEntity;

/// Outcome of one [`EntityRegistrar::add_entities`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    /// Entities now registered.
    pub added: usize,
    /// Entities turned away, one error each.
    pub rejected: Vec<ValidationError>,
    /// Entities dropped because their initial refresh never returned.
    pub lost: usize,
}

/// Host-side callback receiving the entities built at setup.
///
/// The host owns the entities from then on: it decides when they refresh,
/// how refresh failures are surfaced and when they are torn down.
pub trait EntityRegistrar<D>: Send + Sync {
    /// Register `entities`.
    ///
    /// When `update_before_add` is set, the host refreshes each entity once
    /// before it is first shown. An entity the host cannot take (for
    /// instance a unique id it already knows) is reported in the returned
    /// [`Registration`] without affecting the others.
    fn add_entities(
        &self,
        entities: Vec<SensorEntity<D>>,
        update_before_add: bool,
    ) -> impl Future<Output = Result<Registration, NilanError>> + Send;
}
