//! Static description of one sensor.

use serde::Serialize;

use super::class::{EntityCategory, SensorDeviceClass, SensorStateClass, Unit};

/// Metadata describing how one device attribute is surfaced as a sensor.
///
/// Descriptors are `const`-constructible so the whole [`catalog`](super::catalog)
/// lives in static memory:
///
/// ```
/// use nilan_domain::sensor::{SensorDescriptor, Unit};
///
/// const FAN: SensorDescriptor = SensorDescriptor::new("supply_fan_speed")
///     .unit(Unit::Percentage)
///     .measurement()
///     .icon("mdi:fan");
/// assert_eq!(FAN.name, "supply_fan_speed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SensorDescriptor {
    /// Unique id and translation key of the resulting entity.
    pub name: &'static str,
    pub unit: Option<Unit>,
    pub device_class: Option<SensorDeviceClass>,
    pub state_class: Option<SensorStateClass>,
    pub entity_category: Option<EntityCategory>,
    pub icon: Option<&'static str>,
    /// Whether the host registers the entity as enabled.
    pub enabled_by_default: bool,
}

impl SensorDescriptor {
    /// A bare, enabled descriptor with no unit or classification.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            unit: None,
            device_class: None,
            state_class: None,
            entity_category: None,
            icon: None,
            enabled_by_default: true,
        }
    }

    /// A °C temperature measurement.
    #[must_use]
    pub const fn temperature(name: &'static str) -> Self {
        Self::new(name)
            .unit(Unit::Celsius)
            .device_class(SensorDeviceClass::Temperature)
            .measurement()
    }

    #[must_use]
    pub const fn unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    #[must_use]
    pub const fn device_class(mut self, device_class: SensorDeviceClass) -> Self {
        self.device_class = Some(device_class);
        self
    }

    /// Mark as an instantaneous measurement.
    #[must_use]
    pub const fn measurement(mut self) -> Self {
        self.state_class = Some(SensorStateClass::Measurement);
        self
    }

    #[must_use]
    pub const fn diagnostic(mut self) -> Self {
        self.entity_category = Some(EntityCategory::Diagnostic);
        self
    }

    #[must_use]
    pub const fn icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Register the entity disabled until the user enables it.
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.enabled_by_default = false;
        self
    }
}
