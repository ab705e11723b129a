//! Sensor state: what the host shows for one registered sensor.

use serde::{Deserialize, Serialize};

use super::class::{EntityCategory, SensorDeviceClass, SensorStateClass, Unit};
use super::descriptor::SensorDescriptor;
use crate::time::Timestamp;
use crate::value::SensorValue;

/// Point-in-time snapshot of a sensor entity.
///
/// Metadata is copied from the [`SensorDescriptor`] unchanged; `native_value`
/// is whatever the device getter last returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorState {
    pub unique_id: String,
    pub translation_key: String,
    /// Device getter this sensor reads.
    pub attribute: String,
    pub unit: Option<Unit>,
    pub device_class: Option<SensorDeviceClass>,
    pub state_class: Option<SensorStateClass>,
    pub entity_category: Option<EntityCategory>,
    pub icon: Option<String>,
    pub enabled_by_default: bool,
    pub available: bool,
    pub native_value: Option<SensorValue>,
    pub last_updated: Option<Timestamp>,
}

impl SensorState {
    /// A never-refreshed state for `descriptor` bound to `attribute`.
    #[must_use]
    pub fn new(attribute: &str, descriptor: &SensorDescriptor) -> Self {
        Self {
            unique_id: descriptor.name.to_string(),
            translation_key: descriptor.name.to_string(),
            attribute: attribute.to_string(),
            unit: descriptor.unit,
            device_class: descriptor.device_class,
            state_class: descriptor.state_class,
            entity_category: descriptor.entity_category,
            icon: descriptor.icon.map(str::to_string),
            enabled_by_default: descriptor.enabled_by_default,
            available: true,
            native_value: None,
            last_updated: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_copy_descriptor_metadata() {
        let desc = SensorDescriptor::new("supply_fan_speed")
            .unit(Unit::Percentage)
            .measurement()
            .icon("mdi:fan");
        let state = SensorState::new("get_supply_fan_speed", &desc);

        assert_eq!(state.unique_id, "supply_fan_speed");
        assert_eq!(state.translation_key, "supply_fan_speed");
        assert_eq!(state.attribute, "get_supply_fan_speed");
        assert_eq!(state.unit, Some(Unit::Percentage));
        assert_eq!(state.state_class, Some(SensorStateClass::Measurement));
        assert_eq!(state.icon.as_deref(), Some("mdi:fan"));
        assert!(state.native_value.is_none());
        assert!(state.last_updated.is_none());
    }

    #[test]
    fn should_serialize_absent_metadata_as_null() {
        let desc = SensorDescriptor::new("display_text_line_1");
        let state = SensorState::new("get_display_text_1", &desc);
        let json = serde_json::to_value(&state).unwrap();

        assert_eq!(json["unique_id"], "display_text_line_1");
        assert!(json["unit"].is_null());
        assert!(json["device_class"].is_null());
        assert!(json["state_class"].is_null());
    }
}
