//! The descriptor table for the Nilan CTS602 controller family.
//!
//! Keys are device getter names. The table allows several descriptors per
//! getter; every current entry has exactly one.

use super::class::{SensorDeviceClass, Unit};
use super::descriptor::SensorDescriptor;

type Entry = (&'static str, &'static [SensorDescriptor]);

const fn measured(name: &'static str, unit: Unit) -> SensorDescriptor {
    SensorDescriptor::new(name).unit(unit).measurement()
}

/// Every sensor getter the adapter knows about.
pub static SENSOR_DESCRIPTORS: &[Entry] = &[
    (
        "get_t0_controller_temperature",
        &[SensorDescriptor::temperature("controller_board_temperature_t0").diagnostic()],
    ),
    (
        "get_t1_intake_temperature",
        &[SensorDescriptor::temperature("fresh_air_intake_temperature_t1")],
    ),
    (
        "get_t2_inlet_temperature",
        &[SensorDescriptor::temperature("supply_air_temperature_t2")],
    ),
    (
        "get_t3_exhaust_temperature",
        &[SensorDescriptor::temperature("return_air_temperature_t3")],
    ),
    (
        "get_t4_outlet",
        &[SensorDescriptor::temperature("waste_air_temperature_t4")],
    ),
    (
        "get_t5_condenser_temperature",
        &[SensorDescriptor::temperature("condenser_temperature_t5").diagnostic()],
    ),
    (
        "get_t6_evaporator_temperature",
        &[SensorDescriptor::temperature("waste_air_temperature_t6")],
    ),
    (
        "get_t7_inlet_temperature_after_heater",
        &[SensorDescriptor::temperature("supply_air_temperature_t7")],
    ),
    (
        "get_t8_outdoor_temperature",
        &[SensorDescriptor::temperature("fresh_air_intake_temperature_t8")],
    ),
    (
        "get_t10_external_temperature",
        &[SensorDescriptor::temperature("return_air_temperature_t10")],
    ),
    (
        "get_t13_return_temperature",
        &[SensorDescriptor::temperature("return_water_temperature_t13")],
    ),
    (
        "get_t14_supply_temperature",
        &[SensorDescriptor::temperature("supply_water_temperature_t14")],
    ),
    (
        "get_t15_user_panel_temperature",
        &[SensorDescriptor::temperature("user_panel_temperature_t15").diagnostic()],
    ),
    (
        "get_t16_sacrificial_anode_temperature",
        &[SensorDescriptor::temperature("anode_temperature_t16")],
    ),
    (
        "get_central_heating_setpoint",
        &[SensorDescriptor::temperature("central_heating_setpoint")],
    ),
    (
        "get_humidity",
        &[measured("humidity", Unit::Percentage).device_class(SensorDeviceClass::Humidity)],
    ),
    (
        "get_average_humidity",
        &[measured("24h_average_humidity", Unit::Percentage)
            .device_class(SensorDeviceClass::Humidity)],
    ),
    (
        "get_after_heating_element_capacity",
        &[measured("after_heating_element_capacity", Unit::Percentage).icon("mdi:radiator")],
    ),
    (
        "get_co2_sensor_value",
        &[measured("co2_sensor", Unit::PartsPerMillion).device_class(SensorDeviceClass::Co2)],
    ),
    (
        "get_control_state",
        &[SensorDescriptor::new("control_state").icon("mdi:state-machine")],
    ),
    (
        "get_after_heating_type",
        &[SensorDescriptor::new("after_heating_type").diagnostic()],
    ),
    (
        "get_time_in_control_state",
        &[SensorDescriptor::new("time_in_control_state").icon("mdi:calendar-clock")],
    ),
    (
        "get_alarm_count",
        &[SensorDescriptor::new("alarms_active")
            .measurement()
            .icon("mdi:alert-circle-outline")],
    ),
    (
        "get_days_since_air_filter_change",
        &[measured("days_since_air_filter_change", Unit::Days).icon("mdi:calendar-start")],
    ),
    (
        "get_days_to_air_filter_change",
        &[measured("days_to_air_filter_change", Unit::Days).icon("mdi:calendar-end")],
    ),
    (
        "get_summer_state",
        &[SensorDescriptor::new("climate_season").icon("mdi:sun-snowflake")],
    ),
    (
        "get_exchanger_efficiency",
        &[measured("exchanger_efficiency", Unit::Percentage).icon("mdi:air-filter")],
    ),
    (
        "get_time",
        &[SensorDescriptor::new("time").icon("mdi:calendar-clock")],
    ),
    (
        "get_ventilation_state",
        &[SensorDescriptor::new("ventilation_state").icon("mdi:state-machine")],
    ),
    ("get_anode_state", &[SensorDescriptor::new("anode_state")]),
    (
        "get_supply_fan_level",
        &[SensorDescriptor::new("supply_fan_level")
            .measurement()
            .icon("mdi:fan")],
    ),
    (
        "get_return_fan_level",
        &[SensorDescriptor::new("return_fan_level")
            .measurement()
            .icon("mdi:fan")],
    ),
    (
        "get_return_fan_speed",
        &[measured("return_fan_speed", Unit::Percentage).icon("mdi:fan")],
    ),
    (
        "get_supply_fan_speed",
        &[measured("supply_fan_speed", Unit::Percentage).icon("mdi:fan")],
    ),
    (
        "get_display_text_1",
        &[SensorDescriptor::new("display_text_line_1")],
    ),
    (
        "get_display_text_2",
        &[SensorDescriptor::new("display_text_line_2")],
    ),
    (
        "get_bus_version",
        &[SensorDescriptor::new("modbus_version")
            .measurement()
            .diagnostic()],
    ),
    (
        "get_hps_compressor_capacity",
        &[measured("hps_compressor_capacity", Unit::Percentage).icon("mdi:air-filter")],
    ),
    (
        "get_hps_heat_pump_state",
        &[SensorDescriptor::new("hps_heat_pump_state").icon("mdi:state-machine")],
    ),
    (
        "get_hps_t16_return_temperature",
        &[SensorDescriptor::temperature("hps_t16_return_temperature")],
    ),
    (
        "get_hps_t17_supply_temperature",
        &[SensorDescriptor::temperature("hps_t17_supply_temperature")],
    ),
    (
        "get_hps_t18_tank_temperature",
        &[SensorDescriptor::temperature("hps_t18_tank_temperature")],
    ),
    (
        "get_hps_t20_ambient_temperature",
        &[SensorDescriptor::temperature("hps_t20_ambient_temperature")],
    ),
    (
        "get_hps_t21_shw_top_temperature",
        &[SensorDescriptor::temperature("hps_t21_shw_top_temperature")],
    ),
    (
        "get_hps_t22_shw_bottom_temperature",
        &[SensorDescriptor::temperature("hps_t22_shw_bottom_temperature")],
    ),
    (
        "get_hps_t35_pressure_pipe_temperature",
        &[SensorDescriptor::temperature("hps_t35_pressure_pipe_temperature")],
    ),
    (
        "get_hps_output_compvolt1",
        &[SensorDescriptor::new("hps_output_compvolt1")
            .device_class(SensorDeviceClass::Voltage)
            .measurement()],
    ),
    (
        "get_hps_alarm_count",
        &[SensorDescriptor::new("hps_alarms_active")
            .measurement()
            .icon("mdi:alert-circle-outline")],
    ),
    (
        "get_hps_hot_water_setpoint_actual",
        &[SensorDescriptor::temperature("hps_hot_water_setpoint_actual")],
    ),
    (
        "get_hps_heating_setpoint_actual",
        &[SensorDescriptor::temperature("hps_heating_setpoint_actual")],
    ),
];

/// Descriptors registered for `attribute`; empty when the getter is unknown.
#[must_use]
pub fn descriptors_for(attribute: &str) -> &'static [SensorDescriptor] {
    match SENSOR_DESCRIPTORS.iter().find(|(key, _)| *key == attribute) {
        Some(&(_, descriptors)) => descriptors,
        None => &[],
    }
}

/// Whether the table has at least one descriptor for `attribute`.
#[must_use]
pub fn is_known(attribute: &str) -> bool {
    !descriptors_for(attribute).is_empty()
}

/// All getter names in table order.
pub fn attributes() -> impl Iterator<Item = &'static str> {
    SENSOR_DESCRIPTORS.iter().map(|(key, _)| *key)
}
