//! Simulated device configuration.

use std::collections::HashMap;

use serde::Deserialize;

use nilan_domain::platform::Platform;
use nilan_domain::sensor::catalog;
use nilan_domain::value::SensorValue;

/// Configuration for the simulated controller.
///
/// ```toml
/// name = "Attic unit"
/// latency_ms = 20
///
/// [assigned]
/// sensor = ["get_humidity", "get_t1_intake_temperature"]
///
/// [values]
/// get_humidity = 54
/// get_t1_intake_temperature = 7.5
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimulatedConfig {
    /// Display name of the device.
    pub name: String,
    /// Simulated bus latency per getter call, in milliseconds.
    pub latency_ms: u64,
    /// Getter names assigned to each platform.
    ///
    /// Defaults to every known sensor getter.
    pub assigned: HashMap<Platform, Vec<String>>,
    /// Current value of each getter.
    pub values: HashMap<String, SensorValue>,
}

impl Default for SimulatedConfig {
    fn default() -> Self {
        Self {
            name: "Nilan CTS602 (simulated)".to_string(),
            latency_ms: 0,
            assigned: HashMap::from([(
                Platform::Sensor,
                catalog::attributes().map(str::to_string).collect(),
            )]),
            values: demo_values(),
        }
    }
}

/// Plausible readings for a Compact P unit in winter.
fn demo_values() -> HashMap<String, SensorValue> {
    let temperatures = [
        ("get_t0_controller_temperature", 28.4),
        ("get_t1_intake_temperature", -2.3),
        ("get_t2_inlet_temperature", 19.6),
        ("get_t3_exhaust_temperature", 21.8),
        ("get_t4_outlet", 3.1),
        ("get_t5_condenser_temperature", 34.2),
        ("get_t6_evaporator_temperature", -4.7),
        ("get_t7_inlet_temperature_after_heater", 21.0),
        ("get_t8_outdoor_temperature", -2.9),
        ("get_t10_external_temperature", 21.5),
        ("get_t13_return_temperature", 27.9),
        ("get_t14_supply_temperature", 31.2),
        ("get_t15_user_panel_temperature", 21.2),
        ("get_t16_sacrificial_anode_temperature", 48.5),
        ("get_central_heating_setpoint", 22.0),
        ("get_hps_t16_return_temperature", 28.1),
        ("get_hps_t17_supply_temperature", 33.4),
        ("get_hps_t18_tank_temperature", 47.9),
        ("get_hps_t20_ambient_temperature", -2.5),
        ("get_hps_t21_shw_top_temperature", 50.2),
        ("get_hps_t22_shw_bottom_temperature", 41.6),
        ("get_hps_t35_pressure_pipe_temperature", 62.3),
        ("get_hps_hot_water_setpoint_actual", 50.0),
        ("get_hps_heating_setpoint_actual", 32.0),
    ];
    let integers = [
        ("get_humidity", 41),
        ("get_average_humidity", 39),
        ("get_after_heating_element_capacity", 0),
        ("get_co2_sensor_value", 612),
        ("get_alarm_count", 0),
        ("get_days_since_air_filter_change", 34),
        ("get_days_to_air_filter_change", 56),
        ("get_exchanger_efficiency", 84),
        ("get_supply_fan_level", 2),
        ("get_return_fan_level", 2),
        ("get_return_fan_speed", 45),
        ("get_supply_fan_speed", 42),
        ("get_bus_version", 1),
        ("get_hps_compressor_capacity", 60),
        ("get_hps_output_compvolt1", 5),
        ("get_hps_alarm_count", 0),
    ];
    let texts = [
        ("get_control_state", "Heating"),
        ("get_after_heating_type", "Water"),
        ("get_time_in_control_state", "3h 12m"),
        ("get_summer_state", "Winter"),
        ("get_time", "2024-01-15 07:42:00"),
        ("get_ventilation_state", "Normal"),
        ("get_anode_state", "OK"),
        ("get_display_text_1", "NILAN  COMPACT P"),
        ("get_display_text_2", "HEATING"),
        ("get_hps_heat_pump_state", "Running"),
    ];

    temperatures
        .into_iter()
        .map(|(k, v)| (k.to_string(), SensorValue::Float(v)))
        .chain(
            integers
                .into_iter()
                .map(|(k, v)| (k.to_string(), SensorValue::Int(v))),
        )
        .chain(texts.into_iter().map(|(k, v)| (k.to_string(), SensorValue::from(v))))
        .collect()
}
