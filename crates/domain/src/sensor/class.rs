//! Classification enums attached to sensor descriptors.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unit of measurement of a sensor's native value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "\u{b0}C")]
    Celsius,
    #[serde(rename = "%")]
    Percentage,
    #[serde(rename = "ppm")]
    PartsPerMillion,
    #[serde(rename = "d")]
    Days,
}

impl Unit {
    /// Display symbol (`°C`, `%`, `ppm`, `d`).
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "\u{b0}C",
            Self::Percentage => "%",
            Self::PartsPerMillion => "ppm",
            Self::Days => "d",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Semantic kind of quantity a sensor measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorDeviceClass {
    Temperature,
    Humidity,
    Co2,
    Voltage,
}

/// How the host should aggregate a sensor's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorStateClass {
    /// Instantaneous reading.
    Measurement,
    Total,
    TotalIncreasing,
}

/// Secondary classification; uncategorised sensors carry none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    Config,
    Diagnostic,
}
