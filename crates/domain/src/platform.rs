//! Platform: the entity category a device assigns each attribute to.
//!
//! The controller reports, per platform, which of its getters are relevant.
//! Only [`Platform::Sensor`] is consumed by the sensor adapter; the rest are
//! listed so device handles can describe their full assignment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Entity category a device attribute can be surfaced as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Sensor,
    BinarySensor,
    Number,
    Select,
    Switch,
    Climate,
    Button,
}

impl Platform {
    /// All platforms, in a stable order.
    pub const ALL: [Self; 7] = [
        Self::Sensor,
        Self::BinarySensor,
        Self::Number,
        Self::Select,
        Self::Switch,
        Self::Climate,
        Self::Button,
    ];

    /// The `snake_case` name used in configuration files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sensor => "sensor",
            Self::BinarySensor => "binary_sensor",
            Self::Number => "number",
            Self::Select => "select",
            Self::Switch => "switch",
            Self::Climate => "climate",
            Self::Button => "button",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownPlatform(s.to_string()))
    }
}
