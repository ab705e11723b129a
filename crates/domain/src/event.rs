//! Event: an immutable record of something that happened to a sensor.
//!
//! Events are produced by the host registry when sensors are added, when a
//! refresh changes a value, and when a refresh fails.

use serde::{Deserialize, Serialize};

use crate::time::{Timestamp, now};

/// Kind of event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    EntityAdded,
    StateChanged,
    EntityUnavailable,
}

/// A single event about one sensor entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub event_type: EventType,
    /// Unique id of the sensor the event is about.
    pub unique_id: String,
    pub data: serde_json::Value,
    pub timestamp: Timestamp,
}

impl Event {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(event_type: EventType, unique_id: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event_type,
            unique_id: unique_id.into(),
            data,
            timestamp: now(),
        }
    }
}
