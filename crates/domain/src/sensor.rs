//! Sensors: how device attributes are surfaced as sensor entities.
//!
//! A sensor is described once, statically, by a [`SensorDescriptor`] keyed by
//! the name of the device getter it reads. The [`catalog`] holds the full
//! table for the controller; [`SensorState`] is the snapshot the host shows.

pub mod catalog;
mod class;
mod descriptor;
mod state;

pub use class::{EntityCategory, SensorDeviceClass, SensorStateClass, Unit};
pub use descriptor::SensorDescriptor;
pub use state::SensorState;
