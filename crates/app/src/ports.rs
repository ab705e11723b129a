//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the sensor platform and the outside
//! world: the device handle below it and the host above it.

pub mod device;
pub mod event_bus;
pub mod registrar;

pub use device::NilanDevice;
pub use event_bus::EventPublisher;
pub use registrar::{EntityRegistrar, Registration};
