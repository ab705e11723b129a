//! # nilan-app
//!
//! Application layer: the sensor platform, **port definitions** (traits)
//! and an in-process host.
//!
//! ## Responsibilities
//! - Define **port traits**:
//!   - `NilanDevice`: the shared device handle (assignment query + named getters)
//!   - `EntityRegistrar`: the host callback that receives new entities
//!   - `EventPublisher`: publish domain events
//! - Implement the **sensor platform**: build one [`SensorEntity`] per
//!   known, assigned attribute and refresh it by forwarding one getter call
//! - Provide an **in-process host**: entity registry, update scheduler and
//!   event bus, none of which need IO
//!
//! ## Dependency rule
//! Depends on `nilan-domain` only (plus `tokio` for sync, timers and tasks).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.
//!
//! [`SensorEntity`]: sensor_platform::SensorEntity

pub mod event_bus;
pub mod ports;
pub mod sensor_platform;
pub mod services;
