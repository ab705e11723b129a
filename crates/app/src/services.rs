//! Application services: the in-process host.
//!
//! Each service accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod entity_registry;
pub mod update_scheduler;
