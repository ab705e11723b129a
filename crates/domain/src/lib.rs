//! # nilan-domain
//!
//! Pure domain model for exposing a Nilan ventilation / heat-pump controller
//! as sensor entities.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **Platforms** (entity categories a device assigns attributes to)
//! - Define the **sensor descriptor table** mapping device getters to
//!   sensor metadata (unit, device class, state class, category, icon)
//! - Define **Sensor values** and **Sensor state snapshots**
//! - Define **Events** (entity added, state changed, unavailable)
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod time;

pub mod event;
pub mod platform;
pub mod sensor;
pub mod value;
