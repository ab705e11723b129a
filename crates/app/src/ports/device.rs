//! Device port: the shared handle onto one physical controller.
//!
//! The handle owns everything protocol related (transport, register
//! decoding, unit conversion). The sensor platform only ever asks it which
//! attributes belong to a platform and what a named getter currently returns.

use std::future::Future;

use nilan_domain::error::NilanError;
use nilan_domain::platform::Platform;
use nilan_domain::value::SensorValue;

/// A controller exposing named asynchronous getters.
///
/// One handle is shared (behind an `Arc`) by every entity created for the
/// same physical unit, so implementations must be `Send + Sync`.
pub trait NilanDevice: Send + Sync {
    /// Getter names the device assigns to `platform`.
    ///
    /// Queried once at setup. Names the caller does not recognise must be
    /// tolerated by the caller.
    fn assigned(&self, platform: Platform) -> Vec<String>;

    /// Invoke the getter named `attribute` and return its current value.
    fn read(
        &self,
        attribute: &str,
    ) -> impl Future<Output = Result<SensorValue, NilanError>> + Send;
}
