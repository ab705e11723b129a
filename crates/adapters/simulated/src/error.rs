//! Simulated adapter error types.

use nilan_domain::error::NilanError;

/// Errors raised by the simulated device.
#[derive(Debug, thiserror::Error)]
pub enum SimulatedError {
    /// No value is configured for the requested getter.
    #[error("attribute {0:?} is not supported by the simulated device")]
    UnsupportedAttribute(String),
}

impl From<SimulatedError> for NilanError {
    fn from(err: SimulatedError) -> Self {
        NilanError::device(err)
    }
}
