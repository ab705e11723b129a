//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`NilanError`]
//! via `#[from]` (or an explicit `From` impl for boxed adapter errors).

use std::error::Error as StdError;

/// Top-level error shared by ports and services.
#[derive(Debug, thiserror::Error)]
pub enum NilanError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A looked-up item does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The device handle failed to answer a query.
    #[error("device error")]
    Device(#[source] Box<dyn StdError + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An entity with the same unique id is already registered.
    #[error("unique id {0:?} is already registered")]
    DuplicateUniqueId(String),

    /// The given platform name is not recognised.
    #[error("unknown platform {0:?}")]
    UnknownPlatform(String),

    /// A polling interval of zero was requested.
    #[error("scan interval must be non-zero")]
    ZeroScanInterval,
}

/// A lookup by identifier returned nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of item that was looked up (e.g. `"Sensor"`).
    pub entity: &'static str,
    /// Identifier that was looked up.
    pub id: String,
}

impl NilanError {
    /// Wrap an adapter-specific error as a [`NilanError::Device`].
    pub fn device<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Device(Box::new(err))
    }
}
