//! Shared application state for axum handlers.

use std::sync::Arc;

use nilan_app::services::entity_registry::EntityRegistry;

/// Application state shared across all axum handlers.
///
/// `Clone` is implemented manually so the device and publisher types do not
/// need to be `Clone`; only the `Arc` is cloned.
pub struct AppState<D, EP> {
    /// Registry holding every sensor entity.
    pub registry: Arc<EntityRegistry<D, EP>>,
}

impl<D, EP> Clone for AppState<D, EP> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<D, EP> AppState<D, EP> {
    /// Wrap a registry that is already shared with background tasks.
    pub fn new(registry: Arc<EntityRegistry<D, EP>>) -> Self {
        Self { registry }
    }
}
