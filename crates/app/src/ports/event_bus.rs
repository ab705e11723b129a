//! Event bus port: publish/subscribe for domain events.

use std::future::Future;

use nilan_domain::error::NilanError;
use nilan_domain::event::Event;

/// Publishes domain events to interested subscribers.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), NilanError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: Event) -> impl Future<Output = Result<(), NilanError>> + Send {
        (**self).publish(event)
    }
}
