//! Event bus port — hand core events to interested subscribers.

use smarthome_domain::event::Event;

/// Publishes domain events to interested subscribers.
///
/// Publishing never fails and never blocks: the core is total and must not
/// stall a tick because nobody is listening.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: Event);
}

impl<T: EventPublisher + ?Sized> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: Event) {
        (**self).publish(event);
    }
}
