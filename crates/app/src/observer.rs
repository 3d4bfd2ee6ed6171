//! Synchronous observer list.
//!
//! Callbacks run in registration order, on the caller's stack, before the
//! notifying call returns. Nothing is queued.

/// Handle returned by [`Observers::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

type Callback<T> = Box<dyn FnMut(&T) + Send>;

/// A list of callbacks interested in values of type `T`.
pub struct Observers<T> {
    next_id: u64,
    callbacks: Vec<(Subscription, Callback<T>)>,
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            callbacks: Vec::new(),
        }
    }
}

impl<T> std::fmt::Debug for Observers<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("len", &self.callbacks.len())
            .finish()
    }
}

impl<T> Observers<T> {
    /// Register a callback; it will see every value notified afterwards.
    pub fn subscribe(&mut self, callback: impl FnMut(&T) + Send + 'static) -> Subscription {
        let subscription = Subscription(self.next_id);
        self.next_id += 1;
        self.callbacks.push((subscription, Box::new(callback)));
        subscription
    }

    /// Remove a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(id, _)| *id != subscription);
        self.callbacks.len() != before
    }

    /// Deliver `value` to every callback in registration order.
    pub fn notify(&mut self, value: &T) {
        for (_, callback) in &mut self.callbacks {
            callback(value);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
