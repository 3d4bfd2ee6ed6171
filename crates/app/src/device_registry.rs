//! Device registry — the on/off state of every device.

use smarthome_domain::device::DeviceId;
use smarthome_domain::event::StateChange;

use crate::observer::{Observers, Subscription};

/// Holds one boolean per [`DeviceId`] and reports every write.
///
/// All devices start off. A write notifies observers even when the value does
/// not change, so a display listening to the registry is always refreshed.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    states: [bool; DeviceId::ALL.len()],
    observers: Observers<StateChange>,
}

impl DeviceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a device and notify every observer with `(device, on)`.
    pub fn set_state(&mut self, device: DeviceId, on: bool) {
        self.states[device.index()] = on;
        self.observers.notify(&StateChange { device, on });
    }

    /// Current state of a device.
    #[must_use]
    pub fn state(&self, device: DeviceId) -> bool {
        self.states[device.index()]
    }

    /// Set a device by name. Unknown names are ignored.
    pub fn set_state_named(&mut self, name: &str, on: bool) {
        match name.parse::<DeviceId>() {
            Ok(device) => self.set_state(device, on),
            Err(err) => tracing::debug!(%err, "ignoring write to unknown device"),
        }
    }

    /// State of a device by name; `false` for unknown names.
    #[must_use]
    pub fn state_named(&self, name: &str) -> bool {
        name.parse::<DeviceId>()
            .is_ok_and(|device| self.state(device))
    }

    /// Every device with its state, in declaration order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(DeviceId, bool)> {
        DeviceId::ALL
            .into_iter()
            .map(|device| (device, self.state(device)))
            .collect()
    }

    /// Register a state-change observer.
    pub fn subscribe(
        &mut self,
        callback: impl FnMut(&StateChange) + Send + 'static,
    ) -> Subscription {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.observers.unsubscribe(subscription)
    }
}
