//! # smarthome-app
//!
//! Application layer — the stateful core and its **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters implement:
//!   - `SensorSource` — produces the current environmental reading
//!   - `EventPublisher` — forwards core events to whoever displays them
//! - Hold device state (`DeviceRegistry`) and notify observers on every write
//! - Run the hysteresis rules (`AutomationEngine`) honouring manual overrides
//! - Own all of the above in one place (`SmartHome`) and implement the
//!   manual-override protocol and the elevator call
//! - Provide **in-process infrastructure** (observers, event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `smarthome-domain` only (plus `tokio::sync` for the event bus).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod automation_engine;
pub mod device_registry;
pub mod event_bus;
pub mod observer;
pub mod ports;
pub mod services;
