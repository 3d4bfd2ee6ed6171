//! # smarthome-domain
//!
//! Pure domain model for the smarthome panel.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, timestamps
//! - Define **Sensor readings** (temperature, humidity, illumination) and their ranges
//! - Define **Devices** (the fixed set of on/off actuators)
//! - Define **Control groups** (the keys automation is enabled or disabled by)
//! - Define **Hysteresis rules** (threshold pairs with a dead zone)
//! - Define **Events** (state changes and log entries) and the **Dashboard** view
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.

pub mod error;
pub mod time;

pub mod automation;
pub mod control_group;
pub mod dashboard;
pub mod device;
pub mod event;
pub mod sensor;
