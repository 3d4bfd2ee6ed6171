//! # smarthome-adapter-virtual
//!
//! Virtual/demo integration that simulates the panel's environmental sensors.
//!
//! ## Provided readings
//!
//! | Metric | Range | Step per tick |
//! |--------|-------|---------------|
//! | temperature | 15–35 °C | ±0.5 |
//! | humidity | 20–80 % | ±2 |
//! | illumination | 0–10000 lux | ±50 |
//!
//! ## Dependency rule
//!
//! Depends on `smarthome-app` (port traits) and `smarthome-domain` only.

mod sensors;

pub use sensors::VirtualSensors;
