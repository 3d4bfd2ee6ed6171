//! Automation — hysteresis rules that turn sensor readings into device actions.
//!
//! Each [`ControlGroup`](crate::control_group::ControlGroup) owns exactly one
//! [`HysteresisRule`]. A rule watches one [`Metric`](crate::sensor::Metric) and
//! has two thresholds; between them lies a dead zone where nothing happens,
//! so a reading hovering around one threshold cannot make the device chatter.

mod rule;

pub use rule::{Direction, HysteresisRule};
