//! # smarthomed — smarthome panel daemon
//!
//! Composition root that wires the virtual sensors, the automation core and
//! the text console together and runs the panel.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Construct the virtual sensor adapter and the automation engine
//! - Construct the `SmartHome` service and connect it to the event bus
//! - Drive the periodic ticks and the elevator timer
//! - Read console commands and print panel events
//! - Handle graceful shutdown (ctrl-c or `quit`)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

pub mod config;
pub mod console;
pub mod driver;
