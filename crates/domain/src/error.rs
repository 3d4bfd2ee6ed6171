//! Common error types used across the workspace.
//!
//! The core operations are total, so errors only appear at the edges:
//! turning names into identifiers and validating configured rules.

use crate::control_group::ControlGroup;

/// Top-level error for the smarthome domain.
#[derive(Debug, thiserror::Error)]
pub enum SmartHomeError {
    #[error("parse error")]
    Parse(#[from] ParseError),

    #[error("validation error")]
    Validation(#[from] ValidationError),
}

/// A name did not match any known identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown device {0:?}")]
    UnknownDevice(String),

    #[error("unknown control group {0:?}")]
    UnknownControlGroup(String),

    #[error("unknown metric {0:?}")]
    UnknownMetric(String),
}

/// A domain invariant was violated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The thresholds leave no dead zone, or are in the wrong order.
    #[error("rule for {group} has an empty dead zone (on {on}, off {off})")]
    EmptyDeadZone {
        group: ControlGroup,
        on: f64,
        off: f64,
    },

    /// A threshold is NaN or infinite.
    #[error("rule for {group} has a non-finite threshold")]
    NonFiniteThreshold { group: ControlGroup },
}
