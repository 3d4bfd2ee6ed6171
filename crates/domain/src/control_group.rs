//! Control group — the key under which automation is enabled per device.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::device::DeviceId;
use crate::error::ParseError;

/// A group of automation governed by a single auto-mode flag.
///
/// Each group drives exactly one device. The names differ only for the
/// curtain (`curtain` drives `curtain_open`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlGroup {
    Humidifier,
    Ac,
    Heater,
    Curtain,
}

impl ControlGroup {
    /// Every group, in rule evaluation order.
    pub const ALL: [Self; 4] = [Self::Humidifier, Self::Ac, Self::Heater, Self::Curtain];

    /// Position of this group in [`ALL`](Self::ALL).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Humidifier => "humidifier",
            Self::Ac => "ac",
            Self::Heater => "heater",
            Self::Curtain => "curtain",
        }
    }

    /// The device this group actuates.
    #[must_use]
    pub const fn device(self) -> DeviceId {
        match self {
            Self::Humidifier => DeviceId::Humidifier,
            Self::Ac => DeviceId::Ac,
            Self::Heater => DeviceId::Heater,
            Self::Curtain => DeviceId::CurtainOpen,
        }
    }
}

impl fmt::Display for ControlGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlGroup {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| ParseError::UnknownControlGroup(s.to_string()))
    }
}
