//! Device — one of the fixed on/off actuators of the panel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::control_group::ControlGroup;
use crate::error::ParseError;

/// Identifier of a controllable device.
///
/// The set is closed: devices are never registered at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceId {
    Humidifier,
    Ac,
    Heater,
    CurtainOpen,
    ElevatorCalled,
}

impl DeviceId {
    /// Every device, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Humidifier,
        Self::Ac,
        Self::Heater,
        Self::CurtainOpen,
        Self::ElevatorCalled,
    ];

    /// Position of this device in [`ALL`](Self::ALL).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The snake_case name used in configuration and on the console.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Humidifier => "humidifier",
            Self::Ac => "ac",
            Self::Heater => "heater",
            Self::CurtainOpen => "curtain_open",
            Self::ElevatorCalled => "elevator_called",
        }
    }

    /// Short human label (the curtain is just "curtain").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CurtainOpen => "curtain",
            Self::ElevatorCalled => "elevator",
            other => other.as_str(),
        }
    }

    /// The word describing the given state of this device.
    #[must_use]
    pub const fn state_word(self, on: bool) -> &'static str {
        match (self, on) {
            (Self::CurtainOpen, true) => "open",
            (Self::CurtainOpen, false) => "closed",
            (Self::ElevatorCalled, true) => "called",
            (Self::ElevatorCalled, false) => "idle",
            (_, true) => "on",
            (_, false) => "off",
        }
    }

    /// The automation group governing this device.
    ///
    /// `None` for the elevator, which is only ever triggered manually.
    #[must_use]
    pub const fn control_group(self) -> Option<ControlGroup> {
        match self {
            Self::Humidifier => Some(ControlGroup::Humidifier),
            Self::Ac => Some(ControlGroup::Ac),
            Self::Heater => Some(ControlGroup::Heater),
            Self::CurtainOpen => Some(ControlGroup::Curtain),
            Self::ElevatorCalled => None,
        }
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|device| device.as_str() == s)
            .ok_or_else(|| ParseError::UnknownDevice(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_every_device_from_its_name() {
        for device in DeviceId::ALL {
            assert_eq!(device.as_str().parse::<DeviceId>().unwrap(), device);
        }
    }

    #[test]
    fn should_reject_unknown_device_name() {
        let result = "nonexistent".parse::<DeviceId>();
        assert_eq!(
            result,
            Err(ParseError::UnknownDevice("nonexistent".to_string()))
        );
    }

    #[test]
    fn should_index_devices_in_declaration_order() {
        for (position, device) in DeviceId::ALL.into_iter().enumerate() {
            assert_eq!(device.index(), position);
        }
    }

    #[test]
    fn should_map_curtain_open_to_curtain_group() {
        assert_eq!(
            DeviceId::CurtainOpen.control_group(),
            Some(ControlGroup::Curtain)
        );
    }

    #[test]
    fn should_have_no_group_for_elevator() {
        assert_eq!(DeviceId::ElevatorCalled.control_group(), None);
    }

    #[test]
    fn should_describe_curtain_state_as_open_or_closed() {
        assert_eq!(DeviceId::CurtainOpen.state_word(true), "open");
        assert_eq!(DeviceId::CurtainOpen.state_word(false), "closed");
        assert_eq!(DeviceId::Heater.state_word(true), "on");
    }

    #[test]
    fn should_serialize_as_snake_case() {
        let json = serde_json::to_string(&DeviceId::CurtainOpen).unwrap();
        assert_eq!(json, "\"curtain_open\"");
    }
}
