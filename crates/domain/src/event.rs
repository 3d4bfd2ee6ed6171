//! Event — an immutable record of something that happened on the panel.
//!
//! Two notification channels exist: device state changes and log messages.
//! Sensor updates travel as events too so a display can follow the readings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::device::DeviceId;
use crate::sensor::SensorReading;
use crate::time::{self, Timestamp};

/// Who caused a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogOrigin {
    Automation,
    Manual,
    Elevator,
}

/// A human-readable line for the panel log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: Timestamp,
    pub origin: LogOrigin,
    pub message: String,
}

impl LogEntry {
    /// Create an entry stamped with the current time.
    #[must_use]
    pub fn new(origin: LogOrigin, message: impl Into<String>) -> Self {
        Self {
            timestamp: time::now(),
            origin,
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", time::clock_time(self.timestamp), self.message)
    }
}

/// A device was written, whether or not its value actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    pub device: DeviceId,
    pub on: bool,
}

impl fmt::Display for StateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.device {
            DeviceId::CurtainOpen | DeviceId::ElevatorCalled => write!(
                f,
                "{}: {}",
                self.device.label(),
                self.device.state_word(self.on)
            ),
            _ if self.on => write!(f, "{}: ON \u{2713}", self.device.label()),
            _ => write!(f, "{}: OFF", self.device.label()),
        }
    }
}

/// Everything the core reports to the outside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    StateChanged(StateChange),
    Log(LogEntry),
    SensorsUpdated(SensorReading),
}

impl From<StateChange> for Event {
    fn from(change: StateChange) -> Self {
        Self::StateChanged(change)
    }
}

impl From<LogEntry> for Event {
    fn from(entry: LogEntry) -> Self {
        Self::Log(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_prefix_log_entry_with_clock_time() {
        let entry = LogEntry::new(LogOrigin::Automation, "\u{2744}\u{fe0f} ac on (auto)");
        let text = entry.to_string();
        assert!(text.starts_with('['));
        assert!(text.ends_with("] \u{2744}\u{fe0f} ac on (auto)"));
    }

    #[test]
    fn should_display_switch_state_with_check_mark() {
        let on = StateChange {
            device: DeviceId::Ac,
            on: true,
        };
        let off = StateChange {
            device: DeviceId::Heater,
            on: false,
        };
        assert_eq!(on.to_string(), "ac: ON \u{2713}");
        assert_eq!(off.to_string(), "heater: OFF");
    }

    #[test]
    fn should_display_curtain_as_open_or_closed() {
        let change = StateChange {
            device: DeviceId::CurtainOpen,
            on: true,
        };
        assert_eq!(change.to_string(), "curtain: open");
    }

    #[test]
    fn should_tag_serialized_events_with_type() {
        let event = Event::from(StateChange {
            device: DeviceId::CurtainOpen,
            on: false,
        });
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "state_changed");
        assert_eq!(json["device"], "curtain_open");
        assert_eq!(json["on"], false);
    }

    #[test]
    fn should_roundtrip_log_event_through_serde_json() {
        let event = Event::from(LogEntry::new(LogOrigin::Manual, "manual"));
        let json = serde_json::to_string(&event).unwrap();
        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }
}
