//! Dashboard — a read-only view of everything the panel displays.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::control_group::ControlGroup;
use crate::device::DeviceId;
use crate::event::StateChange;
use crate::sensor::SensorReading;

/// Readings, device states and auto modes at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub reading: SensorReading,
    pub devices: Vec<(DeviceId, bool)>,
    pub auto_modes: Vec<(ControlGroup, bool)>,
}

impl Dashboard {
    /// State of one device as listed in the snapshot.
    #[must_use]
    pub fn device(&self, device: DeviceId) -> Option<bool> {
        self.devices
            .iter()
            .find(|(id, _)| *id == device)
            .map(|(_, on)| *on)
    }
}

impl fmt::Display for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "sensors: {}", self.reading)?;
        for (device, on) in &self.devices {
            let mode = device
                .control_group()
                .and_then(|group| self.auto_modes.iter().find(|(g, _)| *g == group))
                .map_or("", |(_, auto)| if *auto { " [auto]" } else { " [manual]" });
            writeln!(
                f,
                "  {}{mode}",
                StateChange {
                    device: *device,
                    on: *on
                }
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> Dashboard {
        Dashboard {
            reading: SensorReading::default(),
            devices: vec![(DeviceId::Ac, true), (DeviceId::ElevatorCalled, false)],
            auto_modes: vec![(ControlGroup::Ac, false)],
        }
    }

    #[test]
    fn should_look_up_device_state() {
        assert_eq!(dashboard().device(DeviceId::Ac), Some(true));
        assert_eq!(dashboard().device(DeviceId::Heater), None);
    }

    #[test]
    fn should_render_devices_with_mode() {
        let text = dashboard().to_string();
        assert!(text.contains("ac: ON \u{2713} [manual]"));
        assert!(text.contains("elevator: idle\n"));
    }
}
