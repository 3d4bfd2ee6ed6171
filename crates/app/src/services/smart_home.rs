//! Smart-home service — single owner of sensors, device state and automation.
//!
//! The driver holds one [`SmartHome`] and calls into it from its timers and
//! from user commands. Every call runs to completion and delivers its
//! notifications before returning, so no locking is needed.

use smarthome_domain::control_group::ControlGroup;
use smarthome_domain::dashboard::Dashboard;
use smarthome_domain::device::DeviceId;
use smarthome_domain::event::{Event, LogEntry, LogOrigin, StateChange};
use smarthome_domain::sensor::SensorReading;

use crate::automation_engine::AutomationEngine;
use crate::device_registry::DeviceRegistry;
use crate::observer::{Observers, Subscription};
use crate::ports::{EventPublisher, SensorSource};

/// The panel core: a sensor source, the device registry and the engine.
#[derive(Debug)]
pub struct SmartHome<S> {
    sensors: S,
    registry: DeviceRegistry,
    engine: AutomationEngine,
    sensor_observers: Observers<SensorReading>,
}

impl<S: SensorSource> SmartHome<S> {
    /// Create a panel with the factory automation rules.
    pub fn new(sensors: S) -> Self {
        Self::with_engine(sensors, AutomationEngine::default())
    }

    /// Create a panel with a preconfigured engine.
    pub fn with_engine(sensors: S, engine: AutomationEngine) -> Self {
        Self {
            sensors,
            registry: DeviceRegistry::default(),
            engine,
            sensor_observers: Observers::default(),
        }
    }

    pub fn sensors(&self) -> &S {
        &self.sensors
    }

    pub fn sensors_mut(&mut self) -> &mut S {
        &mut self.sensors
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &AutomationEngine {
        &self.engine
    }

    /// Current state of a device.
    pub fn state(&self, device: DeviceId) -> bool {
        self.registry.state(device)
    }

    /// Whether automation currently governs `group`.
    pub fn auto_mode(&self, group: ControlGroup) -> bool {
        self.engine.auto_mode(group)
    }

    /// Advance the sensor readings and report the new snapshot.
    pub fn tick_sensors(&mut self) {
        self.sensors.tick();
        let reading = self.sensors.current();
        tracing::trace!(%reading, "sensors ticked");
        self.sensor_observers.notify(&reading);
    }

    /// Run the automation rules against the current readings.
    pub fn tick_automation(&mut self) {
        let reading = self.sensors.current();
        self.engine.tick(&reading, &mut self.registry);
    }

    /// Apply a user command to a device.
    ///
    /// The device is written first so the state-change notification carries
    /// the manual value, then automation is switched off for its group, so a
    /// later tick cannot undo the command. Automation is never switched back
    /// on by this service.
    #[tracing::instrument(skip(self))]
    pub fn manual_command(&mut self, device: DeviceId, on: bool) {
        self.registry.set_state(device, on);
        if let Some(group) = device.control_group() {
            self.engine.set_auto_mode(group, false);
        }

        let status = if on { "ON" } else { "OFF" };
        tracing::info!(%device, on, "manual command applied");
        self.engine.record(
            LogOrigin::Manual,
            format!(
                "\u{1f527} {} \u{2192} manual {status}",
                device.as_str().to_uppercase()
            ),
        );
    }

    /// Name-keyed variant of [`manual_command`](Self::manual_command).
    /// Unknown names are ignored.
    pub fn manual_command_named(&mut self, name: &str, on: bool) {
        match name.parse::<DeviceId>() {
            Ok(device) => self.manual_command(device, on),
            Err(err) => tracing::debug!(%err, "ignoring manual command for unknown device"),
        }
    }

    /// Call the elevator to the lobby. The caller schedules
    /// [`elevator_arrived`](Self::elevator_arrived).
    #[tracing::instrument(skip(self))]
    pub fn call_elevator(&mut self) {
        self.registry.set_state(DeviceId::ElevatorCalled, true);
        tracing::info!("elevator called");
        self.engine.record(
            LogOrigin::Elevator,
            "\u{1f4de} elevator called, moving to the lobby floor",
        );
    }

    /// The called elevator reached the lobby.
    #[tracing::instrument(skip(self))]
    pub fn elevator_arrived(&mut self) {
        self.registry.set_state(DeviceId::ElevatorCalled, false);
        tracing::info!("elevator arrived");
        self.engine
            .record(LogOrigin::Elevator, "\u{2705} elevator arrived");
    }

    /// Everything the panel displays, right now.
    pub fn dashboard(&self) -> Dashboard {
        Dashboard {
            reading: self.sensors.current(),
            devices: self.registry.snapshot(),
            auto_modes: ControlGroup::ALL
                .into_iter()
                .map(|group| (group, self.engine.auto_mode(group)))
                .collect(),
        }
    }

    /// Register a device state-change observer.
    pub fn subscribe_state(
        &mut self,
        callback: impl FnMut(&StateChange) + Send + 'static,
    ) -> Subscription {
        self.registry.subscribe(callback)
    }

    /// Register a log observer.
    pub fn subscribe_log(
        &mut self,
        callback: impl FnMut(&LogEntry) + Send + 'static,
    ) -> Subscription {
        self.engine.subscribe_log(callback)
    }

    /// Register an observer of every new sensor snapshot.
    pub fn subscribe_sensors(
        &mut self,
        callback: impl FnMut(&SensorReading) + Send + 'static,
    ) -> Subscription {
        self.sensor_observers.subscribe(callback)
    }

    /// Forward every notification of the core to `publisher` as an [`Event`].
    pub fn connect<P>(&mut self, publisher: P)
    where
        P: EventPublisher + Clone + Send + 'static,
    {
        let states = publisher.clone();
        self.subscribe_state(move |change| states.publish(Event::from(*change)));
        let logs = publisher.clone();
        self.subscribe_log(move |entry| logs.publish(Event::from(entry.clone())));
        self.subscribe_sensors(move |reading| publisher.publish(Event::SensorsUpdated(*reading)));
    }
}
