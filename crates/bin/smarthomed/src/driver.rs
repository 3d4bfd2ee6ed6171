//! Periodic driver — the only place that schedules work on the panel core.
//!
//! One task owns the [`SmartHome`] and multiplexes the sensor timer, the
//! automation timer, the pending elevator arrival and console commands with
//! `tokio::select!`. Each arm runs to completion before the next is polled.

use std::future::Future;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{Instant, MissedTickBehavior};

use smarthome_app::ports::SensorSource;
use smarthome_app::services::smart_home::SmartHome;
use smarthome_domain::dashboard::Dashboard;
use smarthome_domain::device::DeviceId;

/// Cadences of the periodic triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub sensor_interval: Duration,
    pub automation_interval: Duration,
    pub elevator_travel: Duration,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            sensor_interval: Duration::from_secs(1),
            automation_interval: Duration::from_secs(2),
            elevator_travel: Duration::from_secs(3),
        }
    }
}

/// A request from the user surface.
#[derive(Debug)]
pub enum Command {
    /// Switch a device by hand; disables automation for its group.
    Manual { device: DeviceId, on: bool },
    /// Call the elevator; it arrives after [`Schedule::elevator_travel`].
    /// Calling again while it travels restarts the trip, so it arrives once.
    CallElevator,
    /// Reply with the current dashboard.
    Status(oneshot::Sender<Dashboard>),
    /// Stop the driver.
    Shutdown,
}

/// Owns the panel core and runs it until shutdown.
pub struct Driver<S> {
    home: SmartHome<S>,
    schedule: Schedule,
    commands: mpsc::Receiver<Command>,
}

impl<S: SensorSource> Driver<S> {
    pub fn new(home: SmartHome<S>, schedule: Schedule, commands: mpsc::Receiver<Command>) -> Self {
        Self {
            home,
            schedule,
            commands,
        }
    }

    /// Run until `shutdown` resolves or a [`Command::Shutdown`] arrives, then
    /// hand the core back.
    ///
    /// The first sensor and automation ticks happen one interval after start.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) -> SmartHome<S> {
        let start = Instant::now();
        let mut sensor_tick = tokio::time::interval_at(
            start + self.schedule.sensor_interval,
            self.schedule.sensor_interval,
        );
        sensor_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut automation_tick = tokio::time::interval_at(
            start + self.schedule.automation_interval,
            self.schedule.automation_interval,
        );
        automation_tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let elevator = tokio::time::sleep(Duration::ZERO);
        tokio::pin!(elevator);
        let mut elevator_travelling = false;
        let mut commands_open = true;

        tokio::pin!(shutdown);

        tracing::info!(
            sensor_interval = ?self.schedule.sensor_interval,
            automation_interval = ?self.schedule.automation_interval,
            "driver started"
        );

        loop {
            tokio::select! {
                biased;

                () = &mut shutdown => break,
                _ = sensor_tick.tick() => self.home.tick_sensors(),
                _ = automation_tick.tick() => self.home.tick_automation(),
                () = &mut elevator, if elevator_travelling => {
                    elevator_travelling = false;
                    self.home.elevator_arrived();
                }
                command = self.commands.recv(), if commands_open => match command {
                    Some(Command::Manual { device, on }) => self.home.manual_command(device, on),
                    Some(Command::CallElevator) => {
                        self.home.call_elevator();
                        // A second call restarts the trip.
                        elevator
                            .as_mut()
                            .reset(Instant::now() + self.schedule.elevator_travel);
                        elevator_travelling = true;
                    }
                    Some(Command::Status(reply)) => {
                        let _ = reply.send(self.home.dashboard());
                    }
                    Some(Command::Shutdown) => break,
                    None => {
                        tracing::debug!("command channel closed, running on timers only");
                        commands_open = false;
                    }
                },
            }
        }

        tracing::info!("driver stopped");
        self.home
    }
}
