//! Sensor port — where the environmental readings come from.

use smarthome_domain::sensor::SensorReading;

/// A source of sensor readings advanced by an external cadence.
///
/// The virtual adapter implements this with a bounded random walk; tests use
/// a fixed reading.
pub trait SensorSource {
    /// Advance the readings by one step.
    fn tick(&mut self);

    /// The current snapshot, by value.
    fn current(&self) -> SensorReading;
}

impl SensorSource for SensorReading {
    fn tick(&mut self) {}

    fn current(&self) -> SensorReading {
        *self
    }
}
