//! Random-walk sensor simulation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use smarthome_app::ports::SensorSource;
use smarthome_domain::sensor::{Metric, SensorReading};

/// Simulated sensors.
///
/// Each [`tick`](SensorSource::tick) adds an independent, uniformly
/// distributed delta in `[-max_step, max_step]` to every metric, then clamps
/// the result to the metric's range.
#[derive(Debug)]
pub struct VirtualSensors<R = StdRng> {
    reading: SensorReading,
    rng: R,
}

impl Default for VirtualSensors {
    fn default() -> Self {
        Self::new(SensorReading::default())
    }
}

impl VirtualSensors {
    /// Simulation seeded from the operating system.
    #[must_use]
    pub fn new(initial: SensorReading) -> Self {
        Self::with_rng(initial, StdRng::from_os_rng())
    }

    /// Reproducible simulation.
    #[must_use]
    pub fn seeded(initial: SensorReading, seed: u64) -> Self {
        Self::with_rng(initial, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> VirtualSensors<R> {
    /// Simulation driven by a caller-provided random source.
    pub fn with_rng(initial: SensorReading, rng: R) -> Self {
        Self {
            reading: initial.clamped(),
            rng,
        }
    }

    /// Overwrite one reading, clamped to its range.
    pub fn force(&mut self, metric: Metric, value: f64) {
        self.reading.set(metric, value);
        tracing::debug!(%metric, value = self.reading.get(metric), "sensor reading forced");
    }

    fn step(&mut self, metric: Metric) {
        let max = metric.max_step();
        let delta = self.rng.random_range(-max..=max);
        self.reading.set(metric, self.reading.get(metric) + delta);
    }
}

impl<R: Rng> SensorSource for VirtualSensors<R> {
    fn tick(&mut self) {
        for metric in Metric::ALL {
            self.step(metric);
        }
    }

    fn current(&self) -> SensorReading {
        self.reading
    }
}
