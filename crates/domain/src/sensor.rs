//! Sensor readings — the environmental snapshot the automation rules read.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Inclusive range a reading is kept within.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorRange {
    pub min: f64,
    pub max: f64,
}

impl SensorRange {
    /// Clamp `value` into the range.
    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// One of the three simulated measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Temperature,
    Humidity,
    Illumination,
}

impl Metric {
    pub const ALL: [Self; 3] = [Self::Temperature, Self::Humidity, Self::Illumination];

    /// Physical bounds of the metric.
    #[must_use]
    pub const fn range(self) -> SensorRange {
        match self {
            Self::Temperature => SensorRange {
                min: 15.0,
                max: 35.0,
            },
            Self::Humidity => SensorRange {
                min: 20.0,
                max: 80.0,
            },
            Self::Illumination => SensorRange {
                min: 0.0,
                max: 10_000.0,
            },
        }
    }

    /// Largest change applied by a single random-walk step, in either direction.
    #[must_use]
    pub const fn max_step(self) -> f64 {
        match self {
            Self::Temperature => 0.5,
            Self::Humidity => 2.0,
            Self::Illumination => 50.0,
        }
    }

    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Temperature => "\u{b0}C",
            Self::Humidity => "%",
            Self::Illumination => "lux",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Illumination => "illumination",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str() == s)
            .ok_or_else(|| ParseError::UnknownMetric(s.to_string()))
    }
}

/// Snapshot of the current environment.
///
/// Temperature in °C, humidity in %, illumination in lux.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub temperature: f64,
    pub humidity: f64,
    pub illumination: f64,
}

impl Default for SensorReading {
    fn default() -> Self {
        Self {
            temperature: 22.0,
            humidity: 50.0,
            illumination: 500.0,
        }
    }
}

impl SensorReading {
    /// Read a single metric.
    #[must_use]
    pub const fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Temperature => self.temperature,
            Metric::Humidity => self.humidity,
            Metric::Illumination => self.illumination,
        }
    }

    /// Overwrite a single metric, clamped to its range.
    pub fn set(&mut self, metric: Metric, value: f64) {
        let value = metric.range().clamp(value);
        match metric {
            Metric::Temperature => self.temperature = value,
            Metric::Humidity => self.humidity = value,
            Metric::Illumination => self.illumination = value,
        }
    }

    /// Return a copy with every metric clamped to its range.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        for metric in Metric::ALL {
            self.set(metric, self.get(metric));
        }
        self
    }

    /// Whether every metric sits inside its range.
    #[must_use]
    pub fn is_within_range(&self) -> bool {
        Metric::ALL
            .into_iter()
            .all(|metric| metric.range().contains(self.get(metric)))
    }
}

impl fmt::Display for SensorReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}{} {:.1}{} {:.0} {}",
            self.temperature,
            Metric::Temperature.unit(),
            self.humidity,
            Metric::Humidity.unit(),
            self.illumination,
            Metric::Illumination.unit(),
        )
    }
}
