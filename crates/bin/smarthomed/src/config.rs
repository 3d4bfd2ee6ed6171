//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `smarthome.toml` in the working directory (or the path in
//! `SMARTHOME_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use smarthome_app::automation_engine::AutomationEngine;
use smarthome_domain::automation::HysteresisRule;
use smarthome_domain::control_group::ControlGroup;
use smarthome_domain::error::SmartHomeError;
use smarthome_domain::sensor::SensorReading;

use crate::console::OutputFormat;
use crate::driver::Schedule;

const DEFAULT_PATH: &str = "smarthome.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tick cadences and the elevator travel time.
    pub timing: TimingConfig,
    /// Initial simulated readings.
    pub sensors: SensorsConfig,
    /// Threshold overrides per control group.
    pub rules: RulesConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Console output settings.
    pub console: ConsoleConfig,
}

/// Periodic triggers, in milliseconds.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub sensor_interval_ms: u64,
    pub automation_interval_ms: u64,
    pub elevator_travel_ms: u64,
}

/// Starting point of the sensor simulation.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SensorsConfig {
    pub temperature: f64,
    pub humidity: f64,
    pub illumination: f64,
    /// Fixed seed for a reproducible random walk.
    pub seed: Option<u64>,
}

/// Threshold overrides keyed by control group name (`[rules.ac]`).
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct RulesConfig(BTreeMap<String, ThresholdConfig>);

/// Thresholds of one hysteresis rule.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ThresholdConfig {
    pub on_threshold: f64,
    pub off_threshold: f64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Console configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub format: OutputFormat,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("SMARTHOME_CONFIG").unwrap_or_else(|_| DEFAULT_PATH.to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("SMARTHOME_SENSOR_INTERVAL_MS").and_then(|v| v.parse().ok()) {
            self.timing.sensor_interval_ms = val;
        }
        if let Some(val) = var("SMARTHOME_AUTOMATION_INTERVAL_MS").and_then(|v| v.parse().ok()) {
            self.timing.automation_interval_ms = val;
        }
        if let Some(val) = var("SMARTHOME_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let timing = &self.timing;
        if timing.sensor_interval_ms == 0
            || timing.automation_interval_ms == 0
            || timing.elevator_travel_ms == 0
        {
            return Err(ConfigError::Validation(
                "timing intervals must be non-zero".to_string(),
            ));
        }
        let sensors = &self.sensors;
        if ![sensors.temperature, sensors.humidity, sensors.illumination]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(ConfigError::Validation(
                "initial sensor readings must be finite".to_string(),
            ));
        }
        self.rules.build()?;
        Ok(())
    }

    /// Initial reading, clamped to the sensor ranges.
    #[must_use]
    pub fn initial_reading(&self) -> SensorReading {
        SensorReading {
            temperature: self.sensors.temperature,
            humidity: self.sensors.humidity,
            illumination: self.sensors.illumination,
        }
        .clamped()
    }

    /// Build the automation engine with configured thresholds.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured rule has no valid dead zone.
    pub fn engine(&self) -> Result<AutomationEngine, ConfigError> {
        Ok(self
            .rules
            .build()?
            .into_iter()
            .fold(AutomationEngine::new(), AutomationEngine::with_rule))
    }

    /// Cadences for the driver.
    #[must_use]
    pub fn schedule(&self) -> Schedule {
        Schedule {
            sensor_interval: Duration::from_millis(self.timing.sensor_interval_ms),
            automation_interval: Duration::from_millis(self.timing.automation_interval_ms),
            elevator_travel: Duration::from_millis(self.timing.elevator_travel_ms),
        }
    }
}

impl RulesConfig {
    /// One rule per group, in evaluation order: the configured thresholds,
    /// or the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SmartHomeError::Parse`] for a table naming no control group
    /// and [`SmartHomeError::Validation`] for thresholds without a dead zone.
    pub fn build(&self) -> Result<Vec<HysteresisRule>, SmartHomeError> {
        let mut rules = HysteresisRule::defaults();
        for (name, thresholds) in &self.0 {
            let group: ControlGroup = name.parse()?;
            rules[group.index()] =
                HysteresisRule::new(group, thresholds.on_threshold, thresholds.off_threshold)?;
        }
        Ok(rules.to_vec())
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            sensor_interval_ms: 1000,
            automation_interval_ms: 2000,
            elevator_travel_ms: 3000,
        }
    }
}

impl Default for SensorsConfig {
    fn default() -> Self {
        let reading = SensorReading::default();
        Self {
            temperature: reading.temperature,
            humidity: reading.humidity,
            illumination: reading.illumination,
            seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "smarthomed=info,smarthome=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// A configured automation rule is unusable.
    #[error("invalid automation rule")]
    Rule(#[from] SmartHomeError),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
