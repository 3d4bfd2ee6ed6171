//! Two-sided hysteresis comparator.

use serde::{Deserialize, Serialize};

use crate::control_group::ControlGroup;
use crate::error::ValidationError;
use crate::sensor::Metric;

/// Which side of the dead zone switches the device on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// On above the `on` threshold, off below the `off` threshold (cooling, shading).
    Rising,
    /// On below the `on` threshold, off above the `off` threshold (heating, humidifying).
    Falling,
}

/// Threshold pair for one control group.
///
/// Only built through [`HysteresisRule::default_for`] or
/// [`HysteresisRule::new`], so the metric and direction always match the
/// group and the thresholds always leave a dead zone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HysteresisRule {
    group: ControlGroup,
    metric: Metric,
    direction: Direction,
    on_threshold: f64,
    off_threshold: f64,
}

impl HysteresisRule {
    /// Factory thresholds of the panel.
    ///
    /// | group | metric | on | off |
    /// |---|---|---|---|
    /// | humidifier | humidity | < 40 | > 60 |
    /// | ac | temperature | > 26 | < 22 |
    /// | heater | temperature | < 18 | > 22 |
    /// | curtain | illumination | > 7000 | < 3000 |
    #[must_use]
    pub const fn default_for(group: ControlGroup) -> Self {
        let (on_threshold, off_threshold) = match group {
            ControlGroup::Humidifier => (40.0, 60.0),
            ControlGroup::Ac => (26.0, 22.0),
            ControlGroup::Heater => (18.0, 22.0),
            ControlGroup::Curtain => (7000.0, 3000.0),
        };
        Self {
            group,
            metric: Self::metric_for(group),
            direction: Self::direction_for(group),
            on_threshold,
            off_threshold,
        }
    }

    /// The default rule of every group, in evaluation order.
    #[must_use]
    pub fn defaults() -> [Self; 4] {
        ControlGroup::ALL.map(Self::default_for)
    }

    /// Build a rule for `group` with custom thresholds.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a threshold is not finite or the
    /// thresholds do not leave a dead zone in the group's direction.
    pub fn new(
        group: ControlGroup,
        on_threshold: f64,
        off_threshold: f64,
    ) -> Result<Self, ValidationError> {
        let rule = Self {
            on_threshold,
            off_threshold,
            ..Self::default_for(group)
        };
        rule.validate()?;
        Ok(rule)
    }

    #[must_use]
    pub const fn group(&self) -> ControlGroup {
        self.group
    }

    #[must_use]
    pub const fn metric(&self) -> Metric {
        self.metric
    }

    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub const fn on_threshold(&self) -> f64 {
        self.on_threshold
    }

    #[must_use]
    pub const fn off_threshold(&self) -> f64 {
        self.off_threshold
    }

    /// The metric a group reacts to.
    #[must_use]
    pub const fn metric_for(group: ControlGroup) -> Metric {
        match group {
            ControlGroup::Humidifier => Metric::Humidity,
            ControlGroup::Ac | ControlGroup::Heater => Metric::Temperature,
            ControlGroup::Curtain => Metric::Illumination,
        }
    }

    #[must_use]
    pub const fn direction_for(group: ControlGroup) -> Direction {
        match group {
            ControlGroup::Ac | ControlGroup::Curtain => Direction::Rising,
            ControlGroup::Humidifier | ControlGroup::Heater => Direction::Falling,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if !self.on_threshold.is_finite() || !self.off_threshold.is_finite() {
            return Err(ValidationError::NonFiniteThreshold { group: self.group });
        }
        let ordered = match self.direction {
            Direction::Rising => self.off_threshold < self.on_threshold,
            Direction::Falling => self.on_threshold < self.off_threshold,
        };
        if ordered {
            Ok(())
        } else {
            Err(ValidationError::EmptyDeadZone {
                group: self.group,
                on: self.on_threshold,
                off: self.off_threshold,
            })
        }
    }

    /// Decide what to do given the current reading and device state.
    ///
    /// Returns `Some(new_state)` when the device must switch, `None` when it
    /// stays as it is. Both comparisons are strict.
    #[must_use]
    pub fn decide(&self, value: f64, currently_on: bool) -> Option<bool> {
        let (turn_on, turn_off) = match self.direction {
            Direction::Rising => (value > self.on_threshold, value < self.off_threshold),
            Direction::Falling => (value < self.on_threshold, value > self.off_threshold),
        };
        if turn_on && !currently_on {
            Some(true)
        } else if turn_off && currently_on {
            Some(false)
        } else {
            None
        }
    }

    /// Panel log line announcing an automatic switch.
    #[must_use]
    pub fn message(&self, on: bool) -> String {
        let icon = match self.group {
            ControlGroup::Humidifier => "\u{1f4a7}",
            ControlGroup::Ac => "\u{2744}\u{fe0f}",
            ControlGroup::Heater => "\u{1f525}",
            ControlGroup::Curtain => "\u{1fa9f}",
        };
        let device = self.group.device();
        format!("{icon} {} {} (auto)", device.label(), device.state_word(on))
    }
}
