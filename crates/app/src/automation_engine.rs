//! Automation engine — applies hysteresis rules on every automation tick.
//!
//! For each control group, in fixed order (humidifier, ac, heater, curtain),
//! the engine skips the group if its auto mode is off, otherwise reads the
//! group's metric and device state, asks the rule for a decision and, when
//! the rule says so, writes the device and logs a line.

use smarthome_domain::automation::HysteresisRule;
use smarthome_domain::control_group::ControlGroup;
use smarthome_domain::event::{LogEntry, LogOrigin};
use smarthome_domain::sensor::SensorReading;

use crate::device_registry::DeviceRegistry;
use crate::observer::{Observers, Subscription};

/// Rule evaluator with one auto-mode flag per [`ControlGroup`].
#[derive(Debug)]
pub struct AutomationEngine {
    rules: [HysteresisRule; ControlGroup::ALL.len()],
    auto_mode: [bool; ControlGroup::ALL.len()],
    log: Observers<LogEntry>,
}

impl Default for AutomationEngine {
    fn default() -> Self {
        Self {
            rules: HysteresisRule::defaults(),
            auto_mode: [true; ControlGroup::ALL.len()],
            log: Observers::default(),
        }
    }
}

impl AutomationEngine {
    /// Engine with the factory thresholds and every group automated.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rule of the rule's group.
    #[must_use]
    pub fn with_rule(mut self, rule: HysteresisRule) -> Self {
        self.rules[rule.group().index()] = rule;
        self
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[HysteresisRule] {
        &self.rules
    }

    /// Enable or disable automation for a group.
    pub fn set_auto_mode(&mut self, group: ControlGroup, enabled: bool) {
        self.auto_mode[group.index()] = enabled;
        tracing::debug!(%group, enabled, "auto mode set");
    }

    #[must_use]
    pub fn auto_mode(&self, group: ControlGroup) -> bool {
        self.auto_mode[group.index()]
    }

    /// Set auto mode by group name. Unknown names are ignored.
    pub fn set_auto_mode_named(&mut self, name: &str, enabled: bool) {
        match name.parse::<ControlGroup>() {
            Ok(group) => self.set_auto_mode(group, enabled),
            Err(err) => tracing::debug!(%err, "ignoring auto mode for unknown group"),
        }
    }

    /// Auto mode by group name; `false` for unknown names.
    #[must_use]
    pub fn auto_mode_named(&self, name: &str) -> bool {
        name.parse::<ControlGroup>()
            .is_ok_and(|group| self.auto_mode(group))
    }

    /// Evaluate every rule once against `reading`, writing through `registry`.
    pub fn tick(&mut self, reading: &SensorReading, registry: &mut DeviceRegistry) {
        for rule in self.rules {
            if !self.auto_mode(rule.group()) {
                continue;
            }

            let device = rule.group().device();
            let value = reading.get(rule.metric());
            let Some(on) = rule.decide(value, registry.state(device)) else {
                continue;
            };

            registry.set_state(device, on);
            tracing::info!(%device, on, metric = %rule.metric(), value, "automation switched device");
            self.record(LogOrigin::Automation, rule.message(on));
        }
    }

    /// Emit a log line to every log observer.
    pub fn record(&mut self, origin: LogOrigin, message: impl Into<String>) {
        self.log.notify(&LogEntry::new(origin, message));
    }

    /// Register a log observer.
    pub fn subscribe_log(
        &mut self,
        callback: impl FnMut(&LogEntry) + Send + 'static,
    ) -> Subscription {
        self.log.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarthome_domain::device::DeviceId;
    use smarthome_domain::event::StateChange;
    use smarthome_domain::sensor::Metric;
    use std::sync::{Arc, Mutex};

    fn reading_with(metric: Metric, value: f64) -> SensorReading {
        let mut reading = SensorReading::default();
        reading.set(metric, value);
        reading
    }

    fn log_sink(engine: &mut AutomationEngine) -> Arc<Mutex<Vec<String>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        engine.subscribe_log(move |entry| sink.lock().unwrap().push(entry.message.clone()));
        seen
    }

    fn change_sink(registry: &mut DeviceRegistry) -> Arc<Mutex<Vec<StateChange>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        registry.subscribe(move |change| sink.lock().unwrap().push(*change));
        seen
    }

    #[test]
    fn should_default_every_group_to_automated() {
        let engine = AutomationEngine::new();
        for group in ControlGroup::ALL {
            assert!(engine.auto_mode(group));
        }
    }

    #[test]
    fn should_do_nothing_at_default_reading() {
        let mut engine = AutomationEngine::new();
        let mut registry = DeviceRegistry::new();
        let changes = change_sink(&mut registry);

        engine.tick(&SensorReading::default(), &mut registry);

        assert!(changes.lock().unwrap().is_empty());
    }

    #[test]
    fn should_turn_ac_on_once_when_crossing_threshold() {
        let mut engine = AutomationEngine::new();
        let mut registry = DeviceRegistry::new();
        let changes = change_sink(&mut registry);

        engine.tick(&reading_with(Metric::Temperature, 25.9), &mut registry);
        assert!(!registry.state(DeviceId::Ac));

        engine.tick(&reading_with(Metric::Temperature, 26.1), &mut registry);
        engine.tick(&reading_with(Metric::Temperature, 26.1), &mut registry);
        assert!(registry.state(DeviceId::Ac));

        engine.tick(&reading_with(Metric::Temperature, 24.0), &mut registry);
        assert!(registry.state(DeviceId::Ac));

        engine.tick(&reading_with(Metric::Temperature, 21.9), &mut registry);
        assert!(!registry.state(DeviceId::Ac));

        let ac_writes: Vec<_> = changes
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.device == DeviceId::Ac)
            .map(|c| c.on)
            .collect();
        assert_eq!(ac_writes, vec![true, false]);
    }

    #[test]
    fn should_log_ac_on_message() {
        let mut engine = AutomationEngine::new();
        let mut registry = DeviceRegistry::new();
        let logs = log_sink(&mut engine);

        engine.tick(&reading_with(Metric::Temperature, 27.0), &mut registry);

        let logs = logs.lock().unwrap();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].contains("ac on"));
    }

    #[test]
    fn should_skip_group_when_auto_mode_disabled() {
        let mut engine = AutomationEngine::new();
        let mut registry = DeviceRegistry::new();
        registry.set_state(DeviceId::Ac, true);
        engine.set_auto_mode(ControlGroup::Ac, false);

        for temperature in [15.0, 21.0, 30.0, 35.0] {
            engine.tick(&reading_with(Metric::Temperature, temperature), &mut registry);
            assert!(registry.state(DeviceId::Ac));
        }
    }

    #[test]
    fn should_still_run_other_groups_when_one_is_manual() {
        let mut engine = AutomationEngine::new();
        let mut registry = DeviceRegistry::new();
        engine.set_auto_mode(ControlGroup::Ac, false);

        engine.tick(&reading_with(Metric::Temperature, 16.0), &mut registry);

        assert!(registry.state(DeviceId::Heater));
        assert!(!registry.state(DeviceId::Ac));
    }

    #[test]
    fn should_open_curtain_when_bright() {
        let mut engine = AutomationEngine::new();
        let mut registry = DeviceRegistry::new();

        engine.tick(&reading_with(Metric::Illumination, 8000.0), &mut registry);

        assert!(registry.state(DeviceId::CurtainOpen));
    }

    #[test]
    fn should_evaluate_rules_in_fixed_order() {
        let mut engine = AutomationEngine::new();
        let mut registry = DeviceRegistry::new();
        let changes = change_sink(&mut registry);
        let reading = SensorReading {
            temperature: 16.0,
            humidity: 30.0,
            illumination: 9000.0,
        };

        engine.tick(&reading, &mut registry);

        let devices: Vec<_> = changes.lock().unwrap().iter().map(|c| c.device).collect();
        assert_eq!(
            devices,
            vec![DeviceId::Humidifier, DeviceId::Heater, DeviceId::CurtainOpen]
        );
    }

    #[test]
    fn should_ignore_unknown_group_names() {
        let mut engine = AutomationEngine::new();
        engine.set_auto_mode_named("nonexistent", false);
        assert!(!engine.auto_mode_named("nonexistent"));
        assert!(!engine.auto_mode_named("curtain_open"));
        for group in ControlGroup::ALL {
            assert!(engine.auto_mode(group));
        }
    }

    #[test]
    fn should_set_auto_mode_by_name() {
        let mut engine = AutomationEngine::new();
        engine.set_auto_mode_named("curtain", false);
        assert!(!engine.auto_mode(ControlGroup::Curtain));
        assert!(!engine.auto_mode_named("curtain"));
    }

    #[test]
    fn should_use_custom_rule_thresholds() {
        let rule = HysteresisRule::new(ControlGroup::Ac, 30.0, 25.0).unwrap();
        let mut engine = AutomationEngine::new().with_rule(rule);
        let mut registry = DeviceRegistry::new();

        engine.tick(&reading_with(Metric::Temperature, 28.0), &mut registry);
        assert!(!registry.state(DeviceId::Ac));

        engine.tick(&reading_with(Metric::Temperature, 31.0), &mut registry);
        assert!(registry.state(DeviceId::Ac));
        assert_eq!(engine.rules()[ControlGroup::Ac.index()], rule);
    }

    #[test]
    fn should_record_custom_log_lines() {
        let mut engine = AutomationEngine::new();
        let logs = log_sink(&mut engine);

        engine.record(LogOrigin::Manual, "hello");

        assert_eq!(*logs.lock().unwrap(), vec!["hello".to_string()]);
    }
}
