//! Text console — the panel's user surface.
//!
//! Lines typed on stdin become [`Command`]s for the driver; events from the
//! bus are printed to stdout, either as panel text or as JSON lines.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use serde::Deserialize;
use tokio::sync::{broadcast, mpsc, oneshot};

use smarthome_domain::device::DeviceId;
use smarthome_domain::error::ParseError;
use smarthome_domain::event::Event;

use crate::driver::Command;

/// How events are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One parsed console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Manual { device: DeviceId, on: bool },
    CallElevator,
    Status,
    Help,
    Quit,
}

/// Why a console line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error(transparent)]
    UnknownDevice(#[from] ParseError),
    #[error("unknown action {action:?} for {device}")]
    UnknownAction { device: DeviceId, action: String },
    #[error("missing action for {0}, expected on or off")]
    MissingAction(DeviceId),
    #[error("{0} cannot be switched by hand, use `elevator` to call it")]
    NotSwitchable(DeviceId),
    #[error("unexpected trailing input {0:?}")]
    Trailing(String),
}

pub const HELP: &str = "commands: <humidifier|ac|heater> on|off, curtain open|close, elevator, status, help, quit";

impl FromStr for Input {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let lowered = line.trim().to_lowercase();
        let mut words = lowered.split_whitespace();
        let first = words.next().ok_or(CommandError::Empty)?;

        let input = match first {
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            "elevator" | "call" => {
                // "elevator call" reads naturally too.
                if let Some("call") = words.clone().next() {
                    words.next();
                }
                Self::CallElevator
            }
            name => {
                let device = match name {
                    "curtain" => DeviceId::CurtainOpen,
                    other => other.parse::<DeviceId>()?,
                };
                // The elevator only moves through a call and its arrival.
                if device.control_group().is_none() {
                    return Err(CommandError::NotSwitchable(device));
                }
                let action = words.next().ok_or(CommandError::MissingAction(device))?;
                let on = match action {
                    "on" | "open" => true,
                    "off" | "close" | "closed" => false,
                    _ => {
                        return Err(CommandError::UnknownAction {
                            device,
                            action: action.to_string(),
                        });
                    }
                };
                Self::Manual { device, on }
            }
        };

        let rest: Vec<&str> = words.collect();
        if rest.is_empty() {
            Ok(input)
        } else {
            Err(CommandError::Trailing(rest.join(" ")))
        }
    }
}

/// Read commands until EOF, `quit`, or the driver going away.
///
/// Blocking: run it on its own thread, outside the runtime.
pub fn read_commands(input: impl BufRead, tx: &mpsc::Sender<Command>, mut out: impl Write) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                tracing::warn!(%err, "failed to read console input");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Input>() {
            Ok(Input::Manual { device, on }) => Command::Manual { device, on },
            Ok(Input::CallElevator) => Command::CallElevator,
            Ok(Input::Status) => {
                let (reply, rx) = oneshot::channel();
                if tx.blocking_send(Command::Status(reply)).is_err() {
                    break;
                }
                if let Ok(dashboard) = rx.blocking_recv() {
                    let _ = write!(out, "{dashboard}");
                }
                continue;
            }
            Ok(Input::Help) => {
                let _ = writeln!(out, "{HELP}");
                continue;
            }
            Ok(Input::Quit) => {
                let _ = tx.blocking_send(Command::Shutdown);
                break;
            }
            Err(err) => {
                let _ = writeln!(out, "{err}; {HELP}");
                continue;
            }
        };

        if tx.blocking_send(command).is_err() {
            break;
        }
    }
    tracing::debug!("console input closed");
}

/// Render one event for display. Sensor updates are silent in text mode.
#[must_use]
pub fn render(event: &Event, format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Json => match serde_json::to_string(event) {
            Ok(line) => Some(line),
            Err(err) => {
                tracing::warn!(%err, "failed to serialize event to JSON");
                None
            }
        },
        OutputFormat::Text => match event {
            Event::Log(entry) => Some(entry.to_string()),
            Event::StateChanged(change) => Some(format!("  {change}")),
            Event::SensorsUpdated(_) => None,
        },
    }
}

/// Print every event from the bus until it closes.
pub async fn print_events(mut rx: broadcast::Receiver<Event>, format: OutputFormat) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                if let Some(line) = render(&event, format) {
                    println!("{line}");
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "console lagging behind, events dropped");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Json => f.write_str("json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smarthome_domain::event::{LogEntry, LogOrigin, StateChange};
    use smarthome_domain::sensor::SensorReading;

    #[test]
    fn should_parse_switch_commands() {
        assert_eq!(
            "ac on".parse::<Input>().unwrap(),
            Input::Manual {
                device: DeviceId::Ac,
                on: true
            }
        );
        assert_eq!(
            "  Heater OFF ".parse::<Input>().unwrap(),
            Input::Manual {
                device: DeviceId::Heater,
                on: false
            }
        );
    }

    #[test]
    fn should_parse_curtain_open_and_close() {
        assert_eq!(
            "curtain open".parse::<Input>().unwrap(),
            Input::Manual {
                device: DeviceId::CurtainOpen,
                on: true
            }
        );
        assert_eq!(
            "curtain_open close".parse::<Input>().unwrap(),
            Input::Manual {
                device: DeviceId::CurtainOpen,
                on: false
            }
        );
    }

    #[test]
    fn should_parse_elevator_call() {
        assert_eq!("elevator".parse::<Input>().unwrap(), Input::CallElevator);
        assert_eq!("call".parse::<Input>().unwrap(), Input::CallElevator);
        assert_eq!(
            "elevator call".parse::<Input>().unwrap(),
            Input::CallElevator
        );
    }

    #[test]
    fn should_parse_control_words() {
        assert_eq!("status".parse::<Input>().unwrap(), Input::Status);
        assert_eq!("QUIT".parse::<Input>().unwrap(), Input::Quit);
        assert_eq!("exit".parse::<Input>().unwrap(), Input::Quit);
        assert_eq!("help".parse::<Input>().unwrap(), Input::Help);
    }

    #[test]
    fn should_reject_empty_line() {
        assert_eq!("   ".parse::<Input>(), Err(CommandError::Empty));
    }

    #[test]
    fn should_reject_unknown_device() {
        assert!(matches!(
            "toaster on".parse::<Input>(),
            Err(CommandError::UnknownDevice(_))
        ));
    }

    #[test]
    fn should_reject_missing_or_unknown_action() {
        assert_eq!(
            "ac".parse::<Input>(),
            Err(CommandError::MissingAction(DeviceId::Ac))
        );
        assert!(matches!(
            "ac maybe".parse::<Input>(),
            Err(CommandError::UnknownAction { .. })
        ));
    }

    #[test]
    fn should_reject_manual_elevator_switch() {
        assert_eq!(
            "elevator_called on".parse::<Input>(),
            Err(CommandError::NotSwitchable(DeviceId::ElevatorCalled))
        );
        assert_eq!(
            "elevator_called off".parse::<Input>(),
            Err(CommandError::NotSwitchable(DeviceId::ElevatorCalled))
        );
    }

    #[test]
    fn should_not_forward_manual_elevator_switch() {
        let (tx, mut rx) = mpsc::channel(8);
        let input = std::io::Cursor::new("elevator_called on\n");
        let mut out = Vec::new();

        read_commands(input, &tx, &mut out);

        assert!(rx.try_recv().is_err());
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("elevator_called cannot be switched by hand"));
    }

    #[test]
    fn should_reject_trailing_words() {
        assert_eq!(
            "ac on now".parse::<Input>(),
            Err(CommandError::Trailing("now".to_string()))
        );
    }

    #[test]
    fn should_render_log_entry_as_panel_line() {
        let event = Event::Log(LogEntry::new(LogOrigin::Elevator, "arrived"));
        let line = render(&event, OutputFormat::Text).unwrap();
        assert!(line.ends_with("] arrived"));
    }

    #[test]
    fn should_render_state_change_as_status_line() {
        let event = Event::StateChanged(StateChange {
            device: DeviceId::CurtainOpen,
            on: true,
        });
        assert_eq!(
            render(&event, OutputFormat::Text).as_deref(),
            Some("  curtain: open")
        );
    }

    #[test]
    fn should_hide_sensor_updates_in_text_mode() {
        let event = Event::SensorsUpdated(SensorReading::default());
        assert!(render(&event, OutputFormat::Text).is_none());
        assert!(render(&event, OutputFormat::Json).is_some());
    }

    #[test]
    fn should_render_json_line() {
        let event = Event::StateChanged(StateChange {
            device: DeviceId::Ac,
            on: true,
        });
        let line = render(&event, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["type"], "state_changed");
        assert_eq!(value["device"], "ac");
    }

    #[test]
    fn should_forward_console_lines_as_commands() {
        let (tx, mut rx) = mpsc::channel(8);
        let input = std::io::Cursor::new("ac on\n\nbogus\nelevator\nquit\nheater on\n");
        let mut out = Vec::new();

        read_commands(input, &tx, &mut out);

        assert!(matches!(
            rx.try_recv(),
            Ok(Command::Manual {
                device: DeviceId::Ac,
                on: true
            })
        ));
        assert!(matches!(rx.try_recv(), Ok(Command::CallElevator)));
        assert!(matches!(rx.try_recv(), Ok(Command::Shutdown)));
        assert!(rx.try_recv().is_err());

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("unknown device \"bogus\""));
    }

    #[test]
    fn should_stop_reading_when_driver_is_gone() {
        let (tx, rx) = mpsc::channel(8);
        drop(rx);
        let input = std::io::Cursor::new("ac on\nheater on\n");

        read_commands(input, &tx, std::io::sink());
    }
}
