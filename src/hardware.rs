//! Optional serial-attached game controller
//!
//! Best-effort line protocol at 9600 baud. Commands are newline-terminated
//! ASCII; incoming lines are tagged by prefix. Nothing in the game depends
//! on a controller being present: commands sent while disconnected are
//! dropped with a warning.

use std::fmt;
use std::io::Write;

use thiserror::Error;

use crate::audio::SoundCue;
use crate::sim::GameEvent;

#[derive(Debug, Error)]
pub enum HardwareError {
    #[error("controller not connected")]
    NotConnected,
    #[error("serial write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Outgoing command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceCommand {
    Led { index: u32, color: String },
    Tone { frequency: u32, duration_ms: u32 },
    Display(i64),
    Clear,
    CelebrateCorrect,
    CelebrateIncorrect,
}

impl fmt::Display for DeviceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceCommand::Led { index, color } => write!(f, "LED:{}:{}", index, color),
            DeviceCommand::Tone {
                frequency,
                duration_ms,
            } => write!(f, "TONE:{}:{}", frequency, duration_ms),
            DeviceCommand::Display(n) => write!(f, "DISPLAY:{}", n),
            DeviceCommand::Clear => write!(f, "CLEAR"),
            DeviceCommand::CelebrateCorrect => write!(f, "CELEBRATE:CORRECT"),
            DeviceCommand::CelebrateIncorrect => write!(f, "CELEBRATE:INCORRECT"),
        }
    }
}

impl DeviceCommand {
    /// Green LED by default
    pub fn led(index: u32) -> Self {
        DeviceCommand::Led {
            index,
            color: "green".to_string(),
        }
    }

    /// 500 ms tone by default
    pub fn tone(frequency: u32) -> Self {
        DeviceCommand::Tone {
            frequency,
            duration_ms: 500,
        }
    }

    /// Wire form, newline included
    pub fn encode(&self) -> String {
        format!("{}\n", self)
    }
}

/// Incoming line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceEvent {
    Button(String),
    Potentiometer(i64),
    Sensor(i64),
    Answer(String),
    /// Anything without a known prefix
    Data(String),
}

impl DeviceEvent {
    /// Parse one line; blank lines yield nothing
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let event = if let Some(rest) = line.strip_prefix("BTN:") {
            DeviceEvent::Button(rest.to_string())
        } else if let Some(rest) = line.strip_prefix("ANSWER:") {
            DeviceEvent::Answer(rest.to_string())
        } else if let Some(n) = line.strip_prefix("POT:").and_then(|r| r.trim().parse().ok()) {
            DeviceEvent::Potentiometer(n)
        } else if let Some(n) = line.strip_prefix("SENSOR:").and_then(|r| r.trim().parse().ok()) {
            DeviceEvent::Sensor(n)
        } else {
            DeviceEvent::Data(line.to_string())
        };
        Some(event)
    }
}

/// Byte sink to the controller (Web Serial writer, a TTY, a test double)
pub trait SerialLink {
    fn write_line(&mut self, line: &str) -> Result<(), HardwareError>;
}

/// Link over any `std::io::Write`
#[derive(Debug)]
pub struct WriterLink<W: Write> {
    writer: W,
}

impl<W: Write> WriterLink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SerialLink for WriterLink<W> {
    fn write_line(&mut self, line: &str) -> Result<(), HardwareError> {
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Longest partial line kept while waiting for a newline
pub const MAX_PENDING: usize = 1024;

/// Connection to the controller plus the partial-line input buffer
pub struct HardwareBridge<L: SerialLink> {
    link: Option<L>,
    pending: String,
}

impl<L: SerialLink> Default for HardwareBridge<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: SerialLink> HardwareBridge<L> {
    pub fn new() -> Self {
        Self {
            link: None,
            pending: String::new(),
        }
    }

    pub fn connect(&mut self, link: L) {
        self.link = Some(link);
        self.pending.clear();
        log::info!("Controller connected");
    }

    /// Drop the link and hand it back
    pub fn disconnect(&mut self) -> Option<L> {
        self.pending.clear();
        let link = self.link.take();
        if link.is_some() {
            log::info!("Controller disconnected");
        }
        link
    }

    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    pub fn try_send(&mut self, command: &DeviceCommand) -> Result<(), HardwareError> {
        let link = self.link.as_mut().ok_or(HardwareError::NotConnected)?;
        link.write_line(&command.encode())
    }

    /// Send, logging instead of failing; true when written
    pub fn send(&mut self, command: &DeviceCommand) -> bool {
        match self.try_send(command) {
            Ok(()) => true,
            Err(HardwareError::NotConnected) => {
                log::warn!("Controller not connected, dropped {}", command);
                false
            }
            Err(e) => {
                log::error!("Error sending {}: {}", command, e);
                false
            }
        }
    }

    /// Feed raw serial text; returns events for every completed line
    pub fn feed(&mut self, chunk: &str) -> Vec<DeviceEvent> {
        self.pending.push_str(chunk);
        let events = match self.pending.rfind('\n') {
            Some(last_newline) => {
                let complete: String = self.pending.drain(..=last_newline).collect();
                complete.lines().filter_map(DeviceEvent::parse).collect()
            }
            None => Vec::new(),
        };

        if self.pending.len() > MAX_PENDING {
            let mut cut = self.pending.len() - MAX_PENDING;
            while !self.pending.is_char_boundary(cut) {
                cut += 1;
            }
            self.pending.drain(..cut);
            log::warn!("Serial input without newline; dropped {} oldest bytes", cut);
        }
        events
    }

    /// Mirror answer feedback on the controller
    pub fn react(&mut self, events: &[GameEvent]) {
        if !self.is_connected() {
            return;
        }
        for event in events {
            let command = match event {
                GameEvent::Sound {
                    cue: SoundCue::Correct,
                } => DeviceCommand::CelebrateCorrect,
                GameEvent::Sound {
                    cue: SoundCue::Incorrect,
                } => DeviceCommand::CelebrateIncorrect,
                GameEvent::LeveledUp { level } => DeviceCommand::Display(*level as i64),
                _ => continue,
            };
            self.send(&command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        lines: Vec<String>,
        broken: bool,
    }

    impl SerialLink for Recorder {
        fn write_line(&mut self, line: &str) -> Result<(), HardwareError> {
            if self.broken {
                return Err(std::io::Error::other("unplugged").into());
            }
            self.lines.push(line.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_command_encoding() {
        assert_eq!(DeviceCommand::led(3).encode(), "LED:3:green\n");
        assert_eq!(
            DeviceCommand::Led {
                index: 1,
                color: "red".into()
            }
            .encode(),
            "LED:1:red\n"
        );
        assert_eq!(DeviceCommand::tone(440).encode(), "TONE:440:500\n");
        assert_eq!(DeviceCommand::Display(-12).encode(), "DISPLAY:-12\n");
        assert_eq!(DeviceCommand::Clear.encode(), "CLEAR\n");
        assert_eq!(
            DeviceCommand::CelebrateIncorrect.encode(),
            "CELEBRATE:INCORRECT\n"
        );
    }

    #[test]
    fn test_event_parsing() {
        assert_eq!(
            DeviceEvent::parse("BTN:A\r"),
            Some(DeviceEvent::Button("A".into()))
        );
        assert_eq!(
            DeviceEvent::parse("POT:512"),
            Some(DeviceEvent::Potentiometer(512))
        );
        assert_eq!(DeviceEvent::parse("SENSOR:-3"), Some(DeviceEvent::Sensor(-3)));
        assert_eq!(
            DeviceEvent::parse("ANSWER:42"),
            Some(DeviceEvent::Answer("42".into()))
        );
        assert_eq!(
            DeviceEvent::parse("POT:abc"),
            Some(DeviceEvent::Data("POT:abc".into()))
        );
        assert_eq!(
            DeviceEvent::parse("hello"),
            Some(DeviceEvent::Data("hello".into()))
        );
        assert_eq!(DeviceEvent::parse("  "), None);
    }

    #[test]
    fn test_feed_caps_unterminated_input() {
        let mut bridge: HardwareBridge<Recorder> = HardwareBridge::new();
        assert!(bridge.feed(&"x".repeat(3000)).is_empty());
        assert!(bridge.feed("é".repeat(600).as_str()).is_empty());
        let events = bridge.feed("\nBTN:A\n");
        assert_eq!(events.len(), 2);
        let DeviceEvent::Data(line) = &events[0] else {
            panic!("expected raw data, got {:?}", events[0]);
        };
        assert!(line.len() <= MAX_PENDING);
        assert!(line.ends_with('é'));
        assert_eq!(events[1], DeviceEvent::Button("A".into()));
    }

    #[test]
    fn test_feed_buffers_partial_lines() {
        let mut bridge: HardwareBridge<Recorder> = HardwareBridge::new();
        assert!(bridge.feed("BTN:").is_empty());
        let events = bridge.feed("A\nPOT:1");
        assert_eq!(events, vec![DeviceEvent::Button("A".into())]);
        let events = bridge.feed("0\n\nANSWER:7\n");
        assert_eq!(
            events,
            vec![
                DeviceEvent::Potentiometer(10),
                DeviceEvent::Answer("7".into())
            ]
        );
    }

    #[test]
    fn test_disconnected_drops_commands() {
        let mut bridge: HardwareBridge<Recorder> = HardwareBridge::new();
        assert!(!bridge.send(&DeviceCommand::Clear));
        assert!(matches!(
            bridge.try_send(&DeviceCommand::Clear),
            Err(HardwareError::NotConnected)
        ));

        bridge.connect(Recorder::default());
        assert!(bridge.send(&DeviceCommand::Clear));
        bridge.react(&[
            GameEvent::Sound {
                cue: SoundCue::Correct,
            },
            GameEvent::LeveledUp { level: 3 },
            GameEvent::Sound {
                cue: SoundCue::Click,
            },
        ]);
        let link = bridge.disconnect().unwrap();
        assert_eq!(
            link.lines,
            vec!["CLEAR\n", "CELEBRATE:CORRECT\n", "DISPLAY:3\n"]
        );
        assert!(!bridge.is_connected());
    }

    #[test]
    fn test_write_failure_is_reported() {
        let mut bridge = HardwareBridge::new();
        bridge.connect(Recorder {
            broken: true,
            ..Default::default()
        });
        assert!(!bridge.send(&DeviceCommand::Clear));
        assert!(matches!(
            bridge.try_send(&DeviceCommand::Clear),
            Err(HardwareError::Io(_))
        ));
    }

    #[test]
    fn test_writer_link() {
        let mut bridge = HardwareBridge::new();
        bridge.connect(WriterLink::new(Vec::new()));
        bridge.send(&DeviceCommand::tone(262));
        let bytes = bridge.disconnect().unwrap().into_inner();
        assert_eq!(String::from_utf8(bytes).unwrap(), "TONE:262:500\n");
    }
}
