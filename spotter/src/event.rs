use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use vision::Observation;

use crate::reduce::DeviceKind;

/// The best qualifying observation of one processed frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionEvent {
    pub label: String,
    pub confidence: f32,
    /// Serialized as an RFC 3339 UTC string.
    pub timestamp: DateTime<Utc>,
}

impl DetectionEvent {
    /// Stamp `observation` with the current wall-clock time.
    pub fn now(observation: &Observation) -> Self {
        Self {
            label: observation.label.clone(),
            confidence: observation.confidence,
            timestamp: Utc::now(),
        }
    }
}

/// One line of the output stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Event {
    Detection(DetectionEvent),
    /// Fatal condition; the process exits after writing it.
    Error { message: String },
}

impl Event {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Destination for events.
pub trait EventSink: Send {
    fn emit(&mut self, event: &Event) -> io::Result<()>;
}

impl EventSink for Vec<Event> {
    fn emit(&mut self, event: &Event) -> io::Result<()> {
        self.push(event.clone());
        Ok(())
    }
}

/// Writes each event as one JSON object per line and flushes immediately.
pub struct JsonLines<W> {
    writer: W,
    announce: bool,
}

impl<W: Write + Send> JsonLines<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            announce: false,
        }
    }

    /// Follow each phone or camera detection with a plain-text line.
    pub fn announcing(mut self, announce: bool) -> Self {
        self.announce = announce;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> EventSink for JsonLines<W> {
    fn emit(&mut self, event: &Event) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        if let Event::Detection(detection) = event {
            match DeviceKind::of(&detection.label).announcement() {
                Some(line) if self.announce => writeln!(self.writer, "{line}")?,
                _ => {}
            }
        }
        self.writer.flush()
    }
}
