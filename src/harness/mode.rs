use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::sim::InputEvent;

use super::error::{HarnessError, Result};
use super::stream::{MandatoryStream, OptionalStream};

pub const INPUT_EVENTS_STREAM: &str = "input_events";
pub const CLOSE_QUERIES_STREAM: &str = "close_queries";
pub const TICK_DURATIONS_STREAM: &str = "tick_durations";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Recording,
    Playback,
}

impl Mode {
    /// Fail with a mode violation unless `self` is `expected`.
    pub fn require(self, expected: Mode, operation: &'static str) -> Result<()> {
        if self == expected {
            Ok(())
        } else {
            Err(HarnessError::ModeViolation {
                operation,
                expected,
                actual: self,
            })
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Recording => write!(f, "recording"),
            Mode::Playback => write!(f, "playback"),
        }
    }
}

/// The three recorded streams of one run. Each stream owns an independent
/// cursor.
#[derive(Debug, Clone)]
pub struct Tape {
    pub input_events: OptionalStream<InputEvent>,
    pub close_queries: MandatoryStream<bool>,
    pub tick_durations: MandatoryStream<Duration>,
}

impl Tape {
    pub fn new() -> Self {
        Self {
            input_events: OptionalStream::new(INPUT_EVENTS_STREAM),
            close_queries: MandatoryStream::new(CLOSE_QUERIES_STREAM),
            tick_durations: MandatoryStream::new(TICK_DURATIONS_STREAM),
        }
    }

    /// Assemble a tape from already recorded sequences.
    pub fn from_parts(
        input_events: Vec<Option<InputEvent>>,
        close_queries: Vec<bool>,
        tick_durations: Vec<Duration>,
    ) -> Self {
        Self {
            input_events: OptionalStream::from_slots(INPUT_EVENTS_STREAM, input_events),
            close_queries: MandatoryStream::from_entries(CLOSE_QUERIES_STREAM, close_queries),
            tick_durations: MandatoryStream::from_entries(TICK_DURATIONS_STREAM, tick_durations),
        }
    }

    fn rewind(&mut self) {
        self.input_events.rewind();
        self.close_queries.rewind();
        self.tick_durations.rewind();
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

/// Explicit run context threaded through the drivers and capture wrappers.
///
/// Starts in [`Mode::Recording`]. The only legal transition is a single
/// Recording -> Playback flip via [`RunContext::begin_playback`]; there is no
/// way back. Every wrapper reads the mode from here, so all of them agree on
/// the discipline for a given tick.
#[derive(Debug)]
pub struct RunContext {
    mode: Mode,
    tape: Tape,
}

impl RunContext {
    pub fn new() -> Self {
        Self {
            mode: Mode::Recording,
            tape: Tape::new(),
        }
    }

    /// A context that is already in playback over a tape recorded by an
    /// earlier run.
    pub fn playback(mut tape: Tape) -> Self {
        tape.rewind();
        Self {
            mode: Mode::Playback,
            tape,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_recording(&self) -> bool {
        self.mode == Mode::Recording
    }

    pub fn is_playback(&self) -> bool {
        self.mode == Mode::Playback
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// Append one poll result to the input stream.
    pub fn record_input(&mut self, event: Option<InputEvent>) -> Result<()> {
        self.tape.input_events.record(self.mode, event)
    }

    /// Consume the next poll result from the input stream.
    pub fn replay_input(&mut self) -> Result<Option<InputEvent>> {
        self.tape.input_events.replay_next(self.mode)
    }

    pub fn record_close(&mut self, should_close: bool) -> Result<()> {
        self.tape.close_queries.record(self.mode, should_close)
    }

    pub fn replay_close(&mut self) -> Result<bool> {
        self.tape.close_queries.replay_next(self.mode)
    }

    pub fn record_duration(&mut self, dt: Duration) -> Result<()> {
        self.tape.tick_durations.record(self.mode, dt)
    }

    pub fn replay_duration(&mut self) -> Result<Duration> {
        self.tape.tick_durations.replay_next(self.mode)
    }

    /// Flip Recording -> Playback and rewind every cursor to the start.
    pub fn begin_playback(&mut self) -> Result<()> {
        self.mode.require(Mode::Recording, "begin_playback")?;
        self.mode = Mode::Playback;
        self.tape.rewind();
        tracing::info!(
            input_slots = self.tape.input_events.len(),
            close_queries = self.tape.close_queries.len(),
            ticks = self.tape.tick_durations.len(),
            "Switched run context to playback"
        );
        Ok(())
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
