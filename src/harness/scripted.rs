//! Scripted collaborators for deterministic, headless runs.
//!
//! These stand in for the terminal and the wall clock without touching either,
//! so a full record/replay cycle can run inside a test or the `demo` command.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use retrace::harness::scripted::{ScriptedClock, ScriptedWindow};
//!
//! let window = ScriptedWindow::new()
//!     .with_events(vec![None, None])
//!     .with_close_values(vec![false, true]);
//! let clock = ScriptedClock::new(vec![Duration::from_millis(16); 2]);
//! # let _ = (window, clock);
//! ```

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use super::backend::{CloseQuery, FrameRenderer, FrameView, InputSource, WallClock};
use crate::sim::InputEvent;

/// Window stand-in: replays scripted poll results and close values, and keeps
/// every frame it was asked to render.
#[derive(Debug, Default, Clone)]
pub struct ScriptedWindow {
    events: VecDeque<Option<InputEvent>>,
    close_values: VecDeque<bool>,
    frames: Vec<FrameView>,
    polls: usize,
    close_queries: usize,
}

impl ScriptedWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Results for successive polls. Once the script runs out, polls yield
    /// no event.
    pub fn with_events(mut self, events: Vec<Option<InputEvent>>) -> Self {
        self.events = events.into();
        self
    }

    /// Results for successive close queries. Once the script runs out, the
    /// window reports that it should close.
    pub fn with_close_values(mut self, values: Vec<bool>) -> Self {
        self.close_values = values.into();
        self
    }

    /// Number of times the real poll was invoked.
    pub fn polls(&self) -> usize {
        self.polls
    }

    /// Number of times the real close query was invoked.
    pub fn close_queries(&self) -> usize {
        self.close_queries
    }

    pub fn frames(&self) -> &[FrameView] {
        &self.frames
    }
}

impl InputSource for ScriptedWindow {
    fn poll_input(&mut self) -> io::Result<Option<InputEvent>> {
        self.polls += 1;
        Ok(self.events.pop_front().flatten())
    }
}

impl CloseQuery for ScriptedWindow {
    fn should_close(&mut self) -> io::Result<bool> {
        self.close_queries += 1;
        Ok(self.close_values.pop_front().unwrap_or(true))
    }
}

impl FrameRenderer for ScriptedWindow {
    fn render_frame(&mut self, frame: &FrameView) -> io::Result<()> {
        self.frames.push(*frame);
        Ok(())
    }
}

/// Clock stand-in that hands out scripted durations without sleeping.
#[derive(Debug, Clone)]
pub struct ScriptedClock {
    durations: VecDeque<Duration>,
    fallback: Duration,
}

impl ScriptedClock {
    pub fn new(durations: Vec<Duration>) -> Self {
        Self {
            durations: durations.into(),
            fallback: Duration::ZERO,
        }
    }

    /// Duration reported once the script runs out (zero by default).
    pub fn with_fallback(mut self, fallback: Duration) -> Self {
        self.fallback = fallback;
        self
    }
}

impl WallClock for ScriptedClock {
    fn wait_for_tick(&mut self) -> Duration {
        self.durations.pop_front().unwrap_or(self.fallback)
    }
}
