//! Capabilities the harness consumes from the outside world.
//!
//! The real implementations live in [`crate::ui`] (terminal) and
//! [`super::driver::FixedRateClock`]; deterministic stand-ins live in
//! [`super::scripted`].

use std::io;
use std::time::Duration;

use glam::Vec3;

use crate::sim::{InputEvent, KeyState};

use super::mode::Mode;

/// Input polling. One call yields at most one structured event.
pub trait InputSource {
    fn poll_input(&mut self) -> io::Result<Option<InputEvent>>;
}

/// The "should the window close" query. Always yields a value.
pub trait CloseQuery {
    fn should_close(&mut self) -> io::Result<bool>;
}

/// Draws one frame per tick. Nothing it returns feeds back into the run.
pub trait FrameRenderer {
    fn render_frame(&mut self, frame: &FrameView) -> io::Result<()>;
}

/// Real-time pacing for the live driver: block until the next tick is due and
/// report how much wall time elapsed since the previous one.
pub trait WallClock {
    fn wait_for_tick(&mut self) -> Duration;
}

/// Snapshot handed to the renderer each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub mode: Mode,
    pub tick: u64,
    pub position: Vec3,
    pub keys: KeyState,
}
