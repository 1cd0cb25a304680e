//! Record-once, replay-exactly harness.
//!
//! This module provides:
//! - [`MandatoryStream`] / [`OptionalStream`] - ordered recorded streams
//! - [`RunContext`] - the explicit Recording/Playback mode plus the run's [`Tape`]
//! - [`capture_input`] / [`capture_close`] - capture wrappers around the window
//! - [`LiveDriver`] / [`PlaybackDriver`] - timed-tick drivers
//!
//! A recording run drives the capture wrappers in "append" discipline; a
//! playback run drives the same tick callback in "consume" discipline and
//! never touches the real collaborators.

pub mod backend;
pub mod capture;
pub mod driver;
pub mod error;
pub mod mode;
pub mod scripted;
pub mod stream;

pub use backend::{CloseQuery, FrameRenderer, FrameView, InputSource, WallClock};
pub use capture::{capture_close, capture_input};
pub use driver::{FixedRateClock, LiveDriver, PlaybackDriver, StopCondition, TickHandler};
pub use error::{HarnessError, Result};
pub use mode::{Mode, RunContext, Tape};
pub use stream::{MandatoryStream, OptionalStream};
