//! Errors raised by the record/replay harness.

use thiserror::Error;

use super::mode::Mode;

#[derive(Error, Debug)]
pub enum HarnessError {
    /// A playback cursor was asked to advance past the recorded entries.
    #[error("stream `{stream}` exhausted: cursor {cursor} is past {len} recorded entries")]
    StreamExhausted {
        stream: &'static str,
        cursor: usize,
        len: usize,
    },
    /// An operation that is only legal in one mode was invoked in the other.
    #[error("`{operation}` requires {expected} mode, but the run is in {actual} mode")]
    ModeViolation {
        operation: &'static str,
        expected: Mode,
        actual: Mode,
    },
    /// A live collaborator (terminal, clock) failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    pub fn is_stream_exhausted(&self) -> bool {
        matches!(self, HarnessError::StreamExhausted { .. })
    }

    pub fn is_mode_violation(&self) -> bool {
        matches!(self, HarnessError::ModeViolation { .. })
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
