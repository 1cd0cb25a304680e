//! Capture wrappers: each gives one external capability a live and a replayed
//! implementation behind the same call.
//!
//! While recording, the real capability is invoked and its outcome appended to
//! the matching stream. While playing back, the outcome is read from the stream
//! and the real capability is never touched.

use super::backend::{CloseQuery, InputSource};
use super::error::Result;
use super::mode::{Mode, RunContext};
use crate::sim::InputEvent;

/// Poll for input through the run context.
///
/// Every invocation occupies exactly one slot in the input stream, including
/// polls that produced no event; otherwise every later tick would read the
/// wrong slot. The event is returned to the caller, which feeds it to the same
/// listener logic in both modes.
pub fn capture_input<S>(ctx: &mut RunContext, source: &mut S) -> Result<Option<InputEvent>>
where
    S: InputSource + ?Sized,
{
    match ctx.mode() {
        Mode::Recording => {
            let event = source.poll_input()?;
            ctx.record_input(event)?;
            if let Some(ev) = &event {
                tracing::debug!(
                    slot = ctx.tape().input_events.len() - 1,
                    code = ?ev.code,
                    action = ?ev.action,
                    "Recorded input event"
                );
            }
            Ok(event)
        }
        Mode::Playback => {
            let slot = ctx.tape().input_events.cursor();
            let event = ctx.replay_input()?;
            if let Some(ev) = &event {
                tracing::debug!(slot, code = ?ev.code, action = ?ev.action, "Replayed input event");
            }
            Ok(event)
        }
    }
}

/// Query the close flag through the run context. Exhaustion during playback is
/// an error and is never defaulted to either boolean.
pub fn capture_close<Q>(ctx: &mut RunContext, query: &mut Q) -> Result<bool>
where
    Q: CloseQuery + ?Sized,
{
    match ctx.mode() {
        Mode::Recording => {
            let should_close = query.should_close()?;
            ctx.record_close(should_close)?;
            Ok(should_close)
        }
        Mode::Playback => ctx.replay_close(),
    }
}
