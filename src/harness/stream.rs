//! Ordered recorded streams.
//!
//! A stream is append-only while the run is recording and read through a
//! forward-only cursor while it is playing back. There is no random access and
//! no rewinding from the outside: the cursor moves one step per consuming call,
//! mirroring the order of the call sites that produced the entries.
//!
//! Appending and consuming are crate-internal: the mode they check always
//! comes from the owning [`super::RunContext`].

use super::error::{HarnessError, Result};
use super::mode::Mode;

/// A stream that receives exactly one value per invocation (close queries,
/// tick durations).
#[derive(Debug, Clone)]
pub struct MandatoryStream<T> {
    name: &'static str,
    entries: Vec<T>,
    cursor: usize,
}

impl<T: Clone> MandatoryStream<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Vec::new(),
            cursor: 0,
        }
    }

    /// Build a stream from entries recorded elsewhere, with the cursor at 0.
    pub fn from_entries(name: &'static str, entries: Vec<T>) -> Self {
        Self {
            name,
            entries,
            cursor: 0,
        }
    }

    /// Append a value. Only legal while recording; callers outside the
    /// harness go through [`super::RunContext`], which supplies its own mode.
    pub(crate) fn record(&mut self, mode: Mode, value: T) -> Result<()> {
        mode.require(Mode::Recording, "record")?;
        self.entries.push(value);
        tracing::trace!(stream = self.name, len = self.entries.len(), "recorded entry");
        Ok(())
    }

    /// Return the entry under the cursor and advance by one. Only legal while
    /// playing back.
    pub(crate) fn replay_next(&mut self, mode: Mode) -> Result<T> {
        mode.require(Mode::Playback, "replay_next")?;
        let value = self
            .entries
            .get(self.cursor)
            .cloned()
            .ok_or(HarnessError::StreamExhausted {
                stream: self.name,
                cursor: self.cursor,
                len: self.entries.len(),
            })?;
        self.cursor += 1;
        Ok(value)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Entries not yet consumed by playback.
    pub fn remaining(&self) -> usize {
        self.entries.len().saturating_sub(self.cursor)
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub(crate) fn rewind(&mut self) {
        self.cursor = 0;
    }
}

/// A stream that receives zero or one value per invocation. Each invocation
/// occupies one slot, so an invocation that produced nothing is stored as
/// `None` and still consumes a cursor step during playback.
#[derive(Debug, Clone)]
pub struct OptionalStream<T> {
    slots: MandatoryStream<Option<T>>,
}

impl<T: Clone> OptionalStream<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            slots: MandatoryStream::new(name),
        }
    }

    pub fn from_slots(name: &'static str, slots: Vec<Option<T>>) -> Self {
        Self {
            slots: MandatoryStream::from_entries(name, slots),
        }
    }

    pub(crate) fn record(&mut self, mode: Mode, value: Option<T>) -> Result<()> {
        self.slots.record(mode, value)
    }

    pub(crate) fn replay_next(&mut self, mode: Mode) -> Result<Option<T>> {
        self.slots.replay_next(mode)
    }

    pub fn name(&self) -> &'static str {
        self.slots.name()
    }

    /// Number of slots, i.e. number of recorded invocations.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots that actually carry a value.
    pub fn event_count(&self) -> usize {
        self.slots.entries().iter().filter(|s| s.is_some()).count()
    }

    pub fn cursor(&self) -> usize {
        self.slots.cursor()
    }

    pub fn remaining(&self) -> usize {
        self.slots.remaining()
    }

    pub fn slots(&self) -> &[Option<T>] {
        self.slots.entries()
    }

    pub(crate) fn rewind(&mut self) {
        self.slots.rewind();
    }
}
