//! Record-then-replay orchestration.

use std::fmt;

use glam::Vec3;
use serde::Serialize;

use crate::harness::{
    CloseQuery, FrameRenderer, InputSource, LiveDriver, MandatoryStream, OptionalStream,
    PlaybackDriver, Result, RunContext, WallClock,
};

use super::prototype::Prototype;

/// Per-stream bookkeeping after a full cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamSummary {
    pub name: &'static str,
    /// Entries appended while recording.
    pub recorded: usize,
    /// Entries that carried a value (differs from `recorded` only for
    /// optional streams).
    pub populated: usize,
    /// Cursor position when playback finished.
    pub replayed: usize,
}

impl StreamSummary {
    fn mandatory<T: Clone>(stream: &MandatoryStream<T>) -> Self {
        Self {
            name: stream.name(),
            recorded: stream.len(),
            populated: stream.len(),
            replayed: stream.cursor(),
        }
    }

    fn optional<T: Clone>(stream: &OptionalStream<T>) -> Self {
        Self {
            name: stream.name(),
            recorded: stream.len(),
            populated: stream.event_count(),
            replayed: stream.cursor(),
        }
    }
}

/// Outcome of one recording run followed by one playback run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub ticks_recorded: u64,
    pub ticks_replayed: u64,
    pub streams: Vec<StreamSummary>,
    pub recorded_trace: Vec<[f32; 3]>,
    pub replayed_trace: Vec<[f32; 3]>,
    pub final_recorded: [f32; 3],
    pub final_replayed: [f32; 3],
    /// Index of the first tick whose positions differ (or where one trace
    /// ends early).
    pub first_divergence: Option<usize>,
    /// Both traces are bit-for-bit equal.
    pub identical: bool,
}

impl RunReport {
    fn new(
        ticks_recorded: u64,
        ticks_replayed: u64,
        ctx: &RunContext,
        recorded: &[Vec3],
        replayed: &[Vec3],
    ) -> Self {
        let tape = ctx.tape();
        let first_divergence = first_divergence(recorded, replayed);
        Self {
            ticks_recorded,
            ticks_replayed,
            streams: vec![
                StreamSummary::optional(&tape.input_events),
                StreamSummary::mandatory(&tape.close_queries),
                StreamSummary::mandatory(&tape.tick_durations),
            ],
            recorded_trace: recorded.iter().map(|p| p.to_array()).collect(),
            replayed_trace: replayed.iter().map(|p| p.to_array()).collect(),
            final_recorded: recorded.last().copied().unwrap_or(Vec3::ZERO).to_array(),
            final_replayed: replayed.last().copied().unwrap_or(Vec3::ZERO).to_array(),
            first_divergence,
            identical: first_divergence.is_none(),
        }
    }

    pub fn stream(&self, name: &str) -> Option<&StreamSummary> {
        self.streams.iter().find(|s| s.name == name)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ticks recorded: {}", self.ticks_recorded)?;
        writeln!(f, "ticks replayed: {}", self.ticks_replayed)?;
        for s in &self.streams {
            writeln!(
                f,
                "stream {:<15} recorded {:>5} (populated {:>5}), replayed {:>5}",
                s.name, s.recorded, s.populated, s.replayed
            )?;
        }
        let [rx, ry, rz] = self.final_recorded;
        let [px, py, pz] = self.final_replayed;
        writeln!(f, "final position (recorded): ({rx}, {ry}, {rz})")?;
        writeln!(f, "final position (replayed): ({px}, {py}, {pz})")?;
        match self.first_divergence {
            None => write!(f, "replay identical: yes"),
            Some(tick) => write!(f, "replay identical: no (first divergence at tick {tick})"),
        }
    }
}

/// Compare traces bit for bit.
fn first_divergence(recorded: &[Vec3], replayed: &[Vec3]) -> Option<usize> {
    let same = |a: &Vec3, b: &Vec3| {
        a.to_array()
            .iter()
            .zip(b.to_array().iter())
            .all(|(x, y)| x.to_bits() == y.to_bits())
    };
    recorded
        .iter()
        .zip(replayed)
        .position(|(a, b)| !same(a, b))
        .or_else(|| (recorded.len() != replayed.len()).then(|| recorded.len().min(replayed.len())))
}

/// Run `prototype` live until it stops, reset it, flip `ctx` to playback and
/// run it again from the recording.
///
/// `ctx` must be a fresh recording context. Any stream exhaustion or mode
/// violation aborts the cycle and is returned as is.
pub fn record_then_replay<W, C>(
    ctx: &mut RunContext,
    prototype: &mut Prototype<W>,
    clock: C,
) -> Result<RunReport>
where
    W: InputSource + CloseQuery + FrameRenderer,
    C: WallClock,
{
    let ticks_recorded = LiveDriver::new(clock).run(ctx, prototype)?;
    let recorded = prototype.reset();

    ctx.begin_playback()?;
    let ticks_replayed = PlaybackDriver::new().run(ctx, prototype)?;
    let replayed = prototype.reset();

    let report = RunReport::new(ticks_recorded, ticks_replayed, ctx, &recorded, &replayed);
    if report.identical {
        tracing::info!(ticks = ticks_replayed, "Replay matched recording");
    } else {
        tracing::warn!(
            first_divergence = ?report.first_divergence,
            "Replay diverged from recording"
        );
    }
    Ok(report)
}
