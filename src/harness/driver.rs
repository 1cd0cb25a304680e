//! Timed-tick drivers.
//!
//! [`LiveDriver`] runs at real elapsed time and records every observed tick
//! duration. [`PlaybackDriver`] feeds the recorded durations back verbatim.
//! The playback driver has no stop predicate in its signature: how long it
//! runs is decided entirely by how many durations were recorded.

use std::thread;
use std::time::{Duration, Instant};

use super::backend::WallClock;
use super::error::Result;
use super::mode::{Mode, RunContext};

/// The per-tick update step.
pub trait TickHandler {
    fn tick(&mut self, ctx: &mut RunContext, dt: Duration) -> Result<()>;
}

/// Termination check evaluated by the live driver after every tick.
pub trait StopCondition {
    fn should_stop(&mut self, ctx: &mut RunContext) -> Result<bool>;
}

/// Drives ticks at real time while recording.
#[derive(Debug)]
pub struct LiveDriver<C> {
    clock: C,
}

impl<C: WallClock> LiveDriver<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Tick until `handler.should_stop` reports true. Each iteration waits for
    /// the clock, ticks with the measured duration, records that duration and
    /// then evaluates the stop condition. Returns the number of ticks run.
    pub fn run<H>(&mut self, ctx: &mut RunContext, handler: &mut H) -> Result<u64>
    where
        H: TickHandler + StopCondition,
    {
        ctx.mode().require(Mode::Recording, "LiveDriver::run")?;
        tracing::info!("Live run started");

        let mut ticks = 0u64;
        loop {
            let dt = self.clock.wait_for_tick();
            handler.tick(ctx, dt)?;

            ctx.record_duration(dt)?;
            ticks += 1;

            if handler.should_stop(ctx)? {
                break;
            }
        }

        tracing::info!(ticks, "Live run finished");
        Ok(ticks)
    }
}

/// Drives ticks from the recorded duration stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaybackDriver;

impl PlaybackDriver {
    pub fn new() -> Self {
        Self
    }

    /// Tick once per recorded duration, in order, and stop when the stream is
    /// exhausted. Real time and any termination condition are ignored.
    pub fn run<H>(&self, ctx: &mut RunContext, handler: &mut H) -> Result<u64>
    where
        H: TickHandler + ?Sized,
    {
        ctx.mode().require(Mode::Playback, "PlaybackDriver::run")?;
        tracing::info!(
            recorded = ctx.tape().tick_durations.len(),
            "Playback run started"
        );

        let mut ticks = 0u64;
        while ctx.tape().tick_durations.remaining() > 0 {
            let dt = ctx.replay_duration()?;
            handler.tick(ctx, dt)?;
            ticks += 1;
        }

        tracing::info!(ticks, "Playback run finished");
        Ok(ticks)
    }
}

/// Wall clock that paces ticks at a fixed target rate.
///
/// The first tick waits one full period after the first call, so its duration
/// is at least one period; later ticks report the real time since the
/// previous tick, which is never less than the period.
#[derive(Debug)]
pub struct FixedRateClock {
    period: Duration,
    last: Option<Instant>,
}

impl FixedRateClock {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// Clock running at `hz` ticks per second (at least 1).
    pub fn from_hz(hz: u32) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / f64::from(hz.max(1))))
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl WallClock for FixedRateClock {
    fn wait_for_tick(&mut self) -> Duration {
        let start = *self.last.get_or_insert_with(Instant::now);
        let deadline = start + self.period;
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
        let tick_at = Instant::now();
        self.last = Some(tick_at);
        tick_at - start
    }
}
