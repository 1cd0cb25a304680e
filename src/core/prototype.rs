use std::time::Duration;

use glam::Vec3;

use crate::config::KeyBindings;
use crate::harness::{
    capture_close, capture_input, CloseQuery, FrameRenderer, FrameView, InputSource, Result,
    RunContext, StopCondition, TickHandler,
};
use crate::sim::Simulation;

/// The interactive prototype: one entity steered by the keyboard inside a
/// window.
///
/// Its tick polls input through the capture wrapper, folds the event into the
/// key state, advances the simulation and renders a frame. The same tick runs
/// unchanged in both recording and playback; only the run context differs.
pub struct Prototype<W> {
    window: W,
    bindings: KeyBindings,
    max_ticks: Option<u64>,
    sim: Simulation,
    tick: u64,
    trace: Vec<Vec3>,
}

impl<W> Prototype<W>
where
    W: InputSource + CloseQuery + FrameRenderer,
{
    pub fn new(window: W, bindings: KeyBindings) -> Self {
        Self {
            window,
            bindings,
            max_ticks: None,
            sim: Simulation::new(),
            tick: 0,
            trace: Vec::new(),
        }
    }

    /// Stop the live run after `max_ticks` ticks even if the window never
    /// asks to close.
    pub fn with_max_ticks(mut self, max_ticks: Option<u64>) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn position(&self) -> Vec3 {
        self.sim.position
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Positions observed at the end of each tick so far.
    pub fn trace(&self) -> &[Vec3] {
        &self.trace
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    /// Replace all per-run state with fresh values and hand back the trace of
    /// the run that just ended.
    pub fn reset(&mut self) -> Vec<Vec3> {
        self.sim = Simulation::new();
        self.tick = 0;
        std::mem::take(&mut self.trace)
    }
}

impl<W> TickHandler for Prototype<W>
where
    W: InputSource + CloseQuery + FrameRenderer,
{
    fn tick(&mut self, ctx: &mut RunContext, dt: Duration) -> Result<()> {
        if let Some(event) = capture_input(ctx, &mut self.window)? {
            self.sim.handle_event(&event, &self.bindings);
        }

        let before = self.sim.position;
        let position = self.sim.step(dt);
        let delta = position - before;
        tracing::trace!(
            tick = self.tick,
            mode = %ctx.mode(),
            dt_us = dt.as_micros() as u64,
            keys = ?self.sim.keys,
            before_x = before.x,
            before_y = before.y,
            before_z = before.z,
            dx = delta.x,
            dy = delta.y,
            dz = delta.z,
            x = position.x,
            y = position.y,
            z = position.z,
            "Tick"
        );
        self.trace.push(position);

        self.window.render_frame(&FrameView {
            mode: ctx.mode(),
            tick: self.tick,
            position,
            keys: self.sim.keys,
        })?;
        self.tick += 1;
        Ok(())
    }
}

impl<W> StopCondition for Prototype<W>
where
    W: InputSource + CloseQuery + FrameRenderer,
{
    fn should_stop(&mut self, ctx: &mut RunContext) -> Result<bool> {
        // Query first, unconditionally, so every tick records one close value.
        let close_requested = capture_close(ctx, &mut self.window)?;
        let limit_reached = self.max_ticks.is_some_and(|max| self.tick >= max);
        Ok(close_requested || limit_reached)
    }
}
