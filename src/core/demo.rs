//! Headless demo: the three-tick scenario run end to end with scripted
//! collaborators.
//!
//! Tick 1 sees no input, tick 2 sees Up pressed, tick 3 sees no input; every
//! tick lasts 0.1s and the window asks to close after the third tick. The
//! entity ends near (0, 0.2, 0) in both runs.

use std::time::Duration;

use crossterm::event::KeyCode;

use crate::config::KeyBindings;
use crate::harness::scripted::{ScriptedClock, ScriptedWindow};
use crate::harness::{Result, RunContext};
use crate::sim::InputEvent;

use super::prototype::Prototype;
use super::runner::{record_then_replay, RunReport};

pub const DEMO_TICK: Duration = Duration::from_millis(100);

/// Scripted window and clock for the demo scenario.
pub fn demo_collaborators() -> (ScriptedWindow, ScriptedClock) {
    let window = ScriptedWindow::new()
        .with_events(vec![None, Some(InputEvent::press(KeyCode::Up)), None])
        .with_close_values(vec![false, false, true]);
    let clock = ScriptedClock::new(vec![DEMO_TICK; 3]);
    (window, clock)
}

/// Run the demo scenario through a full record/replay cycle.
pub fn run_demo(bindings: KeyBindings) -> Result<RunReport> {
    let (window, clock) = demo_collaborators();
    let mut prototype = Prototype::new(window, bindings);
    let mut ctx = RunContext::new();
    record_then_replay(&mut ctx, &mut prototype, clock)
}
