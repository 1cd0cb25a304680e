//! Scripted scenarios for record/replay tests

use std::time::Duration;

use crossterm::event::KeyCode;
use retrace::config::KeyBindings;
use retrace::core::{record_then_replay, Prototype, RunReport};
use retrace::harness::scripted::{ScriptedClock, ScriptedWindow};
use retrace::harness::RunContext;
use retrace::InputEvent;

pub fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

pub fn press(code: KeyCode) -> Option<InputEvent> {
    Some(InputEvent::press(code))
}

pub fn release(code: KeyCode) -> Option<InputEvent> {
    Some(InputEvent::release(code))
}

/// A scripted session: what each poll returns, what each close query
/// returns, and how long each live tick lasts.
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    pub events: Vec<Option<InputEvent>>,
    pub closes: Vec<bool>,
    pub durations: Vec<Duration>,
    pub max_ticks: Option<u64>,
}

impl Scenario {
    /// Scenario that runs exactly `durations.len()` ticks, closing after the
    /// last one.
    pub fn ticks(events: Vec<Option<InputEvent>>, durations: Vec<Duration>) -> Self {
        let mut closes = vec![false; durations.len().saturating_sub(1)];
        closes.push(true);
        Self {
            events,
            closes,
            durations,
            max_ticks: None,
        }
    }

    pub fn prototype(&self) -> Prototype<ScriptedWindow> {
        let window = ScriptedWindow::new()
            .with_events(self.events.clone())
            .with_close_values(self.closes.clone());
        Prototype::new(window, KeyBindings::default()).with_max_ticks(self.max_ticks)
    }

    pub fn clock(&self) -> ScriptedClock {
        ScriptedClock::new(self.durations.clone())
    }

    /// Run the full record/replay cycle, returning the report, the context
    /// and the prototype (whose window has seen every real call).
    pub fn run(&self) -> (RunReport, RunContext, Prototype<ScriptedWindow>) {
        let mut ctx = RunContext::new();
        let mut prototype = self.prototype();
        let report = record_then_replay(&mut ctx, &mut prototype, self.clock())
            .expect("record/replay cycle failed");
        (report, ctx, prototype)
    }
}

/// The three-tick scenario: nothing, Up pressed, nothing; 0.1s per tick.
pub fn up_press_scenario() -> Scenario {
    Scenario::ticks(vec![None, press(KeyCode::Up), None], vec![ms(100); 3])
}
