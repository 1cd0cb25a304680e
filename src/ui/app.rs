use crate::config::Config;
use crate::core::{record_then_replay, Prototype, RunReport};
use crate::harness::{FixedRateClock, RunContext};

use super::terminal_guard::TerminalGuard;
use super::window::TerminalWindow;

/// Interactive record/replay session on the real terminal.
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Record a live session until the quit key or the tick limit, then replay
    /// it on screen. The terminal is restored before the report is returned.
    pub fn run(&self) -> anyhow::Result<RunReport> {
        let mut guard = TerminalGuard::enter()?;
        tracing::info!(
            tick_rate_hz = self.config.tick_rate_hz,
            max_ticks = ?self.config.max_ticks,
            key_releases = guard.reports_key_releases(),
            "Starting recording"
        );

        let window = TerminalWindow::new(self.config.keybindings.clone())?;
        let mut prototype = Prototype::new(window, self.config.keybindings.clone())
            .with_max_ticks(self.config.max_ticks);
        let clock = FixedRateClock::from_hz(self.config.tick_rate_hz);

        let mut ctx = RunContext::new();
        let result = record_then_replay(&mut ctx, &mut prototype, clock);

        drop(prototype);
        guard.cleanup()?;

        Ok(result?)
    }
}
