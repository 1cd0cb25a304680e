//! Terminal state guard for guaranteed cleanup.
//!
//! The guard owns raw mode, the alternate screen and (where the terminal
//! supports it) the keyboard enhancement flags that make key releases
//! observable. Everything is restored on drop, on early `?` returns and, via
//! [`install_panic_hook`], on panic.

use crossterm::{
    cursor::{Hide, Show},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, Write};

/// Guard that restores terminal state when dropped.
pub struct TerminalGuard {
    keyboard_enhancement_enabled: bool,
    active: bool,
}

impl TerminalGuard {
    /// Create a guard for a terminal that has already been set up.
    ///
    /// Prefer [`TerminalGuard::enter`], which performs the setup itself.
    pub fn new(keyboard_enhancement_enabled: bool) -> Self {
        Self {
            keyboard_enhancement_enabled,
            active: true,
        }
    }

    /// Enter raw mode and the alternate screen, and ask the terminal to report
    /// key release events when it can.
    pub fn enter() -> anyhow::Result<Self> {
        enable_raw_mode()?;
        // From here on any early return restores the terminal through Drop
        let mut guard = Self::new(false);
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;

        match supports_keyboard_enhancement() {
            Ok(true) => {
                execute!(
                    stdout,
                    PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
                )?;
                guard.keyboard_enhancement_enabled = true;
            }
            Ok(false) => {
                tracing::warn!("Terminal does not report key releases; use the halt key to stop");
            }
            Err(e) => {
                tracing::debug!(error = %e, "Keyboard enhancement query failed");
            }
        }

        Ok(guard)
    }

    /// Whether key release events are expected from this terminal.
    pub fn reports_key_releases(&self) -> bool {
        self.keyboard_enhancement_enabled
    }

    /// Perform manual cleanup and prevent Drop from running cleanup again.
    pub fn cleanup(&mut self) -> anyhow::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        self.do_cleanup()
    }

    fn do_cleanup(&self) -> anyhow::Result<()> {
        let mut stdout = io::stdout();
        if self.keyboard_enhancement_enabled {
            // Pop before leaving raw mode so the terminal sees it first
            if let Err(e) = execute!(stdout, PopKeyboardEnhancementFlags) {
                tracing::debug!(
                    error = %e,
                    "Failed to pop keyboard enhancement flags during cleanup"
                );
            }
            if let Err(e) = stdout.flush() {
                tracing::debug!(error = %e, "Failed to flush stdout during cleanup");
            }
        }
        disable_raw_mode()?;
        execute!(stdout, LeaveAlternateScreen, Show)?;
        stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = self.do_cleanup() {
                tracing::debug!(error = %e, "Terminal cleanup failed in Drop");
            }
        }
    }
}

/// Install a panic hook that restores terminal state before printing the panic message.
///
/// Call this early in main(), before any terminal setup.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, PopKeyboardEnhancementFlags) {
            tracing::debug!(error = %e, "Failed to pop keyboard enhancement flags in panic hook");
        }
        if let Err(e) = disable_raw_mode() {
            tracing::debug!(error = %e, "Failed to disable raw mode in panic hook");
        }
        if let Err(e) = execute!(stdout, LeaveAlternateScreen, Show) {
            tracing::debug!(error = %e, "Failed to restore terminal screen in panic hook");
        }
        if let Err(e) = stdout.flush() {
            tracing::debug!(error = %e, "Failed to flush stdout after panic cleanup");
        }

        original_hook(panic_info);
    }));
}
