//! The terminal as the harness sees it: an input source, a close query and a
//! frame renderer behind one value.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::config::KeyBindings;
use crate::harness::{CloseQuery, FrameRenderer, FrameView, InputSource};
use crate::sim::{Action, InputEvent};

use super::render::draw_frame;

/// Keyboard side of the terminal.
///
/// Polls without blocking and hands out at most one key event per call. A
/// press of a key bound to [`Action::Quit`] latches the close request; the
/// event itself is still returned so it lands in the recording.
#[derive(Debug, Clone)]
pub struct TerminalInput {
    bindings: KeyBindings,
    close_requested: bool,
}

impl TerminalInput {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            close_requested: false,
        }
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    /// Translate one terminal event. Anything that is not a key event yields
    /// nothing.
    pub fn translate(&mut self, event: Event) -> Option<InputEvent> {
        match event {
            Event::Key(key) => Some(self.translate_key(&key)),
            _ => None,
        }
    }

    fn translate_key(&mut self, key: &KeyEvent) -> InputEvent {
        let input = InputEvent::from_key_event(key);
        if input.action.is_held() && self.bindings.action_for(&input) == Some(Action::Quit) {
            tracing::debug!(key = ?input.code, "Quit key pressed");
            self.close_requested = true;
        }
        input
    }
}

impl InputSource for TerminalInput {
    fn poll_input(&mut self) -> io::Result<Option<InputEvent>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        Ok(self.translate(event::read()?))
    }
}

impl CloseQuery for TerminalInput {
    fn should_close(&mut self) -> io::Result<bool> {
        Ok(self.close_requested)
    }
}

/// Ratatui terminal drawing one [`FrameView`] per tick.
pub struct TerminalRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalRenderer {
    pub fn new() -> io::Result<Self> {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        terminal.clear()?;
        Ok(Self { terminal })
    }
}

impl FrameRenderer for TerminalRenderer {
    fn render_frame(&mut self, frame: &FrameView) -> io::Result<()> {
        self.terminal.draw(|f| draw_frame(f, frame))?;
        Ok(())
    }
}

/// Input and renderer bundled for [`crate::core::Prototype`].
pub struct TerminalWindow {
    input: TerminalInput,
    renderer: TerminalRenderer,
}

impl TerminalWindow {
    pub fn new(bindings: KeyBindings) -> io::Result<Self> {
        Ok(Self {
            input: TerminalInput::new(bindings),
            renderer: TerminalRenderer::new()?,
        })
    }
}

impl InputSource for TerminalWindow {
    fn poll_input(&mut self) -> io::Result<Option<InputEvent>> {
        self.input.poll_input()
    }
}

impl CloseQuery for TerminalWindow {
    fn should_close(&mut self) -> io::Result<bool> {
        self.input.should_close()
    }
}

impl FrameRenderer for TerminalWindow {
    fn render_frame(&mut self, frame: &FrameView) -> io::Result<()> {
        self.renderer.render_frame(frame)
    }
}
