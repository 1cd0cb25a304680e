//! Terminal shell around the harness: raw-mode handling, keyboard input,
//! ratatui drawing and the interactive session.

pub mod app;
pub mod render;
pub mod terminal_guard;
pub mod window;

pub use app::App;
pub use render::draw_frame;
pub use terminal_guard::{install_panic_hook, TerminalGuard};
pub use window::{TerminalInput, TerminalRenderer, TerminalWindow};
