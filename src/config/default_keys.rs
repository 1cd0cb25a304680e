//! Default keybindings
//!
//! Movement follows the usual game layout: WASD and the arrow keys.

use crossterm::event::{KeyCode, KeyModifiers};

use super::keys::{KeyBindings, KeyCombo};
use crate::sim::Action;

/// Helper to insert a keybinding
fn bind(bindings: &mut KeyBindings, key: &str, action: Action) {
    if let Ok(combo) = key.parse::<KeyCombo>() {
        bindings.bind(combo, action);
    }
}

/// Create the default keybindings
pub fn default_keybindings() -> KeyBindings {
    let mut bindings = KeyBindings::empty();

    bind(&mut bindings, "w", Action::MoveUp);
    bind(&mut bindings, "<Up>", Action::MoveUp);
    bind(&mut bindings, "s", Action::MoveDown);
    bind(&mut bindings, "<Down>", Action::MoveDown);
    bind(&mut bindings, "a", Action::MoveLeft);
    bind(&mut bindings, "<Left>", Action::MoveLeft);
    bind(&mut bindings, "d", Action::MoveRight);
    bind(&mut bindings, "<Right>", Action::MoveRight);

    bind(&mut bindings, "<Space>", Action::Halt);

    bind(&mut bindings, "q", Action::Quit);
    bind(&mut bindings, "<Esc>", Action::Quit);
    // Ctrl+C is not delivered as a signal in raw mode
    bindings.bind(
        KeyCombo::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        Action::Quit,
    );

    bindings
}

impl Default for KeyBindings {
    fn default() -> Self {
        default_keybindings()
    }
}
