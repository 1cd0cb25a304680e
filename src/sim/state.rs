use std::time::Duration;

use glam::Vec3;

use crate::config::KeyBindings;

use super::input::{Action, InputEvent};

/// Held state of the four movement keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl KeyState {
    /// Unit-per-second movement implied by the held keys. Opposite keys cancel
    /// and diagonals simply sum (no normalization).
    pub fn movement(&self) -> Vec3 {
        let mut movement = Vec3::ZERO;
        if self.up {
            movement.y += 1.0;
        }
        if self.down {
            movement.y -= 1.0;
        }
        if self.left {
            movement.x -= 1.0;
        }
        if self.right {
            movement.x += 1.0;
        }
        movement
    }

    pub fn any_held(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Simulation state for one run. Replaced wholesale (never patched) when a run
/// ends and the next begins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Simulation {
    pub position: Vec3,
    pub keys: KeyState,
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key listener: fold one input event into the key state. Returns the
    /// bound action, if any, so the caller can react to non-movement actions.
    pub fn handle_event(&mut self, event: &InputEvent, bindings: &KeyBindings) -> Option<Action> {
        let action = bindings.action_for(event)?;
        let held = event.action.is_held();
        match action {
            Action::MoveUp => self.keys.up = held,
            Action::MoveDown => self.keys.down = held,
            Action::MoveLeft => self.keys.left = held,
            Action::MoveRight => self.keys.right = held,
            Action::Halt => {
                if held {
                    self.keys = KeyState::default();
                }
            }
            Action::Quit => {}
        }
        Some(action)
    }

    /// Advance the position by `movement * dt` and return the new position.
    pub fn step(&mut self, dt: Duration) -> Vec3 {
        let delta = self.keys.movement() * dt.as_secs_f64() as f32;
        self.position += delta;
        self.position
    }
}
