use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press or release did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Press,
    Release,
    Repeat,
}

impl KeyAction {
    /// Press and Repeat both mean the key is held.
    pub fn is_held(self) -> bool {
        matches!(self, KeyAction::Press | KeyAction::Repeat)
    }
}

impl From<KeyEventKind> for KeyAction {
    fn from(kind: KeyEventKind) -> Self {
        match kind {
            KeyEventKind::Press => KeyAction::Press,
            KeyEventKind::Release => KeyAction::Release,
            KeyEventKind::Repeat => KeyAction::Repeat,
        }
    }
}

/// A single structured keyboard event. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InputEvent {
    pub code: KeyCode,
    /// Platform scancode; 0 when the backend does not report one.
    pub scancode: i32,
    pub action: KeyAction,
    pub modifiers: KeyModifiers,
}

impl InputEvent {
    pub fn new(code: KeyCode, action: KeyAction) -> Self {
        Self {
            code,
            scancode: 0,
            action,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn press(code: KeyCode) -> Self {
        Self::new(code, KeyAction::Press)
    }

    pub fn release(code: KeyCode) -> Self {
        Self::new(code, KeyAction::Release)
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Convert a crossterm key event. Terminals do not expose scancodes.
    pub fn from_key_event(event: &KeyEvent) -> Self {
        Self {
            code: event.code,
            scancode: 0,
            action: event.kind.into(),
            modifiers: event.modifiers,
        }
    }
}

/// Logical actions a key can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    /// Release all movement keys at once.
    Halt,
    Quit,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::MoveUp => "move_up",
            Action::MoveDown => "move_down",
            Action::MoveLeft => "move_left",
            Action::MoveRight => "move_right",
            Action::Halt => "halt",
            Action::Quit => "quit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "move_up" | "up" => Some(Action::MoveUp),
            "move_down" | "down" => Some(Action::MoveDown),
            "move_left" | "left" => Some(Action::MoveLeft),
            "move_right" | "right" => Some(Action::MoveRight),
            "halt" | "stop" => Some(Action::Halt),
            "quit" | "q" => Some(Action::Quit),
            _ => None,
        }
    }
}
