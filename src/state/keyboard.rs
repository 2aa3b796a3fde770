//! Keyboard Module - key events and the trainer's key bindings.
//!
//! | key              | command                    |
//! |------------------|----------------------------|
//! | `a`, `1`         | `lt++, i++`                |
//! | `i`, `2`         | `i++`                      |
//! | `g`, `3`         | `gt--`                     |
//! | `r`              | reset                      |
//! | `←` / `→`        | move the box cursor        |
//! | `Space`, `Enter` | click the box under cursor |
//! | `q`, `Esc`, `^C` | quit                       |

use crate::model::Action;

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    /// Create empty modifiers
    pub fn none() -> Self {
        Self::default()
    }

    /// Create modifiers with ctrl
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", "ArrowLeft")
    pub key: String,
    /// Modifier keys state
    pub modifiers: Modifiers,
    /// Press/repeat/release state
    pub state: KeyState,
}

impl KeyboardEvent {
    /// Create a simple key press event
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    /// Create a key press with modifiers
    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Check if this is a press event
    pub fn is_press(&self) -> bool {
        self.state == KeyState::Press
    }
}

// =============================================================================
// BINDINGS
// =============================================================================

/// What a key asks the app to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Apply a session action directly.
    Apply(Action),
    /// Move the box cursor one box left.
    CursorPrev,
    /// Move the box cursor one box right.
    CursorNext,
    /// Click the box under the cursor.
    ClickCursor,
    /// Leave the trainer.
    Quit,
}

/// Resolve a key event to a command. Releases are ignored; repeats only
/// move the cursor.
pub fn command_for_key(event: &KeyboardEvent) -> Option<Command> {
    if event.state == KeyState::Release {
        return None;
    }

    if event.modifiers.ctrl {
        return match event.key.as_str() {
            "c" | "C" => Some(Command::Quit),
            _ => None,
        };
    }

    let command = match event.key.as_str() {
        "ArrowLeft" => Command::CursorPrev,
        "ArrowRight" => Command::CursorNext,
        _ if event.state == KeyState::Repeat => return None,
        "a" | "A" | "1" => Command::Apply(Action::AdvanceLtAndI),
        "i" | "I" | "2" => Command::Apply(Action::AdvanceI),
        "g" | "G" | "3" => Command::Apply(Action::DecrementGt),
        "r" | "R" => Command::Apply(Action::Reset),
        " " | "Enter" => Command::ClickCursor,
        "q" | "Q" | "Escape" => Command::Quit,
        _ => return None,
    };
    Some(command)
}
