/// Keyboard state for terminals with and without key-release events.
///
/// Keyboard-enhancement capable terminals (kitty protocol) report `Press`,
/// `Repeat` and `Release`, so a key is dropped the moment it is let go.
/// Classic terminals only send `Press`, with OS key-repeat showing up as more
/// `Press` events; there a key expires after `HOLD_WINDOW` frames of silence.
use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};

use crate::compute::Command;

/// A key counts as held if it was last seen within this many frames.  OS
/// key-repeat runs at 15 Hz or faster, so 8 frames (~133 ms at 60 FPS) is
/// always refreshed before it runs out.
pub const HOLD_WINDOW: u64 = 8;

/// Presses closer together than this are OS key-repeat, not a new keystroke.
/// Repeat at 15 Hz or faster lands within 4 frames; deliberate taps are
/// further apart.
pub const REPEAT_GAP: u64 = 4;

pub const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
pub const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
pub const FIRE_KEY: KeyCode = KeyCode::Char(' ');

#[derive(Debug, Default)]
pub struct KeyTracker {
    last_seen: HashMap<KeyCode, u64>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a `Press` at `frame`.  Returns true if this is a new keystroke
    /// rather than key-repeat of one already in progress.
    pub fn press(&mut self, code: KeyCode, frame: u64) -> bool {
        let fresh = match self.last_seen.get(&code) {
            Some(&last) => frame.saturating_sub(last) > REPEAT_GAP,
            None => true,
        };
        self.last_seen.insert(code, frame);
        fresh
    }

    /// Record an explicit `Repeat`: keeps the key held, never a new keystroke.
    pub fn repeat(&mut self, code: KeyCode, frame: u64) {
        self.last_seen.insert(code, frame);
    }

    pub fn release(&mut self, code: KeyCode) {
        self.last_seen.remove(&code);
    }

    pub fn is_held(&self, code: KeyCode, frame: u64) -> bool {
        self.last_seen
            .get(&code)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    pub fn any_held(&self, codes: &[KeyCode], frame: u64) -> bool {
        codes.iter().any(|&c| self.is_held(c, frame))
    }

    pub fn moving_left(&self, frame: u64) -> bool {
        self.any_held(&LEFT_KEYS, frame)
    }

    pub fn moving_right(&self, frame: u64) -> bool {
        self.any_held(&RIGHT_KEYS, frame)
    }
}

/// Decode a key press into a one-shot command.  Fire is left to the caller,
/// which knows whether the press is a new keystroke; movement comes from the
/// held-key state.
pub fn decode_press(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char('r') | KeyCode::Char('R') => {
            Some(Command::Restart)
        }
        _ => None,
    }
}
