/// Keyboard handling: turns the terminal's stream of key events into a
/// per-frame snapshot of held movement keys plus discrete one-shot events.
///
/// Terminals differ in what they report:
/// * **Keyboard-enhancement capable** (kitty protocol): proper `Press` /
///   `Repeat` / `Release` events, so keys are dropped on release.
/// * **Classic terminals**: only `Press` events, with OS key-repeat showing
///   up as repeated presses.  A key therefore counts as held while its last
///   press arrived within `HOLD_WINDOW` frames.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Frames a key stays "held" after its last press/repeat.  At 50 FPS this is
/// 120 ms, shorter than the slowest common OS repeat interval once repeating
/// has started.
pub const HOLD_WINDOW: u64 = 6;

/// Discrete actions taken the moment their key goes down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    Fire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKey {
    Up,
    Down,
    Left,
    Right,
}

impl MoveKey {
    pub fn from_code(code: &KeyCode) -> Option<MoveKey> {
        match code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(MoveKey::Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(MoveKey::Down),
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(MoveKey::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(MoveKey::Right),
            _ => None,
        }
    }
}

/// Which movement keys are down this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Controls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Controls {
    /// Net displacement for the held keys, `step` per key.  Opposite keys
    /// cancel out.
    pub fn displacement(&self, step: i32) -> (i32, i32) {
        let mut dx = 0;
        let mut dy = 0;
        if self.up {
            dy -= step;
        }
        if self.down {
            dy += step;
        }
        if self.left {
            dx -= step;
        }
        if self.right {
            dx += step;
        }
        (dx, dy)
    }
}

/// Map a key press to its one-shot action, if it has one.
pub fn classify_key(code: &KeyCode, modifiers: KeyModifiers) -> Option<InputEvent> {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputEvent::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Quit)
        }
        KeyCode::Char(' ') => Some(InputEvent::Fire),
        _ => None,
    }
}

/// Remembers the frame each movement key was last seen on.
#[derive(Debug, Default)]
pub struct KeyTracker {
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame.  Call once per tick before feeding that tick's events.
    pub fn begin_frame(&mut self) {
        self.frame += 1;
    }

    /// Record one key event.  Returns the one-shot action for a fresh press.
    pub fn handle(&mut self, event: &KeyEvent) -> Option<InputEvent> {
        match event.kind {
            KeyEventKind::Press => {
                self.key_frame.insert(event.code, self.frame);
                classify_key(&event.code, event.modifiers)
            }
            // Refresh so the key stays held; repeats never re-fire.
            KeyEventKind::Repeat => {
                self.key_frame.insert(event.code, self.frame);
                None
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&event.code);
                None
            }
        }
    }

    fn is_held(&self, key: MoveKey) -> bool {
        self.key_frame.iter().any(|(code, &last)| {
            MoveKey::from_code(code) == Some(key)
                && self.frame.saturating_sub(last) <= HOLD_WINDOW
        })
    }

    /// Snapshot of the movement keys held as of the current frame.
    pub fn controls(&self) -> Controls {
        Controls {
            up: self.is_held(MoveKey::Up),
            down: self.is_held(MoveKey::Down),
            left: self.is_held(MoveKey::Left),
            right: self.is_held(MoveKey::Right),
        }
    }
}
