use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::config::KeyBindings;

/// Logical input keys. Concrete key codes are mapped in [`map_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Quit,
    /// Move global focus to the next top-level element (Tab)
    FocusNext,
    NavigateNext,
    NavigatePrev,
    /// Enter or Space
    Activate,
    /// Any other printable character, forwarded to the focused widget
    Char(char),
}

/// A source of input keys that never blocks.
pub trait KeySource {
    /// Returns the next pending key, or `None` if nothing is pending.
    fn read_key(&mut self) -> io::Result<Option<Key>>;
}

/// A fixed queue of keys, replayed in order.
impl KeySource for VecDeque<Key> {
    fn read_key(&mut self) -> io::Result<Option<Key>> {
        Ok(self.pop_front())
    }
}

/// Reads keys from the terminal through crossterm.
pub struct CrosstermKeys {
    bindings: KeyBindings,
}

impl CrosstermKeys {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }
}

impl KeySource for CrosstermKeys {
    fn read_key(&mut self) -> io::Result<Option<Key>> {
        if !event::poll(Duration::ZERO)? {
            return Ok(None);
        }
        match event::read()? {
            // Release/repeat events arrive on terminals with keyboard enhancement
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                log::debug!(
                    "Key event: {:?} with modifiers {:?}",
                    key_event.code,
                    key_event.modifiers
                );
                Ok(map_key(&key_event, &self.bindings))
            }
            // Resize is detected by comparing surface dimensions each frame
            _ => Ok(None),
        }
    }
}

/// Translate a crossterm key event into a logical key.
pub fn map_key(key_event: &KeyEvent, bindings: &KeyBindings) -> Option<Key> {
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Key::Quit),
        (_, KeyCode::Tab) => Some(Key::FocusNext),
        (_, KeyCode::Enter) => Some(Key::Activate),
        (_, KeyCode::Down) => Some(Key::NavigateNext),
        (_, KeyCode::Up) => Some(Key::NavigatePrev),
        (_, KeyCode::Char(' ')) => Some(Key::Activate),
        (_, KeyCode::Char(c)) if c == bindings.quit => Some(Key::Quit),
        (_, KeyCode::Char(c)) if c == bindings.navigate_next => Some(Key::NavigateNext),
        (_, KeyCode::Char(c)) if c == bindings.navigate_prev => Some(Key::NavigatePrev),
        (_, KeyCode::Char(c)) => Some(Key::Char(c)),
        _ => None,
    }
}
