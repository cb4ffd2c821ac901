//! # Label
//!
//! A line of text. Display-only by default; a selectable label can hold focus
//! and is used for category list entries. Labels never enter `Clicked`.

use ratatui::layout::Position;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::element::{Capabilities, Element, WidgetState};
use crate::tui::surface::{ColorPair, Surface};

pub struct Label {
    text: String,
    position: Position,
    width: u16,
    capabilities: Capabilities,
    state: WidgetState,
}

impl Label {
    /// A display-only label (also used for group headers).
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_capabilities(text.into(), Capabilities::NONE)
    }

    /// A label that can hold focus.
    pub fn selectable(text: impl Into<String>) -> Self {
        Self::with_capabilities(text.into(), Capabilities::FOCUSABLE)
    }

    fn with_capabilities(text: String, capabilities: Capabilities) -> Self {
        Self {
            text,
            position: Position::ORIGIN,
            width: u16::MAX,
            capabilities,
            state: WidgetState::Idle,
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Element for Label {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn state(&self) -> WidgetState {
        self.state
    }

    fn set_state(&mut self, state: WidgetState) {
        match state {
            WidgetState::Idle => self.state = state,
            WidgetState::Focused if self.capabilities.is_focusable() => self.state = state,
            _ => {}
        }
    }

    fn position(&self) -> Position {
        self.position
    }

    fn place(&mut self, position: Position, width: u16) {
        self.position = position;
        self.width = width;
    }

    fn width(&self) -> u16 {
        u16::try_from(self.text.width()).unwrap_or(u16::MAX)
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        let color = if self.state == WidgetState::Focused {
            ColorPair::Focused
        } else {
            ColorPair::Normal
        };
        surface.draw_text(self.position, fit_width(&self.text, self.width), color);
    }
}

/// Longest prefix of `text` that fits in `width` terminal columns.
pub(crate) fn fit_width(text: &str, width: u16) -> &str {
    let limit = usize::from(width);
    let mut used = 0;
    for (i, c) in text.char_indices() {
        used += c.width().unwrap_or(0);
        if used > limit {
            return &text[..i];
        }
    }
    text
}
