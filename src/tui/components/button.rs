//! # Button
//!
//! A focusable, clickable widget. Activate (Enter/Space) plays a click pulse:
//! the button redraws itself in the clicked color, flushes, then holds the
//! loop for the pulse duration before returning to `Focused`.
//!
//! The pulse is a deliberate blocking stall. No input is read and nothing
//! else is redrawn while it lasts.

use std::thread;
use std::time::Duration;

use log::{info, warn};
use ratatui::layout::Position;
use unicode_width::UnicodeWidthStr;

use crate::core::config::DEFAULT_CLICK_PULSE_MS;
use crate::tui::components::label::fit_width;
use crate::tui::element::{Capabilities, Element, Outcome, WidgetState};
use crate::tui::event::Key;
use crate::tui::surface::Surface;

pub struct Button {
    text: String,
    position: Position,
    width: u16,
    state: WidgetState,
    pulse: Duration,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            position: Position::ORIGIN,
            width: u16::MAX,
            state: WidgetState::Idle,
            pulse: Duration::from_millis(DEFAULT_CLICK_PULSE_MS),
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_pulse(mut self, pulse: Duration) -> Self {
        self.pulse = pulse;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn click(&mut self, surface: &mut dyn Surface) {
        info!("Button '{}' clicked", self.text);
        self.state = WidgetState::Clicked;
        self.draw(surface);
        if let Err(e) = surface.flush() {
            warn!("Failed to flush click pulse for '{}': {}", self.text, e);
        }
        thread::sleep(self.pulse);
        self.state = WidgetState::Focused;
    }
}

impl Element for Button {
    fn capabilities(&self) -> Capabilities {
        Capabilities::CLICKABLE
    }

    fn state(&self) -> WidgetState {
        self.state
    }

    fn set_state(&mut self, state: WidgetState) {
        self.state = state;
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
        surface.draw_text(
            self.position,
            fit_width(&self.text, self.width),
            self.state.color(),
        );
    }

    fn handle_key(&mut self, key: Key, surface: &mut dyn Surface) -> Outcome {
        match key {
            Key::Activate => {
                self.click(surface);
                Outcome::Consumed
            }
            _ => Outcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordingSurface, SurfaceOp};
    use crate::tui::surface::ColorPair;

    #[test]
    fn test_activate_pulses_clicked_then_focused() {
        let mut surface = RecordingSurface::new(40, 5);
        let mut button = Button::new("Button 1")
            .at(Position::new(0, 1))
            .with_pulse(Duration::from_millis(5));
        button.set_state(WidgetState::Focused);

        let outcome = button.handle_key(Key::Activate, &mut surface);

        assert_eq!(outcome, Outcome::Consumed);
        assert_eq!(button.state(), WidgetState::Focused);
        assert_eq!(
            surface.ops,
            vec![
                SurfaceOp::Text {
                    position: Position::new(0, 1),
                    text: "Button 1".to_string(),
                    color: ColorPair::Clicked,
                },
                SurfaceOp::Flush,
            ]
        );
    }

    #[test]
    fn test_pulse_blocks_for_its_duration() {
        let mut surface = RecordingSurface::new(10, 1);
        let mut button = Button::new("B").with_pulse(Duration::from_millis(30));
        let start = std::time::Instant::now();
        button.handle_key(Key::Activate, &mut surface);
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut surface = RecordingSurface::new(10, 1);
        let mut button = Button::new("B").with_pulse(Duration::ZERO);
        assert_eq!(button.handle_key(Key::Char('x'), &mut surface), Outcome::Ignored);
        assert_eq!(button.handle_key(Key::NavigateNext, &mut surface), Outcome::Ignored);
        assert!(surface.ops.is_empty());
    }

    #[test]
    fn test_draw_color_follows_state() {
        let mut surface = RecordingSurface::new(10, 1);
        let mut button = Button::new("B");
        button.draw(&mut surface);
        button.set_state(WidgetState::Focused);
        button.draw(&mut surface);
        assert_eq!(
            surface.text_colors(),
            vec![("B", ColorPair::Normal), ("B", ColorPair::Focused)]
        );
    }
}
