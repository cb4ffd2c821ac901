//! # Application Loop
//!
//! Owns the top-level elements, the single global focus, and the cooperative
//! input → dispatch → render → flush cycle.
//!
//! ```text
//!            ┌──────────── Running ─────────────┐
//!            │  resize check                    │
//!            │  read key (non-blocking)         │
//!            │  Tab → next focusable element    │
//!            │  other → focused element         │
//!            │  render all + flush              │
//!            └───────────────┬──────────────────┘
//!                            │ quit key
//!                            ▼
//!                         Closing
//! ```
//!
//! One iteration is one [`Application::step`]. The loop never re-enters
//! itself; the only stall is a Button's click pulse.

use std::io;
use std::thread;
use std::time::Duration;

use log::{debug, info};
use ratatui::layout::{Position, Size};

use crate::tui::components::label::fit_width;
use crate::tui::element::{Element, Outcome, WidgetState};
use crate::tui::event::{Key, KeySource};
use crate::tui::surface::{ColorPair, Surface};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppStatus {
    Running,
    Closing,
}

pub struct Application {
    top_level: Vec<Box<dyn Element>>,
    focus: Option<usize>,
    surface_size: Size,
    last_key: Option<Key>,
    last_selection: Option<String>,
    status: AppStatus,
    /// Help text for the bottom row; `None` leaves the row to the elements
    footer: Option<String>,
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

impl Application {
    pub fn new() -> Self {
        Self {
            top_level: Vec::new(),
            focus: None,
            surface_size: Size::new(0, 0),
            last_key: None,
            last_selection: None,
            status: AppStatus::Running,
            footer: None,
        }
    }

    /// Reserve the bottom row for `help` and the last selection.
    pub fn with_footer(mut self, help: impl Into<String>) -> Self {
        self.footer = Some(help.into());
        self
    }

    /// Add a top-level element. The first focusable one receives focus.
    pub fn add(&mut self, mut element: Box<dyn Element>) -> usize {
        let index = self.top_level.len();
        if self.focus.is_none() && element.capabilities().is_focusable() {
            element.set_state(WidgetState::Focused);
            self.focus = Some(index);
        } else {
            element.set_state(WidgetState::Idle);
        }
        self.top_level.push(element);
        index
    }

    pub fn status(&self) -> AppStatus {
        self.status
    }

    pub fn focus_index(&self) -> Option<usize> {
        self.focus
    }

    pub fn last_key(&self) -> Option<Key> {
        self.last_key
    }

    pub fn last_selection(&self) -> Option<&str> {
        self.last_selection.as_deref()
    }

    pub fn surface_size(&self) -> Size {
        self.surface_size
    }

    pub fn element(&self, index: usize) -> Option<&dyn Element> {
        self.top_level.get(index).map(|element| element.as_ref())
    }

    /// Focused leaves across every top-level element.
    pub fn focused_leaves(&self) -> usize {
        self.top_level
            .iter()
            .map(|element| element.focused_leaves())
            .sum()
    }

    /// Run until the quit key is read. Sleeps `idle` whenever no key was
    /// pending (zero busy-polls).
    pub fn run(
        &mut self,
        surface: &mut dyn Surface,
        keys: &mut dyn KeySource,
        idle: Duration,
    ) -> io::Result<()> {
        info!("Application loop starting");
        while self.step(surface, keys)? == AppStatus::Running {
            if self.last_key.is_none() && !idle.is_zero() {
                thread::sleep(idle);
            }
        }
        info!("Application closing");
        Ok(())
    }

    /// One loop iteration: resize check, read one key, dispatch, render, flush.
    pub fn step(
        &mut self,
        surface: &mut dyn Surface,
        keys: &mut dyn KeySource,
    ) -> io::Result<AppStatus> {
        if self.status == AppStatus::Closing {
            return Ok(AppStatus::Closing);
        }

        self.sync_size(surface);

        let key = keys.read_key()?;
        self.last_key = key;
        match key {
            Some(Key::Quit) => {
                info!("Quit key received");
                self.status = AppStatus::Closing;
                return Ok(AppStatus::Closing);
            }
            Some(Key::FocusNext) => self.focus_next(),
            Some(key) => self.dispatch(key, surface),
            None => {}
        }

        self.render(surface)?;
        Ok(AppStatus::Running)
    }

    /// Clear, draw every top-level element, draw the footer, flush.
    pub fn render(&mut self, surface: &mut dyn Surface) -> io::Result<()> {
        surface.clear();
        for element in &mut self.top_level {
            element.draw(surface);
        }
        self.draw_footer(surface);
        debug_assert!(self.focused_leaves() <= 1, "more than one focused leaf");
        surface.flush()
    }

    fn sync_size(&mut self, surface: &mut dyn Surface) {
        let size = surface.size();
        if size == self.surface_size {
            return;
        }
        info!(
            "Surface resized from {}x{} to {}x{}",
            self.surface_size.width, self.surface_size.height, size.width, size.height
        );
        surface.resize(size);
        let room = self.element_room(size);
        for element in &mut self.top_level {
            element.resize(room);
        }
        self.surface_size = size;
    }

    /// The part of the surface elements may lay themselves out in.
    fn element_room(&self, size: Size) -> Size {
        match self.footer {
            Some(_) => Size::new(size.width, size.height.saturating_sub(1)),
            None => size,
        }
    }

    fn focus_next(&mut self) {
        let Some(current) = self.focus else {
            return;
        };
        let len = self.top_level.len();
        let next = (1..=len)
            .map(|step| (current + step) % len)
            .find(|&i| self.top_level[i].capabilities().is_focusable())
            .unwrap_or(current);
        if next == current {
            return;
        }
        self.top_level[current].set_state(WidgetState::Idle);
        self.top_level[next].set_state(WidgetState::Focused);
        self.focus = Some(next);
        debug!("Global focus {} -> {}", current, next);
    }

    fn dispatch(&mut self, key: Key, surface: &mut dyn Surface) {
        let Some(index) = self.focus else {
            return;
        };
        match self.top_level[index].handle_key(key, surface) {
            Outcome::Selected(payload) => {
                info!("Selected '{}'", payload);
                self.last_selection = Some(payload);
            }
            Outcome::Consumed => debug!("Key {:?} consumed by element {}", key, index),
            Outcome::Ignored => debug!("Key {:?} ignored by element {}", key, index),
        }
    }

    fn draw_footer(&self, surface: &mut dyn Surface) {
        let Some(help) = &self.footer else {
            return;
        };
        let Some(row) = self.surface_size.height.checked_sub(1) else {
            return;
        };
        let text = match &self.last_selection {
            Some(selection) => format!("{help} | selected: {selection}"),
            None => help.clone(),
        };
        surface.draw_text(
            Position::new(0, row),
            fit_width(&text, self.surface_size.width),
            ColorPair::Normal,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scroll::ScrollStrategy;
    use crate::test_support::{RecordingSurface, SurfaceOp};
    use crate::tui::components::button::Button;
    use crate::tui::components::container::Container;
    use crate::tui::components::label::Label;
    use std::collections::VecDeque;

    fn keys(sequence: &[Key]) -> VecDeque<Key> {
        sequence.iter().copied().collect()
    }

    /// Label, Button, and a stacked section of two buttons.
    fn sample_app() -> Application {
        let mut app = Application::new();
        app.add(Box::new(Label::new("[Widget Button]")));
        app.add(Box::new(
            Button::new("Button 1")
                .at(Position::new(0, 1))
                .with_pulse(Duration::ZERO),
        ));
        let mut section = Container::new(Position::new(0, 3));
        section.add_entry(Box::new(Label::new("[Widget VLayout]")));
        section.add_entry(Box::new(Button::new("SubButton 1").with_pulse(Duration::ZERO)));
        section.add_entry(Box::new(Button::new("SubButton 2").with_pulse(Duration::ZERO)));
        app.add(Box::new(section));
        app
    }

    #[test]
    fn test_first_focusable_is_prefocused() {
        let app = sample_app();
        assert_eq!(app.focus_index(), Some(1));
        assert_eq!(app.status(), AppStatus::Running);
        assert_eq!(app.focused_leaves(), 1);
    }

    #[test]
    fn test_tab_skips_unfocusable_and_wraps() {
        let mut app = sample_app();
        let mut surface = RecordingSurface::new(80, 24);
        let mut input = keys(&[Key::FocusNext, Key::FocusNext]);

        app.step(&mut surface, &mut input).unwrap();
        assert_eq!(app.focus_index(), Some(2));
        assert_eq!(app.element(1).unwrap().state(), WidgetState::Idle);
        assert_eq!(app.focused_leaves(), 1);

        app.step(&mut surface, &mut input).unwrap();
        assert_eq!(app.focus_index(), Some(1));
        assert_eq!(app.focused_leaves(), 1);
    }

    #[test]
    fn test_tab_without_focusable_elements_is_noop() {
        let mut app = Application::new();
        app.add(Box::new(Label::new("just text")));
        let mut surface = RecordingSurface::new(20, 5);
        let mut input = keys(&[Key::FocusNext, Key::NavigateNext, Key::Activate]);
        for _ in 0..3 {
            assert_eq!(app.step(&mut surface, &mut input).unwrap(), AppStatus::Running);
        }
        assert_eq!(app.focus_index(), None);
    }

    #[test]
    fn test_quit_closes_without_rendering() {
        let mut app = sample_app();
        let mut surface = RecordingSurface::new(80, 24);
        let mut input = keys(&[Key::Quit, Key::FocusNext]);

        assert_eq!(app.step(&mut surface, &mut input).unwrap(), AppStatus::Closing);
        assert!(!surface.ops.contains(&SurfaceOp::Flush));
        // No further input is processed
        assert_eq!(app.step(&mut surface, &mut input).unwrap(), AppStatus::Closing);
        assert_eq!(input.len(), 1);
    }

    #[test]
    fn test_idle_step_still_renders() {
        let mut app = sample_app();
        let mut surface = RecordingSurface::new(80, 24);
        let mut input = keys(&[]);
        app.step(&mut surface, &mut input).unwrap();
        assert_eq!(app.last_key(), None);
        assert_eq!(surface.ops.last(), Some(&SurfaceOp::Flush));
        assert_eq!(surface.last_color_of("Button 1"), Some(ColorPair::Focused));
        assert_eq!(surface.last_color_of("SubButton 1"), Some(ColorPair::Normal));
    }

    #[test]
    fn test_button_click_renders_pulse_then_focus() {
        let mut app = sample_app();
        let mut surface = RecordingSurface::new(80, 24);
        let mut input = keys(&[Key::Activate]);
        app.step(&mut surface, &mut input).unwrap();

        let button_colors: Vec<ColorPair> = surface
            .text_colors()
            .into_iter()
            .filter(|(text, _)| *text == "Button 1")
            .map(|(_, color)| color)
            .collect();
        assert_eq!(button_colors, vec![ColorPair::Clicked, ColorPair::Focused]);
    }

    #[test]
    fn test_keys_route_to_focused_section() {
        let mut app = sample_app();
        let mut surface = RecordingSurface::new(80, 24);
        let mut input = keys(&[Key::FocusNext, Key::NavigateNext]);
        app.step(&mut surface, &mut input).unwrap();
        app.step(&mut surface, &mut input).unwrap();
        assert_eq!(surface.last_color_of("SubButton 2"), Some(ColorPair::Focused));
        assert_eq!(surface.last_color_of("SubButton 1"), Some(ColorPair::Normal));
        assert_eq!(surface.last_color_of("Button 1"), Some(ColorPair::Normal));
    }

    #[test]
    fn test_selection_is_recorded_and_shown_in_footer() {
        let mut app = Application::new().with_footer("q quit");
        let mut list = Container::new(Position::ORIGIN).with_strategy(ScrollStrategy::Center);
        list.add_entry(Box::new(Label::new("Menu")));
        list.add_item(Box::new(Label::selectable("Bookmarks")), "bookmarks");
        app.add(Box::new(list));

        let mut surface = RecordingSurface::new(40, 10);
        let mut input = keys(&[Key::Activate]);
        app.step(&mut surface, &mut input).unwrap();

        assert_eq!(app.last_selection(), Some("bookmarks"));
        assert_eq!(
            surface.last_color_of("q quit | selected: bookmarks"),
            Some(ColorPair::Normal)
        );
    }

    #[test]
    fn test_resize_is_detected_once() {
        let mut app = sample_app();
        let mut surface = RecordingSurface::new(80, 24);
        let mut input = keys(&[]);

        app.step(&mut surface, &mut input).unwrap();
        app.step(&mut surface, &mut input).unwrap();
        surface.size = Size::new(40, 24);
        app.step(&mut surface, &mut input).unwrap();

        let resizes: Vec<&SurfaceOp> = surface
            .ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Resize(_)))
            .collect();
        assert_eq!(
            resizes,
            vec![
                &SurfaceOp::Resize(Size::new(80, 24)),
                &SurfaceOp::Resize(Size::new(40, 24))
            ]
        );
        assert_eq!(app.surface_size(), Size::new(40, 24));
    }

    #[test]
    fn test_run_stops_on_quit() {
        let mut app = sample_app();
        let mut surface = RecordingSurface::new(80, 24);
        let mut input = keys(&[Key::FocusNext, Key::Char('z'), Key::Quit]);
        app.run(&mut surface, &mut input, Duration::ZERO).unwrap();
        assert_eq!(app.status(), AppStatus::Closing);
        assert_eq!(app.last_key(), Some(Key::Quit));
    }
}
