use ratatui::layout::{Position, Size};

use crate::tui::event::Key;
use crate::tui::surface::{ColorPair, Surface};

/// What an element can do. Fixed when the element is constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    focusable: bool,
    clickable: bool,
}

impl Capabilities {
    /// Display-only: labels and group headers.
    pub const NONE: Self = Self {
        focusable: false,
        clickable: false,
    };
    /// Can hold focus, e.g. a selectable list entry.
    pub const FOCUSABLE: Self = Self {
        focusable: true,
        clickable: false,
    };
    /// Can hold focus and reacts to Activate with a click pulse.
    pub const CLICKABLE: Self = Self {
        focusable: true,
        clickable: true,
    };

    pub fn is_focusable(self) -> bool {
        self.focusable
    }

    pub fn is_clickable(self) -> bool {
        self.clickable
    }
}

/// Interaction state of an element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WidgetState {
    #[default]
    Idle,
    Focused,
    /// Transient pulse after activation (clickable elements only)
    Clicked,
}

impl WidgetState {
    pub fn color(self) -> ColorPair {
        match self {
            WidgetState::Idle => ColorPair::Normal,
            WidgetState::Focused => ColorPair::Focused,
            WidgetState::Clicked => ColorPair::Clicked,
        }
    }
}

/// Result of handing a key to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The key means nothing here; the caller may handle it.
    Ignored,
    Consumed,
    /// A selectable entry was activated and reports its payload.
    Selected(String),
}

impl Outcome {
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Outcome::Ignored)
    }
}

/// A node of the widget hierarchy: a widget or a container of elements.
///
/// # Surface access
///
/// Elements receive the surface only for the duration of `draw` or
/// `handle_key` and never keep it. `handle_key` gets it so a clickable
/// element can show its click pulse immediately.
///
/// # Mutability
///
/// `draw` takes `&mut self` so containers can settle their scroll offset and
/// child placement during the render pass.
pub trait Element {
    fn capabilities(&self) -> Capabilities;

    fn state(&self) -> WidgetState;

    /// Set the interaction state. Elements ignore states their capabilities
    /// do not allow.
    fn set_state(&mut self, state: WidgetState);

    fn position(&self) -> Position;

    /// Move the element and limit how many columns it may use.
    fn place(&mut self, position: Position, width: u16);

    /// Columns the element wants.
    fn width(&self) -> u16;

    /// Rows the element occupies once placed.
    fn height(&self) -> u16 {
        1
    }

    /// The drawable area changed; `available` is the full surface size.
    fn resize(&mut self, _available: Size) {}

    /// The element was added to a container.
    fn nest(&mut self) {}

    /// Focus is arriving by navigation, from the top when `from_start` is
    /// true and from the bottom otherwise.
    fn enter(&mut self, _from_start: bool) {}

    fn draw(&mut self, surface: &mut dyn Surface);

    fn handle_key(&mut self, _key: Key, _surface: &mut dyn Surface) -> Outcome {
        Outcome::Ignored
    }

    /// Number of Focused leaves at or below this element.
    fn focused_leaves(&self) -> usize {
        usize::from(self.state() == WidgetState::Focused)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_sets() {
        assert!(!Capabilities::NONE.is_focusable());
        assert!(Capabilities::FOCUSABLE.is_focusable());
        assert!(!Capabilities::FOCUSABLE.is_clickable());
        assert!(Capabilities::CLICKABLE.is_focusable());
        assert!(Capabilities::CLICKABLE.is_clickable());
    }

    #[test]
    fn test_state_colors() {
        assert_eq!(WidgetState::Idle.color(), ColorPair::Normal);
        assert_eq!(WidgetState::Focused.color(), ColorPair::Focused);
        assert_eq!(WidgetState::Clicked.color(), ColorPair::Clicked);
    }

    #[test]
    fn test_outcome_consumed() {
        assert!(!Outcome::Ignored.is_consumed());
        assert!(Outcome::Consumed.is_consumed());
        assert!(Outcome::Selected("x".into()).is_consumed());
    }
}
