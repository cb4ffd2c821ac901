//! # Container Component
//!
//! An ordered collection of elements with keyboard focus traversal and an
//! embedded viewport scroller.
//!
//! ## Entries
//!
//! Every child is either a **selectable** entry (its capabilities include
//! Focusable) or a **header** (display-only). Headers occupy a row but are
//! never traversal stops. Selectable entries may carry a payload, reported as
//! [`Outcome::Selected`] when the entry is activated.
//!
//! ## Focus
//!
//! `focused` always points at a selectable entry, or is `None` when the
//! container has none. The focused child mirrors the container's own state:
//! it is Focused only while the container is, so at most one leaf in the
//! whole hierarchy is Focused.
//!
//! Navigation keys go to the focused child first. A nested container moves
//! its own focus until it runs off either end, then reports the key as
//! ignored and the parent moves on. Only a top-level container wraps.
//!
//! ## Layout
//!
//! Entries are stacked top to bottom with `spacing - 1` blank rows between
//! them, inside an optional border. Each entry takes as many rows as its
//! height (a nested container takes its whole extent). When more entries
//! exist than rows fit, the viewport scroller picks the visible slice so the
//! focused entry stays on screen. The container's extent is its desired size
//! (or its content size) clamped to the room left on the surface.

use std::ops::Range;

use log::debug;
use ratatui::layout::{Position, Rect, Size};

use crate::core::catalog::CatalogEntry;
use crate::core::scroll::{ScrollStrategy, Viewport};
use crate::tui::components::label::Label;
use crate::tui::element::{Capabilities, Element, Outcome, WidgetState};
use crate::tui::event::Key;
use crate::tui::surface::{ColorPair, Surface};

struct Child {
    element: Box<dyn Element>,
    payload: Option<String>,
}

pub struct Container {
    origin: Position,
    /// Requested size; `None` grows with the content
    desired: Option<Size>,
    /// Column limit imposed by a parent container
    width_limit: u16,
    /// Last known surface size
    available: Size,
    /// Current on-screen size
    extent: Size,
    bordered: bool,
    title: Option<String>,
    spacing: u16,
    children: Vec<Child>,
    focused: Option<usize>,
    viewport: Viewport,
    state: WidgetState,
    /// Set once added to a parent container; nested containers do not wrap
    nested: bool,
}

/// Rows a child takes in the stack. Empty children still hold one row.
fn slot_height(element: &dyn Element) -> u16 {
    element.height().max(1)
}

impl Container {
    /// An empty stacked container with its top-left corner at `origin`.
    pub fn new(origin: Position) -> Self {
        let mut container = Self {
            origin,
            desired: None,
            width_limit: u16::MAX,
            available: Size::new(u16::MAX, u16::MAX),
            extent: Size::new(0, 0),
            bordered: false,
            title: None,
            spacing: 1,
            children: Vec::new(),
            focused: None,
            viewport: Viewport::new(ScrollStrategy::default()),
            state: WidgetState::Idle,
            nested: false,
        };
        container.relayout();
        container
    }

    /// A category list: groups become headers, items become selectable
    /// labels reporting their payload.
    pub fn from_catalog(
        origin: Position,
        size: Size,
        entries: &[CatalogEntry],
        strategy: ScrollStrategy,
    ) -> Self {
        let mut container = Container::new(origin)
            .with_size(size)
            .with_strategy(strategy);
        for entry in entries {
            match entry.payload() {
                Some(payload) => {
                    container.add_item(Box::new(Label::selectable(entry.label.as_str())), payload);
                }
                None => {
                    container.add_entry(Box::new(Label::new(entry.label.as_str())));
                }
            }
        }
        container
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.desired = Some(size);
        self.relayout();
        self
    }

    pub fn with_spacing(mut self, spacing: u16) -> Self {
        self.spacing = spacing.max(1);
        self.relayout();
        self
    }

    pub fn with_strategy(mut self, strategy: ScrollStrategy) -> Self {
        self.viewport.strategy = strategy;
        self.relayout();
        self
    }

    /// Draw a border (with an optional title) around the entries.
    pub fn bordered(mut self, title: Option<&str>) -> Self {
        self.bordered = true;
        self.title = title.map(str::to_string);
        self.relayout();
        self
    }

    /// Append an entry without a payload. Returns its index.
    pub fn add_entry(&mut self, element: Box<dyn Element>) -> usize {
        self.push(element, None)
    }

    /// Append a selectable entry that reports `payload` when activated.
    pub fn add_item(&mut self, element: Box<dyn Element>, payload: &str) -> usize {
        self.push(element, Some(payload.to_string()))
    }

    fn push(&mut self, mut element: Box<dyn Element>, payload: Option<String>) -> usize {
        let index = self.children.len();
        let selectable = element.capabilities().is_focusable();
        element.nest();
        element.set_state(WidgetState::Idle);
        self.children.push(Child { element, payload });

        if self.focused.is_none() && selectable {
            self.focused = Some(index);
            if self.state == WidgetState::Focused {
                self.children[index].element.set_state(WidgetState::Focused);
            }
        }
        self.relayout();
        index
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_selectable(&self, index: usize) -> bool {
        self.children
            .get(index)
            .is_some_and(|child| child.element.capabilities().is_focusable())
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    pub fn focused_payload(&self) -> Option<&str> {
        self.focused
            .and_then(|i| self.children[i].payload.as_deref())
    }

    pub fn entry_state(&self, index: usize) -> Option<WidgetState> {
        self.children.get(index).map(|child| child.element.state())
    }

    pub fn scroll_offset(&self) -> usize {
        self.viewport.offset
    }

    /// Number of entries that fit inside the container.
    pub fn visible_rows(&self) -> usize {
        self.viewport.rows
    }

    pub fn visible_range(&self) -> Range<usize> {
        self.viewport.range(self.children.len())
    }

    pub fn extent(&self) -> Size {
        self.extent
    }

    /// Focus the entry at `index` directly. Returns false if it is not
    /// selectable.
    pub fn select(&mut self, index: usize) -> bool {
        if !self.is_selectable(index) {
            return false;
        }
        self.move_focus_to(index);
        true
    }

    fn chrome(&self) -> u16 {
        u16::from(self.bordered)
    }

    fn content_size(&self) -> Size {
        let gap = self.spacing - 1;
        let rows = self
            .children
            .iter()
            .enumerate()
            .fold(0u16, |rows, (i, child)| {
                let gap = if i == 0 { 0 } else { gap };
                rows.saturating_add(gap)
                    .saturating_add(slot_height(child.element.as_ref()))
            });
        let width = self
            .children
            .iter()
            .map(|child| child.element.width())
            .max()
            .unwrap_or(0);
        let chrome = self.chrome() * 2;
        Size::new(width.saturating_add(chrome), rows.saturating_add(chrome))
    }

    /// Recompute extent, viewport rows, scroll offset and child placement.
    fn relayout(&mut self) {
        let wanted = self.desired.unwrap_or_else(|| self.content_size());
        let room = Size::new(
            self.available
                .width
                .saturating_sub(self.origin.x)
                .min(self.width_limit),
            self.available.height.saturating_sub(self.origin.y),
        );
        self.extent = Size::new(wanted.width.min(room.width), wanted.height.min(room.height));

        let inner_rows = self.extent.height.saturating_sub(self.chrome() * 2);
        self.viewport.rows = self.fitting_entries(inner_rows);
        self.viewport.follow(self.focused, self.children.len());
        self.place_children();
    }

    /// The largest entry count such that any run of that many consecutive
    /// entries fits in `inner_rows`. Keeps every visible slice on screen
    /// whatever the offset.
    fn fitting_entries(&self, inner_rows: u16) -> usize {
        if inner_rows == 0 || self.children.is_empty() {
            return 0;
        }
        let inner = usize::from(inner_rows);
        let gap = usize::from(self.spacing - 1);
        let heights: Vec<usize> = self
            .children
            .iter()
            .map(|child| usize::from(slot_height(child.element.as_ref())))
            .collect();

        let mut count = heights.len();
        while count > 1
            && !heights
                .windows(count)
                .all(|run| run.iter().sum::<usize>() + (count - 1) * gap <= inner)
        {
            count -= 1;
        }
        count
    }

    fn place_children(&mut self) {
        let chrome = self.chrome();
        let left = self.origin.x.saturating_add(chrome);
        let top = self.origin.y.saturating_add(chrome);
        let width = self.extent.width.saturating_sub(chrome * 2);
        let gap = self.spacing - 1;
        let range = self.viewport.range(self.children.len());

        let mut row = top;
        for child in &mut self.children[range] {
            child.element.place(Position::new(left, row), width);
            row = row
                .saturating_add(slot_height(child.element.as_ref()))
                .saturating_add(gap);
        }
    }

    /// Move to the next selectable entry. Returns false when a nested
    /// container has no entry left in that direction.
    fn step_focus(&mut self, forward: bool) -> bool {
        let Some(current) = self.focused else {
            return false;
        };
        let len = self.children.len();
        let next = if self.nested {
            if forward {
                (current + 1..len).find(|&i| self.is_selectable(i))
            } else {
                (0..current).rev().find(|&i| self.is_selectable(i))
            }
        } else {
            // Headers are skipped; the current entry is always a stop
            (1..=len)
                .map(|step| {
                    if forward {
                        (current + step) % len
                    } else {
                        (current + len - step) % len
                    }
                })
                .find(|&i| self.is_selectable(i))
        };
        let Some(next) = next else {
            return false;
        };

        self.children[next].element.enter(forward);
        if next != current {
            self.move_focus_to(next);
        }
        true
    }

    fn move_focus_to(&mut self, index: usize) -> bool {
        let Some(current) = self.focused else {
            return false;
        };
        if index == current {
            return false;
        }

        self.children[current].element.set_state(WidgetState::Idle);
        if self.state == WidgetState::Focused {
            self.children[index].element.set_state(WidgetState::Focused);
        }
        self.focused = Some(index);

        if self.viewport.follow(self.focused, self.children.len()) {
            self.place_children();
        }
        debug!(
            "Container focus {} -> {} (scroll offset {})",
            current, index, self.viewport.offset
        );
        true
    }
}

impl Element for Container {
    fn capabilities(&self) -> Capabilities {
        if self.focused.is_some() {
            Capabilities::FOCUSABLE
        } else {
            Capabilities::NONE
        }
    }

    fn state(&self) -> WidgetState {
        self.state
    }

    fn set_state(&mut self, state: WidgetState) {
        match state {
            WidgetState::Focused => {
                let Some(index) = self.focused else {
                    return;
                };
                self.state = WidgetState::Focused;
                self.children[index].element.set_state(WidgetState::Focused);
            }
            WidgetState::Idle => {
                self.state = WidgetState::Idle;
                for child in &mut self.children {
                    child.element.set_state(WidgetState::Idle);
                }
            }
            // Containers have no click pulse of their own
            WidgetState::Clicked => {}
        }
    }

    fn position(&self) -> Position {
        self.origin
    }

    fn place(&mut self, position: Position, width: u16) {
        self.origin = position;
        self.width_limit = width;
        self.relayout();
    }

    fn width(&self) -> u16 {
        self.desired
            .map_or_else(|| self.content_size().width, |size| size.width)
    }

    fn height(&self) -> u16 {
        self.extent.height
    }

    fn nest(&mut self) {
        self.nested = true;
    }

    fn enter(&mut self, from_start: bool) {
        let len = self.children.len();
        let edge = if from_start {
            (0..len).find(|&i| self.is_selectable(i))
        } else {
            (0..len).rev().find(|&i| self.is_selectable(i))
        };
        let Some(edge) = edge else {
            return;
        };
        self.children[edge].element.enter(from_start);
        self.move_focus_to(edge);
    }

    fn resize(&mut self, available: Size) {
        self.available = available;
        for child in &mut self.children {
            child.element.resize(available);
        }
        self.relayout();
    }

    fn draw(&mut self, surface: &mut dyn Surface) {
        // Settle the viewport for this frame before anything is drawn
        self.relayout();

        if self.bordered {
            let color = if self.state == WidgetState::Focused {
                ColorPair::Focused
            } else {
                ColorPair::Normal
            };
            let area = Rect::new(
                self.origin.x,
                self.origin.y,
                self.extent.width,
                self.extent.height,
            );
            surface.draw_border(area, self.title.as_deref(), color);
        }

        let range = self.viewport.range(self.children.len());
        for child in &mut self.children[range] {
            child.element.draw(surface);
        }
    }

    fn handle_key(&mut self, key: Key, surface: &mut dyn Surface) -> Outcome {
        let Some(current) = self.focused else {
            return Outcome::Ignored;
        };
        match key {
            Key::NavigateNext | Key::NavigatePrev => {
                if self.children[current]
                    .element
                    .handle_key(key, surface)
                    .is_consumed()
                {
                    return Outcome::Consumed;
                }
                if self.step_focus(key == Key::NavigateNext) {
                    Outcome::Consumed
                } else {
                    Outcome::Ignored
                }
            }
            Key::Activate => {
                let child = &mut self.children[current];
                let outcome = child.element.handle_key(key, surface);
                match &child.payload {
                    Some(payload) => Outcome::Selected(payload.clone()),
                    None => outcome,
                }
            }
            other => self.children[current].element.handle_key(other, surface),
        }
    }

    fn focused_leaves(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.element.focused_leaves())
            .sum()
    }
}
