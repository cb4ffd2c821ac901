//! # TUI Components
//!
//! The concrete [`Element`](crate::tui::element::Element) implementations.
//!
//! ## Widgets
//!
//! Leaf elements that draw a single line of text:
//! - `Label`: display-only text, or a selectable list entry
//! - `Button`: focusable and clickable, with a blocking click pulse
//!
//! ## Containers
//!
//! - `Container`: an ordered stack of elements with circular focus
//!   traversal, header skipping and a viewport scroller. Containers nest.
//!
//! ## Co-location
//!
//! Each component file holds its state, drawing, key handling and tests.
//!
//! ```text
//! components/
//! ├── mod.rs        (this file)
//! ├── label.rs      (Static or selectable text)
//! ├── button.rs     (Clickable widget)
//! └── container.rs  (Focus traversal + scrolling)
//! ```

pub mod button;
pub mod container;
pub mod label;

pub use button::Button;
pub use container::Container;
pub use label::Label;
