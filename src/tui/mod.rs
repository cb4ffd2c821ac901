//! # TUI Adapter
//!
//! Widgets, containers and the application loop, plus the glue to the real
//! terminal. Everything here draws through the [`surface::Surface`] trait and
//! reads input through [`event::KeySource`], so the whole hierarchy runs
//! against an in-memory buffer in tests.
//!
//! ```text
//!   KeySource ──► Application ──► Element tree ──► Surface
//!   (crossterm)   (focus, loop)   (widgets,        (ratatui buffer,
//!                                  containers)      terminal flush)
//! ```
//!
//! ## Redraw Strategy
//!
//! Every loop iteration redraws everything and flushes once. When no key is
//! pending the loop sleeps for the configured idle interval instead of
//! spinning.

pub mod app;
pub mod components;
pub mod element;
pub mod event;
pub mod surface;

use log::{info, warn};
use std::io::{self, stdout};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use ratatui::layout::{Position, Size};

use crate::core::config::{KeyBindings, ResolvedConfig};
use crate::tui::app::Application;
use crate::tui::components::{Button, Container, Label};
use crate::tui::event::CrosstermKeys;
use crate::tui::surface::TerminalSurface;

/// Column where the category list starts in the demo layout.
const CATEGORY_COLUMN: u16 = 24;
const CATEGORY_WIDTH: u16 = 32;

/// RAII guard that hides the cursor while widgets own the screen.
struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), Hide)?;
        info!("Terminal modes enabled (cursor hidden)");
        Ok(Self)
    }
}

/// Enter terminal modes, logging instead of failing when the terminal
/// refuses. The UI still works with a visible cursor.
fn enable_terminal_modes() -> Option<TerminalModeGuard> {
    TerminalModeGuard::new()
        .inspect_err(|e| warn!("Failed to enable terminal modes: {}", e))
        .ok()
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// Help line shown in the footer.
pub fn help_text(keys: &KeyBindings) -> String {
    format!(
        "Tab: next widget | {}/{} or ↓/↑: move | Enter/Space: activate | {}: quit",
        keys.navigate_next, keys.navigate_prev, keys.quit
    )
}

/// The demo screen: a standalone button, a stacked section of buttons and a
/// bordered category list.
pub fn demo_application(config: &ResolvedConfig) -> Application {
    let mut app = Application::new().with_footer(help_text(&config.keys));

    app.add(Box::new(Label::new("[Widget Button]")));
    app.add(Box::new(
        Button::new("Button 1")
            .at(Position::new(0, 1))
            .with_pulse(config.click_pulse),
    ));

    let mut section = Container::new(Position::new(0, 3));
    section.add_entry(Box::new(Label::new("[Widget VLayout]")));
    for i in 1..=3 {
        section.add_entry(Box::new(
            Button::new(format!("SubButton {i}")).with_pulse(config.click_pulse),
        ));
    }
    app.add(Box::new(section));

    let categories = Container::from_catalog(
        Position::new(CATEGORY_COLUMN, 0),
        Size::new(CATEGORY_WIDTH, u16::MAX),
        &config.categories,
        config.scroll_strategy,
    )
    .bordered(Some("Categories"));
    app.add(Box::new(categories));

    app
}

/// Run the demo on the real terminal until the quit key is pressed.
pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let mut app = demo_application(&config);
    info!(
        "Starting with {} categories, scroll strategy {}",
        config.categories.len(),
        config.scroll_strategy
    );

    let terminal = ratatui::init();
    let _terminal_mode_guard = enable_terminal_modes();

    let result = TerminalSurface::new(terminal).and_then(|mut surface| {
        let mut keys = CrosstermKeys::new(config.keys);
        app.run(&mut surface, &mut keys, config.idle_poll)
    });

    ratatui::restore();
    result
}
