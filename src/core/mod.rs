//! # Core Logic
//!
//! The parts of vtui that know nothing about any terminal technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Viewport scrolling   │
//!                    │  • Category catalog     │
//!                    │  • Configuration        │
//!                    │                         │
//!                    │  No terminal. No UI.    │
//!                    └───────────┬─────────────┘
//!                                │
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  widgets + │
//!                         │  app loop  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`scroll`]: viewport math that keeps a selection on screen
//! - [`catalog`]: `(label, group, payload)` entries for category lists
//! - [`config`]: layered settings (defaults → file → env → CLI)

pub mod catalog;
pub mod config;
pub mod scroll;
