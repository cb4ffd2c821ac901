//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::io;

use ratatui::layout::{Position, Rect, Size};

use crate::tui::surface::{ColorPair, Surface};

/// Everything a widget asked the surface to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOp {
    Text {
        position: Position,
        text: String,
        color: ColorPair,
    },
    Border {
        area: Rect,
        title: Option<String>,
        color: ColorPair,
    },
    Clear,
    Resize(Size),
    Flush,
}

/// A surface that records calls instead of drawing.
pub struct RecordingSurface {
    pub size: Size,
    pub ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            size: Size::new(width, height),
            ops: Vec::new(),
        }
    }

    /// `(text, color)` of every text draw, in order.
    pub fn text_colors(&self) -> Vec<(&str, ColorPair)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                SurfaceOp::Text { text, color, .. } => Some((text.as_str(), *color)),
                _ => None,
            })
            .collect()
    }

    /// Color of the most recent draw of `text`.
    pub fn last_color_of(&self, text: &str) -> Option<ColorPair> {
        self.text_colors()
            .into_iter()
            .rev()
            .find(|(t, _)| *t == text)
            .map(|(_, color)| color)
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn draw_text(&mut self, position: Position, text: &str, color: ColorPair) {
        self.ops.push(SurfaceOp::Text {
            position,
            text: text.to_string(),
            color,
        });
    }

    fn draw_border(&mut self, area: Rect, title: Option<&str>, color: ColorPair) {
        self.ops.push(SurfaceOp::Border {
            area,
            title: title.map(str::to_string),
            color,
        });
    }

    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }

    fn resize(&mut self, size: Size) {
        self.ops.push(SurfaceOp::Resize(size));
    }

    fn flush(&mut self) -> io::Result<()> {
        self.ops.push(SurfaceOp::Flush);
        Ok(())
    }
}
