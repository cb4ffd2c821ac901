//! # Surface
//!
//! The character-grid output boundary. Widgets draw through the [`Surface`]
//! trait and never touch the terminal directly.
//!
//! Two implementations live here:
//!
//! - [`BufferSurface`]: an in-memory ratatui `Buffer`. Used by tests and as
//!   the staging area of the terminal surface.
//! - [`TerminalSurface`]: stages draws in a `BufferSurface` and commits them
//!   to the real terminal on [`Surface::flush`].
//!
//! Coordinates follow ratatui: `Position { x: column, y: row }`.
//! Drawing outside the surface is clipped silently.

use std::io;

use log::warn;
use ratatui::DefaultTerminal;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Widget};

/// The fixed three-color palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorPair {
    #[default]
    Normal,
    Focused,
    Clicked,
}

impl ColorPair {
    /// Style for text drawn in this color.
    pub fn style(self) -> Style {
        match self {
            ColorPair::Normal => Style::default(),
            ColorPair::Focused => Style::default().fg(Color::Black).bg(Color::White),
            ColorPair::Clicked => Style::default().fg(Color::Black).bg(Color::Red),
        }
    }

    /// Style for borders, which only take the accent as foreground.
    pub fn border_style(self) -> Style {
        match self {
            ColorPair::Normal => Style::default().fg(Color::DarkGray),
            ColorPair::Focused => Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            ColorPair::Clicked => Style::default().fg(Color::Red),
        }
    }
}

/// Character-grid output consumed by widgets and the application loop.
pub trait Surface {
    /// Current dimensions (columns × rows).
    fn size(&self) -> Size;

    /// Write `text` starting at `position`. Clipped at the right edge;
    /// ignored entirely when `position` is outside the surface.
    fn draw_text(&mut self, position: Position, text: &str, color: ColorPair);

    /// Draw a box around `area` with an optional title. Clipped to the surface.
    fn draw_border(&mut self, area: Rect, title: Option<&str>, color: ColorPair);

    /// Erase all staged content.
    fn clear(&mut self);

    /// Adopt new dimensions and erase all staged content.
    fn resize(&mut self, size: Size);

    /// Commit staged content to the display.
    fn flush(&mut self) -> io::Result<()>;
}

/// In-memory surface backed by a ratatui `Buffer`.
pub struct BufferSurface {
    buffer: Buffer,
    flushes: usize,
}

impl BufferSurface {
    pub fn new(size: Size) -> Self {
        Self {
            buffer: Buffer::empty(Rect::new(0, 0, size.width, size.height)),
            flushes: 0,
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    /// Number of completed flushes.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// The symbols of one row joined into a string (empty if out of range).
    pub fn row_text(&self, row: u16) -> String {
        let area = self.buffer.area;
        if row >= area.height {
            return String::new();
        }
        (area.left()..area.right())
            .filter_map(|x| self.buffer.cell((x, row)))
            .map(|cell| cell.symbol())
            .collect()
    }

    /// Every row joined with newlines.
    pub fn text(&self) -> String {
        (0..self.buffer.area.height)
            .map(|row| self.row_text(row))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Style of the cell at `position`, if it is on the surface.
    pub fn style_at(&self, position: Position) -> Option<Style> {
        self.buffer.cell(position).map(|cell| cell.style())
    }
}

impl Surface for BufferSurface {
    fn size(&self) -> Size {
        self.buffer.area.as_size()
    }

    fn draw_text(&mut self, position: Position, text: &str, color: ColorPair) {
        let area = self.buffer.area;
        if !area.contains(position) {
            return;
        }
        let max_width = usize::from(area.right() - position.x);
        self.buffer
            .set_stringn(position.x, position.y, text, max_width, color.style());
    }

    fn draw_border(&mut self, area: Rect, title: Option<&str>, color: ColorPair) {
        let area = area.intersection(self.buffer.area);
        if area.width < 2 || area.height < 2 {
            return;
        }
        let mut block = Block::bordered().border_style(color.border_style());
        if let Some(title) = title {
            block = block.title(title);
        }
        block.render(area, &mut self.buffer);
    }

    fn clear(&mut self) {
        self.buffer.reset();
    }

    fn resize(&mut self, size: Size) {
        self.buffer = Buffer::empty(Rect::new(0, 0, size.width, size.height));
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Surface drawing to the real terminal through ratatui.
pub struct TerminalSurface {
    terminal: DefaultTerminal,
    staged: BufferSurface,
}

impl TerminalSurface {
    pub fn new(terminal: DefaultTerminal) -> io::Result<Self> {
        let size = terminal.size()?;
        Ok(Self {
            terminal,
            staged: BufferSurface::new(size),
        })
    }
}

impl Surface for TerminalSurface {
    fn size(&self) -> Size {
        self.terminal
            .size()
            .unwrap_or_else(|_| self.staged.size())
    }

    fn draw_text(&mut self, position: Position, text: &str, color: ColorPair) {
        self.staged.draw_text(position, text, color);
    }

    fn draw_border(&mut self, area: Rect, title: Option<&str>, color: ColorPair) {
        self.staged.draw_border(area, title, color);
    }

    fn clear(&mut self) {
        self.staged.clear();
    }

    fn resize(&mut self, size: Size) {
        self.staged.resize(size);
        // Wipe the physical screen so no cells from the old layout survive
        if let Err(e) = self.terminal.clear() {
            warn!("Failed to clear terminal after resize: {}", e);
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let staged = self.staged.buffer();
        self.terminal.draw(|frame| {
            let area = frame.area().intersection(staged.area);
            let target = frame.buffer_mut();
            for y in area.top()..area.bottom() {
                for x in area.left()..area.right() {
                    if let (Some(src), Some(dst)) = (staged.cell((x, y)), target.cell_mut((x, y)))
                    {
                        *dst = src.clone();
                    }
                }
            }
        })?;
        self.staged.flush()
    }
}
