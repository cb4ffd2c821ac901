//! # Viewport Scroller
//!
//! Pure scrolling math for lists that hold more entries than visible rows.
//! Knows nothing about widgets or terminals: it works on entry indices only.
//!
//! Every entry occupies exactly one row (group headers included), so the
//! renderer and the scroller always agree on row accounting.
//!
//! ## Guarantees
//!
//! For any list length `len`, row count `rows` and focused index `f < len`:
//!
//! - `offset ∈ [0, max(0, len - rows)]`
//! - `f ∈ [offset, offset + rows)` whenever `rows > 0`
//! - `offset == 0` whenever `len <= rows`

use std::fmt;
use std::ops::Range;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the viewport follows the focused entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScrollStrategy {
    /// Scroll only when the focus crosses a viewport edge, by the minimum amount.
    #[default]
    Clamp,
    /// Keep the focused entry near the middle row.
    Center,
}

impl fmt::Display for ScrollStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrollStrategy::Clamp => write!(f, "clamp"),
            ScrollStrategy::Center => write!(f, "center"),
        }
    }
}

/// Largest legal offset for a list of `len` entries shown in `rows` rows.
pub fn max_offset(len: usize, rows: usize) -> usize {
    len.saturating_sub(rows)
}

/// Compute the new scroll offset for the given focus.
///
/// `focused` of `None` (or out of range) keeps the previous offset, clamped to
/// the legal range.
pub fn scroll_offset(
    strategy: ScrollStrategy,
    focused: Option<usize>,
    offset: usize,
    len: usize,
    rows: usize,
) -> usize {
    let max = max_offset(len, rows);
    let Some(focused) = focused.filter(|&f| f < len) else {
        return offset.min(max);
    };
    if rows == 0 {
        return offset.min(max);
    }

    let target = match strategy {
        ScrollStrategy::Clamp => {
            if focused < offset {
                focused
            } else if focused >= offset + rows {
                focused + 1 - rows
            } else {
                offset
            }
        }
        ScrollStrategy::Center => focused.saturating_sub(rows / 2),
    };
    target.min(max)
}

/// Entry indices visible at `offset`, never reaching outside `0..len`.
pub fn visible_range(offset: usize, len: usize, rows: usize) -> Range<usize> {
    let start = offset.min(len);
    let end = start.saturating_add(rows).min(len);
    start..end
}

/// Scroll state embedded in a scrollable container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub strategy: ScrollStrategy,
    /// Index of the first visible entry.
    pub offset: usize,
    /// Number of entry rows that fit on screen.
    pub rows: usize,
}

impl Viewport {
    pub fn new(strategy: ScrollStrategy) -> Self {
        Self {
            strategy,
            offset: 0,
            rows: 0,
        }
    }

    /// Re-align the offset with the focused entry. Returns true if it moved.
    pub fn follow(&mut self, focused: Option<usize>, len: usize) -> bool {
        let next = scroll_offset(self.strategy, focused, self.offset, len, self.rows);
        let moved = next != self.offset;
        self.offset = next;
        moved
    }

    pub fn range(&self, len: usize) -> Range<usize> {
        visible_range(self.offset, len, self.rows)
    }
}
