//! A launcher window simulated inside the terminal.
//!
//! The core sizes its window in pixels. The terminal has cells, so sizes are
//! scaled by a fixed cell size and the box is placed on the screen like a
//! real window would be: a resize keeps the top-left corner where it was,
//! and only a recenter moves it.

use ratatui::layout::Rect;

/// Pixels per terminal column
pub const PX_PER_COL: u32 = 8;
/// Pixels per terminal line
pub const PX_PER_LINE: u32 = 25;
/// Lines taken by the bordered input box
pub const INPUT_LINES: u16 = 3;
/// Lines per result row (title line and snippet line)
pub const LINES_PER_ROW: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimWindow {
    width: u32,
    height: u32,
    /// Top-left corner; `None` until the first recenter
    origin: Option<(u16, u16)>,
}

impl SimWindow {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            origin: None,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Center the window on `screen` at its current size.
    pub fn recenter(&mut self, screen: Rect) {
        let (cols, lines) = self.cells(screen);
        self.origin = Some((
            screen.x + (screen.width - cols) / 2,
            screen.y + (screen.height - lines) / 2,
        ));
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Where the window sits on `screen`, clamped so it stays visible.
    #[must_use]
    pub fn area(&self, screen: Rect) -> Rect {
        let (cols, lines) = self.cells(screen);
        let (x, y) = self.origin.unwrap_or((
            screen.x + (screen.width - cols) / 2,
            screen.y + (screen.height - lines) / 2,
        ));

        let max_x = screen.x + screen.width - cols;
        let max_y = screen.y + screen.height - lines;
        Rect::new(
            x.clamp(screen.x, max_x),
            y.clamp(screen.y, max_y),
            cols,
            lines,
        )
    }

    fn cells(&self, screen: Rect) -> (u16, u16) {
        let cols = u16::try_from(self.width.div_ceil(PX_PER_COL)).unwrap_or(u16::MAX);
        let lines = u16::try_from(self.height.div_ceil(PX_PER_LINE)).unwrap_or(u16::MAX);
        (cols.min(screen.width), lines.min(screen.height))
    }
}

/// Number of result rows that fit below the input box.
#[must_use]
pub fn row_capacity(area: Rect) -> usize {
    usize::from(area.height.saturating_sub(INPUT_LINES) / LINES_PER_ROW)
}

/// First row to draw so that `selected` stays visible.
#[must_use]
pub fn first_visible(selected: Option<usize>, capacity: usize) -> usize {
    match selected {
        Some(index) if capacity > 0 && index >= capacity => index + 1 - capacity,
        _ => 0,
    }
}

/// The result row under a screen cell, if any.
#[must_use]
pub fn row_at(area: Rect, offset: usize, rows: usize, column: u16, line: u16) -> Option<usize> {
    let list_top = area.y + INPUT_LINES;
    if column < area.x || column >= area.x + area.width || line < list_top {
        return None;
    }
    if line >= area.y + area.height {
        return None;
    }

    let slot = usize::from((line - list_top) / LINES_PER_ROW);
    if slot >= row_capacity(area) {
        return None;
    }
    let index = offset + slot;
    (index < rows).then_some(index)
}
