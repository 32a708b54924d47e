#![forbid(unsafe_code)]

//! 2D grid of cells.
//!
//! Writes outside the buffer are clipped silently. Wide characters occupy two
//! cells; a wide character that would straddle the clip edge is not drawn.

use tray_core::geometry::Rect;

use crate::cell::{Cell, CellContent, CellFlags};
use crate::char_width;

/// A fixed-size grid of [`Cell`]s in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// Create an empty buffer.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// The full extent of the buffer.
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    /// Overwrite a single cell. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Draw `text` starting at (x, y), clipped to `max_width` cells and the
    /// buffer edge. Returns the number of cells written.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, flags: CellFlags, max_width: u16) -> u16 {
        if y >= self.height {
            return 0;
        }
        let limit = x.saturating_add(max_width).min(self.width);
        let mut col = x;
        for ch in text.chars() {
            let w = char_width(ch) as u16;
            if w == 0 {
                continue;
            }
            if col.saturating_add(w) > limit {
                break;
            }
            self.set(col, y, Cell::from_char(ch).with_flags(flags));
            if w == 2 {
                self.set(
                    col + 1,
                    y,
                    Cell {
                        content: CellContent::Continuation,
                        flags,
                    },
                );
            }
            col += w;
        }
        col - x
    }

    /// Fill every cell of `rect` (clipped) with `cell`.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let area = rect.intersection(&self.bounds());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Add `flags` to every cell of `rect` (clipped), keeping content.
    pub fn apply_flags(&mut self, rect: Rect, flags: CellFlags) {
        let area = rect.intersection(&self.bounds());
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.flags |= flags;
                }
            }
        }
    }

    /// Text of row `y` with trailing blanks trimmed.
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::with_capacity(self.width as usize);
        for x in 0..self.width {
            match self.get(x, y).map(|c| c.content) {
                Some(CellContent::Char(c)) => out.push(c),
                Some(CellContent::Continuation) => {}
                Some(CellContent::Empty) | None => out.push(' '),
            }
        }
        out.truncate(out.trim_end().len());
        out
    }

    /// All rows as text, one string per row.
    pub fn to_lines(&self) -> Vec<String> {
        (0..self.height).map(|y| self.row_text(y)).collect()
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }
}
