#![forbid(unsafe_code)]

//! A single styled terminal cell.

use bitflags::bitflags;

bitflags! {
    /// Text attributes applied to a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        const BOLD      = 0b0000_0001;
        const DIM       = 0b0000_0010;
        const ITALIC    = 0b0000_0100;
        const UNDERLINE = 0b0000_1000;
        const REVERSE   = 0b0001_0000;
    }
}

/// What a cell displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellContent {
    /// Nothing drawn; renders as a space.
    #[default]
    Empty,
    /// A character occupying this cell (and the next one if it is wide).
    Char(char),
    /// Trailing half of a wide character drawn in the previous cell.
    Continuation,
}

impl CellContent {
    /// The character in this cell, if any.
    #[inline]
    pub const fn as_char(self) -> Option<char> {
        match self {
            Self::Char(c) => Some(c),
            _ => None,
        }
    }
}

/// A styled cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub content: CellContent,
    pub flags: CellFlags,
}

impl Cell {
    /// A cell holding `ch` with no attributes.
    #[inline]
    pub const fn from_char(ch: char) -> Self {
        Self {
            content: CellContent::Char(ch),
            flags: CellFlags::empty(),
        }
    }

    /// Replace the attributes.
    #[inline]
    #[must_use]
    pub const fn with_flags(mut self, flags: CellFlags) -> Self {
        self.flags = flags;
        self
    }

    /// True if nothing is drawn and no attribute is set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content == CellContent::Empty && self.flags.is_empty()
    }
}
