//! Cell and grid data model.
//!
//! Cells carry everything downstream interaction needs (pane, absolute byte
//! index, raw byte value, display text, flags, classifier classes) so the
//! presentation layer never encodes coordinates into markup attributes and
//! nothing ever parses rendered output back. All types are plain values with
//! `PartialEq`/`Hash`: redraw decisions are value comparisons on this
//! structure.

use std::hash::{Hash, Hasher};

use crate::PaneColumn;

bitflags::bitflags! {
    /// Per-cell presentation/interaction flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CellFlags: u8 {
        /// Byte index falls inside the ordered selection range.
        const SELECTED = 0b0000_0001;
        /// Padding cell past the last real byte; excluded from hover,
        /// selection, and cursor targeting.
        const PLACEHOLDER = 0b0000_0010;
        /// Odd column within the row; supports a half-row visual gutter when
        /// bytes-per-row is even.
        const PARITY_ODD = 0b0000_0100;
    }
}

/// A single positioned cell in either byte pane.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    pub column: PaneColumn,
    /// Absolute byte index; `None` for placeholders.
    pub index: Option<usize>,
    /// Raw byte value; `None` for placeholders.
    pub byte: Option<u8>,
    /// Display text: two hex digits, one decoded glyph, or pad spaces.
    pub text: String,
    pub flags: CellFlags,
    /// Classes contributed by the cell classifier (possibly empty).
    pub classes: Vec<String>,
}

impl Cell {
    /// Whether this cell is a valid target for hover/selection/cursor.
    pub fn is_interactive(&self) -> bool {
        !self.flags.contains(CellFlags::PLACEHOLDER)
    }
}

/// Zero-padded fixed-width row offset, split so presentation can dim the
/// leading zero-run without string inspection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OffsetLabel {
    /// All digits, always [`crate::hex::OFFSET_DIGITS`] long.
    pub text: String,
    /// Index of the first significant digit (a zero offset keeps its final
    /// digit significant).
    pub significant_from: usize,
}

impl OffsetLabel {
    /// The dimmable leading zero-run (possibly empty).
    pub fn padding(&self) -> &str {
        &self.text[..self.significant_from]
    }

    /// The significant digits (never empty).
    pub fn significant(&self) -> &str {
        &self.text[self.significant_from..]
    }
}

/// One rendered row: offset header plus the two byte panes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Row {
    /// Absolute row index within the whole dataset.
    pub row: usize,
    pub offset: OffsetLabel,
    pub hex: Vec<Cell>,
    pub ascii: Vec<Cell>,
}

/// The full grid for one render slice.
///
/// Rebuilt wholesale on every sync tick and replaced, never mutated in
/// place; the cheap [`CellGrid::content_hash`] (or plain equality) tells the
/// caller whether anything actually changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct CellGrid {
    /// Absolute byte offset of the first cell in the grid.
    pub base_offset: usize,
    pub bytes_per_row: usize,
    pub rows: Vec<Row>,
}

impl CellGrid {
    /// Number of real (non-placeholder) byte cells per pane.
    pub fn byte_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.hex.iter().filter(|c| c.is_interactive()).count())
            .sum()
    }

    /// Half-open byte range `[start, end)` covered by the grid.
    pub fn byte_range(&self) -> (usize, usize) {
        (self.base_offset, self.base_offset + self.byte_count())
    }

    /// Stable content hash for cheap change detection. Identical grids hash
    /// identically within a process; unequal grids collide only with ahash's
    /// negligible probability, and callers that need certainty compare with
    /// `==` instead.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = ahash::AHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Look up the interactive cell for an absolute byte index in the given
    /// pane, if the grid currently covers it.
    pub fn cell_at(&self, column: PaneColumn, index: usize) -> Option<&Cell> {
        let bpr = self.bytes_per_row.max(1);
        if index < self.base_offset {
            return None;
        }
        let rel = index - self.base_offset;
        let row = self.rows.get(rel / bpr)?;
        let pane = match column {
            PaneColumn::Hex => &row.hex,
            PaneColumn::Ascii => &row.ascii,
        };
        pane.get(rel % bpr).filter(|c| c.is_interactive())
    }
}

/// Payload handed to an injectable cell classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPayload {
    pub column: PaneColumn,
    /// Absolute byte index.
    pub index: usize,
    pub byte: u8,
    /// Absolute row index.
    pub row: usize,
    /// Column within the row (`0..bytes_per_row`).
    pub col: usize,
}
