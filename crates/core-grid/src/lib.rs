//! Cell-grid render engine.
//!
//! Transforms a byte slice into a positioned grid of cells: a row offset
//! header, one hex cell per byte, one decoded-character cell per byte, and
//! non-interactive placeholder cells padding the final short row. The grid is
//! a plain data structure; presentation layers turn it into whatever visual
//! tree their framework needs; nothing here knows about markup.
//!
//! Contract highlights:
//! * Deterministic: identical inputs regenerate an identical grid
//!   (`PartialEq` holds and [`CellGrid::content_hash`] matches), so callers
//!   can skip expensive redraw when nothing changed.
//! * Every real cell carries its absolute byte index and raw byte value so
//!   hover/selection/cursor logic maps cells back to bytes without re-parsing
//!   any rendered output.
//! * Placeholders are flagged and carry no index; they exist purely so the
//!   final row of the dataset still renders a full-width grid.
//!
//! Value-dependent classification (digit/upper/lower/null by default) is
//! injectable and disableable per [`Classify`].

pub mod builder;
pub mod cell;
pub mod classify;
pub mod hex;

pub use builder::{GridSpec, build_cell_grid, decode_glyph};
pub use cell::{Cell, CellFlags, CellGrid, CellPayload, OffsetLabel, Row};
pub use classify::{Classify, default_classes};
pub use hex::{HexCase, offset_label, write_hex};

/// Which of the two byte panes a cell (or an interaction gesture) belongs to.
///
/// Selection gestures and the editing cursor are pane-scoped: a drag that
/// starts in the hex pane never crosses into the decoded pane and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaneColumn {
    #[default]
    Hex,
    Ascii,
}
