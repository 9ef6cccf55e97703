//! Grid builder: byte slice in, positioned cell grid out.
//!
//! The builder is a pure function of its inputs. It never consults ambient
//! state, so rebuilding with identical inputs yields an identical grid;
//! that determinism is what lets the caller collapse "did anything change"
//! into one equality or hash comparison instead of diffing markup.

use tracing::trace;

use crate::cell::{Cell, CellFlags, CellGrid, CellPayload, Row};
use crate::classify::Classify;
use crate::hex::{HexCase, offset_label, write_hex};
use crate::PaneColumn;

/// Pad text for a hex placeholder (two digit columns wide).
const HEX_PAD: &str = "  ";
/// Pad text for a decoded-pane placeholder.
const ASCII_PAD: &str = " ";

/// All knobs for one grid build. Callers construct with [`GridSpec::new`]
/// and override the fields they care about.
pub struct GridSpec<'a> {
    /// Bytes per row; values below 1 are treated as 1.
    pub bytes_per_row: usize,
    pub case: HexCase,
    /// Substitute glyph for non-printable bytes.
    pub fallback_char: char,
    /// Absolute byte offset of `bytes[0]`; must be row-aligned.
    pub base_offset: usize,
    /// Ordered inclusive selection range, if any.
    pub selection: Option<(usize, usize)>,
    /// Printability predicate; default is visible ASCII (`0x20..=0x7e`).
    pub is_printable: Option<&'a dyn Fn(u8) -> bool>,
    /// Glyph renderer for printable bytes; the first char of the returned
    /// string is used (cells are fixed-width), empty output falls back.
    pub render_glyph: Option<&'a dyn Fn(u8) -> String>,
    pub classifier: Classify<'a>,
}

impl<'a> GridSpec<'a> {
    pub fn new(bytes_per_row: usize, base_offset: usize) -> Self {
        Self {
            bytes_per_row,
            case: HexCase::Lower,
            fallback_char: '.',
            base_offset,
            selection: None,
            is_printable: None,
            render_glyph: None,
            classifier: Classify::Default,
        }
    }

    fn glyph(&self, byte: u8) -> char {
        decode_glyph(byte, self.fallback_char, self.is_printable, self.render_glyph)
    }

    fn selected(&self, index: usize) -> bool {
        match self.selection {
            Some((start, end)) => index >= start && index <= end,
            None => false,
        }
    }
}

/// Decoded-pane glyph for a byte under the given preferences.
///
/// Shared by the grid builder and ascii-mode clipboard serialization so both
/// decode a byte identically. The default printability predicate is visible
/// ASCII; a custom glyph renderer contributes only its first char (cells are
/// fixed-width) and empty output falls back.
pub fn decode_glyph(
    byte: u8,
    fallback: char,
    is_printable: Option<&dyn Fn(u8) -> bool>,
    render_glyph: Option<&dyn Fn(u8) -> String>,
) -> char {
    let printable = match is_printable {
        Some(f) => f(byte),
        None => (0x20..=0x7e).contains(&byte),
    };
    if !printable {
        return fallback;
    }
    match render_glyph {
        Some(f) => f(byte).chars().next().unwrap_or(fallback),
        None => byte as char,
    }
}

/// Build the cell grid for one render slice.
///
/// `bytes` is the slice actually visible (viewport ± overscan intersected
/// with the held window); `spec.base_offset` anchors it in absolute byte
/// space. An empty slice still yields one full-width placeholder row so an
/// empty dataset renders a grid at all.
pub fn build_cell_grid(bytes: &[u8], spec: &GridSpec<'_>) -> CellGrid {
    let bpr = spec.bytes_per_row.max(1);
    debug_assert_eq!(
        spec.base_offset % bpr,
        0,
        "render slices start on row boundaries"
    );
    let first_row = spec.base_offset / bpr;

    let mut rows = Vec::with_capacity(bytes.len().div_ceil(bpr).max(1));
    if bytes.is_empty() {
        rows.push(empty_row(first_row, spec, bpr));
    }
    for (r, chunk) in bytes.chunks(bpr).enumerate() {
        let row_index = first_row + r;
        let row_start = spec.base_offset + r * bpr;
        let mut hex = Vec::with_capacity(bpr);
        let mut ascii = Vec::with_capacity(bpr);
        for col in 0..bpr {
            match chunk.get(col) {
                Some(&byte) => {
                    let index = row_start + col;
                    hex.push(byte_cell(PaneColumn::Hex, index, byte, row_index, col, spec));
                    ascii.push(byte_cell(PaneColumn::Ascii, index, byte, row_index, col, spec));
                }
                None => {
                    hex.push(pad_cell(PaneColumn::Hex, col));
                    ascii.push(pad_cell(PaneColumn::Ascii, col));
                }
            }
        }
        rows.push(Row {
            row: row_index,
            offset: offset_label(row_start, spec.case),
            hex,
            ascii,
        });
    }

    trace!(
        target: "grid.render",
        rows = rows.len(),
        bytes = bytes.len(),
        base_offset = spec.base_offset,
        "build_cell_grid"
    );
    CellGrid {
        base_offset: spec.base_offset,
        bytes_per_row: bpr,
        rows,
    }
}

fn byte_cell(
    column: PaneColumn,
    index: usize,
    byte: u8,
    row: usize,
    col: usize,
    spec: &GridSpec<'_>,
) -> Cell {
    let mut flags = CellFlags::empty();
    if col % 2 == 1 {
        flags |= CellFlags::PARITY_ODD;
    }
    if spec.selected(index) {
        flags |= CellFlags::SELECTED;
    }
    let text = match column {
        PaneColumn::Hex => {
            let mut t = String::with_capacity(2);
            write_hex(&mut t, byte, spec.case);
            t
        }
        PaneColumn::Ascii => spec.glyph(byte).to_string(),
    };
    let payload = CellPayload {
        column,
        index,
        byte,
        row,
        col,
    };
    Cell {
        column,
        index: Some(index),
        byte: Some(byte),
        text,
        flags,
        classes: spec.classifier.classes_for(&payload),
    }
}

fn pad_cell(column: PaneColumn, col: usize) -> Cell {
    let mut flags = CellFlags::PLACEHOLDER;
    if col % 2 == 1 {
        flags |= CellFlags::PARITY_ODD;
    }
    Cell {
        column,
        index: None,
        byte: None,
        text: match column {
            PaneColumn::Hex => HEX_PAD.to_string(),
            PaneColumn::Ascii => ASCII_PAD.to_string(),
        },
        flags,
        classes: Vec::new(),
    }
}

fn empty_row(row_index: usize, spec: &GridSpec<'_>, bpr: usize) -> Row {
    let hex = (0..bpr).map(|c| pad_cell(PaneColumn::Hex, c)).collect();
    let ascii = (0..bpr).map(|c| pad_cell(PaneColumn::Ascii, c)).collect();
    Row {
        row: row_index,
        offset: offset_label(spec.base_offset, spec.case),
        hex,
        ascii,
    }
}
