//! Chunk manager bounding the virtual scroll extent.
//!
//! Browsers and UI toolkits cap how tall a scrollable element may be; for
//! multi-gigabyte sequences the naive `total_rows * row_height` extent blows
//! past that cap. The fix is to split the row space into fixed-capacity
//! *chunks* and only ever expose one chunk's worth of scrollable height. A
//! chunk boundary is always `capacity`-row aligned so a row (and therefore a
//! byte offset) maps to its chunk by integer division.
//!
//! Invariants:
//! * `chunk_start_row()` is a multiple of the capacity whenever chunking is
//!   active, and always lies in `[0, total_rows)`.
//! * With chunking inactive (small extent or unknown row height) there is
//!   exactly one chunk starting at row 0.
//! * `recompute` preserves the active chunk where possible, re-clamping when
//!   the extent shrank underneath it.
//!
//! There are no failure states: out-of-range chunk indices and rows clamp.

use tracing::trace;

/// Default ceiling for the scrollable extent, in pixels. Matches the
/// conservative end of what mainstream browser engines tolerate before
/// element heights saturate.
pub const DEFAULT_MAX_VIRTUAL_HEIGHT_PX: f64 = 4_000_000.0;

/// Chunk state for the current geometry. Rebuilt via [`ChunkMap::recompute`]
/// whenever total size, row height, or bytes-per-row changes; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkMap {
    chunk_start_row: usize,
    capacity: Option<usize>,
    total_rows: usize,
    count: usize,
}

impl Default for ChunkMap {
    fn default() -> Self {
        Self::empty()
    }
}

impl ChunkMap {
    /// Chunk state for an empty sequence: one chunk, one empty row.
    pub fn empty() -> Self {
        Self {
            chunk_start_row: 0,
            capacity: None,
            total_rows: 1,
            count: 1,
        }
    }

    /// Rebuild chunk geometry from current inputs, preserving the active
    /// chunk when it still exists.
    pub fn recompute(
        &mut self,
        total_size: usize,
        bytes_per_row: usize,
        max_virtual_height_px: f64,
        row_height_px: f64,
    ) {
        let total_rows = super::total_rows(total_size, bytes_per_row);
        let capacity = super::row_capacity(max_virtual_height_px, row_height_px);
        let previous_start = self.chunk_start_row;

        self.total_rows = total_rows;
        match capacity {
            Some(cap) if total_rows > cap => {
                self.capacity = Some(cap);
                self.count = total_rows.div_ceil(cap);
                self.chunk_start_row = self.clamp_chunk_start(previous_start);
            }
            _ => {
                self.capacity = capacity;
                self.count = 1;
                self.chunk_start_row = 0;
            }
        }
        trace!(
            target: "geometry.chunks",
            total_rows,
            capacity = ?self.capacity,
            count = self.count,
            start = self.chunk_start_row,
            "recompute"
        );
    }

    /// Whether the extent is actually split (more than one chunk).
    pub fn is_chunked(&self) -> bool {
        self.count > 1
    }

    /// Rows per chunk, when known. `None` means row height has not been
    /// measured yet and every geometry consumer should defer.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn chunk_start_row(&self) -> usize {
        self.chunk_start_row
    }

    /// Index of the active chunk.
    pub fn active_index(&self) -> usize {
        match self.capacity {
            Some(cap) if self.is_chunked() => self.chunk_start_row / cap,
            _ => 0,
        }
    }

    /// Half-open row bounds `[start, end)` of the active chunk.
    pub fn active_row_bounds(&self) -> (usize, usize) {
        match self.capacity {
            Some(cap) if self.is_chunked() => (
                self.chunk_start_row,
                (self.chunk_start_row + cap).min(self.total_rows),
            ),
            _ => (0, self.total_rows),
        }
    }

    /// Snap `row` down to its chunk boundary and clamp into `[0, total_rows)`.
    pub fn clamp_chunk_start(&self, row: usize) -> usize {
        match self.capacity {
            Some(cap) if self.is_chunked() => {
                let clamped = row.min(self.total_rows.saturating_sub(1));
                (clamped / cap) * cap
            }
            _ => 0,
        }
    }

    /// Activate the chunk at `index` (clamped). Returns whether the active
    /// chunk changed.
    pub fn move_to_chunk(&mut self, index: usize) -> bool {
        let Some(cap) = self.capacity else {
            return false;
        };
        if !self.is_chunked() {
            return false;
        }
        let clamped = index.min(self.count - 1);
        let new_start = self.clamp_chunk_start(clamped * cap);
        let changed = new_start != self.chunk_start_row;
        if changed {
            trace!(
                target: "geometry.chunks",
                from = self.chunk_start_row,
                to = new_start,
                index = clamped,
                "move_to_chunk"
            );
            self.chunk_start_row = new_start;
        }
        changed
    }

    /// Ensure the chunk containing `row` is active. Returns whether the
    /// active chunk changed.
    pub fn ensure_chunk_for_row(&mut self, row: usize) -> bool {
        let Some(cap) = self.capacity else {
            return false;
        };
        if !self.is_chunked() {
            return false;
        }
        let clamped = row.min(self.total_rows.saturating_sub(1));
        self.move_to_chunk(clamped / cap)
    }
}
