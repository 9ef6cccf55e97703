//! The window request decision core.
//!
//! One evaluation converts (scroll position, viewport size, chunk geometry,
//! held window) into the byte range that must be visible and, only when the
//! held window does not already cover it, a single `{offset, length}`
//! request. The host applies the request whenever it likes; the coordinator
//! never waits, retries, or times out.
//!
//! Decision rules:
//! * Visible rows expand by the overscan count on both ends, then clamp to
//!   the active chunk's bounds and the total row count.
//! * Zero-length requests are never issued (empty data, unmeasured rows).
//! * A request identical to the immediately preceding one is suppressed;
//!   rapid scrolling within one window therefore issues at most one request
//!   per distinct range.
//! * `scroll_to_byte` resolves immediately when row height is known, else
//!   parks the target and the next evaluation applies it, first switching
//!   chunks when the target row lives outside the active chunk.

use core_geometry::{ChunkMap, row_at_scroll, row_of_byte, rows_in_viewport, rows_to_byte_range};
use tracing::{debug, trace};

/// Fire-and-forget byte range request handed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowRequest {
    pub offset: usize,
    pub length: usize,
}

/// Viewport measurements supplied by the host on every evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewMetrics {
    pub scroll_top_px: f64,
    pub viewport_height_px: f64,
    /// Row height in pixels; non-finite or non-positive means "not measured
    /// yet" and defers all geometry-dependent decisions.
    pub row_height_px: f64,
}

impl ViewMetrics {
    pub fn measured(&self) -> bool {
        self.row_height_px.is_finite() && self.row_height_px > 0.0
    }
}

/// Everything one evaluation decided.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Absolute half-open row range that should be renderable.
    pub desired_rows: (usize, usize),
    /// Half-open byte range for those rows, clamped to total size.
    pub desired_bytes: (usize, usize),
    /// Request to forward to the host, if coverage was insufficient and the
    /// request is not a duplicate of the previous one.
    pub request: Option<WindowRequest>,
    /// New scroll position, present when a parked scroll-to target was
    /// applied this evaluation.
    pub scroll_top_px: Option<f64>,
    /// Whether applying a scroll target switched the active chunk.
    pub chunk_moved: bool,
}

impl Evaluation {
    fn empty() -> Self {
        Self {
            desired_rows: (0, 0),
            desired_bytes: (0, 0),
            request: None,
            scroll_top_px: None,
            chunk_moved: false,
        }
    }
}

/// Decision state surviving between evaluations: the last issued request
/// (for dedupe) and a parked scroll-to target (for pre-measurement calls).
#[derive(Debug, Default)]
pub struct WindowCoordinator {
    last_request: Option<WindowRequest>,
    pending_target: Option<usize>,
}

impl WindowCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target byte offset waiting for geometry, if any.
    pub fn pending_target(&self) -> Option<usize> {
        self.pending_target
    }

    /// Ask for `offset` to be scrolled into view. Returns the resolved
    /// scroll position (and whether the chunk switched) when geometry is
    /// known; otherwise parks the target for the next evaluation.
    pub fn scroll_to_byte(
        &mut self,
        offset: usize,
        chunks: &mut ChunkMap,
        metrics: &ViewMetrics,
        total_size: usize,
        bytes_per_row: usize,
    ) -> Option<(f64, bool)> {
        if !metrics.measured() {
            debug!(target: "window.coordinator", offset, "scroll_to_byte parked (unmeasured)");
            self.pending_target = Some(offset);
            return None;
        }
        self.pending_target = None;
        Some(resolve_target(offset, chunks, metrics, total_size, bytes_per_row))
    }

    /// The core decision function. `window` is the half-open byte range the
    /// engine currently holds.
    pub fn evaluate(
        &mut self,
        chunks: &mut ChunkMap,
        metrics: &ViewMetrics,
        window: (usize, usize),
        total_size: usize,
        bytes_per_row: usize,
        overscan_rows: usize,
    ) -> Evaluation {
        let mut eval = Evaluation::empty();
        if !metrics.measured() {
            // Geometry unknown: nothing to decide yet; a parked target stays
            // parked.
            return eval;
        }

        let mut scroll_top = metrics.scroll_top_px;
        if let Some(target) = self.pending_target.take() {
            let (top, moved) = resolve_target(target, chunks, metrics, total_size, bytes_per_row);
            scroll_top = top;
            eval.scroll_top_px = Some(top);
            eval.chunk_moved = moved;
        }

        let (chunk_start, chunk_end) = chunks.active_row_bounds();
        let first_visible = chunk_start + row_at_scroll(scroll_top, metrics.row_height_px);
        let visible_rows = rows_in_viewport(metrics.viewport_height_px, metrics.row_height_px);
        if visible_rows == 0 {
            return eval;
        }

        let first = first_visible
            .saturating_sub(overscan_rows)
            .max(chunk_start);
        let end = (first_visible + visible_rows + overscan_rows)
            .min(chunk_end)
            .max(first);
        eval.desired_rows = (first, end);
        eval.desired_bytes = rows_to_byte_range(first, end, bytes_per_row, total_size);

        let (want_start, want_end) = eval.desired_bytes;
        if want_end == want_start {
            // Zero-length ranges are never requested.
            return eval;
        }
        let covered = window.0 <= want_start && window.1 >= want_end;
        if covered {
            trace!(
                target: "window.coordinator",
                want_start,
                want_end,
                "window covers desired range"
            );
            return eval;
        }
        let request = WindowRequest {
            offset: want_start,
            length: want_end - want_start,
        };
        if self.last_request == Some(request) {
            trace!(target: "window.coordinator", ?request, "duplicate request suppressed");
            return eval;
        }
        debug!(
            target: "window.coordinator",
            offset = request.offset,
            length = request.length,
            "window request"
        );
        self.last_request = Some(request);
        eval.request = Some(request);
        eval
    }
}

/// Resolve a byte offset to (scroll position within the active chunk,
/// whether the chunk switched). The target row is clamped into the data.
fn resolve_target(
    offset: usize,
    chunks: &mut ChunkMap,
    metrics: &ViewMetrics,
    total_size: usize,
    bytes_per_row: usize,
) -> (f64, bool) {
    let clamped = offset.min(total_size.saturating_sub(1));
    let row = row_of_byte(clamped, bytes_per_row);
    let moved = chunks.ensure_chunk_for_row(row);
    let rel = row.saturating_sub(chunks.chunk_start_row());
    (rel as f64 * metrics.row_height_px, moved)
}

/// Minimal ensure-visible scrolling: returns the new first visible row only
/// when `row` is outside `[first_visible, first_visible + rows_in_view)`,
/// nudging by the least amount rather than re-centering.
pub fn ensure_row_visible(first_visible: usize, row: usize, rows_in_view: usize) -> Option<usize> {
    if rows_in_view == 0 {
        return None;
    }
    if row < first_visible {
        return Some(row);
    }
    if row >= first_visible + rows_in_view {
        return Some(row + 1 - rows_in_view);
    }
    None
}
