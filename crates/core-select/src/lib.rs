//! Selection state machine and clipboard serialization.
//!
//! A selection is an anchor/focus pair scoped to one pane: the gesture that
//! creates it fixes the mode (hex or ascii) for its whole lifetime, so a drag
//! that starts over hex digits never captures decoded-pane cells. Publicly
//! the selection is always the *ordered* inclusive range; anchor/focus
//! ordering is an implementation detail of the gesture.
//!
//! Invariants:
//! * The ghost one-past-the-end position is never a valid endpoint; every
//!   entry point rejects or clamps it.
//! * `range()` re-clamps against the current total size on every access, so
//!   a selection never outlives the bytes it referred to.
//! * Mode is fixed per gesture; cross-pane pointer moves are ignored.

use core_grid::PaneColumn;
use tracing::trace;

pub mod copy;
pub use copy::{CopyOptions, clipboard_text};

/// Ordered inclusive byte range exposed to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelRange {
    pub start: usize,
    pub end: usize,
}

impl SelRange {
    /// Number of selected bytes (`end` is inclusive, so never zero).
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Active {
        anchor: usize,
        focus: usize,
        mode: PaneColumn,
        dragging: bool,
        /// The focus actually moved during this drag. A pure click (down+up
        /// on one cell, no movement) is cursor placement, not a selection,
        /// and dissolves on pointer-up.
        moved: bool,
    },
}

/// Anchor/focus selection machine. One instance per engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionMachine {
    state: State,
}

impl Default for SelectionMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionMachine {
    pub fn new() -> Self {
        Self { state: State::Idle }
    }

    /// Begin a drag gesture on a valid cell. Ghost/out-of-range indices are
    /// rejected (the gesture simply does not start). Returns whether the
    /// exposed range changed.
    pub fn pointer_down(&mut self, index: usize, mode: PaneColumn, total_size: usize) -> bool {
        if index >= total_size {
            return self.clear();
        }
        let before = self.raw_range();
        self.state = State::Active {
            anchor: index,
            focus: index,
            mode,
            dragging: true,
            moved: false,
        };
        trace!(target: "select.machine", index, ?mode, "drag_start");
        before != self.raw_range()
    }

    /// Update the focus while dragging. Only cells of the gesture's own mode
    /// participate; crossing into the other pane is ignored.
    pub fn pointer_move(&mut self, index: usize, mode: PaneColumn, total_size: usize) -> bool {
        let State::Active {
            focus,
            mode: gesture_mode,
            dragging: true,
            moved,
            ..
        } = &mut self.state
        else {
            return false;
        };
        if mode != *gesture_mode || index >= total_size {
            return false;
        }
        if *focus == index {
            return false;
        }
        *focus = index;
        *moved = true;
        true
    }

    /// End the drag. A drag that never moved dissolves (a click places the
    /// cursor; it does not select the byte under it); anything else settles
    /// and is retained. Returns whether the exposed range changed.
    pub fn pointer_up(&mut self) -> bool {
        match self.state {
            State::Active {
                dragging: true,
                moved: false,
                anchor,
                focus,
                ..
            } if anchor == focus => {
                self.state = State::Idle;
                trace!(target: "select.machine", "click_dissolved");
                true
            }
            State::Active { dragging: true, .. } => {
                if let State::Active { dragging, .. } = &mut self.state {
                    *dragging = false;
                }
                false
            }
            _ => false,
        }
    }

    /// Shift+click (or Shift+navigation): extend the focus without moving the
    /// anchor. With no live selection the anchor comes from the cursor when
    /// one exists, else from the clicked cell itself.
    pub fn shift_extend(
        &mut self,
        index: usize,
        mode: PaneColumn,
        cursor: Option<usize>,
        total_size: usize,
    ) -> bool {
        if index >= total_size {
            return false;
        }
        match &mut self.state {
            State::Active {
                focus,
                mode: gesture_mode,
                ..
            } => {
                if mode != *gesture_mode || *focus == index {
                    return false;
                }
                *focus = index;
                true
            }
            State::Idle => {
                let anchor = cursor
                    .filter(|&c| c < total_size)
                    .unwrap_or(index);
                self.state = State::Active {
                    anchor,
                    focus: index,
                    mode,
                    dragging: false,
                    moved: true,
                };
                trace!(target: "select.machine", anchor, focus = index, ?mode, "shift_extend_start");
                true
            }
        }
    }

    /// Select the whole data range (Ctrl/Cmd+A). No-op on an empty sequence.
    pub fn select_all(&mut self, mode: PaneColumn, total_size: usize) -> bool {
        if total_size == 0 {
            return self.clear();
        }
        let before = self.raw_range();
        self.state = State::Active {
            anchor: 0,
            focus: total_size - 1,
            mode,
            dragging: false,
            moved: true,
        };
        trace!(target: "select.machine", total_size, "select_all");
        before != self.raw_range()
    }

    /// Drop the selection (Escape, click-away, or explicit clear). Returns
    /// whether anything was dropped.
    pub fn clear(&mut self) -> bool {
        let had = matches!(self.state, State::Active { .. });
        self.state = State::Idle;
        had
    }

    pub fn is_dragging(&self) -> bool {
        matches!(
            self.state,
            State::Active { dragging: true, .. }
        )
    }

    /// Pane the live gesture is scoped to, if a selection exists.
    pub fn mode(&self) -> Option<PaneColumn> {
        match self.state {
            State::Active { mode, .. } => Some(mode),
            State::Idle => None,
        }
    }

    fn raw_range(&self) -> Option<SelRange> {
        match self.state {
            State::Active { anchor, focus, .. } => Some(SelRange {
                start: anchor.min(focus),
                end: anchor.max(focus),
            }),
            State::Idle => None,
        }
    }

    /// Ordered inclusive range, re-clamped against the current total size.
    /// A selection that no longer intersects the data reads as `None`.
    pub fn range(&self, total_size: usize) -> Option<SelRange> {
        let raw = self.raw_range()?;
        if total_size == 0 || raw.start >= total_size {
            return None;
        }
        Some(SelRange {
            start: raw.start,
            end: raw.end.min(total_size - 1),
        })
    }
}
