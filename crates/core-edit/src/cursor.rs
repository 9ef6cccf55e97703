//! Single-index cursor.
//!
//! The cursor addresses `[0, total_size]` inclusive: the one-past-the-end
//! ghost position is a legal cursor location (it is how insert-mode append
//! works) even though it is never a selection endpoint. All movement is
//! clamped; change reporting is exact so notification fan-out fires only
//! when the value actually differs.

use tracing::trace;

/// Navigation directions the cursor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
}

/// Optional byte-index cursor, host-controllable or self-managed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CursorState {
    index: Option<usize>,
}

impl CursorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<usize> {
        self.index
    }

    /// Set (or clear) the cursor, clamping to `[0, total_size]`. Returns
    /// whether the value changed.
    pub fn set(&mut self, index: Option<usize>, total_size: usize) -> bool {
        let clamped = index.map(|i| i.min(total_size));
        let changed = clamped != self.index;
        if changed {
            trace!(target: "edit.cursor", from = ?self.index, to = ?clamped, "cursor_set");
            self.index = clamped;
        }
        changed
    }

    /// Apply a navigation motion. A `None` cursor stays `None`; motions
    /// only move an existing cursor. Returns whether the value changed.
    pub fn step(&mut self, motion: Motion, bytes_per_row: usize, total_size: usize) -> bool {
        let Some(current) = self.index else {
            return false;
        };
        let bpr = bytes_per_row.max(1);
        let next = match motion {
            Motion::Left => current.saturating_sub(1),
            Motion::Right => current.saturating_add(1),
            Motion::Up => current.saturating_sub(bpr),
            Motion::Down => current.saturating_add(bpr),
        };
        self.set(Some(next), total_size)
    }

    /// Re-clamp after the data shrank underneath the cursor.
    pub fn reclamp(&mut self, total_size: usize) -> bool {
        self.set(self.index, total_size)
    }
}
