//! The editing state machine.
//!
//! Holds the pieces that make byte editing feel like text editing: the
//! active pane, overwrite/insert mode, the half-entered hex nibble, the
//! cursor, and the history log. Input arrives as [`EditorAction`] values
//! (already translated from raw keys); output is an [`EditOutcome`] carrying
//! the emitted intents plus flags the engine uses to refresh the grid,
//! clear the selection machine, and schedule ensure-visible scrolling.
//!
//! Selection precedence: any destructive action (character entry, paste,
//! Backspace, Delete) first collapses an active selection into a single
//! `DeleteRange` intent and proceeds from the collapsed cursor. The collapse
//! and the follow-on edit belong to one user action, so in self-managed mode
//! they are committed as one history entry, so undo restores both.
//!
//! Nibble entry: the first hex digit is only provisional state keyed to the
//! cursor's byte index; navigation, blur, or any index change discards it
//! and no intent is ever emitted for a half pair.

use core_grid::{HexCase, PaneColumn};
use core_select::SelRange;
use tracing::trace;

use crate::cursor::{CursorState, Motion};
use crate::history::{HistoryEntry, HistoryLog};
use crate::intent::{DeleteDirection, EditIntent};
use crate::keymap::EditorAction;
use crate::paste::{ascii_bytes, parse_hex_pairs};
use crate::store::ByteStore;

/// Overwrite replaces the byte under the cursor; insert splices before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Overwrite,
    Insert,
}

/// A half-entered hex pair, keyed to the byte index it was typed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingNibble {
    pub index: usize,
    /// High nibble value `0..=15`.
    pub high: u8,
}

impl PendingNibble {
    /// Provisional cell text (`"a_"`) shown while the pair is incomplete.
    pub fn provisional_text(&self, case: HexCase) -> String {
        let digit = char::from_digit(self.high as u32, 16).unwrap_or('0');
        let digit = match case {
            HexCase::Lower => digit,
            HexCase::Upper => digit.to_ascii_uppercase(),
        };
        format!("{digit}_")
    }
}

/// Inputs the controller needs per call but does not own.
#[derive(Debug, Clone, Copy)]
pub struct EditCtx {
    pub total_size: usize,
    pub bytes_per_row: usize,
    /// Current ordered selection, if any (the controller collapses it; the
    /// engine owns the machine and clears it when told to).
    pub selection: Option<SelRange>,
}

/// What one action did, for the engine to fan out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditOutcome {
    /// Intents emitted by this action, in application order. Forwarded to
    /// observers regardless of mode.
    pub intents: Vec<EditIntent>,
    /// Grid content or provisional display changed.
    pub dirty: bool,
    pub cursor_moved: bool,
    /// The engine must clear the selection machine (it was collapsed or
    /// dismissed).
    pub selection_cleared: bool,
    /// Byte index the viewport should minimally scroll to reveal.
    pub ensure_visible: Option<usize>,
}

impl EditOutcome {
    fn none() -> Self {
        Self::default()
    }
}

/// Cursor + editing state machine. One instance per engine.
#[derive(Debug, Default)]
pub struct EditController {
    column: PaneColumn,
    mode: EditorMode,
    pending: Option<PendingNibble>,
    cursor: CursorState,
    history: HistoryLog,
}

impl EditController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(&self) -> PaneColumn {
        self.column
    }

    /// Activate a pane (cell click). Switching panes discards any pending
    /// nibble. Returns whether provisional display changed.
    pub fn set_column(&mut self, column: PaneColumn) -> bool {
        let discarded = if column != self.column {
            self.cancel_pending()
        } else {
            false
        };
        self.column = column;
        discarded
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor.get()
    }

    pub fn pending(&self) -> Option<PendingNibble> {
        self.pending
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Host- or click-driven cursor placement. An index change discards a
    /// pending nibble.
    pub fn set_cursor(&mut self, index: Option<usize>, total_size: usize) -> EditOutcome {
        let mut out = EditOutcome::none();
        out.cursor_moved = self.cursor.set(index, total_size);
        if out.cursor_moved && self.cancel_pending() {
            out.dirty = true;
        }
        if let Some(i) = self.cursor.get()
            && out.cursor_moved
        {
            out.ensure_visible = Some(i);
        }
        out
    }

    /// Focus left the grid: a half-entered pair is discarded.
    pub fn handle_blur(&mut self) -> EditOutcome {
        let mut out = EditOutcome::none();
        out.dirty = self.cancel_pending();
        out
    }

    /// Apply one translated action. `store` is `Some` in self-managed mode.
    pub fn handle_action(
        &mut self,
        action: EditorAction,
        ctx: EditCtx,
        mut store: Option<&mut ByteStore>,
    ) -> EditOutcome {
        match action {
            EditorAction::Move(motion) | EditorAction::ExtendSelection(motion) => {
                self.handle_motion(motion, ctx)
            }
            EditorAction::HexDigit(digit) => self.handle_hex_digit(digit, ctx, &mut store),
            EditorAction::Ascii(c) => self.handle_ascii(c, ctx, &mut store),
            EditorAction::Backspace => {
                self.handle_delete_key(DeleteDirection::Backward, ctx, &mut store)
            }
            EditorAction::Delete => {
                self.handle_delete_key(DeleteDirection::Forward, ctx, &mut store)
            }
            EditorAction::Escape => {
                let mut out = EditOutcome::none();
                out.dirty = self.cancel_pending();
                out.selection_cleared = ctx.selection.is_some();
                out
            }
            EditorAction::ToggleEditorMode => {
                self.mode = match self.mode {
                    EditorMode::Overwrite => EditorMode::Insert,
                    EditorMode::Insert => EditorMode::Overwrite,
                };
                trace!(target: "edit.dispatch", mode = ?self.mode, "toggle_mode");
                EditOutcome::none()
            }
            EditorAction::Undo => self.handle_undo(&mut store),
            EditorAction::Redo => self.handle_redo(&mut store),
            // Selection-level shortcuts are dispatched by the engine, which
            // owns the selection machine and the clipboard port.
            EditorAction::SelectAll | EditorAction::Copy | EditorAction::Paste => {
                EditOutcome::none()
            }
        }
    }

    /// Apply pasted clipboard text. Parsing happens before any state change:
    /// a malformed hex paste leaves everything (including the selection)
    /// untouched.
    pub fn paste_text(
        &mut self,
        text: &str,
        ctx: EditCtx,
        mut store: Option<&mut ByteStore>,
    ) -> EditOutcome {
        let values = match self.column {
            PaneColumn::Hex => match parse_hex_pairs(text) {
                Some(v) => v,
                None => {
                    trace!(target: "edit.dispatch", len = text.len(), "paste_rejected");
                    return EditOutcome::none();
                }
            },
            PaneColumn::Ascii => ascii_bytes(text),
        };
        if values.is_empty() {
            return EditOutcome::none();
        }

        let mut out = EditOutcome::none();
        out.dirty |= self.cancel_pending();
        let mut intents = Vec::new();
        let (cursor0, total) = self.collapse_selection(ctx, &mut intents, &mut out);
        let Some(cursor) = cursor0 else {
            return out;
        };

        let values = match self.mode {
            EditorMode::Insert => values,
            EditorMode::Overwrite => {
                let room = total.saturating_sub(cursor);
                let mut v = values;
                v.truncate(room);
                v
            }
        };
        let advance = values.len();
        if !values.is_empty() {
            intents.push(match self.mode {
                EditorMode::Insert => EditIntent::InsertBytes {
                    index: cursor,
                    values,
                },
                EditorMode::Overwrite => EditIntent::OverwriteBytes {
                    index: cursor,
                    values,
                },
            });
        }
        if intents.is_empty() {
            return out;
        }

        let cursor_after = cursor + advance;
        let new_total = match self.mode {
            EditorMode::Insert => total + advance,
            EditorMode::Overwrite => total,
        };
        self.commit(&intents, &mut store, self.cursor.get(), Some(cursor_after));
        out.cursor_moved |= self.cursor.set(Some(cursor_after), new_total);
        out.intents = intents;
        out.dirty = true;
        out.ensure_visible = self.cursor.get();
        trace!(target: "edit.dispatch", op = "paste", bytes = advance, "edit");
        out
    }

    // ---------------------------------------------------------------------
    // Action handlers
    // ---------------------------------------------------------------------

    fn handle_motion(&mut self, motion: Motion, ctx: EditCtx) -> EditOutcome {
        let mut out = EditOutcome::none();
        out.dirty = self.cancel_pending();
        out.cursor_moved = self.cursor.step(motion, ctx.bytes_per_row, ctx.total_size);
        if let Some(i) = self.cursor.get() {
            out.ensure_visible = Some(i);
        }
        out
    }

    fn handle_hex_digit(
        &mut self,
        digit: u8,
        ctx: EditCtx,
        store: &mut Option<&mut ByteStore>,
    ) -> EditOutcome {
        debug_assert!(digit <= 0x0f, "keymap emits nibble values");
        if self.column != PaneColumn::Hex {
            return EditOutcome::none();
        }
        let mut out = EditOutcome::none();

        // An active selection collapses first; the nibble then begins at the
        // collapsed cursor. The collapse commits on its own; the pair is
        // not complete yet, so there is no byte write to group with it.
        let mut intents = Vec::new();
        let (cursor0, total) = self.collapse_selection(ctx, &mut intents, &mut out);
        if !intents.is_empty() {
            self.commit(&intents, store, self.cursor.get(), cursor0);
            if let Some(c) = cursor0 {
                out.cursor_moved |= self.cursor.set(Some(c), total);
            }
            out.intents.extend(intents);
            out.dirty = true;
        }
        let Some(cursor) = cursor0 else {
            return out;
        };

        match self.pending {
            Some(p) if p.index == cursor => {
                // Second digit completes the pair.
                let value = (p.high << 4) | digit;
                self.pending = None;
                let intent = match self.mode {
                    EditorMode::Overwrite => EditIntent::OverwriteByte {
                        index: cursor,
                        value,
                    },
                    EditorMode::Insert => EditIntent::InsertByte {
                        index: cursor,
                        value,
                    },
                };
                let cursor_after = cursor + 1;
                let new_total = match self.mode {
                    EditorMode::Overwrite => total,
                    EditorMode::Insert => total + 1,
                };
                let pair = vec![intent];
                self.commit(&pair, store, Some(cursor), Some(cursor_after));
                out.cursor_moved |= self.cursor.set(Some(cursor_after), new_total);
                out.intents.extend(pair);
                out.dirty = true;
                out.ensure_visible = self.cursor.get();
                trace!(target: "edit.dispatch", op = "hex_pair", index = cursor, value, "edit");
            }
            _ => {
                // First digit: provisional only. Overwrite mode needs a real
                // byte under the cursor; insert mode may start at the ghost
                // position (append).
                if matches!(self.mode, EditorMode::Overwrite) && cursor >= total {
                    return out;
                }
                self.pending = Some(PendingNibble {
                    index: cursor,
                    high: digit,
                });
                out.dirty = true;
                trace!(target: "edit.dispatch", op = "nibble_start", index = cursor, "edit");
            }
        }
        out
    }

    fn handle_ascii(
        &mut self,
        c: char,
        ctx: EditCtx,
        store: &mut Option<&mut ByteStore>,
    ) -> EditOutcome {
        if self.column != PaneColumn::Ascii {
            return EditOutcome::none();
        }
        let mut out = EditOutcome::none();
        out.dirty |= self.cancel_pending();

        let mut intents = Vec::new();
        let (cursor0, total) = self.collapse_selection(ctx, &mut intents, &mut out);
        let Some(cursor) = cursor0 else {
            return out;
        };
        let value = (c as u32).min(255) as u8;
        if matches!(self.mode, EditorMode::Overwrite) && cursor >= total {
            // Nothing under the cursor to overwrite; the collapse (if any)
            // still commits below.
            if intents.is_empty() {
                return out;
            }
            self.commit(&intents, store, self.cursor.get(), Some(cursor));
            out.cursor_moved |= self.cursor.set(Some(cursor), total);
            out.intents = intents;
            out.dirty = true;
            return out;
        }
        intents.push(match self.mode {
            EditorMode::Overwrite => EditIntent::OverwriteByte {
                index: cursor,
                value,
            },
            EditorMode::Insert => EditIntent::InsertByte {
                index: cursor,
                value,
            },
        });
        let cursor_after = cursor + 1;
        let new_total = match self.mode {
            EditorMode::Overwrite => total,
            EditorMode::Insert => total + 1,
        };
        self.commit(&intents, store, self.cursor.get(), Some(cursor_after));
        out.cursor_moved |= self.cursor.set(Some(cursor_after), new_total);
        out.intents = intents;
        out.dirty = true;
        out.ensure_visible = self.cursor.get();
        trace!(target: "edit.dispatch", op = "ascii_entry", index = cursor, value, "edit");
        out
    }

    fn handle_delete_key(
        &mut self,
        direction: DeleteDirection,
        ctx: EditCtx,
        store: &mut Option<&mut ByteStore>,
    ) -> EditOutcome {
        let mut out = EditOutcome::none();
        out.dirty |= self.cancel_pending();

        // Selection precedence: the whole range collapses as one intent and
        // the single-byte delete below never happens.
        let mut intents = Vec::new();
        let (cursor0, total) = self.collapse_selection(ctx, &mut intents, &mut out);
        if !intents.is_empty() {
            self.commit(&intents, store, self.cursor.get(), cursor0);
            if let Some(c) = cursor0 {
                out.cursor_moved |= self.cursor.set(Some(c), total);
            }
            out.intents = intents;
            out.dirty = true;
            out.ensure_visible = self.cursor.get();
            return out;
        }
        let Some(cursor) = self.cursor.get() else {
            return out;
        };

        let (index, cursor_after) = match direction {
            DeleteDirection::Backward => {
                if cursor == 0 {
                    return out; // boundary no-op
                }
                (cursor - 1, cursor - 1)
            }
            DeleteDirection::Forward => {
                if cursor >= ctx.total_size {
                    return out; // boundary no-op at the ghost position
                }
                (cursor, cursor)
            }
        };
        if index >= ctx.total_size {
            return out;
        }
        let delete = vec![EditIntent::DeleteByte { index, direction }];
        let new_total = ctx.total_size - 1;
        self.commit(&delete, store, Some(cursor), Some(cursor_after));
        out.cursor_moved |= self.cursor.set(Some(cursor_after), new_total);
        out.intents = delete;
        out.dirty = true;
        out.ensure_visible = self.cursor.get();
        trace!(target: "edit.dispatch", op = "delete_byte", index, ?direction, "edit");
        out
    }

    fn handle_undo(&mut self, store: &mut Option<&mut ByteStore>) -> EditOutcome {
        let mut out = EditOutcome::none();
        out.dirty |= self.cancel_pending();
        match store.as_deref_mut() {
            Some(store) => {
                if let Some(entry) = self.history.pop_undo() {
                    for intent in &entry.undo_intents {
                        store.apply(intent);
                    }
                    out.cursor_moved = self.cursor.set(entry.cursor_before, store.len());
                    out.intents = entry.undo_intents;
                    out.dirty = true;
                    out.ensure_visible = self.cursor.get();
                }
            }
            None => {
                // Windowed mode: the host owns history.
                out.intents.push(EditIntent::Undo);
            }
        }
        out
    }

    fn handle_redo(&mut self, store: &mut Option<&mut ByteStore>) -> EditOutcome {
        let mut out = EditOutcome::none();
        out.dirty |= self.cancel_pending();
        match store.as_deref_mut() {
            Some(store) => {
                if let Some(entry) = self.history.pop_redo() {
                    for intent in &entry.redo_intents {
                        store.apply(intent);
                    }
                    out.cursor_moved = self.cursor.set(entry.cursor_after, store.len());
                    out.intents = entry.redo_intents;
                    out.dirty = true;
                    out.ensure_visible = self.cursor.get();
                }
            }
            None => {
                out.intents.push(EditIntent::Redo);
            }
        }
        out
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn cancel_pending(&mut self) -> bool {
        if self.pending.take().is_some() {
            trace!(target: "edit.dispatch", "nibble_discarded");
            return true;
        }
        false
    }

    /// If a selection is active, append its `DeleteRange` collapse to
    /// `intents` and return the post-collapse `(cursor, total_size)`. With
    /// no selection, returns the current cursor and total unchanged.
    fn collapse_selection(
        &mut self,
        ctx: EditCtx,
        intents: &mut Vec<EditIntent>,
        out: &mut EditOutcome,
    ) -> (Option<usize>, usize) {
        match ctx.selection {
            Some(range) => {
                intents.push(EditIntent::DeleteRange {
                    start: range.start,
                    end: range.end,
                });
                out.selection_cleared = true;
                (Some(range.start), ctx.total_size - range.len())
            }
            None => (self.cursor.get(), ctx.total_size),
        }
    }

    /// Apply intents to the store (self-managed only) and record one history
    /// entry for the whole action. Inverses are computed against the
    /// evolving pre-application state and reversed, so undoing replays them
    /// in the correct order.
    fn commit(
        &mut self,
        intents: &[EditIntent],
        store: &mut Option<&mut ByteStore>,
        cursor_before: Option<usize>,
        cursor_after: Option<usize>,
    ) {
        let Some(store) = store.as_deref_mut() else {
            return;
        };
        let mut undo_intents = Vec::with_capacity(intents.len());
        let mut redo_intents = Vec::with_capacity(intents.len());
        for intent in intents {
            if let Some(inverse) = store.invert(intent) {
                undo_intents.push(inverse);
                redo_intents.push(intent.clone());
            }
            store.apply(intent);
        }
        undo_intents.reverse();
        self.history.push(HistoryEntry {
            undo_intents,
            redo_intents,
            cursor_before,
            cursor_after,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_for(store: &ByteStore, bpr: usize) -> EditCtx {
        EditCtx {
            total_size: store.len(),
            bytes_per_row: bpr,
            selection: None,
        }
    }

    fn with_selection(ctx: EditCtx, start: usize, end: usize) -> EditCtx {
        EditCtx {
            selection: Some(SelRange { start, end }),
            ..ctx
        }
    }

    #[test]
    fn two_nibble_entry_overwrites_and_advances() {
        let mut store = ByteStore::from_bytes(vec![0; 8]);
        let mut ed = EditController::new();
        ed.set_cursor(Some(4), store.len());

        let ctx = ctx_for(&store, 16);
        let out = ed.handle_action(EditorAction::HexDigit(0xa), ctx, Some(&mut store));
        assert!(out.intents.is_empty(), "first nibble is provisional only");
        assert_eq!(ed.pending().unwrap().provisional_text(HexCase::Lower), "a_");

        let out = ed.handle_action(EditorAction::HexDigit(0xf), ctx, Some(&mut store));
        assert_eq!(
            out.intents,
            vec![EditIntent::OverwriteByte { index: 4, value: 0xaf }]
        );
        assert_eq!(store.bytes()[4], 0xaf);
        assert_eq!(ed.cursor(), Some(5));
        assert_eq!(ed.pending(), None);
    }

    #[test]
    fn navigation_discards_half_entered_nibble() {
        let mut store = ByteStore::from_bytes(vec![0x11; 4]);
        let mut ed = EditController::new();
        ed.set_cursor(Some(1), store.len());
        let ctx = ctx_for(&store, 16);
        ed.handle_action(EditorAction::HexDigit(0xc), ctx, Some(&mut store));
        assert!(ed.pending().is_some());

        let out = ed.handle_action(EditorAction::Move(Motion::Right), ctx, Some(&mut store));
        assert!(out.dirty, "provisional glyph restored");
        assert_eq!(ed.pending(), None);
        assert_eq!(store.bytes(), &[0x11; 4], "no intent for a half pair");
        assert_eq!(ed.undo_depth(), 0);
    }

    #[test]
    fn insert_mode_hex_pair_splices() {
        let mut store = ByteStore::from_bytes(vec![1, 2]);
        let mut ed = EditController::new();
        ed.set_cursor(Some(1), store.len());
        ed.handle_action(
            EditorAction::ToggleEditorMode,
            ctx_for(&store, 16),
            Some(&mut store),
        );
        assert_eq!(ed.mode(), EditorMode::Insert);

        let ctx = ctx_for(&store, 16);
        ed.handle_action(EditorAction::HexDigit(0x0), ctx, Some(&mut store));
        let out = ed.handle_action(EditorAction::HexDigit(0x5), ctx, Some(&mut store));
        assert_eq!(
            out.intents,
            vec![EditIntent::InsertByte { index: 1, value: 0x05 }]
        );
        assert_eq!(store.bytes(), &[1, 5, 2]);
        assert_eq!(ed.cursor(), Some(2));
    }

    #[test]
    fn insert_mode_appends_at_ghost_position() {
        let mut store = ByteStore::from_bytes(vec![9]);
        let mut ed = EditController::new();
        ed.set_cursor(Some(1), store.len()); // ghost
        ed.handle_action(
            EditorAction::ToggleEditorMode,
            ctx_for(&store, 16),
            Some(&mut store),
        );
        let ctx = ctx_for(&store, 16);
        ed.handle_action(EditorAction::HexDigit(0xf), ctx, Some(&mut store));
        ed.handle_action(EditorAction::HexDigit(0xf), ctx, Some(&mut store));
        assert_eq!(store.bytes(), &[9, 0xff]);
    }

    #[test]
    fn overwrite_at_ghost_is_rejected() {
        let mut store = ByteStore::from_bytes(vec![9]);
        let mut ed = EditController::new();
        ed.set_cursor(Some(1), store.len());
        let ctx = ctx_for(&store, 16);
        let out = ed.handle_action(EditorAction::HexDigit(0xf), ctx, Some(&mut store));
        assert!(!out.dirty);
        assert_eq!(ed.pending(), None);
    }

    #[test]
    fn ascii_entry_is_single_keystroke() {
        let mut store = ByteStore::from_bytes(vec![0; 3]);
        let mut ed = EditController::new();
        ed.set_column(PaneColumn::Ascii);
        ed.set_cursor(Some(0), store.len());
        let ctx = ctx_for(&store, 16);
        let out = ed.handle_action(EditorAction::Ascii('A'), ctx, Some(&mut store));
        assert_eq!(
            out.intents,
            vec![EditIntent::OverwriteByte { index: 0, value: 65 }]
        );
        assert_eq!(ed.cursor(), Some(1));
        // Code points beyond one byte clamp.
        let ctx = ctx_for(&store, 16);
        let out = ed.handle_action(EditorAction::Ascii('\u{4e16}'), ctx, Some(&mut store));
        assert_eq!(
            out.intents,
            vec![EditIntent::OverwriteByte { index: 1, value: 255 }]
        );
    }

    #[test]
    fn paste_insert_scenario() {
        // editorMode=insert, cursor 2 of [0,1,2,3], paste ascii "AB".
        let mut store = ByteStore::from_bytes(vec![0, 1, 2, 3]);
        let mut ed = EditController::new();
        ed.set_column(PaneColumn::Ascii);
        ed.set_cursor(Some(2), store.len());
        ed.handle_action(
            EditorAction::ToggleEditorMode,
            ctx_for(&store, 16),
            Some(&mut store),
        );
        let ctx = ctx_for(&store, 16);
        let out = ed.paste_text("AB", ctx, Some(&mut store));
        assert_eq!(
            out.intents,
            vec![EditIntent::InsertBytes { index: 2, values: vec![65, 66] }]
        );
        assert_eq!(store.bytes(), &[0, 1, 65, 66, 2, 3]);
        assert_eq!(ed.cursor(), Some(4));
    }

    #[test]
    fn malformed_hex_paste_changes_nothing() {
        let mut store = ByteStore::from_bytes(vec![0, 1, 2, 3]);
        let mut ed = EditController::new();
        ed.set_cursor(Some(0), store.len());
        let ctx = with_selection(ctx_for(&store, 16), 1, 2);
        let out = ed.paste_text("41 4z", ctx, Some(&mut store));
        assert_eq!(out, EditOutcome::none());
        assert_eq!(store.bytes(), &[0, 1, 2, 3]);
        assert!(!out.selection_cleared, "failed paste leaves selection alone");

        let out = ed.paste_text("414", ctx, Some(&mut store));
        assert_eq!(out, EditOutcome::none(), "odd digit count rejected");
    }

    #[test]
    fn hex_paste_overwrites_and_clamps_to_end() {
        let mut store = ByteStore::from_bytes(vec![0, 1, 2, 3]);
        let mut ed = EditController::new();
        ed.set_cursor(Some(2), store.len());
        let ctx = ctx_for(&store, 16);
        let out = ed.paste_text("aa bb cc", ctx, Some(&mut store));
        assert_eq!(
            out.intents,
            vec![EditIntent::OverwriteBytes { index: 2, values: vec![0xaa, 0xbb] }]
        );
        assert_eq!(store.bytes(), &[0, 1, 0xaa, 0xbb]);
        assert_eq!(ed.cursor(), Some(4), "cursor advances over applied bytes");
    }

    #[test]
    fn backspace_and_delete_boundaries() {
        let mut store = ByteStore::from_bytes(vec![7, 8]);
        let mut ed = EditController::new();
        ed.set_cursor(Some(0), store.len());
        let ctx = ctx_for(&store, 16);
        let out = ed.handle_action(EditorAction::Backspace, ctx, Some(&mut store));
        assert!(out.intents.is_empty(), "backspace at zero is a no-op");

        ed.set_cursor(Some(2), store.len());
        let ctx = ctx_for(&store, 16);
        let out = ed.handle_action(EditorAction::Delete, ctx, Some(&mut store));
        assert!(out.intents.is_empty(), "delete at ghost is a no-op");

        let ctx = ctx_for(&store, 16);
        let out = ed.handle_action(EditorAction::Backspace, ctx, Some(&mut store));
        assert_eq!(
            out.intents,
            vec![EditIntent::DeleteByte { index: 1, direction: DeleteDirection::Backward }]
        );
        assert_eq!(store.bytes(), &[7]);
        assert_eq!(ed.cursor(), Some(1));
    }

    #[test]
    fn selection_precedence_collapses_to_one_delete_range() {
        // Selection [5,8] active, Backspace: one DeleteRange, cursor at 5.
        let mut store = ByteStore::from_bytes((0u8..12).collect());
        let mut ed = EditController::new();
        ed.set_cursor(Some(8), store.len());
        let ctx = with_selection(ctx_for(&store, 16), 5, 8);
        let out = ed.handle_action(EditorAction::Backspace, ctx, Some(&mut store));
        assert_eq!(
            out.intents,
            vec![EditIntent::DeleteRange { start: 5, end: 8 }],
            "no separate single-byte delete"
        );
        assert!(out.selection_cleared);
        assert_eq!(ed.cursor(), Some(5));
        assert_eq!(store.bytes(), &[0, 1, 2, 3, 4, 9, 10, 11]);
    }

    #[test]
    fn entry_over_selection_groups_into_one_history_entry() {
        let mut store = ByteStore::from_bytes(vec![10, 20, 30, 40]);
        let mut ed = EditController::new();
        ed.set_column(PaneColumn::Ascii);
        ed.set_cursor(Some(1), store.len());
        let ctx = with_selection(ctx_for(&store, 16), 1, 2);
        let out = ed.handle_action(EditorAction::Ascii('x'), ctx, Some(&mut store));
        assert_eq!(
            out.intents,
            vec![
                EditIntent::DeleteRange { start: 1, end: 2 },
                EditIntent::OverwriteByte { index: 1, value: b'x' },
            ]
        );
        assert_eq!(store.bytes(), &[10, b'x']);
        assert_eq!(ed.undo_depth(), 1, "collapse + write is one user action");

        let ctx = ctx_for(&store, 16);
        ed.handle_action(EditorAction::Undo, ctx, Some(&mut store));
        assert_eq!(store.bytes(), &[10, 20, 30, 40]);
    }

    #[test]
    fn undo_redo_inverse_law() {
        let mut store = ByteStore::from_bytes(vec![0; 8]);
        let mut ed = EditController::new();
        ed.set_cursor(Some(4), store.len());
        let ctx = ctx_for(&store, 16);
        ed.handle_action(EditorAction::HexDigit(0xa), ctx, Some(&mut store));
        ed.handle_action(EditorAction::HexDigit(0xf), ctx, Some(&mut store));
        let after_edit = store.clone();

        let ctx = ctx_for(&store, 16);
        let out = ed.handle_action(EditorAction::Undo, ctx, Some(&mut store));
        assert_eq!(
            out.intents,
            vec![EditIntent::OverwriteByte { index: 4, value: 0 }]
        );
        assert_eq!(store.bytes(), &[0; 8]);
        assert_eq!(ed.cursor(), Some(4), "pre-action cursor restored");

        let ctx = ctx_for(&store, 16);
        ed.handle_action(EditorAction::Redo, ctx, Some(&mut store));
        assert_eq!(store, after_edit);
        assert_eq!(ed.cursor(), Some(5));
    }

    #[test]
    fn undo_of_insert_and_delete_restores_bytes_and_cursor() {
        let mut store = ByteStore::from_bytes(vec![0, 1, 2, 3]);
        let mut ed = EditController::new();
        ed.set_column(PaneColumn::Ascii);
        ed.set_cursor(Some(2), store.len());
        ed.handle_action(
            EditorAction::ToggleEditorMode,
            ctx_for(&store, 16),
            Some(&mut store),
        );
        let ctx = ctx_for(&store, 16);
        ed.paste_text("AB", ctx, Some(&mut store));
        assert_eq!(store.bytes(), &[0, 1, 65, 66, 2, 3]);

        let ctx = ctx_for(&store, 16);
        ed.handle_action(EditorAction::Undo, ctx, Some(&mut store));
        assert_eq!(store.bytes(), &[0, 1, 2, 3]);
        assert_eq!(ed.cursor(), Some(2));

        let ctx = ctx_for(&store, 16);
        ed.handle_action(EditorAction::Redo, ctx, Some(&mut store));
        assert_eq!(store.bytes(), &[0, 1, 65, 66, 2, 3]);
        assert_eq!(ed.cursor(), Some(4));
    }

    #[test]
    fn windowed_mode_forwards_bare_undo_redo() {
        let mut ed = EditController::new();
        ed.set_cursor(Some(0), 100);
        let ctx = EditCtx {
            total_size: 100,
            bytes_per_row: 16,
            selection: None,
        };
        let out = ed.handle_action(EditorAction::Undo, ctx, None);
        assert_eq!(out.intents, vec![EditIntent::Undo]);
        let out = ed.handle_action(EditorAction::Redo, ctx, None);
        assert_eq!(out.intents, vec![EditIntent::Redo]);
        assert_eq!(ed.undo_depth(), 0, "no local history in windowed mode");
    }

    #[test]
    fn windowed_mode_emits_but_does_not_record() {
        let mut ed = EditController::new();
        ed.set_cursor(Some(1), 4);
        let ctx = EditCtx {
            total_size: 4,
            bytes_per_row: 16,
            selection: None,
        };
        ed.handle_action(EditorAction::HexDigit(0x1), ctx, None);
        let out = ed.handle_action(EditorAction::HexDigit(0x2), ctx, None);
        assert_eq!(
            out.intents,
            vec![EditIntent::OverwriteByte { index: 1, value: 0x12 }]
        );
        assert_eq!(ed.undo_depth(), 0);
        assert_eq!(ed.cursor(), Some(2));
    }

    #[test]
    fn column_switch_discards_pending() {
        let mut store = ByteStore::from_bytes(vec![0; 4]);
        let mut ed = EditController::new();
        ed.set_cursor(Some(0), store.len());
        let ctx = ctx_for(&store, 16);
        ed.handle_action(EditorAction::HexDigit(0x9), ctx, Some(&mut store));
        assert!(ed.set_column(PaneColumn::Ascii));
        assert_eq!(ed.pending(), None);
    }
}
