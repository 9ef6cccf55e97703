//! Key event -> editor action translation.
//!
//! Stateless: the two-nibble entry buffer lives in the controller, not here.
//! Translation depends on the active pane because the same character key
//! means different things per pane: `a` is a hex digit over the hex column
//! and a literal byte over the decoded column.

use core_events::{KeyCode, KeyInput, Modifiers, NamedKey};
use core_grid::PaneColumn;

use crate::cursor::Motion;

/// What a keystroke asks the editing state machine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Move(Motion),
    /// Shift+navigation: move the cursor and extend the selection.
    ExtendSelection(Motion),
    /// A hex digit value `0..=15` typed over the hex pane.
    HexDigit(u8),
    /// A literal character typed over the decoded pane.
    Ascii(char),
    /// `Insert`: toggle overwrite/insert.
    ToggleEditorMode,
    Backspace,
    Delete,
    Escape,
    SelectAll,
    Copy,
    Paste,
    Undo,
    Redo,
}

/// Translate one normalized key event. `None` means the engine ignores the
/// keystroke entirely.
pub fn translate_key(key: KeyInput, column: PaneColumn) -> Option<EditorAction> {
    if key.mods.primary() {
        return match key.code {
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&'a') => Some(EditorAction::SelectAll),
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&'c') => Some(EditorAction::Copy),
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&'v') => Some(EditorAction::Paste),
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&'z') => {
                if key.mods.contains(Modifiers::SHIFT) {
                    Some(EditorAction::Redo)
                } else {
                    Some(EditorAction::Undo)
                }
            }
            KeyCode::Char(c) if c.eq_ignore_ascii_case(&'y') => Some(EditorAction::Redo),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Named(named) => {
            let motion = match named {
                NamedKey::Left => Some(Motion::Left),
                NamedKey::Right => Some(Motion::Right),
                NamedKey::Up => Some(Motion::Up),
                NamedKey::Down => Some(Motion::Down),
                _ => None,
            };
            if let Some(motion) = motion {
                return if key.mods.contains(Modifiers::SHIFT) {
                    Some(EditorAction::ExtendSelection(motion))
                } else {
                    Some(EditorAction::Move(motion))
                };
            }
            match named {
                NamedKey::Insert => Some(EditorAction::ToggleEditorMode),
                NamedKey::Backspace => Some(EditorAction::Backspace),
                NamedKey::Delete => Some(EditorAction::Delete),
                NamedKey::Escape => Some(EditorAction::Escape),
                _ => None,
            }
        }
        KeyCode::Char(c) => match column {
            PaneColumn::Hex => c
                .to_digit(16)
                .map(|d| EditorAction::HexDigit(d as u8)),
            PaneColumn::Ascii => Some(EditorAction::Ascii(c)),
        },
    }
}
