//! Cursor and editing state machine.
//!
//! Keystrokes become [`EditIntent`] values: declarative mutation requests
//! independent of who applies them. In self-managed mode the engine owns the
//! byte buffer, applies every intent locally, and records inverse-intent
//! pairs in a bounded undo/redo log; in windowed mode intents are only
//! forwarded for the host to interpret and no local history exists. Either
//! way every applied intent is surfaced to observers, so hosts can mirror
//! edits into their own storage.
//!
//! Module map (decomposed the way the dispatcher family of crates is):
//! * `intent`     - the closed `EditIntent` sum type
//! * `store`      - self-managed byte buffer + intent application/inversion
//! * `history`    - transactional undo/redo log of intent pairs
//! * `cursor`     - single-index cursor with ghost-position clamping
//! * `paste`      - clipboard text parsing (hex pairs / decoded chars)
//! * `keymap`     - normalized key event -> editor action translation
//! * `controller` - the editing state machine proper (nibble entry, modes,
//!   selection precedence, history grouping)

pub mod controller;
pub mod cursor;
pub mod history;
pub mod intent;
pub mod keymap;
pub mod paste;
pub mod store;

pub use controller::{EditController, EditCtx, EditOutcome, EditorMode, PendingNibble};
pub use cursor::{CursorState, Motion};
pub use history::{HISTORY_MAX, HistoryEntry, HistoryLog};
pub use intent::{DeleteDirection, EditIntent};
pub use keymap::{EditorAction, translate_key};
pub use paste::{ascii_bytes, parse_hex_pairs};
pub use store::ByteStore;
