//! The closed set of mutation requests the engine can emit.
//!
//! Intents describe *what* should happen to the byte sequence, not who does
//! it: in self-managed mode the engine applies them to its own store, in
//! windowed mode the host interprets them against its backing storage. The
//! enum is deliberately closed: every consumer matches exhaustively so a
//! new variant is a compile error at each site that must care.

/// Which side of the cursor a single-byte delete removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeleteDirection {
    /// `Backspace`: the byte before the cursor.
    Backward,
    /// `Delete`: the byte at the cursor.
    Forward,
}

/// A requested mutation of the byte sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EditIntent {
    OverwriteByte {
        index: usize,
        value: u8,
    },
    InsertByte {
        index: usize,
        value: u8,
    },
    OverwriteBytes {
        index: usize,
        values: Vec<u8>,
    },
    InsertBytes {
        index: usize,
        values: Vec<u8>,
    },
    DeleteByte {
        index: usize,
        direction: DeleteDirection,
    },
    /// Inclusive range delete (selection collapse).
    DeleteRange {
        start: usize,
        end: usize,
    },
    /// Bare undo request, forwarded in windowed mode only.
    Undo,
    /// Bare redo request, forwarded in windowed mode only.
    Redo,
}

impl EditIntent {
    /// Whether this intent mutates bytes (as opposed to the control
    /// variants `Undo`/`Redo`, which replay other intents).
    pub fn is_mutation(&self) -> bool {
        !matches!(self, EditIntent::Undo | EditIntent::Redo)
    }
}
