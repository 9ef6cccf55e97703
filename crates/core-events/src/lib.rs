//! Normalized input vocabulary for the interaction engine.
//!
//! The engine never installs global listeners; the host feeds it pointer and
//! keyboard events through the gesture controller, already resolved against
//! the rendered grid (pixel → cell hit-testing is a presentation concern).
//! These types are that wire format: framework-free, value-semantic, and
//! carrying exactly the data interaction logic needs: a cell hit knows its
//! pane, absolute byte index, and byte value, so no downstream code re-reads
//! rendered output.

use std::fmt;

use core_grid::PaneColumn;

bitflags::bitflags! {
    /// Modifier keys held during an input event. `META` covers the Cmd key so
    /// Ctrl/Cmd shortcuts behave identically across platforms.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const CTRL  = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const SHIFT = 0b0000_0100;
        const META  = 0b0000_1000;
    }
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS; either satisfies the
    /// "primary shortcut" chord (copy, select-all, undo, redo).
    pub fn primary(&self) -> bool {
        self.intersects(Modifiers::CTRL | Modifiers::META)
    }
}

/// Non-character keys the editing state machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    Enter,
    Escape,
    Backspace,
    Delete,
    Insert,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

/// Logical key identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Named(NamedKey),
}

/// One normalized keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub code: KeyCode,
    pub mods: Modifiers,
}

impl KeyInput {
    pub fn new(code: KeyCode, mods: Modifiers) -> Self {
        Self { code, mods }
    }

    /// Unmodified character key.
    pub fn ch(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::empty())
    }

    /// Unmodified named key.
    pub fn named(key: NamedKey) -> Self {
        Self::new(KeyCode::Named(key), Modifiers::empty())
    }

    /// Character key with the primary (Ctrl/Cmd) modifier.
    pub fn primary(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::CTRL)
    }

    pub fn with_shift(mut self) -> Self {
        self.mods |= Modifiers::SHIFT;
        self
    }
}

impl fmt::Display for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}

/// What a pointer event resolved to after hit-testing.
///
/// Placeholder cells and the ghost append position never resolve to
/// `Cell`; the presentation layer reports those as `Empty`, which is what
/// clears selections on click-away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    /// An interactive byte cell in either pane.
    Cell {
        column: PaneColumn,
        index: usize,
        byte: u8,
    },
    /// The row offset header.
    RowHeader { row: usize, offset: usize },
    /// Anything that is not an interactive target.
    Empty,
}

/// Pointer gesture phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// One normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerInput {
    pub phase: PointerPhase,
    pub target: PointerTarget,
    pub mods: Modifiers,
}

impl PointerInput {
    pub fn new(phase: PointerPhase, target: PointerTarget, mods: Modifiers) -> Self {
        Self {
            phase,
            target,
            mods,
        }
    }

    pub fn down(target: PointerTarget) -> Self {
        Self::new(PointerPhase::Down, target, Modifiers::empty())
    }

    pub fn moved(target: PointerTarget) -> Self {
        Self::new(PointerPhase::Move, target, Modifiers::empty())
    }

    pub fn up(target: PointerTarget) -> Self {
        Self::new(PointerPhase::Up, target, Modifiers::empty())
    }
}

/// Hover-link target reported by enter/leave notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoverTarget {
    /// Pointer is over a row header; carries the row's first byte offset.
    Row { offset: usize },
    /// Pointer is over a hex-pane byte cell.
    Hex { index: usize, byte: u8 },
    /// Pointer is over a decoded-pane byte cell.
    Ascii { index: usize, byte: u8 },
}

impl HoverTarget {
    /// Classify a pointer target as a hover target, if it is one.
    pub fn from_pointer(target: PointerTarget) -> Option<Self> {
        match target {
            PointerTarget::Cell {
                column: PaneColumn::Hex,
                index,
                byte,
            } => Some(HoverTarget::Hex { index, byte }),
            PointerTarget::Cell {
                column: PaneColumn::Ascii,
                index,
                byte,
            } => Some(HoverTarget::Ascii { index, byte }),
            PointerTarget::RowHeader { offset, .. } => Some(HoverTarget::Row { offset }),
            PointerTarget::Empty => None,
        }
    }
}
