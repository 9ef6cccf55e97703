//! Virtualized byte window & interaction engine facade.
//!
//! `hex-engine` wires the component crates into one instance a host embeds:
//! geometry/chunking (`core-geometry`), the frame pump and window
//! coordinator (`core-window`), the cell-grid renderer (`core-grid`), the
//! selection machine (`core-select`), and the cursor/editing controller
//! (`core-edit`). The host supplies byte windows, viewport measurements, and
//! normalized input events; the engine hands back a rebuildable cell grid,
//! emits edit intents, and requests new windows as the user scrolls.
//!
//! Two backing modes:
//! * **Windowed**: the host owns the data; the engine only ever holds the
//!   most recent bounded window and forwards all mutations (including bare
//!   undo/redo) as intents.
//! * **Self-managed**: the engine owns the byte buffer, applies intents
//!   locally, and keeps a transactional undo/redo history.
//!
//! Everything is single-threaded and cooperative: the host calls
//! [`HexViewEngine::tick`] once per frame (or explicitly in tests) and the
//! engine drains at most one merged unit of deferred work.

pub mod engine;
pub mod ports;

pub use engine::{HexViewEngine, RenderWindow, TickReport};
pub use ports::{
    ClipboardPort, EngineObserver, NoClipboard, SelectionDataProvider, SelectionInfo,
    WindowRequestSink,
};

// Re-export the vocabulary hosts need to drive the engine without naming
// every member crate.
pub use core_config::Config;
pub use core_edit::{DeleteDirection, EditIntent, EditorMode};
pub use core_events::{
    HoverTarget, KeyCode, KeyInput, Modifiers, NamedKey, PointerInput, PointerPhase, PointerTarget,
};
pub use core_grid::{Cell, CellFlags, CellGrid, CellPayload, HexCase, PaneColumn, Row};
pub use core_select::SelRange;
pub use core_window::WindowRequest;
