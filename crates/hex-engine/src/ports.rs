//! Host collaborator seams.
//!
//! The engine talks to its host exclusively through these traits: a
//! fire-and-forget window request sink, a best-effort clipboard, an optional
//! selection data provider, and a passive observer for change notifications.
//! Everything is infallible from the engine's point of view: clipboard
//! failures degrade to no-ops and an unreachable sink simply means the
//! window never updates.

use anyhow::Result;
use core_edit::intent::EditIntent;
use core_events::HoverTarget;
use core_window::WindowRequest;

/// Receives `{offset, length}` requests. May satisfy them synchronously (by
/// calling back into `update_window` before returning) or any time later;
/// the engine only ever reacts to the next window update.
pub trait WindowRequestSink {
    fn request_window(&self, request: WindowRequest);
}

/// System clipboard access. Both directions are best-effort: the engine
/// swallows errors and treats them as "nothing happened".
pub trait ClipboardPort {
    fn write_text(&self, text: &str) -> Result<()>;
    fn read_text(&self) -> Result<String>;
}

/// Default clipboard for hosts that have none; writes vanish, reads fail.
#[derive(Debug, Default)]
pub struct NoClipboard;

impl ClipboardPort for NoClipboard {
    fn write_text(&self, _text: &str) -> Result<()> {
        Ok(())
    }

    fn read_text(&self) -> Result<String> {
        anyhow::bail!("clipboard unavailable")
    }
}

/// Returns the raw bytes between `start` and `end` inclusive for selection
/// copy. Hosts with a backing store wire one; self-managed engines derive it
/// from the local buffer automatically.
pub type SelectionDataProvider = Box<dyn Fn(usize, usize) -> Vec<u8>>;

/// Ordered selection payload carried by change notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionInfo {
    pub start: usize,
    pub end: usize,
    pub length: usize,
}

/// Passive observer over engine state changes. All methods default to
/// no-ops so hosts implement only what they render.
pub trait EngineObserver {
    /// Ordered selection changed; `None` means cleared.
    fn on_selection_changed(&self, _info: Option<SelectionInfo>) {}
    /// Cursor index changed; fires exactly when the value differs.
    fn on_cursor_changed(&self, _index: Option<usize>) {}
    /// An edit intent was emitted (and, in self-managed mode, applied).
    fn on_edit_intent(&self, _intent: &EditIntent) {}
    /// Hover target changed; `Some` is enter, `None` is leave.
    fn on_hover_changed(&self, _hover: Option<HoverTarget>) {}
    /// The engine moved the viewport (scroll-to-byte, ensure-visible,
    /// chunk switches). The host should mirror this into its scroller.
    fn on_scroll_changed(&self, _scroll_top_px: f64) {}
}
