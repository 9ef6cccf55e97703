#![allow(dead_code)] // Shared across integration tests; each binary uses a subset.

use std::cell::RefCell;
use std::rc::Rc;

use hex_engine::{
    ClipboardPort, Config, EditIntent, EngineObserver, HexViewEngine, HoverTarget, PaneColumn,
    PointerInput, PointerTarget, SelectionInfo, WindowRequest, WindowRequestSink,
};

/// Everything the engine notified, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Selection(Option<SelectionInfo>),
    Cursor(Option<usize>),
    Intent(EditIntent),
    Hover(Option<HoverTarget>),
    Scroll(f64),
}

#[derive(Default)]
pub struct Recorder {
    pub events: Rc<RefCell<Vec<Recorded>>>,
}

impl Recorder {
    pub fn new() -> (Self, Rc<RefCell<Vec<Recorded>>>) {
        let events = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                events: events.clone(),
            },
            events,
        )
    }
}

impl EngineObserver for Recorder {
    fn on_selection_changed(&self, info: Option<SelectionInfo>) {
        self.events.borrow_mut().push(Recorded::Selection(info));
    }
    fn on_cursor_changed(&self, index: Option<usize>) {
        self.events.borrow_mut().push(Recorded::Cursor(index));
    }
    fn on_edit_intent(&self, intent: &EditIntent) {
        self.events.borrow_mut().push(Recorded::Intent(intent.clone()));
    }
    fn on_hover_changed(&self, hover: Option<HoverTarget>) {
        self.events.borrow_mut().push(Recorded::Hover(hover));
    }
    fn on_scroll_changed(&self, scroll_top_px: f64) {
        self.events.borrow_mut().push(Recorded::Scroll(scroll_top_px));
    }
}

/// Captures fire-and-forget window requests.
pub struct CaptureSink(pub Rc<RefCell<Vec<WindowRequest>>>);

impl CaptureSink {
    pub fn new() -> (Self, Rc<RefCell<Vec<WindowRequest>>>) {
        let requests = Rc::new(RefCell::new(Vec::new()));
        (Self(requests.clone()), requests)
    }
}

impl WindowRequestSink for CaptureSink {
    fn request_window(&self, request: WindowRequest) {
        self.0.borrow_mut().push(request);
    }
}

/// In-memory clipboard.
pub struct MemClipboard(pub Rc<RefCell<Option<String>>>);

impl MemClipboard {
    pub fn new() -> (Self, Rc<RefCell<Option<String>>>) {
        let text = Rc::new(RefCell::new(None));
        (Self(text.clone()), text)
    }
}

impl ClipboardPort for MemClipboard {
    fn write_text(&self, text: &str) -> anyhow::Result<()> {
        *self.0.borrow_mut() = Some(text.to_string());
        Ok(())
    }
    fn read_text(&self) -> anyhow::Result<String> {
        self.0
            .borrow()
            .clone()
            .ok_or_else(|| anyhow::anyhow!("clipboard empty"))
    }
}

/// Clipboard that always fails, for best-effort semantics.
pub struct BrokenClipboard;

impl ClipboardPort for BrokenClipboard {
    fn write_text(&self, _text: &str) -> anyhow::Result<()> {
        anyhow::bail!("denied")
    }
    fn read_text(&self) -> anyhow::Result<String> {
        anyhow::bail!("denied")
    }
}

/// Self-managed engine with gestures running.
pub fn self_managed(data: Vec<u8>) -> HexViewEngine {
    let mut engine = HexViewEngine::self_managed(data, Config::default());
    engine.start_gestures();
    engine
}

pub fn hex_cell(index: usize, byte: u8) -> PointerTarget {
    PointerTarget::Cell {
        column: PaneColumn::Hex,
        index,
        byte,
    }
}

pub fn ascii_cell(index: usize, byte: u8) -> PointerTarget {
    PointerTarget::Cell {
        column: PaneColumn::Ascii,
        index,
        byte,
    }
}

/// Press-drag-release across `from..=to` in the hex pane.
pub fn drag_hex(engine: &mut HexViewEngine, from: usize, to: usize) {
    engine.handle_pointer(PointerInput::down(hex_cell(from, 0)));
    let range: Box<dyn Iterator<Item = usize>> = if to >= from {
        Box::new(from..=to)
    } else {
        Box::new((to..=from).rev())
    };
    for i in range {
        engine.handle_pointer(PointerInput::moved(hex_cell(i, 0)));
    }
    engine.handle_pointer(PointerInput::up(hex_cell(to, 0)));
}
