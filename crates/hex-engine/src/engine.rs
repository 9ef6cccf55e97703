//! The engine instance: state, scheduling, and the host-facing surface.
//!
//! One `HexViewEngine` owns all mutable state exclusively (held window or
//! local store, selection, cursor/editing, chunk geometry, the render
//! slice); every entry point runs synchronously on the host's UI thread and
//! defers re-evaluation/re-rendering to the next [`HexViewEngine::tick`]
//! through the frame pump. No entry point blocks and none can fail: bad
//! input clamps, missing collaborators degrade to no-ops.
//!
//! Change-detection contract: the render slice is rebuilt wholesale and
//! replaced only when its content hash differs, so hosts may treat
//! `TickReport::grid_changed == false` as "skip the repaint".

use core_config::Config;
use core_edit::{
    ByteStore, EditController, EditCtx, EditOutcome, EditorAction, EditorMode, translate_key,
};
use core_events::{
    HoverTarget, KeyInput, Modifiers, PointerInput, PointerPhase, PointerTarget,
};
use core_geometry::{ChunkMap, row_at_scroll, rows_in_viewport, rows_to_byte_range};
use core_grid::{
    CellGrid, CellPayload, Classify, GridSpec, HexCase, PaneColumn, build_cell_grid,
};
use core_select::{CopyOptions, SelectionMachine, SelRange, clipboard_text};
use core_window::{
    Evaluation, FramePump, ViewMetrics, WindowCoordinator, WindowRequest, WorkKind,
    ensure_row_visible,
};
use tracing::{debug, trace};

use crate::ports::{
    ClipboardPort, EngineObserver, NoClipboard, SelectionDataProvider, SelectionInfo,
    WindowRequestSink,
};

/// Who owns the authoritative bytes.
enum Backing {
    /// The engine holds the whole buffer and applies intents locally.
    SelfManaged(ByteStore),
    /// The host is authoritative; the engine holds one bounded window.
    Windowed {
        offset: usize,
        data: Vec<u8>,
        total_size: usize,
    },
}

/// Injectable per-cell classifier selection (owned flavor of
/// [`core_grid::Classify`]).
enum ClassifierSetting {
    Default,
    Disabled,
    Custom(Box<dyn Fn(&CellPayload) -> Option<Vec<String>>>),
}

/// The render window currently exposed to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderWindow {
    /// Absolute row index of the first rendered row.
    pub start_row: usize,
    /// Half-open byte range covered by the grid.
    pub byte_range: (usize, usize),
}

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// The cell grid was replaced; the host should repaint.
    pub grid_changed: bool,
    /// Window request issued this tick (also forwarded to the sink).
    pub request: Option<WindowRequest>,
}

/// The virtualized byte window & interaction engine.
pub struct HexViewEngine {
    config: Config,
    is_printable: Option<Box<dyn Fn(u8) -> bool>>,
    render_glyph: Option<Box<dyn Fn(u8) -> String>>,
    classifier: ClassifierSetting,

    backing: Backing,
    chunks: ChunkMap,
    coordinator: WindowCoordinator,
    pump: FramePump,
    metrics: ViewMetrics,
    desired_rows: (usize, usize),

    render: CellGrid,
    render_start_row: usize,
    grid_hash: u64,

    selection: SelectionMachine,
    edit: EditController,

    observers: Vec<Box<dyn EngineObserver>>,
    sink: Option<Box<dyn WindowRequestSink>>,
    clipboard: Box<dyn ClipboardPort>,
    selection_provider: Option<SelectionDataProvider>,

    last_selection: Option<SelectionInfo>,
    last_cursor: Option<usize>,
    hover: Option<HoverTarget>,
    gestures_active: bool,
}

impl HexViewEngine {
    /// Windowed mode: the host owns the data and supplies bounded windows.
    pub fn windowed(config: Config) -> Self {
        Self::with_backing(
            Backing::Windowed {
                offset: 0,
                data: Vec::new(),
                total_size: 0,
            },
            config,
        )
    }

    /// Self-managed mode: the engine owns `data` and applies edits locally.
    pub fn self_managed(data: Vec<u8>, config: Config) -> Self {
        Self::with_backing(Backing::SelfManaged(ByteStore::from_bytes(data)), config)
    }

    fn with_backing(backing: Backing, config: Config) -> Self {
        let mut engine = Self {
            config,
            is_printable: None,
            render_glyph: None,
            classifier: ClassifierSetting::Default,
            backing,
            chunks: ChunkMap::empty(),
            coordinator: WindowCoordinator::new(),
            pump: FramePump::new(),
            metrics: ViewMetrics {
                scroll_top_px: 0.0,
                viewport_height_px: 0.0,
                row_height_px: f64::NAN,
            },
            desired_rows: (0, 0),
            render: CellGrid::default(),
            render_start_row: 0,
            grid_hash: 0,
            selection: SelectionMachine::new(),
            edit: EditController::new(),
            observers: Vec::new(),
            sink: None,
            clipboard: Box::new(NoClipboard),
            selection_provider: None,
            last_selection: None,
            last_cursor: None,
            hover: None,
            gestures_active: false,
        };
        engine.refresh_geometry();
        engine.pump.schedule(WorkKind::SYNC);
        engine
    }

    // -----------------------------------------------------------------
    // Collaborator wiring
    // -----------------------------------------------------------------

    pub fn add_observer(&mut self, observer: Box<dyn EngineObserver>) {
        self.observers.push(observer);
    }

    pub fn set_window_request_sink(&mut self, sink: Box<dyn WindowRequestSink>) {
        self.sink = Some(sink);
    }

    pub fn set_clipboard(&mut self, clipboard: Box<dyn ClipboardPort>) {
        self.clipboard = clipboard;
    }

    pub fn set_selection_data_provider(&mut self, provider: SelectionDataProvider) {
        self.selection_provider = Some(provider);
    }

    pub fn set_printable_predicate(&mut self, predicate: Box<dyn Fn(u8) -> bool>) {
        self.is_printable = Some(predicate);
        self.pump.schedule(WorkKind::SYNC);
    }

    pub fn set_glyph_renderer(&mut self, renderer: Box<dyn Fn(u8) -> String>) {
        self.render_glyph = Some(renderer);
        self.pump.schedule(WorkKind::SYNC);
    }

    pub fn set_cell_classifier(
        &mut self,
        classifier: Box<dyn Fn(&CellPayload) -> Option<Vec<String>>>,
    ) {
        self.classifier = ClassifierSetting::Custom(classifier);
        self.pump.schedule(WorkKind::SYNC);
    }

    pub fn disable_cell_classifier(&mut self) {
        self.classifier = ClassifierSetting::Disabled;
        self.pump.schedule(WorkKind::SYNC);
    }

    /// Gesture controller lifetime: input events are ignored until started
    /// and after stopped.
    pub fn start_gestures(&mut self) {
        self.gestures_active = true;
    }

    pub fn stop_gestures(&mut self) {
        self.gestures_active = false;
        let dissolved = self.selection.pointer_up();
        let blur = self.edit.handle_blur();
        if dissolved || blur.dirty {
            self.pump.schedule(WorkKind::SYNC);
        }
        self.set_hover(None);
    }

    /// Replace rendering preferences wholesale.
    pub fn set_config(&mut self, config: Config) {
        self.config = config;
        self.refresh_geometry();
        self.pump.schedule(WorkKind::EVALUATE | WorkKind::SYNC);
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // -----------------------------------------------------------------
    // Host data & viewport surface
    // -----------------------------------------------------------------

    /// Host supplied a new byte window. Inconsistent shapes are clamped per
    /// the engine-wide normalization rule; `total_size` defaults to the
    /// window length.
    pub fn update_window(&mut self, offset: usize, data: &[u8], total_size: Option<usize>) {
        match &mut self.backing {
            Backing::SelfManaged(_) => {
                debug!(target: "engine", "update_window ignored in self-managed mode");
                return;
            }
            Backing::Windowed {
                offset: held_offset,
                data: held,
                total_size: held_total,
            } => {
                let total = total_size.unwrap_or(data.len());
                let clamped_offset = offset.min(total);
                let keep = data.len().min(total - clamped_offset);
                *held_offset = clamped_offset;
                held.clear();
                held.extend_from_slice(&data[..keep]);
                *held_total = total;
                trace!(
                    target: "engine",
                    offset = clamped_offset,
                    len = keep,
                    total,
                    "window updated"
                );
            }
        }
        self.refresh_geometry();
        self.reclamp_interaction_state();
        self.pump.schedule(WorkKind::EVALUATE | WorkKind::SYNC);
    }

    /// Report viewport measurements (initial mount, resize, row-height
    /// measurement).
    pub fn set_viewport(
        &mut self,
        scroll_top_px: f64,
        viewport_height_px: f64,
        row_height_px: f64,
    ) {
        self.metrics = ViewMetrics {
            scroll_top_px,
            viewport_height_px,
            row_height_px,
        };
        self.refresh_geometry();
        self.pump.schedule(WorkKind::EVALUATE | WorkKind::SYNC);
    }

    /// Scroll position changed. Coalesces into one evaluation per tick.
    pub fn handle_scroll(&mut self, scroll_top_px: f64) {
        self.metrics.scroll_top_px = scroll_top_px;
        self.pump.schedule(WorkKind::EVALUATE | WorkKind::SYNC);
    }

    /// Bring `offset` into view: immediately when geometry is known, else
    /// parked and applied on the evaluation that follows measurement.
    pub fn scroll_to_byte(&mut self, offset: usize) {
        let total = self.total_size();
        let bpr = self.config.bytes_per_row;
        if let Some((top, moved)) =
            self.coordinator
                .scroll_to_byte(offset, &mut self.chunks, &self.metrics, total, bpr)
        {
            self.metrics.scroll_top_px = top;
            self.notify_scroll(top);
            if moved {
                trace!(target: "engine", offset, "scroll_to_byte switched chunk");
            }
        }
        self.pump.schedule(WorkKind::EVALUATE | WorkKind::SYNC);
    }

    /// Drain deferred work: at most one window evaluation and one render
    /// slice rebuild, both reflecting the latest inputs.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        let work = self.pump.drain();
        if work.is_empty() {
            return report;
        }
        if work.contains(WorkKind::EVALUATE) {
            let eval = self.evaluate_window();
            if let Some(request) = eval.request {
                report.request = Some(request);
                if let Some(sink) = &self.sink {
                    sink.request_window(request);
                }
            }
        }
        // Rebuild unconditionally once any work ran: an evaluation may have
        // shifted the desired rows even when only EVALUATE was marked.
        report.grid_changed = self.rebuild_grid();
        report
    }

    fn evaluate_window(&mut self) -> Evaluation {
        let total = self.total_size();
        let bpr = self.config.bytes_per_row;
        let span = self.data_span_range();
        let eval = self.coordinator.evaluate(
            &mut self.chunks,
            &self.metrics,
            span,
            total,
            bpr,
            self.config.overscan,
        );
        if let Some(top) = eval.scroll_top_px {
            self.metrics.scroll_top_px = top;
            self.notify_scroll(top);
        }
        if eval.desired_rows.1 > eval.desired_rows.0 {
            self.desired_rows = eval.desired_rows;
        }
        eval
    }

    // -----------------------------------------------------------------
    // Render output surface
    // -----------------------------------------------------------------

    pub fn grid(&self) -> &CellGrid {
        &self.render
    }

    pub fn render_window(&self) -> RenderWindow {
        RenderWindow {
            start_row: self.render_start_row,
            byte_range: self.render.byte_range(),
        }
    }

    pub fn total_size(&self) -> usize {
        match &self.backing {
            Backing::SelfManaged(store) => store.len(),
            Backing::Windowed { total_size, .. } => *total_size,
        }
    }

    pub fn is_self_managed(&self) -> bool {
        matches!(self.backing, Backing::SelfManaged(_))
    }

    /// Bytes currently held (self-managed: the whole buffer).
    pub fn held_bytes(&self) -> (usize, &[u8]) {
        match &self.backing {
            Backing::SelfManaged(store) => (0, store.bytes()),
            Backing::Windowed { offset, data, .. } => (*offset, data),
        }
    }

    // -----------------------------------------------------------------
    // Selection surface
    // -----------------------------------------------------------------

    pub fn selection_range(&self) -> Option<SelRange> {
        self.selection.range(self.total_size())
    }

    pub fn selection_byte_count(&self) -> usize {
        self.selection_range().map_or(0, |r| r.len())
    }

    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.pump.schedule(WorkKind::SYNC);
        }
        self.notify_selection_if_changed();
    }

    /// Serialize the selection (per its pane mode) and write it to the
    /// clipboard port. Best-effort: a failing clipboard is a no-op.
    pub fn copy_selection_to_clipboard(&self) {
        let total = self.total_size();
        let Some(range) = self.selection.range(total) else {
            return;
        };
        let Some(mode) = self.selection.mode() else {
            return;
        };
        let bytes = self.selection_bytes(range);
        let opts = CopyOptions {
            case: self.hex_case(),
            fallback_char: self.config.non_printable_char,
            is_printable: self.is_printable.as_deref(),
            render_glyph: self.render_glyph.as_deref(),
        };
        let text = clipboard_text(mode, &bytes, &opts);
        if let Err(err) = self.clipboard.write_text(&text) {
            debug!(target: "engine", error = %err, "clipboard write failed");
        }
    }

    fn selection_bytes(&self, range: SelRange) -> Vec<u8> {
        if let Some(provider) = &self.selection_provider {
            return provider(range.start, range.end);
        }
        let (span_offset, data) = self.held_bytes();
        let start = range.start.max(span_offset);
        let end_excl = (range.end + 1).min(span_offset + data.len());
        if end_excl <= start {
            return Vec::new();
        }
        data[start - span_offset..end_excl - span_offset].to_vec()
    }

    // -----------------------------------------------------------------
    // Cursor & editing surface
    // -----------------------------------------------------------------

    pub fn cursor_location(&self) -> Option<usize> {
        self.edit.cursor()
    }

    pub fn set_cursor_location(&mut self, index: Option<usize>) {
        let total = self.total_size();
        let out = self.edit.set_cursor(index, total);
        self.absorb_outcome(out);
        self.notify_cursor_if_changed();
    }

    pub fn active_column(&self) -> PaneColumn {
        self.edit.column()
    }

    pub fn editor_mode(&self) -> EditorMode {
        self.edit.mode()
    }

    /// Host push path for paste text (e.g. a browser paste event). Applied
    /// against the active pane's parsing rules.
    pub fn paste_text(&mut self, text: &str) {
        let ctx = self.edit_ctx();
        let store = match &mut self.backing {
            Backing::SelfManaged(store) => Some(store),
            Backing::Windowed { .. } => None,
        };
        let out = self.edit.paste_text(text, ctx, store);
        self.absorb_outcome(out);
        self.notify_selection_if_changed();
        self.notify_cursor_if_changed();
    }

    // -----------------------------------------------------------------
    // Input (gesture controller)
    // -----------------------------------------------------------------

    pub fn handle_key(&mut self, key: KeyInput) {
        if !self.gestures_active {
            return;
        }
        let column = self.edit.column();
        let Some(action) = translate_key(key, column) else {
            return;
        };
        trace!(target: "engine", ?action, "key");
        match action {
            EditorAction::SelectAll => {
                let total = self.total_size();
                if self.selection.select_all(column, total) {
                    self.pump.schedule(WorkKind::SYNC);
                }
            }
            EditorAction::Copy => self.copy_selection_to_clipboard(),
            EditorAction::Paste => match self.clipboard.read_text() {
                Ok(text) => {
                    let ctx = self.edit_ctx();
                    let store = match &mut self.backing {
                        Backing::SelfManaged(store) => Some(store),
                        Backing::Windowed { .. } => None,
                    };
                    let out = self.edit.paste_text(&text, ctx, store);
                    self.absorb_outcome(out);
                }
                Err(err) => {
                    debug!(target: "engine", error = %err, "clipboard read failed");
                }
            },
            EditorAction::ExtendSelection(_) => {
                let anchor_cursor = self.edit.cursor();
                let out = self.dispatch_edit(action);
                let total = self.total_size();
                if total > 0
                    && let Some(new_cursor) = self.edit.cursor()
                {
                    let focus = new_cursor.min(total - 1);
                    if self
                        .selection
                        .shift_extend(focus, column, anchor_cursor, total)
                    {
                        self.pump.schedule(WorkKind::SYNC);
                    }
                }
                self.absorb_outcome(out);
            }
            _ => {
                let out = self.dispatch_edit(action);
                self.absorb_outcome(out);
            }
        }
        self.notify_selection_if_changed();
        self.notify_cursor_if_changed();
    }

    pub fn handle_pointer(&mut self, event: PointerInput) {
        if !self.gestures_active {
            return;
        }
        self.set_hover(HoverTarget::from_pointer(event.target));
        let total = self.total_size();
        match event.phase {
            PointerPhase::Down => match event.target {
                PointerTarget::Cell { column, index, .. } => {
                    if self.edit.set_column(column) {
                        self.pump.schedule(WorkKind::SYNC);
                    }
                    if event.mods.contains(Modifiers::SHIFT) {
                        let anchor_cursor = self.edit.cursor();
                        if self
                            .selection
                            .shift_extend(index, column, anchor_cursor, total)
                        {
                            self.pump.schedule(WorkKind::SYNC);
                        }
                    } else if self.selection.pointer_down(index, column, total) {
                        self.pump.schedule(WorkKind::SYNC);
                    }
                    let out = self.edit.set_cursor(Some(index), total);
                    self.absorb_outcome(out);
                }
                PointerTarget::RowHeader { .. } => {}
                PointerTarget::Empty => {
                    // Click-away clears the selection.
                    if self.selection.clear() {
                        self.pump.schedule(WorkKind::SYNC);
                    }
                }
            },
            PointerPhase::Move => {
                if let PointerTarget::Cell { column, index, .. } = event.target
                    && self.selection.pointer_move(index, column, total)
                {
                    self.pump.schedule(WorkKind::SYNC);
                }
            }
            PointerPhase::Up => {
                if self.selection.pointer_up() {
                    self.pump.schedule(WorkKind::SYNC);
                }
            }
        }
        self.notify_selection_if_changed();
        self.notify_cursor_if_changed();
    }

    /// Pending half-entered hex pair, for provisional display.
    pub fn pending_edit(&self) -> Option<core_edit::PendingNibble> {
        self.edit.pending()
    }

    // -----------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------

    fn hex_case(&self) -> HexCase {
        if self.config.uppercase {
            HexCase::Upper
        } else {
            HexCase::Lower
        }
    }

    fn edit_ctx(&self) -> EditCtx {
        let total = self.total_size();
        EditCtx {
            total_size: total,
            bytes_per_row: self.config.bytes_per_row,
            selection: self.selection.range(total),
        }
    }

    fn dispatch_edit(&mut self, action: EditorAction) -> EditOutcome {
        let ctx = self.edit_ctx();
        let store = match &mut self.backing {
            Backing::SelfManaged(store) => Some(store),
            Backing::Windowed { .. } => None,
        };
        self.edit.handle_action(action, ctx, store)
    }

    /// Fan out an edit outcome: forward intents, clear the collapsed
    /// selection, refresh geometry after size changes, schedule rebuilds,
    /// and keep the cursor visible.
    fn absorb_outcome(&mut self, out: EditOutcome) {
        for intent in &out.intents {
            for obs in &self.observers {
                obs.on_edit_intent(intent);
            }
        }
        if out.selection_cleared && self.selection.clear() {
            self.pump.schedule(WorkKind::SYNC);
        }
        if !out.intents.is_empty() && self.is_self_managed() {
            // Local applies can change the total size.
            self.refresh_geometry();
        }
        if out.dirty {
            self.pump.schedule(WorkKind::SYNC);
        }
        if let Some(index) = out.ensure_visible {
            self.ensure_byte_visible(index);
        }
    }

    fn refresh_geometry(&mut self) {
        self.chunks.recompute(
            self.total_size(),
            self.config.bytes_per_row,
            self.config.max_virtual_height_px,
            self.metrics.row_height_px,
        );
    }

    /// Re-validate selection and cursor after the data shrank underneath
    /// them (host supplied a smaller total).
    fn reclamp_interaction_state(&mut self) {
        let total = self.total_size();
        let out = self.edit.set_cursor(self.edit.cursor(), total);
        if out.cursor_moved {
            self.notify_cursor_if_changed();
        }
    }

    fn data_span_range(&self) -> (usize, usize) {
        let (offset, data) = self.held_bytes();
        (offset, offset + data.len())
    }

    fn ensure_byte_visible(&mut self, index: usize) {
        if !self.metrics.measured() {
            return;
        }
        let bpr = self.config.bytes_per_row.max(1);
        let row = (index / bpr).min(self.chunks.total_rows().saturating_sub(1));
        let moved_chunk = self.chunks.ensure_chunk_for_row(row);
        let (chunk_start, _) = self.chunks.active_row_bounds();
        let row_height = self.metrics.row_height_px;
        if moved_chunk {
            let rel = row - chunk_start;
            let top = rel as f64 * row_height;
            self.metrics.scroll_top_px = top;
            self.notify_scroll(top);
            self.pump.schedule(WorkKind::EVALUATE | WorkKind::SYNC);
            return;
        }
        let first_visible = chunk_start + row_at_scroll(self.metrics.scroll_top_px, row_height);
        let rows_vis = rows_in_viewport(self.metrics.viewport_height_px, row_height);
        if let Some(new_first) = ensure_row_visible(first_visible, row, rows_vis) {
            let rel = new_first.saturating_sub(chunk_start);
            let top = rel as f64 * row_height;
            self.metrics.scroll_top_px = top;
            self.notify_scroll(top);
            self.pump.schedule(WorkKind::EVALUATE | WorkKind::SYNC);
        }
    }

    /// Rebuild the render slice. Returns whether the grid actually changed.
    fn rebuild_grid(&mut self) -> bool {
        let total = self.total_size();
        let bpr = self.config.bytes_per_row.max(1);
        let (span_offset, data) = match &self.backing {
            Backing::SelfManaged(store) => (0, store.bytes()),
            Backing::Windowed { offset, data, .. } => (*offset, data.as_slice()),
        };

        // Byte range to render: the evaluated desired rows intersected with
        // held data. Before the viewport is measured the held window renders
        // wholesale so headless hosts and tests see their data.
        let (want_start, want_end) =
            if self.metrics.measured() && self.desired_rows.1 > self.desired_rows.0 {
                rows_to_byte_range(self.desired_rows.0, self.desired_rows.1, bpr, total)
            } else {
                (span_offset, span_offset + data.len())
            };
        let start = want_start.max(span_offset);
        let end = want_end.min(span_offset + data.len());
        // The slice must start on a row boundary for index/offset math.
        let start = start.next_multiple_of(bpr);
        let slice = if end > start {
            &data[start - span_offset..end - span_offset]
        } else {
            &[][..]
        };
        let selection = self
            .selection
            .range(total)
            .map(|r| (r.start, r.end));
        let classify = match &self.classifier {
            ClassifierSetting::Default => Classify::Default,
            ClassifierSetting::Disabled => Classify::Disabled,
            ClassifierSetting::Custom(f) => Classify::Custom(f.as_ref()),
        };
        let spec = GridSpec {
            bytes_per_row: bpr,
            case: self.hex_case(),
            fallback_char: self.config.non_printable_char,
            base_offset: start,
            selection,
            is_printable: self.is_printable.as_deref(),
            render_glyph: self.render_glyph.as_deref(),
            classifier: classify,
        };
        let mut grid = build_cell_grid(slice, &spec);

        // Overlay the provisional half-entered nibble, if it is in view.
        if let Some(pending) = self.edit.pending()
            && let Some(cell) = grid_cell_mut(&mut grid, pending.index)
        {
            cell.text = pending.provisional_text(spec.case);
        }

        let hash = grid.content_hash();
        if hash == self.grid_hash && grid == self.render {
            trace!(target: "engine", "grid unchanged; repaint skipped");
            return false;
        }
        self.render_start_row = start / bpr;
        self.render = grid;
        self.grid_hash = hash;
        trace!(
            target: "engine",
            start_row = self.render_start_row,
            rows = self.render.rows.len(),
            "grid rebuilt"
        );
        true
    }

    fn set_hover(&mut self, hover: Option<HoverTarget>) {
        if hover == self.hover {
            return;
        }
        self.hover = hover;
        for obs in &self.observers {
            obs.on_hover_changed(hover);
        }
    }

    fn notify_scroll(&self, scroll_top_px: f64) {
        for obs in &self.observers {
            obs.on_scroll_changed(scroll_top_px);
        }
    }

    fn notify_selection_if_changed(&mut self) {
        let info = self.selection_range().map(|r| SelectionInfo {
            start: r.start,
            end: r.end,
            length: r.len(),
        });
        if info != self.last_selection {
            self.last_selection = info;
            for obs in &self.observers {
                obs.on_selection_changed(info);
            }
        }
    }

    fn notify_cursor_if_changed(&mut self) {
        let cursor = self.edit.cursor();
        if cursor != self.last_cursor {
            self.last_cursor = cursor;
            for obs in &self.observers {
                obs.on_cursor_changed(cursor);
            }
        }
    }
}

/// Mutable hex-pane cell lookup by absolute byte index.
fn grid_cell_mut(grid: &mut CellGrid, index: usize) -> Option<&mut core_grid::Cell> {
    let bpr = grid.bytes_per_row.max(1);
    if index < grid.base_offset {
        return None;
    }
    let rel = index - grid.base_offset;
    let row = grid.rows.get_mut(rel / bpr)?;
    row.hex.get_mut(rel % bpr).filter(|c| c.is_interactive())
}
