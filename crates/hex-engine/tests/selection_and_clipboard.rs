//! Selection gestures, clipboard serialization, hover notifications.

mod common;

use common::{
    BrokenClipboard, MemClipboard, Recorded, Recorder, ascii_cell, drag_hex, hex_cell,
    self_managed,
};
use hex_engine::{
    Config, HexViewEngine, HoverTarget, KeyInput, Modifiers, NamedKey, PointerInput,
    PointerPhase, PointerTarget, SelectionInfo,
};

#[test]
fn selection_copy_hex_mode() {
    // Buffer [0x41,0x42,0x43], select 0..=2 in the hex pane, copy.
    let (clipboard, text) = MemClipboard::new();
    let mut engine = self_managed(vec![0x41, 0x42, 0x43]);
    engine.set_clipboard(Box::new(clipboard));
    drag_hex(&mut engine, 0, 2);
    assert_eq!(
        engine.selection_range().map(|r| (r.start, r.end)),
        Some((0, 2))
    );

    engine.handle_key(KeyInput::primary('c'));
    assert_eq!(text.borrow().as_deref(), Some("41 42 43"));
}

#[test]
fn selection_copy_uppercase_and_ascii_mode() {
    let (clipboard, text) = MemClipboard::new();
    let mut engine = HexViewEngine::self_managed(
        vec![0x48, 0x69, 0x00, 0x21],
        Config {
            uppercase: true,
            ..Config::default()
        },
    );
    engine.start_gestures();
    engine.set_clipboard(Box::new(clipboard));

    drag_hex(&mut engine, 0, 3);
    engine.copy_selection_to_clipboard();
    assert_eq!(text.borrow().as_deref(), Some("48 69 00 21"));

    // Re-select in the decoded pane: decoded text with fallback.
    engine.handle_pointer(PointerInput::down(ascii_cell(0, 0x48)));
    for i in 1..4 {
        engine.handle_pointer(PointerInput::moved(ascii_cell(i, 0)));
    }
    engine.handle_pointer(PointerInput::up(ascii_cell(3, 0x21)));
    engine.copy_selection_to_clipboard();
    assert_eq!(text.borrow().as_deref(), Some("Hi.!"));
}

#[test]
fn copy_uses_selection_data_provider_when_wired() {
    let (clipboard, text) = MemClipboard::new();
    let mut engine = HexViewEngine::windowed(Config::default());
    engine.start_gestures();
    engine.set_clipboard(Box::new(clipboard));
    engine.set_selection_data_provider(Box::new(|start, end| {
        (start..=end).map(|i| i as u8).collect()
    }));
    engine.update_window(0, &[0u8; 16], Some(1_000));

    drag_hex(&mut engine, 2, 4);
    engine.copy_selection_to_clipboard();
    assert_eq!(text.borrow().as_deref(), Some("02 03 04"));
}

#[test]
fn clipboard_failure_is_swallowed() {
    let mut engine = self_managed(vec![1, 2, 3]);
    engine.set_clipboard(Box::new(BrokenClipboard));
    drag_hex(&mut engine, 0, 2);
    engine.copy_selection_to_clipboard(); // must not panic
    assert_eq!(engine.selection_byte_count(), 3, "state untouched");
    // Paste with a broken clipboard is likewise a no-op.
    engine.handle_key(KeyInput::primary('v'));
    assert_eq!(engine.held_bytes().1, &[1, 2, 3]);
}

#[test]
fn select_all_and_escape() {
    let (recorder, events) = Recorder::new();
    let mut engine = self_managed(vec![0; 10]);
    engine.add_observer(Box::new(recorder));

    engine.handle_key(KeyInput::primary('a'));
    assert_eq!(
        engine.selection_range().map(|r| (r.start, r.end)),
        Some((0, 9))
    );
    engine.handle_key(KeyInput::named(NamedKey::Escape));
    assert_eq!(engine.selection_range(), None);

    let selections: Vec<_> = events
        .borrow()
        .iter()
        .filter_map(|e| match e {
            Recorded::Selection(s) => Some(*s),
            _ => None,
        })
        .collect();
    assert_eq!(
        selections,
        vec![
            Some(SelectionInfo {
                start: 0,
                end: 9,
                length: 10
            }),
            None,
        ]
    );
}

#[test]
fn shift_click_extends_from_cursor() {
    let mut engine = self_managed(vec![0; 32]);
    engine.set_cursor_location(Some(4));
    engine.handle_pointer(PointerInput::new(
        PointerPhase::Down,
        hex_cell(12, 0),
        Modifiers::SHIFT,
    ));
    let r = engine.selection_range().expect("selection created");
    assert_eq!((r.start, r.end), (4, 12));

    // A further shift-click moves only the focus.
    engine.handle_pointer(PointerInput::new(
        PointerPhase::Down,
        hex_cell(20, 0),
        Modifiers::SHIFT,
    ));
    let r = engine.selection_range().expect("still active");
    assert_eq!((r.start, r.end), (4, 20));
}

#[test]
fn shift_navigation_extends_selection() {
    let mut engine = self_managed(vec![0; 32]);
    engine.set_cursor_location(Some(10));
    engine.handle_key(KeyInput::named(NamedKey::Right).with_shift());
    engine.handle_key(KeyInput::named(NamedKey::Right).with_shift());
    let r = engine.selection_range().expect("selection");
    assert_eq!((r.start, r.end), (10, 12));
    assert_eq!(engine.cursor_location(), Some(12));
}

#[test]
fn drag_cannot_cross_panes() {
    let mut engine = self_managed(vec![0; 16]);
    engine.handle_pointer(PointerInput::down(hex_cell(2, 0)));
    engine.handle_pointer(PointerInput::moved(ascii_cell(9, 0)));
    let r = engine.selection_range().expect("gesture live");
    assert_eq!((r.start, r.end), (2, 2), "decoded-pane cells ignored");
    engine.handle_pointer(PointerInput::moved(hex_cell(6, 0)));
    let r = engine.selection_range().unwrap();
    assert_eq!((r.start, r.end), (2, 6));
}

#[test]
fn click_away_clears_selection() {
    let mut engine = self_managed(vec![0; 16]);
    drag_hex(&mut engine, 3, 7);
    assert!(engine.selection_range().is_some());
    engine.handle_pointer(PointerInput::down(PointerTarget::Empty));
    assert_eq!(engine.selection_range(), None);
}

#[test]
fn plain_click_places_cursor_without_selection() {
    let mut engine = self_managed(vec![0; 16]);
    engine.handle_pointer(PointerInput::down(hex_cell(5, 0)));
    engine.handle_pointer(PointerInput::up(hex_cell(5, 0)));
    assert_eq!(engine.cursor_location(), Some(5));
    assert_eq!(engine.selection_range(), None);
}

#[test]
fn hover_enter_and_leave_notifications() {
    let (recorder, events) = Recorder::new();
    let mut engine = self_managed(vec![0x41; 16]);
    engine.add_observer(Box::new(recorder));

    engine.handle_pointer(PointerInput::moved(hex_cell(3, 0x41)));
    engine.handle_pointer(PointerInput::moved(hex_cell(3, 0x41))); // no dupe
    engine.handle_pointer(PointerInput::moved(ascii_cell(7, 0x41)));
    engine.handle_pointer(PointerInput::moved(PointerTarget::RowHeader {
        row: 1,
        offset: 16,
    }));
    engine.handle_pointer(PointerInput::moved(PointerTarget::Empty));

    let hovers: Vec<_> = events
        .borrow()
        .iter()
        .filter_map(|e| match e {
            Recorded::Hover(h) => Some(*h),
            _ => None,
        })
        .collect();
    assert_eq!(
        hovers,
        vec![
            Some(HoverTarget::Hex { index: 3, byte: 0x41 }),
            Some(HoverTarget::Ascii { index: 7, byte: 0x41 }),
            Some(HoverTarget::Row { offset: 16 }),
            None,
        ]
    );
}

#[test]
fn selection_reflected_in_grid_flags() {
    let mut engine = self_managed((0u8..32).collect());
    engine.tick();
    drag_hex(&mut engine, 1, 3);
    let report = engine.tick();
    assert!(report.grid_changed, "selection change rebuilds the grid");
    let row = &engine.grid().rows[0];
    let selected: Vec<bool> = row
        .hex
        .iter()
        .take(5)
        .map(|c| c.flags.contains(hex_engine::CellFlags::SELECTED))
        .collect();
    assert_eq!(selected, vec![false, true, true, true, false]);
}

#[test]
fn gestures_ignored_until_started() {
    let mut engine = HexViewEngine::self_managed(vec![0; 8], Config::default());
    engine.handle_pointer(PointerInput::down(hex_cell(2, 0)));
    engine.handle_key(KeyInput::primary('a'));
    assert_eq!(engine.selection_range(), None);
    assert_eq!(engine.cursor_location(), None);

    engine.start_gestures();
    engine.handle_key(KeyInput::primary('a'));
    assert!(engine.selection_range().is_some());
}
