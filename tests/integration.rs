//! Integration tests for cascade-ui.
//!
//! These tests exercise the public API from outside the crate: the gesture
//! detector, focus chain and selector engine on their own, and the engine
//! driven frame by frame through the `Pilot`.

use cascade_ui::behavior::{EntryState, IntString};
use cascade_ui::css::{SelectorFlags, StyleName, StyleTable};
use cascade_ui::event::clipboard::{channel_clipboard, ClipboardRequest};
use cascade_ui::event::input::{InputFrame, Key, Modifiers, MouseButton};
use cascade_ui::event::GestureDetector;
use cascade_ui::focus::FocusChain;
use cascade_ui::geometry::{Rect, Vec2};
use cascade_ui::layout::{BoxId, BoxRegistry};
use cascade_ui::render::DrawCommand;
use cascade_ui::selector::{update_selectors, PointerState};
use cascade_ui::testing::{Pilot, RecordingPainter};
use cascade_ui::{Engine, EngineConfig};
use pretty_assertions::assert_eq;

fn pilot() -> Pilot {
    Pilot::new(EngineConfig::default()).unwrap()
}

// ---------------------------------------------------------------------------
// Gestures
// ---------------------------------------------------------------------------

/// Feed (down, elapsed) samples and count clicks and double-clicks.
fn count_gestures(samples: &[(bool, f64)]) -> (usize, usize) {
    let mut detector = GestureDetector::new(200.0, 3.0);
    let (mut clicks, mut doubles) = (0, 0);
    for &(down, elapsed) in samples {
        let frame = InputFrame::new()
            .with_elapsed(elapsed)
            .with_button(MouseButton::Primary, down);
        detector.update(&frame);
        clicks += usize::from(detector.clicked(MouseButton::Primary));
        doubles += usize::from(detector.double_clicked(MouseButton::Primary));
    }
    (clicks, doubles)
}

#[test]
fn test_slow_clicks_never_double() {
    // Every press comes at least the threshold after the previous click.
    let samples: Vec<(bool, f64)> = (0..4).flat_map(|_| [(true, 200.0), (false, 16.0)]).collect();
    assert_eq!(count_gestures(&samples), (4, 0));
}

#[test]
fn test_quick_second_press_doubles() {
    let samples = [(true, 16.0), (false, 16.0), (true, 199.0), (false, 16.0)];
    assert_eq!(count_gestures(&samples), (2, 1));
}

#[test]
fn test_drag_needs_distance_beyond_threshold() {
    let mut detector = GestureDetector::new(200.0, 3.0);
    let held = |x: f64| InputFrame::new().with_pointer(x, 0.0).with_button(MouseButton::Primary, true);

    detector.update(&held(0.0));
    detector.update(&held(3.0));
    assert!(!detector.dragging(MouseButton::Primary));
    detector.update(&held(3.5));
    assert!(detector.dragging(MouseButton::Primary));
    detector.update(&InputFrame::new().with_pointer(3.5, 0.0));
    assert!(!detector.dragging(MouseButton::Primary));
}

#[test]
#[should_panic(expected = "elapsed time must be positive")]
fn test_zero_elapsed_is_rejected() {
    let mut detector = GestureDetector::new(200.0, 3.0);
    detector.update(&InputFrame::new().with_elapsed(0.0));
}

// ---------------------------------------------------------------------------
// Focus chain
// ---------------------------------------------------------------------------

fn registry(n: usize) -> (BoxRegistry, Vec<BoxId>) {
    let mut boxes = BoxRegistry::new(n);
    let ids = (0..n).map(|_| boxes.push(StyleName::TextEntry.id())).collect();
    (boxes, ids)
}

#[test]
fn test_focus_cycle_returns_to_start() {
    let styles = StyleTable::with_default_theme().unwrap();
    let (mut boxes, ids) = registry(6);
    let mut chain = FocusChain::new();

    for &id in &ids {
        chain.add(&mut boxes, &styles, id);
    }
    chain.remove(&mut boxes, ids[0]);
    chain.remove(&mut boxes, ids[3]);
    chain.add(&mut boxes, &styles, ids[0]);
    chain.remove(&mut boxes, ids[5]);

    let start = chain.focused().unwrap();
    let visited: Vec<BoxId> = (0..chain.len()).map(|_| chain.focus_next(&mut boxes)).collect();
    assert_eq!(chain.focused(), Some(start));
    assert_eq!(visited.len(), 4);
    assert_eq!(visited.last(), Some(&start));
}

#[test]
fn test_focus_recycling_is_bounded() {
    let styles = StyleTable::with_default_theme().unwrap();
    let (mut boxes, ids) = registry(5);
    let mut chain = FocusChain::new();

    for _ in 0..10 {
        for &id in &ids {
            chain.add(&mut boxes, &styles, id);
        }
        for &id in ids.iter().rev() {
            chain.remove(&mut boxes, id);
        }
    }
    assert!(chain.is_empty());
    assert!(chain.allocated() <= ids.len());
}

#[test]
#[should_panic(expected = "focus chain is empty")]
fn test_next_on_empty_chain_panics() {
    let (mut boxes, _) = registry(1);
    FocusChain::new().focus_next(&mut boxes);
}

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

#[test]
fn test_changed_is_accumulated_xor() {
    let (mut boxes, ids) = registry(1);
    boxes[ids[0]].rect = Rect::from_coords(0.0, 0.0, 50.0, 20.0);
    let mut chain = FocusChain::new();

    let passes = [
        PointerState { position: Vec2::new(10.0, 10.0), ..PointerState::default() },
        PointerState {
            position: Vec2::new(10.0, 10.0),
            down: true,
            click_origin: Vec2::new(10.0, 10.0),
            clicked: false,
        },
        PointerState { position: Vec2::new(90.0, 10.0), ..PointerState::default() },
    ];

    let mut expected = SelectorFlags::empty();
    for pointer in &passes {
        let before = boxes[ids[0]].active;
        update_selectors(&mut boxes, &mut chain, pointer);
        expected |= before ^ boxes[ids[0]].active;
    }
    assert_eq!(boxes[ids[0]].changed, expected);
    assert_eq!(expected, SelectorFlags::HOVER | SelectorFlags::ACTIVE);
    assert!(boxes[ids[0]].active.is_empty());
}

#[test]
fn test_hover_and_active_on_press_and_release() {
    let mut pilot = pilot();
    let id = pilot.engine_mut().add_box(StyleName::Label);
    pilot.engine_mut().set_rect(id, Rect::from_coords(0.0, 0.0, 50.0, 20.0));

    pilot.move_to(25.0, 10.0);
    pilot.press();
    assert_eq!(pilot.engine().box_ref(id).active, SelectorFlags::HOVER | SelectorFlags::ACTIVE);

    pilot.release();
    assert_eq!(pilot.engine().box_ref(id).active, SelectorFlags::HOVER);
}

#[test]
fn test_press_started_outside_is_not_active() {
    let mut pilot = pilot();
    let id = pilot.engine_mut().add_box(StyleName::Label);
    pilot.engine_mut().set_rect(id, Rect::from_coords(0.0, 0.0, 50.0, 20.0));

    pilot.move_to(80.0, 10.0);
    pilot.press();
    pilot.move_to(25.0, 10.0);
    assert_eq!(pilot.engine().box_ref(id).active, SelectorFlags::HOVER);
}

#[test]
fn test_click_focuses_focusable_box() {
    let mut pilot = pilot();
    let a = pilot.engine_mut().add_box(StyleName::TextEntry);
    let b = pilot.engine_mut().add_box(StyleName::TextEntry);
    pilot.engine_mut().set_rect(a, Rect::from_coords(0.0, 0.0, 50.0, 20.0));
    pilot.engine_mut().set_rect(b, Rect::from_coords(0.0, 30.0, 50.0, 50.0));
    pilot.engine_mut().add_focusable(a);
    pilot.engine_mut().add_focusable(b);

    pilot.click_at(10.0, 40.0);
    assert_eq!(pilot.engine().focused(), Some(b));
    let focus = pilot.engine().styles().find("text-entry-focus").unwrap();
    assert_eq!(pilot.engine().box_ref(b).current_style, focus);
    assert_eq!(pilot.engine().box_ref(a).current_style, StyleName::TextEntry.id());
}

// ---------------------------------------------------------------------------
// Text entry
// ---------------------------------------------------------------------------

/// An entry holding 8 after a plain label box, both focusable. The label
/// holds the initial focus so tabbing to the entry is a focus edge.
fn entry_pilot() -> (Pilot, BoxId, cascade_ui::behavior::BehaviorId) {
    let mut pilot = pilot();
    let engine = pilot.engine_mut();
    let other = engine.add_box(StyleName::Button);
    let entry = engine.add_box(StyleName::TextEntry);
    engine.set_rect(other, Rect::from_coords(0.0, 0.0, 40.0, 20.0));
    engine.set_rect(entry, Rect::from_coords(50.0, 0.0, 110.0, 20.0));
    let behavior = engine.add_text_entry(entry, IntString::new(8));
    engine.add_focusable(other);
    engine.add_focusable(entry);
    (pilot, entry, behavior)
}

#[test]
fn test_type_then_escape_restores() {
    let (mut pilot, entry, behavior) = entry_pilot();
    pilot.key(Key::Tab);
    assert_eq!(pilot.engine().text_entry(behavior).unwrap().state(), EntryState::Selected);

    pilot.type_text("123");
    assert_eq!(pilot.engine().box_ref(entry).text(), Some("123"));

    pilot.key(Key::Escape);
    assert_eq!(pilot.engine().box_ref(entry).text(), Some("8"));
    assert!(!pilot.engine().box_ref(entry).content_changed);
    assert_eq!(pilot.engine().text_entry(behavior).unwrap().state(), EntryState::Idle);
}

#[test]
fn test_type_then_enter_commits() {
    let (mut pilot, entry, behavior) = entry_pilot();
    pilot.key(Key::Tab);
    pilot.type_text("123");
    pilot.key(Key::Enter);

    assert!(pilot.engine().box_ref(entry).content_changed);
    assert_eq!(pilot.engine().text_entry(behavior).unwrap().value().value(), 123);

    pilot.tick();
    assert!(!pilot.engine().box_ref(entry).content_changed);
}

#[test]
fn test_backspace_to_empty() {
    let (mut pilot, entry, _) = entry_pilot();
    pilot.key(Key::Tab);
    pilot.type_text("5");
    pilot.key(Key::Backspace);
    assert_eq!(pilot.engine().box_ref(entry).text(), Some(""));

    pilot.key(Key::Backspace);
    assert_eq!(pilot.engine().box_ref(entry).text(), Some(""));
}

#[test]
fn test_focus_loss_commits() {
    let (mut pilot, entry, behavior) = entry_pilot();
    pilot.key(Key::Tab);
    pilot.type_text("42");
    pilot.key(Key::Tab);

    assert!(pilot.engine().box_ref(entry).content_changed);
    assert_eq!(pilot.engine().text_entry(behavior).unwrap().state(), EntryState::Idle);
}

#[test]
fn test_selected_entry_paints_highlight() {
    let (mut pilot, _, _) = entry_pilot();
    pilot.key(Key::Tab);

    let (_, selection_bg) = pilot.engine().styles().selection_colors();
    let painter = pilot.render();
    let highlighted: Vec<&str> = painter
        .commands()
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, background: Some(bg), .. } if *bg == selection_bg => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(highlighted, vec!["8"]);
}

// ---------------------------------------------------------------------------
// Clipboard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_paste_through_channel_clipboard() {
    let (clipboard, mut service) = channel_clipboard();
    let engine = Engine::new(EngineConfig::default()).unwrap().with_clipboard(clipboard);
    let mut pilot = Pilot::from_engine(engine);
    let entry = pilot.engine_mut().add_box(StyleName::TextEntry);
    pilot.engine_mut().set_rect(entry, Rect::from_coords(0.0, 0.0, 60.0, 20.0));
    let behavior = pilot.engine_mut().add_text_entry(entry, IntString::new(8));
    pilot.engine_mut().add_focusable(entry);

    pilot.click_at(10.0, 10.0);
    pilot.key_with(Key::Char('v'), Modifiers::CTRL);
    assert_eq!(service.next_request().await, Some(ClipboardRequest::GetText));

    service.reply("  64\n");
    pilot.tick();

    let state = pilot.engine().text_entry(behavior).unwrap();
    assert_eq!(state.state(), EntryState::Editing);
    assert_eq!(state.value().value(), 64);

    pilot.key(Key::Enter);
    assert!(pilot.engine().box_ref(entry).content_changed);
}

#[tokio::test]
async fn test_copy_sends_selected_text() {
    let (clipboard, mut service) = channel_clipboard();
    let engine = Engine::new(EngineConfig::default()).unwrap().with_clipboard(clipboard);
    let mut pilot = Pilot::from_engine(engine);
    let entry = pilot.engine_mut().add_box(StyleName::TextEntry);
    pilot.engine_mut().set_rect(entry, Rect::from_coords(0.0, 0.0, 60.0, 20.0));
    pilot.engine_mut().add_text_entry(entry, IntString::new(2024));
    pilot.engine_mut().add_focusable(entry);

    pilot.click_at(10.0, 10.0);
    pilot.key_with(Key::Char('c'), Modifiers::CTRL);
    assert_eq!(
        service.next_request().await,
        Some(ClipboardRequest::SetText("2024".into()))
    );
}

#[test]
fn test_negative_paste_becomes_zero() {
    let (mut pilot, entry, behavior) = entry_pilot();
    pilot.key(Key::Tab);
    pilot.engine_mut().deliver_clipboard("-12");
    pilot.tick();

    assert_eq!(pilot.engine().text_entry(behavior).unwrap().value().value(), 0);
    assert_eq!(pilot.engine().box_ref(entry).text(), Some("0"));
}

// ---------------------------------------------------------------------------
// Rebuild and painting
// ---------------------------------------------------------------------------

#[test]
fn test_rebuild_keeps_focus() {
    let (mut pilot, entry, _) = entry_pilot();
    pilot.key(Key::Tab);
    assert_eq!(pilot.engine().focused(), Some(entry));

    pilot.end_frame();
    let engine = pilot.engine_mut();
    engine.begin_rebuild();
    let other = engine.add_box(StyleName::Button);
    let rebuilt = engine.add_box(StyleName::TextEntry);
    engine.add_text_entry(rebuilt, IntString::new(8));
    engine.add_focusable(other);
    engine.add_focusable(rebuilt);
    engine.end_rebuild();

    assert_eq!(rebuilt, entry);
    assert_eq!(pilot.engine().focused(), Some(rebuilt));
    assert!(!pilot.engine().box_ref(other).is_set(SelectorFlags::FOCUS));
}

#[test]
fn test_label_paint_snapshot() {
    let mut pilot = pilot();
    let label = pilot.engine_mut().add_box(StyleName::Label);
    pilot.engine_mut().set_rect(label, Rect::from_coords(0.0, 0.0, 100.0, 20.0));
    pilot.engine_mut().set_text(label, "Hi");

    let mut painter = RecordingPainter::new();
    pilot.engine().paint(&mut painter);
    insta::assert_snapshot!(painter.to_text(), @r#"
    fill 0,0 100,20 r=0 rgba(0,0,0,0.00)
    clip 0,0 100,20
    text 43,4 "Hi" rgba(51,51,51,1.00)
    unclip
    "#);
}

#[test]
fn test_place_sizes_box_to_content() {
    let mut engine = Engine::new(EngineConfig::default())
        .unwrap()
        .with_text_measure(RecordingPainter::new());
    let id = engine.add_box(StyleName::Button);
    engine.set_text(id, "Go");
    engine.place(id, Vec2::new(5.0, 5.0));
    // "Go" is 14x12; button padding is 3px 12px with a 1px border.
    assert_eq!(engine.box_ref(id).rect, Rect::from_coords(5.0, 5.0, 45.0, 25.0));
}

// ---------------------------------------------------------------------------
// Crossterm adapter
// ---------------------------------------------------------------------------

#[test]
fn test_crossterm_events_fold_into_frame() {
    use crossterm::event::{
        Event, KeyCode, KeyEvent, KeyModifiers, MouseButton as CtButton, MouseEvent, MouseEventKind,
    };

    let mut frame = InputFrame::new();
    let mouse = Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(CtButton::Left),
        column: 4,
        row: 2,
        modifiers: KeyModifiers::NONE,
    });
    assert!(frame.apply_crossterm(&mouse));
    assert!(frame.apply_crossterm(&Event::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE))));

    assert_eq!(frame.pointer, Vec2::new(4.0, 2.0));
    assert!(frame.is_down(MouseButton::Primary));
    assert_eq!(frame.key.map(|k| k.code), Some(Key::Tab));
}
