//! Selector engine and style cascade.
//!
//! [`update_selectors`] derives the hover and active selectors of every box
//! from the pointer and routes click focus requests to the focus chain.
//! [`apply_cascade`] then re-resolves the current style of boxes whose
//! changed selectors touch a state with a style variant.

use crate::css::style::{SelectorFlags, StyleState};
use crate::css::table::StyleTable;
use crate::focus::FocusChain;
use crate::geometry::Vec2;
use crate::layout::BoxRegistry;

/// Pointer state seen by the selector engine for one update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub position: Vec2,
    /// Primary button held.
    pub down: bool,
    /// Where the current or last primary press started.
    pub click_origin: Vec2,
    /// A primary click completed this frame.
    pub clicked: bool,
}

/// Recompute hover and active selectors for every box.
///
/// `changed` accumulates the symmetric difference of old and new selectors,
/// so calling this several times in a frame still reports every edge. When a
/// click completes inside a focusable box, the first such box in registry
/// order receives focus.
pub fn update_selectors(boxes: &mut BoxRegistry, focus: &mut FocusChain, pointer: &PointerState) {
    let mut focus_request = None;

    for (id, lay) in boxes.iter_mut() {
        let inside = lay.rect.contains(pointer.position);
        let started_inside = lay.rect.contains(pointer.click_origin);
        let old = lay.active;

        if !lay.active.contains(SelectorFlags::DISABLED) {
            lay.active.set(SelectorFlags::ACTIVE, pointer.down && inside && started_inside);
        }
        lay.active.set(SelectorFlags::HOVER, inside);

        if pointer.clicked && inside && focus_request.is_none() && focus.contains(id) {
            focus_request = Some(id);
        }

        lay.changed |= old ^ lay.active;
    }

    if let Some(id) = focus_request {
        focus.focus_box(boxes, id);
    }
}

/// Re-resolve the current style of boxes whose changed selectors touch a
/// state their base style has a variant for. Returns whether any box was
/// restyled.
pub fn apply_cascade(boxes: &mut BoxRegistry, styles: &StyleTable) -> bool {
    let mut restyled = false;
    for (_, lay) in boxes.iter_mut() {
        let base = styles.get(lay.base_style);
        let touched = StyleState::ALL
            .into_iter()
            .any(|state| lay.changed.contains(state.flag()) && base.variant(state).is_some());
        if touched {
            lay.current_style = styles.resolve(lay.base_style, lay.active);
            restyled = true;
        }
    }
    restyled
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::table::StyleName;
    use crate::geometry::Rect;
    use crate::layout::BoxId;

    fn pointer(x: f64, y: f64, down: bool) -> PointerState {
        PointerState {
            position: Vec2::new(x, y),
            down,
            click_origin: Vec2::new(x, y),
            clicked: false,
        }
    }

    fn one_box(style: StyleName) -> (BoxRegistry, BoxId) {
        let mut boxes = BoxRegistry::new(8);
        let id = boxes.push(style.id());
        boxes[id].rect = Rect::from_coords(0.0, 0.0, 50.0, 20.0);
        (boxes, id)
    }

    // ── Hover / active ───────────────────────────────────────────────

    #[test]
    fn press_inside_sets_hover_and_active() {
        let (mut boxes, id) = one_box(StyleName::Button);
        let mut focus = FocusChain::new();

        update_selectors(&mut boxes, &mut focus, &pointer(25.0, 10.0, true));
        assert_eq!(boxes[id].active, SelectorFlags::HOVER | SelectorFlags::ACTIVE);

        update_selectors(&mut boxes, &mut focus, &pointer(25.0, 10.0, false));
        assert_eq!(boxes[id].active, SelectorFlags::HOVER);
    }

    #[test]
    fn bounds_are_inclusive() {
        let (mut boxes, id) = one_box(StyleName::Button);
        let mut focus = FocusChain::new();
        update_selectors(&mut boxes, &mut focus, &pointer(50.0, 20.0, false));
        assert!(boxes[id].is_set(SelectorFlags::HOVER));
        update_selectors(&mut boxes, &mut focus, &pointer(50.5, 20.0, false));
        assert!(!boxes[id].is_set(SelectorFlags::HOVER));
    }

    #[test]
    fn press_started_outside_is_not_active() {
        let (mut boxes, id) = one_box(StyleName::Button);
        let mut focus = FocusChain::new();
        let mut p = pointer(25.0, 10.0, true);
        p.click_origin = Vec2::new(100.0, 100.0);
        update_selectors(&mut boxes, &mut focus, &p);
        assert_eq!(boxes[id].active, SelectorFlags::HOVER);
    }

    #[test]
    fn disabled_box_keeps_active_state() {
        let (mut boxes, id) = one_box(StyleName::Button);
        let mut focus = FocusChain::new();
        boxes[id].active = SelectorFlags::DISABLED;
        update_selectors(&mut boxes, &mut focus, &pointer(25.0, 10.0, true));
        assert!(!boxes[id].is_set(SelectorFlags::ACTIVE));
        assert!(boxes[id].is_set(SelectorFlags::HOVER));
    }

    #[test]
    fn changed_accumulates_within_a_frame() {
        let (mut boxes, id) = one_box(StyleName::Button);
        let mut focus = FocusChain::new();

        update_selectors(&mut boxes, &mut focus, &pointer(25.0, 10.0, true));
        update_selectors(&mut boxes, &mut focus, &pointer(25.0, 10.0, false));
        // Active went up and back down; both passes are remembered.
        assert_eq!(boxes[id].changed, SelectorFlags::HOVER | SelectorFlags::ACTIVE);
        assert_eq!(boxes[id].active, SelectorFlags::HOVER);

        boxes.end_frame();
        update_selectors(&mut boxes, &mut focus, &pointer(25.0, 10.0, false));
        assert!(boxes[id].changed.is_empty());
    }

    // ── Focus requests ───────────────────────────────────────────────

    #[test]
    fn click_focuses_first_focusable_box() {
        let styles = StyleTable::with_default_theme().unwrap();
        let mut boxes = BoxRegistry::new(8);
        let panel = boxes.push(StyleName::Background.id());
        let a = boxes.push(StyleName::TextEntry.id());
        let b = boxes.push(StyleName::TextEntry.id());
        boxes[panel].rect = Rect::from_coords(0.0, 0.0, 200.0, 200.0);
        boxes[a].rect = Rect::from_coords(10.0, 10.0, 60.0, 30.0);
        boxes[b].rect = Rect::from_coords(10.0, 40.0, 60.0, 60.0);

        let mut focus = FocusChain::new();
        focus.add(&mut boxes, &styles, a);
        focus.add(&mut boxes, &styles, b);

        let mut p = pointer(20.0, 50.0, false);
        p.clicked = true;
        update_selectors(&mut boxes, &mut focus, &p);
        assert_eq!(focus.focused(), Some(b));
        assert!(boxes[b].rising_edge(SelectorFlags::FOCUS));
    }

    #[test]
    fn overlapping_focusables_focus_only_the_first() {
        let styles = StyleTable::with_default_theme().unwrap();
        let mut boxes = BoxRegistry::new(8);
        let a = boxes.push(StyleName::TextEntry.id());
        let b = boxes.push(StyleName::TextEntry.id());
        boxes[a].rect = Rect::from_coords(0.0, 0.0, 60.0, 30.0);
        boxes[b].rect = Rect::from_coords(20.0, 10.0, 80.0, 40.0);

        let mut focus = FocusChain::new();
        focus.add(&mut boxes, &styles, a);
        focus.add(&mut boxes, &styles, b);
        focus.focus_box(&mut boxes, b);
        boxes.end_frame();

        let mut p = pointer(30.0, 20.0, false);
        p.clicked = true;
        update_selectors(&mut boxes, &mut focus, &p);

        assert_eq!(focus.focused(), Some(a));
        let rising: Vec<BoxId> = boxes
            .iter()
            .filter(|(_, lay)| lay.rising_edge(SelectorFlags::FOCUS))
            .map(|(id, _)| id)
            .collect();
        assert_eq!(rising, vec![a]);
        assert!(boxes[b].falling_edge(SelectorFlags::FOCUS));
    }

    #[test]
    fn unplaced_box_ignores_pointer_at_origin() {
        let styles = StyleTable::with_default_theme().unwrap();
        let mut boxes = BoxRegistry::new(8);
        let id = boxes.push(StyleName::Button.id());
        let mut focus = FocusChain::new();
        focus.add(&mut boxes, &styles, id);
        boxes.end_frame();

        update_selectors(&mut boxes, &mut focus, &pointer(0.0, 0.0, true));
        assert_eq!(boxes[id].active, SelectorFlags::FOCUS);

        let mut p = pointer(0.0, 0.0, false);
        p.clicked = true;
        update_selectors(&mut boxes, &mut focus, &p);
        assert!(boxes[id].changed.is_empty());
    }

    #[test]
    fn click_with_empty_chain_is_ignored() {
        let (mut boxes, id) = one_box(StyleName::Button);
        let mut focus = FocusChain::new();
        let mut p = pointer(25.0, 10.0, false);
        p.clicked = true;
        update_selectors(&mut boxes, &mut focus, &p);
        assert!(!boxes[id].is_set(SelectorFlags::FOCUS));
    }

    // ── Cascade ──────────────────────────────────────────────────────

    #[test]
    fn cascade_switches_to_active_variant_and_back() {
        let styles = StyleTable::with_default_theme().unwrap();
        let (mut boxes, id) = one_box(StyleName::Button);
        let mut focus = FocusChain::new();

        update_selectors(&mut boxes, &mut focus, &pointer(25.0, 10.0, true));
        assert!(apply_cascade(&mut boxes, &styles));
        assert_eq!(boxes[id].current_style, styles.find("button-active").unwrap());

        boxes.end_frame();
        update_selectors(&mut boxes, &mut focus, &pointer(25.0, 10.0, false));
        assert!(apply_cascade(&mut boxes, &styles));
        assert_eq!(boxes[id].current_style, StyleName::Button.id());
    }

    #[test]
    fn hover_alone_does_not_restyle() {
        let styles = StyleTable::with_default_theme().unwrap();
        let (mut boxes, id) = one_box(StyleName::Button);
        let mut focus = FocusChain::new();
        update_selectors(&mut boxes, &mut focus, &pointer(25.0, 10.0, false));
        assert!(!apply_cascade(&mut boxes, &styles));
        assert_eq!(boxes[id].current_style, StyleName::Button.id());
    }

    #[test]
    fn state_without_variant_does_not_restyle() {
        let styles = StyleTable::with_default_theme().unwrap();
        let (mut boxes, _) = one_box(StyleName::Label);
        let mut focus = FocusChain::new();
        update_selectors(&mut boxes, &mut focus, &pointer(25.0, 10.0, true));
        assert!(!apply_cascade(&mut boxes, &styles));
    }

    #[test]
    fn disabled_uses_disabled_variant() {
        let styles = StyleTable::with_default_theme().unwrap();
        let (mut boxes, id) = one_box(StyleName::Button);
        boxes[id].selector_set(SelectorFlags::DISABLED);
        assert!(apply_cascade(&mut boxes, &styles));
        assert_eq!(boxes[id].current_style, styles.find("button-disabled").unwrap());
    }
}
