//! Keyboard focus chain.
//!
//! [`FocusChain`] keeps the focusable boxes of the current build pass in a
//! circular doubly-linked list stored in an index arena. Removed nodes go on
//! a free-slot stack and are reused before the arena grows, so add/remove
//! cycles never allocate more slots than the largest chain ever held.
//!
//! Exactly one node is focused whenever the chain is non-empty. Focus moves
//! set and clear the `FOCUS` selector on the boxes involved through
//! [`LayoutBox::selector_set`](crate::layout::LayoutBox::selector_set), so
//! they show up as edges in the boxes' changed selectors.

use crate::css::style::SelectorFlags;
use crate::css::table::StyleTable;
use crate::layout::{BoxId, BoxRegistry};

// ---------------------------------------------------------------------------
// FocusNode
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct FocusNode {
    target: BoxId,
    prev: usize,
    next: usize,
}

// ---------------------------------------------------------------------------
// FocusChain
// ---------------------------------------------------------------------------

/// Circular tab order over a subset of layout boxes.
#[derive(Debug, Clone, Default)]
pub struct FocusChain {
    nodes: Vec<FocusNode>,
    /// Slots available for reuse, most recently freed last.
    free: Vec<usize>,
    focus: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl FocusChain {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, node: FocusNode) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    /// Slot holding `id`, scanning backwards from the tail.
    fn find(&self, id: BoxId) -> Option<usize> {
        let tail = self.tail?;
        let mut slot = tail;
        loop {
            if self.nodes[slot].target == id {
                return Some(slot);
            }
            slot = self.nodes[slot].prev;
            if slot == tail {
                return None;
            }
        }
    }

    /// Append `id` after the tail.
    ///
    /// The first box added to an empty chain takes focus directly: `FOCUS`
    /// is set without an edge and its current style is re-resolved, so it
    /// looks focused without reacting as if the user had just focused it.
    /// Adding a box that is already tracked does nothing.
    pub fn add(&mut self, boxes: &mut BoxRegistry, styles: &StyleTable, id: BoxId) {
        if self.find(id).is_some() {
            log::debug!("focus chain already tracks box {}", id.index());
            return;
        }

        let slot = self.alloc(FocusNode { target: id, prev: 0, next: 0 });
        match self.tail {
            None => {
                self.nodes[slot].prev = slot;
                self.nodes[slot].next = slot;
                self.focus = Some(slot);

                let lay = &mut boxes[id];
                lay.active |= SelectorFlags::FOCUS;
                lay.current_style = styles.resolve(lay.base_style, lay.active);
            }
            Some(tail) => {
                let head = self.nodes[tail].next;
                self.nodes[slot].prev = tail;
                self.nodes[slot].next = head;
                self.nodes[tail].next = slot;
                self.nodes[head].prev = slot;
            }
        }
        self.tail = Some(slot);
        self.len += 1;
    }

    /// Remove `id` from the chain. If it held focus, focus moves to the
    /// previous box first. Untracked boxes are ignored.
    pub fn remove(&mut self, boxes: &mut BoxRegistry, id: BoxId) {
        let Some(slot) = self.find(id) else {
            log::debug!("focus chain remove: box {} is not tracked", id.index());
            return;
        };

        let FocusNode { prev, next, .. } = self.nodes[slot];
        if self.len == 1 {
            boxes[id].selector_unset(SelectorFlags::FOCUS);
            self.focus = None;
            self.tail = None;
        } else {
            if self.focus == Some(slot) {
                boxes[id].selector_unset(SelectorFlags::FOCUS);
                self.focus = Some(prev);
                boxes[self.nodes[prev].target].selector_set(SelectorFlags::FOCUS);
            }
            if self.tail == Some(slot) {
                self.tail = Some(prev);
            }
            self.nodes[prev].next = next;
            self.nodes[next].prev = prev;
        }

        self.free.push(slot);
        self.len -= 1;
    }

    /// Move focus to `id`. A box that is not in the chain is ignored.
    ///
    /// # Panics
    ///
    /// Panics if the chain is empty.
    pub fn focus_box(&mut self, boxes: &mut BoxRegistry, id: BoxId) {
        let current = self.expect_focus();
        if self.nodes[current].target == id {
            return;
        }
        match self.find(id) {
            Some(slot) => self.move_focus(boxes, current, slot),
            None => log::debug!("focus request for untracked box {}", id.index()),
        }
    }

    /// Focus the next box, wrapping around. Returns the new focus.
    ///
    /// # Panics
    ///
    /// Panics if the chain is empty.
    pub fn focus_next(&mut self, boxes: &mut BoxRegistry) -> BoxId {
        let current = self.expect_focus();
        let next = self.nodes[current].next;
        self.move_focus(boxes, current, next);
        self.nodes[next].target
    }

    /// Focus the previous box, wrapping around. Returns the new focus.
    ///
    /// # Panics
    ///
    /// Panics if the chain is empty.
    pub fn focus_previous(&mut self, boxes: &mut BoxRegistry) -> BoxId {
        let current = self.expect_focus();
        let prev = self.nodes[current].prev;
        self.move_focus(boxes, current, prev);
        self.nodes[prev].target
    }

    /// Move focus to `id` without recording edges, re-resolving the styles
    /// of both boxes. Returns whether `id` is in the chain.
    pub fn restore(&mut self, boxes: &mut BoxRegistry, styles: &StyleTable, id: BoxId) -> bool {
        let Some(slot) = self.find(id) else {
            return false;
        };
        if let Some(current) = self.focus {
            let old = &mut boxes[self.nodes[current].target];
            old.active &= !SelectorFlags::FOCUS;
            old.current_style = styles.resolve(old.base_style, old.active);
        }
        let new = &mut boxes[id];
        new.active |= SelectorFlags::FOCUS;
        new.current_style = styles.resolve(new.base_style, new.active);
        self.focus = Some(slot);
        true
    }

    fn expect_focus(&self) -> usize {
        match self.focus {
            Some(slot) => slot,
            None => panic!("focus chain is empty"),
        }
    }

    fn move_focus(&mut self, boxes: &mut BoxRegistry, from: usize, to: usize) {
        boxes[self.nodes[from].target].selector_unset(SelectorFlags::FOCUS);
        self.focus = Some(to);
        boxes[self.nodes[to].target].selector_set(SelectorFlags::FOCUS);
        log::trace!(
            "focus moved from box {} to box {}",
            self.nodes[from].target.index(),
            self.nodes[to].target.index()
        );
    }

    /// Drop every node. All slots become reusable.
    pub fn clear(&mut self) {
        self.free = (0..self.nodes.len()).rev().collect();
        self.focus = None;
        self.tail = None;
        self.len = 0;
    }

    /// The focused box, if any.
    pub fn focused(&self) -> Option<BoxId> {
        self.focus.map(|slot| self.nodes[slot].target)
    }

    pub fn contains(&self, id: BoxId) -> bool {
        self.find(id).is_some()
    }

    /// Boxes in chain order, starting at the head.
    pub fn iter(&self) -> impl Iterator<Item = BoxId> + '_ {
        let mut slot = self.tail.map(|tail| self.nodes[tail].next);
        (0..self.len).filter_map(move |_| {
            let current = slot?;
            slot = Some(self.nodes[current].next);
            Some(self.nodes[current].target)
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of arena slots ever allocated, live or free.
    pub fn allocated(&self) -> usize {
        self.nodes.len()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
