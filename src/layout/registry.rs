//! Fixed-capacity store of layout boxes, reset on every rebuild.

use std::ops::{Index, IndexMut};

use crate::css::table::StyleId;

use super::layout_box::LayoutBox;

/// Index of a box in the [`BoxRegistry`]. Valid until the next
/// [`BoxRegistry::clear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoxId(usize);

impl BoxId {
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// The boxes of the current build pass, in creation order.
#[derive(Debug, Clone)]
pub struct BoxRegistry {
    boxes: Vec<LayoutBox>,
    capacity: usize,
}

impl BoxRegistry {
    /// An empty registry holding at most `capacity` boxes.
    pub fn new(capacity: usize) -> Self {
        Self {
            boxes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Allocate the next box with `style` as base and current style.
    ///
    /// # Panics
    ///
    /// Panics when the registry is full.
    pub fn push(&mut self, style: StyleId) -> BoxId {
        assert!(
            self.boxes.len() < self.capacity,
            "layout box capacity exceeded ({} boxes)",
            self.capacity
        );
        let id = BoxId(self.boxes.len());
        self.boxes.push(LayoutBox::new(style));
        id
    }

    pub fn get(&self, id: BoxId) -> Option<&LayoutBox> {
        self.boxes.get(id.0)
    }

    pub fn get_mut(&mut self, id: BoxId) -> Option<&mut LayoutBox> {
        self.boxes.get_mut(id.0)
    }

    /// Id of the box at `index`, if allocated.
    pub fn id_at(&self, index: usize) -> Option<BoxId> {
        (index < self.boxes.len()).then_some(BoxId(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (BoxId, &LayoutBox)> {
        self.boxes.iter().enumerate().map(|(i, b)| (BoxId(i), b))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BoxId, &mut LayoutBox)> {
        self.boxes.iter_mut().enumerate().map(|(i, b)| (BoxId(i), b))
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every box. Storage is kept for the next build pass.
    pub fn clear(&mut self) {
        self.boxes.clear();
    }

    /// Reset the per-frame flags: changed selectors and content changes.
    pub fn end_frame(&mut self) {
        for lay in &mut self.boxes {
            lay.changed = Default::default();
            lay.content_changed = false;
        }
    }
}

impl Index<BoxId> for BoxRegistry {
    type Output = LayoutBox;

    fn index(&self, id: BoxId) -> &LayoutBox {
        &self.boxes[id.0]
    }
}

impl IndexMut<BoxId> for BoxRegistry {
    fn index_mut(&mut self, id: BoxId) -> &mut LayoutBox {
        &mut self.boxes[id.0]
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::style::SelectorFlags;
    use crate::css::table::StyleName;

    #[test]
    fn push_assigns_sequential_ids() {
        let mut reg = BoxRegistry::new(4);
        let a = reg.push(StyleName::Background.id());
        let b = reg.push(StyleName::Button.id());
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg[b].base_style, StyleName::Button.id());
        assert_eq!(reg[b].current_style, StyleName::Button.id());
    }

    #[test]
    #[should_panic(expected = "capacity exceeded")]
    fn push_past_capacity_panics() {
        let mut reg = BoxRegistry::new(1);
        reg.push(StyleName::Label.id());
        reg.push(StyleName::Label.id());
    }

    #[test]
    fn clear_resets_and_reuses_ids() {
        let mut reg = BoxRegistry::new(2);
        reg.push(StyleName::Label.id());
        reg.push(StyleName::Label.id());
        reg.clear();
        assert!(reg.is_empty());
        let id = reg.push(StyleName::Button.id());
        assert_eq!(id.index(), 0);
        assert_eq!(reg.capacity(), 2);
    }

    #[test]
    fn end_frame_clears_changed_and_content_flags() {
        let mut reg = BoxRegistry::new(2);
        let id = reg.push(StyleName::TextEntry.id());
        reg[id].selector_set(SelectorFlags::HOVER);
        reg[id].content_changed = true;

        reg.end_frame();
        assert!(reg[id].changed.is_empty());
        assert!(!reg[id].content_changed);
        // Active selectors survive the frame boundary.
        assert!(reg[id].is_set(SelectorFlags::HOVER));
    }

    #[test]
    fn id_at_bounds() {
        let mut reg = BoxRegistry::new(2);
        reg.push(StyleName::Label.id());
        assert!(reg.id_at(0).is_some());
        assert!(reg.id_at(1).is_none());
        assert!(reg.get(BoxId(5)).is_none());
    }
}
