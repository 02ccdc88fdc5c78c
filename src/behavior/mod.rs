//! Interaction behaviors attached to layout boxes.
//!
//! A behavior turns gestures, selector edges and keys into semantic events
//! for one box: a [`ButtonBehavior`] reports activation, a
//! [`TextEntryBehavior`] edits a number. Behaviors live in a
//! [`BehaviorSet`] that is emptied on every rebuild.

pub mod button;
pub mod text_entry;

use slotmap::{new_key_type, SlotMap};

use crate::layout::BoxId;

pub use button::ButtonBehavior;
pub use text_entry::{EntryEffect, EntryInput, EntryState, IntString, TextEntryBehavior};

new_key_type! {
    /// Handle to a behavior registered in the current build pass.
    pub struct BehaviorId;
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// A text selection inside one box's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub dest: BoxId,
    /// Byte offset of the first selected character.
    pub start: usize,
    /// Selected byte count, `None` for "to the end".
    pub len: Option<usize>,
}

impl Selection {
    /// Select the whole content of `dest`.
    pub fn all(dest: BoxId) -> Self {
        Self { dest, start: 0, len: None }
    }

    /// Split `text` into the parts before, inside and after the selection.
    ///
    /// # Panics
    ///
    /// Panics if the selection does not lie within `text`.
    pub fn split<'a>(&self, text: &'a str) -> (&'a str, &'a str, &'a str) {
        assert!(
            self.start <= text.len() && text.is_char_boundary(self.start),
            "selection start {} is outside its content",
            self.start
        );
        let end = match self.len {
            Some(len) => (self.start + len).min(text.len()),
            None => text.len(),
        };
        (&text[..self.start], &text[self.start..end], &text[end..])
    }
}

// ---------------------------------------------------------------------------
// Behavior
// ---------------------------------------------------------------------------

/// The typed state machine of a behavior.
#[derive(Debug, Clone, PartialEq)]
pub enum BehaviorKind {
    Button(ButtonBehavior),
    TextEntry(TextEntryBehavior),
}

/// A behavior and the box it drives.
#[derive(Debug, Clone, PartialEq)]
pub struct Behavior {
    pub target: BoxId,
    pub kind: BehaviorKind,
}

// ---------------------------------------------------------------------------
// BehaviorSet
// ---------------------------------------------------------------------------

/// Behaviors of the current build pass, iterated in registration order.
#[derive(Debug, Clone, Default)]
pub struct BehaviorSet {
    behaviors: SlotMap<BehaviorId, Behavior>,
    order: Vec<BehaviorId>,
}

impl BehaviorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, target: BoxId, kind: BehaviorKind) -> BehaviorId {
        let id = self.behaviors.insert(Behavior { target, kind });
        self.order.push(id);
        id
    }

    pub fn get(&self, id: BehaviorId) -> Option<&Behavior> {
        self.behaviors.get(id)
    }

    pub fn get_mut(&mut self, id: BehaviorId) -> Option<&mut Behavior> {
        self.behaviors.get_mut(id)
    }

    /// Ids in registration order.
    pub fn ids(&self) -> &[BehaviorId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drop every behavior. Old ids stop resolving.
    pub fn clear(&mut self) {
        self.behaviors.clear();
        self.order.clear();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
