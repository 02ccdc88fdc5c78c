//! Numeric text-entry behavior.
//!
//! The entry has no cursor: its whole content is either selected or being
//! typed over. [`transition`] is the pure state machine; the
//! [`TextEntryBehavior`] owns the edited [`IntString`] and its backup, and
//! applies the value effects. Selection, clipboard and commit effects are
//! carried out by the engine.

use std::fmt;

use crate::event::input::Key;

// ---------------------------------------------------------------------------
// IntString
// ---------------------------------------------------------------------------

/// An unsigned integer paired with the text shown for it. The text is the
/// canonical decimal form of the value, or empty after the last digit was
/// deleted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntString {
    value: u64,
    text: String,
}

impl IntString {
    pub fn new(value: u64) -> Self {
        Self { value, text: value.to_string() }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set(&mut self, value: u64) {
        self.value = value;
        self.text = value.to_string();
    }

    /// Zero with empty text.
    pub fn clear(&mut self) {
        self.value = 0;
        self.text.clear();
    }

    /// `v` becomes `v * 10 + digit`. A digit that would overflow is dropped.
    pub fn append_digit(&mut self, digit: u8) {
        debug_assert!(digit < 10);
        if let Some(value) = self
            .value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit)))
        {
            self.set(value);
        }
    }

    /// Drop the last digit. A single digit clears to zero with empty text,
    /// and a cleared value stays cleared.
    pub fn delete_digit(&mut self) {
        if self.value < 10 {
            self.clear();
        } else {
            self.set(self.value / 10);
        }
    }

    /// Take the number at the start of `text`. Negative or non-numeric text
    /// becomes zero; values past `u64::MAX` saturate.
    pub fn set_from_str(&mut self, text: &str) {
        let text = text.trim();
        let digits: &str = &text[..text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len())];
        if digits.is_empty() {
            log::warn!("clipboard text {text:?} is not a non-negative number, using 0");
            self.set(0);
            return;
        }
        let value = digits.parse::<u64>().unwrap_or(u64::MAX);
        self.set(value);
    }
}

impl fmt::Display for IntString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Text-entry states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryState {
    #[default]
    Idle,
    /// The whole content is selected.
    Selected,
    /// Digits are being typed.
    Editing,
}

/// What the entry sees in one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryInput {
    /// Focus arrived this frame.
    pub focus_gained: bool,
    /// The box holds focus now.
    pub focused: bool,
    /// A primary click completed over the box.
    pub hover_click: bool,
    /// A primary double-click happened over the box.
    pub hover_double_click: bool,
    /// Digit typed this frame.
    pub digit: Option<u8>,
    /// Non-digit key pressed this frame.
    pub key: Option<Key>,
    /// Pasted clipboard text is waiting for this entry.
    pub clipboard_ready: bool,
}

/// Side effects of a transition, applied in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryEffect {
    /// Select the whole content.
    SelectAll,
    /// Drop the selection if it is on this entry.
    Unselect,
    /// Back up the value, then replace it with a digit.
    ReplaceWithDigit(u8),
    AppendDigit(u8),
    DeleteDigit,
    /// Clear the clipboard ready flag.
    ConsumeClipboard,
    /// Show the value as content and flag the content as changed.
    Commit,
    /// Put the backed-up value back.
    Restore,
}

/// Advance the entry by one frame.
pub fn transition(state: EntryState, input: &EntryInput) -> (EntryState, Vec<EntryEffect>) {
    use EntryEffect::*;

    let key_is = |k: Key| input.key == Some(k);

    match state {
        EntryState::Idle => {
            if input.focus_gained || input.hover_click {
                (EntryState::Selected, vec![SelectAll])
            } else {
                (state, Vec::new())
            }
        }
        EntryState::Selected => {
            if input.hover_double_click {
                // A double-click keeps the select-all of its first click.
                (state, Vec::new())
            } else if let Some(d) = input.digit {
                (EntryState::Editing, vec![Unselect, ReplaceWithDigit(d)])
            } else if input.clipboard_ready {
                (EntryState::Editing, vec![Unselect, ConsumeClipboard])
            } else if key_is(Key::Enter) || key_is(Key::Escape) || input.hover_click {
                (EntryState::Idle, vec![Unselect])
            } else if !input.focused {
                (EntryState::Idle, vec![Unselect])
            } else {
                (state, Vec::new())
            }
        }
        EntryState::Editing => {
            if input.hover_click {
                (EntryState::Selected, vec![SelectAll])
            } else if let Some(d) = input.digit {
                (state, vec![AppendDigit(d)])
            } else if key_is(Key::Backspace) {
                (state, vec![DeleteDigit])
            } else if key_is(Key::Enter) || !input.focused {
                (EntryState::Idle, vec![Commit])
            } else if key_is(Key::Escape) {
                (EntryState::Idle, vec![Restore])
            } else {
                (state, Vec::new())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// TextEntryBehavior
// ---------------------------------------------------------------------------

/// A numeric text entry: state, edited value and its pre-edit backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntryBehavior {
    state: EntryState,
    value: IntString,
    backup: IntString,
}

impl TextEntryBehavior {
    pub fn new(value: IntString) -> Self {
        Self {
            state: EntryState::Idle,
            backup: value.clone(),
            value,
        }
    }

    pub fn state(&self) -> EntryState {
        self.state
    }

    pub fn value(&self) -> &IntString {
        &self.value
    }

    /// Run one transition, apply its value effects and return all effects
    /// so the caller can apply the rest.
    pub fn update(&mut self, input: &EntryInput) -> Vec<EntryEffect> {
        let (next, effects) = transition(self.state, input);
        if next != self.state {
            log::trace!("text entry {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        for effect in &effects {
            self.apply(*effect);
        }
        effects
    }

    fn apply(&mut self, effect: EntryEffect) {
        match effect {
            EntryEffect::ReplaceWithDigit(d) => {
                self.backup = self.value.clone();
                self.value.set(u64::from(d));
            }
            EntryEffect::AppendDigit(d) => self.value.append_digit(d),
            EntryEffect::DeleteDigit => self.value.delete_digit(),
            EntryEffect::Restore => self.value = self.backup.clone(),
            EntryEffect::SelectAll
            | EntryEffect::Unselect
            | EntryEffect::ConsumeClipboard
            | EntryEffect::Commit => {}
        }
    }

    /// Replace the value with pasted text, backing up the current value.
    pub fn paste(&mut self, text: &str) {
        self.backup = self.value.clone();
        self.value.set_from_str(text);
    }
}

// ===========================================================================
// Tests
// ===========================================================================
