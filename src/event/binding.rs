//! Key binding registry and resolution.
//!
//! [`KeyBindingRegistry`] maps key+modifier combinations to [`EngineAction`]s.
//! The `with_defaults()` constructor installs focus navigation and the
//! clipboard shortcuts.

use std::collections::HashMap;

use super::input::{Key, KeyEvent, Modifiers};

// ---------------------------------------------------------------------------
// EngineAction
// ---------------------------------------------------------------------------

/// Action to take when a key binding is matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineAction {
    /// Move focus to the next box in the focus chain.
    FocusNext,
    /// Move focus to the previous box in the focus chain.
    FocusPrevious,
    /// Copy the current selection to the clipboard.
    Copy,
    /// Ask the clipboard backend for its text.
    Paste,
    /// A named action reported back to the caller.
    Custom(String),
}

// ---------------------------------------------------------------------------
// KeyBindingRegistry
// ---------------------------------------------------------------------------

/// Registry of key bindings, mapping (Key, Modifiers) -> EngineAction.
#[derive(Debug, Clone)]
pub struct KeyBindingRegistry {
    bindings: HashMap<(Key, Modifiers), EngineAction>,
}

impl KeyBindingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a registry with the standard bindings.
    ///
    /// Defaults:
    /// - `Tab` -> FocusNext
    /// - `Shift+Tab`, `BackTab` -> FocusPrevious
    /// - `Ctrl+C` -> Copy
    /// - `Ctrl+V` -> Paste
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.bind(Key::Tab, Modifiers::NONE, EngineAction::FocusNext);
        registry.bind(Key::Tab, Modifiers::SHIFT, EngineAction::FocusPrevious);
        registry.bind(Key::BackTab, Modifiers::NONE, EngineAction::FocusPrevious);
        registry.bind(Key::BackTab, Modifiers::SHIFT, EngineAction::FocusPrevious);
        registry.bind(Key::Char('c'), Modifiers::CTRL, EngineAction::Copy);
        registry.bind(Key::Char('v'), Modifiers::CTRL, EngineAction::Paste);
        registry
    }

    /// Register a key binding, replacing any existing one for the same keys.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, action: EngineAction) {
        self.bindings.insert((key, modifiers), action);
    }

    /// Remove a key binding, returning its action.
    pub fn unbind(&mut self, key: Key, modifiers: Modifiers) -> Option<EngineAction> {
        self.bindings.remove(&(key, modifiers))
    }

    /// Look up the action for an exact key + modifiers match.
    pub fn resolve(&self, event: &KeyEvent) -> Option<&EngineAction> {
        self.bindings.get(&(event.code, event.modifiers))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
