//! Input types: keys, modifiers and the per-frame input sample.
//!
//! The engine consumes one [`InputFrame`] per update. Crossterm events are
//! folded into a frame with [`InputFrame::apply_crossterm`], so the rest of
//! the engine never depends on crossterm directly.

use std::ops::{BitAnd, BitOr};

use crate::geometry::Vec2;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, decoupled from crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

impl Key {
    /// The decimal digit this key types, if any.
    pub fn digit(self) -> Option<u8> {
        match self {
            Key::Char(c) => c.to_digit(10).map(|d| d as u8),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// The digit typed by this event. Digits chorded with Ctrl or Alt do
    /// not count.
    pub fn digit(&self) -> Option<u8> {
        if self.modifiers.contains(Modifiers::CTRL) || self.modifiers.contains(Modifiers::ALT) {
            return None;
        }
        self.code.digit()
    }
}

impl From<Key> for KeyEvent {
    fn from(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }
}

// ---------------------------------------------------------------------------
// MouseButton
// ---------------------------------------------------------------------------

/// The three tracked pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

impl MouseButton {
    pub const ALL: [MouseButton; 3] = [MouseButton::Primary, MouseButton::Secondary, MouseButton::Middle];

    pub fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// InputFrame
// ---------------------------------------------------------------------------

/// One input sample, delivered once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct InputFrame {
    /// Milliseconds since the previous sample. Must be positive.
    pub elapsed_ms: f64,
    pub pointer: Vec2,
    /// Held state of each [`MouseButton`], by index.
    pub buttons: [bool; 3],
    /// Wheel movement this frame; positive is up.
    pub wheel: f64,
    pub key: Option<KeyEvent>,
    pub force_redraw: bool,
}

impl Default for InputFrame {
    fn default() -> Self {
        Self {
            elapsed_ms: 16.0,
            pointer: Vec2::ZERO,
            buttons: [false; 3],
            wheel: 0.0,
            key: None,
            force_redraw: false,
        }
    }
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the elapsed time (builder).
    pub fn with_elapsed(mut self, ms: f64) -> Self {
        self.elapsed_ms = ms;
        self
    }

    /// Set the pointer position (builder).
    pub fn with_pointer(mut self, x: f64, y: f64) -> Self {
        self.pointer = Vec2::new(x, y);
        self
    }

    /// Set a button's held state (builder).
    pub fn with_button(mut self, button: MouseButton, down: bool) -> Self {
        self.buttons[button.index()] = down;
        self
    }

    /// Set the key pressed this frame (builder).
    pub fn with_key(mut self, key: impl Into<KeyEvent>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn is_down(&self, button: MouseButton) -> bool {
        self.buttons[button.index()]
    }

    /// The sample that follows this one when nothing new happens: pointer
    /// and buttons carry over, one-shot fields reset.
    pub fn carry_over(&self) -> Self {
        Self {
            elapsed_ms: self.elapsed_ms,
            pointer: self.pointer,
            buttons: self.buttons,
            ..Self::default()
        }
    }

    /// Fold a crossterm event into this frame. Returns `false` for events
    /// that carry no engine input.
    pub fn apply_crossterm(&mut self, event: &crossterm::event::Event) -> bool {
        use crossterm::event::{Event, KeyEventKind, MouseEventKind};

        match event {
            Event::Key(ke) => {
                if ke.kind == KeyEventKind::Release {
                    return false;
                }
                match key_from_crossterm(ke) {
                    Some(key) => {
                        self.key = Some(key);
                        true
                    }
                    None => false,
                }
            }
            Event::Mouse(me) => {
                self.pointer = Vec2::new(f64::from(me.column), f64::from(me.row));
                match me.kind {
                    MouseEventKind::Down(b) | MouseEventKind::Drag(b) => {
                        self.buttons[button_from_crossterm(b).index()] = true;
                    }
                    MouseEventKind::Up(b) => {
                        self.buttons[button_from_crossterm(b).index()] = false;
                    }
                    MouseEventKind::ScrollUp => self.wheel += 1.0,
                    MouseEventKind::ScrollDown => self.wheel -= 1.0,
                    _ => {}
                }
                true
            }
            Event::Resize(..) | Event::FocusGained => {
                self.force_redraw = true;
                true
            }
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Crossterm conversions
// ---------------------------------------------------------------------------

/// Convert crossterm key modifiers to our `Modifiers`.
fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(crossterm::event::KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(crossterm::event::KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(crossterm::event::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

/// Convert a crossterm key event. Returns `None` for keys the engine does
/// not handle.
pub fn key_from_crossterm(ct: &crossterm::event::KeyEvent) -> Option<KeyEvent> {
    use crossterm::event::KeyCode;

    let code = match ct.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    Some(KeyEvent::new(code, convert_modifiers(ct.modifiers)))
}

fn button_from_crossterm(b: crossterm::event::MouseButton) -> MouseButton {
    match b {
        crossterm::event::MouseButton::Left => MouseButton::Primary,
        crossterm::event::MouseButton::Right => MouseButton::Secondary,
        crossterm::event::MouseButton::Middle => MouseButton::Middle,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
