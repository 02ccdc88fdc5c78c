//! Input events, gesture detection, key bindings and clipboard plumbing.

pub mod binding;
pub mod clipboard;
pub mod gesture;
pub mod input;

pub use binding::{EngineAction, KeyBindingRegistry};
pub use clipboard::{ClipboardBackend, ClipboardState, MemoryClipboard};
pub use gesture::GestureDetector;
pub use input::{InputFrame, Key, KeyEvent, Modifiers, MouseButton};
