//! Pilot: programmatic interaction with a headless [`Engine`].
//!
//! The `Pilot` owns an engine plus the input sample that carries over from
//! frame to frame (pointer position, held buttons), and provides methods to
//! simulate user input one frame at a time.

use crate::css::table::StyleError;
use crate::engine::{Engine, EngineConfig, FrameReport};
use crate::event::input::{InputFrame, Key, KeyEvent, Modifiers, MouseButton};
use crate::testing::recorder::RecordingPainter;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless engine driver for testing.
///
/// Every input method runs exactly one frame through
/// [`Engine::process_frame`] and returns its report. The frame is ended
/// lazily, right before the next one, so per-frame outputs such as
/// `content_changed` stay readable in between.
///
/// # Examples
///
/// ```
/// use cascade_ui::css::StyleName;
/// use cascade_ui::geometry::Rect;
/// use cascade_ui::testing::Pilot;
/// use cascade_ui::EngineConfig;
///
/// let mut pilot = Pilot::new(EngineConfig::default()).unwrap();
/// let button = pilot.engine_mut().add_box(StyleName::Button);
/// pilot.engine_mut().set_rect(button, Rect::from_coords(0.0, 0.0, 40.0, 20.0));
/// let behavior = pilot.engine_mut().add_button(button);
///
/// pilot.click_at(10.0, 10.0);
/// assert!(pilot.engine().button_activated(behavior));
/// ```
pub struct Pilot {
    engine: Engine,
    input: InputFrame,
    frame_open: bool,
}

impl Pilot {
    /// Create a pilot around a new engine.
    pub fn new(config: EngineConfig) -> Result<Self, StyleError> {
        Ok(Self::from_engine(Engine::new(config)?))
    }

    /// Create a pilot around an existing engine.
    pub fn from_engine(engine: Engine) -> Self {
        Self {
            engine,
            input: InputFrame::new(),
            frame_open: false,
        }
    }

    // ── Pointer ──────────────────────────────────────────────────────

    /// Move the pointer to (x, y).
    pub fn move_to(&mut self, x: f64, y: f64) -> FrameReport {
        self.input.pointer.x = x;
        self.input.pointer.y = y;
        self.step()
    }

    /// Press the primary button where the pointer is.
    pub fn press(&mut self) -> FrameReport {
        self.input.buttons[MouseButton::Primary.index()] = true;
        self.step()
    }

    /// Release the primary button.
    pub fn release(&mut self) -> FrameReport {
        self.input.buttons[MouseButton::Primary.index()] = false;
        self.step()
    }

    /// Press and release at (x, y). The press comes after a pause longer
    /// than the double-click threshold, so it never pairs with an earlier
    /// click. Returns the report of the release frame.
    pub fn click_at(&mut self, x: f64, y: f64) -> FrameReport {
        self.input.pointer.x = x;
        self.input.pointer.y = y;
        self.input.elapsed_ms = self.engine.config().double_click_ms + 1.0;
        self.press();
        self.release()
    }

    /// A click at (x, y) followed by a quick second press that stays held.
    /// The returned frame carries the double-click.
    pub fn double_press_at(&mut self, x: f64, y: f64) -> FrameReport {
        self.click_at(x, y);
        self.press()
    }

    /// Two quick clicks at (x, y). Returns the report of the second press,
    /// the frame that carries the double-click.
    pub fn double_click_at(&mut self, x: f64, y: f64) -> FrameReport {
        let report = self.double_press_at(x, y);
        self.release();
        report
    }

    /// Scroll the wheel by `delta` for one frame.
    pub fn scroll(&mut self, delta: f64) -> FrameReport {
        self.input.wheel = delta;
        self.step()
    }

    // ── Keyboard ─────────────────────────────────────────────────────

    /// Press a key with no modifiers.
    pub fn key(&mut self, key: Key) -> FrameReport {
        self.key_with(key, Modifiers::NONE)
    }

    /// Press a key with the given modifiers.
    pub fn key_with(&mut self, key: Key, modifiers: Modifiers) -> FrameReport {
        self.input.key = Some(KeyEvent::new(key, modifiers));
        self.step()
    }

    /// Type each character of `text` as its own frame.
    pub fn type_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.key(Key::Char(ch));
        }
    }

    // ── Processing ───────────────────────────────────────────────────

    /// Run one frame with no new input.
    pub fn tick(&mut self) -> FrameReport {
        self.step()
    }

    /// Run one frame `ms` milliseconds after the previous one.
    pub fn tick_ms(&mut self, ms: f64) -> FrameReport {
        self.input.elapsed_ms = ms;
        self.step()
    }

    /// Run a caller-built sample as the next frame.
    pub fn frame(&mut self, frame: InputFrame) -> FrameReport {
        self.input = frame;
        self.step()
    }

    /// End the open frame, if any, so the caller can rebuild.
    pub fn end_frame(&mut self) {
        if self.frame_open {
            self.engine.end_frame();
            self.frame_open = false;
        }
    }

    fn step(&mut self) -> FrameReport {
        self.end_frame();
        let report = self.engine.process_frame(&self.input);
        self.frame_open = true;
        let elapsed = InputFrame::default().elapsed_ms;
        self.input = self.input.carry_over().with_elapsed(elapsed);
        report
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    /// The sample the next frame starts from.
    pub fn input(&self) -> &InputFrame {
        &self.input
    }

    /// Paint the engine into a fresh recording painter.
    pub fn render(&self) -> RecordingPainter {
        let mut painter = RecordingPainter::new();
        self.engine.paint(&mut painter);
        painter
    }
}

// ===========================================================================
// Tests
// ===========================================================================
