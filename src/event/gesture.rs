//! Pointer gesture detection: clicks, double-clicks and drags.
//!
//! Each tracked button runs its own [`GestureState`] machine. The transition
//! function [`step`] is pure; [`ButtonGesture::update`] applies its effects
//! together with the click timer and the drag threshold.

use crate::event::input::{InputFrame, MouseButton};
use crate::geometry::Vec2;

// ---------------------------------------------------------------------------
// GestureState
// ---------------------------------------------------------------------------

/// Click detector state for one button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Held after a press from idle.
    Pressed,
    /// Released after a click; a press now may be a double-click.
    Released,
    /// Held after the second press of a pair.
    PressedAgain,
}

/// What a transition asks the detector to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepEffects {
    pub clicked: bool,
    pub double_clicked: bool,
    /// Record the pointer as the new click origin.
    pub record_origin: bool,
    /// Restart the time-since-click timer.
    pub reset_timer: bool,
}

/// Advance the click detector by one sample.
pub fn step(
    state: GestureState,
    down: bool,
    since_last_click: f64,
    double_click_ms: f64,
) -> (GestureState, StepEffects) {
    let mut fx = StepEffects::default();
    let next = match state {
        GestureState::Idle if down => {
            fx.record_origin = true;
            GestureState::Pressed
        }
        GestureState::Pressed if !down => {
            fx.clicked = true;
            fx.reset_timer = true;
            GestureState::Released
        }
        GestureState::Released if down => {
            fx.double_clicked = since_last_click < double_click_ms;
            fx.record_origin = true;
            GestureState::PressedAgain
        }
        GestureState::Released if since_last_click >= double_click_ms => GestureState::Idle,
        GestureState::PressedAgain if !down => {
            fx.clicked = true;
            fx.reset_timer = true;
            GestureState::Idle
        }
        other => other,
    };
    (next, fx)
}

// ---------------------------------------------------------------------------
// ButtonGesture
// ---------------------------------------------------------------------------

/// Gesture tracking for a single pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ButtonGesture {
    pub state: GestureState,
    pub click_origin: Vec2,
    /// Milliseconds since the last completed click.
    pub since_last_click: f64,
    pub dragging: bool,
    /// A click completed this frame.
    pub clicked: bool,
    /// The second press of a double-click happened this frame.
    pub double_clicked: bool,
}

impl ButtonGesture {
    pub fn update(
        &mut self,
        down: bool,
        pointer: Vec2,
        elapsed_ms: f64,
        double_click_ms: f64,
        min_drag_distance: f64,
    ) {
        self.since_last_click += elapsed_ms;

        let (next, fx) = step(self.state, down, self.since_last_click, double_click_ms);
        if next != self.state {
            log::trace!("gesture {:?} -> {:?}", self.state, next);
        }
        self.state = next;
        self.clicked = fx.clicked;
        self.double_clicked = fx.double_clicked;
        if fx.record_origin {
            self.click_origin = pointer;
        }
        if fx.reset_timer {
            self.since_last_click = 0.0;
        }

        if down {
            if pointer.distance(self.click_origin) > min_drag_distance {
                self.dragging = true;
            }
        } else {
            self.dragging = false;
        }
    }
}

// ---------------------------------------------------------------------------
// GestureDetector
// ---------------------------------------------------------------------------

/// Gesture state for all three buttons plus pointer motion.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureDetector {
    buttons: [ButtonGesture; 3],
    double_click_ms: f64,
    min_drag_distance: f64,
    pointer: Vec2,
    pointer_delta: Vec2,
    wheel: f64,
}

impl GestureDetector {
    pub fn new(double_click_ms: f64, min_drag_distance: f64) -> Self {
        Self {
            buttons: [ButtonGesture::default(); 3],
            double_click_ms,
            min_drag_distance,
            pointer: Vec2::ZERO,
            pointer_delta: Vec2::ZERO,
            wheel: 0.0,
        }
    }

    /// Feed one input sample.
    ///
    /// # Panics
    ///
    /// Panics if `frame.elapsed_ms` is not positive.
    pub fn update(&mut self, frame: &InputFrame) {
        assert!(frame.elapsed_ms > 0.0, "elapsed time must be positive");

        for button in MouseButton::ALL {
            self.buttons[button.index()].update(
                frame.is_down(button),
                frame.pointer,
                frame.elapsed_ms,
                self.double_click_ms,
                self.min_drag_distance,
            );
        }

        self.pointer_delta = frame.pointer - self.pointer;
        self.pointer = frame.pointer;
        self.wheel = frame.wheel;
    }

    pub fn button(&self, button: MouseButton) -> &ButtonGesture {
        &self.buttons[button.index()]
    }

    pub fn clicked(&self, button: MouseButton) -> bool {
        self.button(button).clicked
    }

    pub fn double_clicked(&self, button: MouseButton) -> bool {
        self.button(button).double_clicked
    }

    pub fn dragging(&self, button: MouseButton) -> bool {
        self.button(button).dragging
    }

    pub fn click_origin(&self, button: MouseButton) -> Vec2 {
        self.button(button).click_origin
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    /// Pointer movement since the previous sample.
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer_delta
    }

    /// Wheel value of the last sample.
    pub fn wheel(&self) -> f64 {
        self.wheel
    }
}

// ===========================================================================
// Tests
// ===========================================================================
