//! Drawing backend seam.
//!
//! The engine never rasterizes anything itself. Boxes are turned into
//! [`DrawCommand`]s and handed to a [`Painter`]; text is measured through
//! [`TextMeasure`].

use crate::css::color::Rgba;
use crate::css::style::Font;
use crate::geometry::{Rect, Size, Vec2};

// ---------------------------------------------------------------------------
// Backend traits
// ---------------------------------------------------------------------------

/// Text measurement backend.
pub trait TextMeasure {
    /// Pixel size of `text` rendered with `font`.
    fn measure(&self, text: &str, font: &Font) -> Size;
}

/// Drawing backend.
pub trait Painter: TextMeasure {
    fn draw(&mut self, command: DrawCommand);
}

// ---------------------------------------------------------------------------
// DrawCommand
// ---------------------------------------------------------------------------

/// A rectangle with uniformly rounded corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub rect: Rect,
    pub radius: f64,
}

impl RoundedRect {
    pub fn new(rect: Rect, radius: f64) -> Self {
        Self { rect, radius: radius.max(0.0) }
    }
}

/// One stop of a vertical linear gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient, `0.0..=1.0`.
    pub offset: f64,
    pub color: Rgba,
}

/// A single drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillRoundedRect { shape: RoundedRect, color: Rgba },
    /// Fill the area between two nested rounded rectangles.
    FillRing { outer: RoundedRect, inner: RoundedRect, color: Rgba },
    /// A blurred shadow cast outside `shape`, masked by `mask`.
    OutsetShadow { shape: RoundedRect, blur: f64, color: Rgba, mask: RoundedRect },
    /// A blurred shadow inside `bounds` around the hole `hole`.
    InsetShadow { bounds: RoundedRect, hole: RoundedRect, blur: f64, color: Rgba },
    PushClip(Rect),
    PopClip,
    /// Vertical linear gradient from the top of `rect` to its bottom.
    LinearGradient { rect: Rect, stops: Vec<GradientStop> },
    /// A text run with its top-left corner at `origin`.
    Text {
        origin: Vec2,
        text: String,
        font: Font,
        color: Rgba,
        background: Option<Rgba>,
        blur: f64,
    },
}

// ---------------------------------------------------------------------------
// NullBackend
// ---------------------------------------------------------------------------

/// Backend used when none is configured: text measures as zero and drawing
/// does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullBackend;

impl TextMeasure for NullBackend {
    fn measure(&self, _text: &str, _font: &Font) -> Size {
        Size::ZERO
    }
}

impl Painter for NullBackend {
    fn draw(&mut self, _command: DrawCommand) {}
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_backend_measures_zero() {
        let size = NullBackend.measure("hello", &Font::default());
        assert_eq!(size, Size::ZERO);
    }

    #[test]
    fn rounded_rect_clamps_negative_radius() {
        let shape = RoundedRect::new(Rect::from_coords(0.0, 0.0, 10.0, 10.0), -2.0);
        assert_eq!(shape.radius, 0.0);
    }
}
