//! Rendering: the painter backend seam and style-based box painting.

pub mod box_painter;
pub mod painter;

pub use box_painter::{paint_box, PaintContext};
pub use painter::{DrawCommand, GradientStop, NullBackend, Painter, RoundedRect, TextMeasure};
