//! Recording painter for draw-command assertions and snapshots.

use std::fmt::Write as _;

use crate::css::style::Font;
use crate::geometry::{Rect, Size};
use crate::render::painter::{DrawCommand, Painter, RoundedRect, TextMeasure};

/// A [`Painter`] that records every command and measures text on a fixed
/// grid: each character is `char_width` wide and a line is `line_height`
/// high, whatever the font.
#[derive(Debug, Clone)]
pub struct RecordingPainter {
    commands: Vec<DrawCommand>,
    pub char_width: f64,
    pub line_height: f64,
}

impl Default for RecordingPainter {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            char_width: 7.0,
            line_height: 12.0,
        }
    }
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// One line per command, suitable for snapshots.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            write_command(&mut out, command);
        }
        out
    }
}

impl TextMeasure for RecordingPainter {
    fn measure(&self, text: &str, _font: &Font) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        Size::new(text.chars().count() as f64 * self.char_width, self.line_height)
    }
}

impl Painter for RecordingPainter {
    fn draw(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

fn rect(r: Rect) -> String {
    format!("{},{} {},{}", r.min.x, r.min.y, r.max.x, r.max.y)
}

fn shape(s: RoundedRect) -> String {
    format!("{} r={}", rect(s.rect), s.radius)
}

// Writing into a String cannot fail.
fn write_command(out: &mut String, command: &DrawCommand) {
    let _ = match command {
        DrawCommand::FillRoundedRect { shape: s, color } => {
            write!(out, "fill {} {color}", shape(*s))
        }
        DrawCommand::FillRing { outer, inner, color } => {
            write!(out, "ring {} / {} {color}", shape(*outer), shape(*inner))
        }
        DrawCommand::OutsetShadow { shape: s, blur, color, .. } => {
            write!(out, "outset-shadow {} blur={blur} {color}", shape(*s))
        }
        DrawCommand::InsetShadow { hole, blur, color, .. } => {
            write!(out, "inset-shadow {} blur={blur} {color}", shape(*hole))
        }
        DrawCommand::PushClip(r) => write!(out, "clip {}", rect(*r)),
        DrawCommand::PopClip => write!(out, "unclip"),
        DrawCommand::LinearGradient { rect: r, stops } => {
            let stops: Vec<String> = stops.iter().map(|s| format!("{} {}", s.offset, s.color)).collect();
            write!(out, "gradient {} [{}]", rect(*r), stops.join(", "))
        }
        DrawCommand::Text { origin, text, color, background, blur, .. } => {
            let _ = write!(out, "text {},{} {text:?} {color}", origin.x, origin.y);
            if let Some(bg) = background {
                let _ = write!(out, " on {bg}");
            }
            if *blur > 0.0 {
                let _ = write!(out, " blur={blur}");
            }
            Ok(())
        }
    };
}

// ===========================================================================
// Tests
// ===========================================================================
