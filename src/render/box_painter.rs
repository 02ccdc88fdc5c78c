//! Style-based box painting.
//!
//! Turns a layout box and its resolved style into draw commands, back to
//! front: outset shadows, background, border, then everything inside the
//! padding box under a clip (gradient, inset shadows, text).

use crate::behavior::Selection;
use crate::css::color::Rgba;
use crate::css::style::{Font, Style, TextAlign};
use crate::geometry::{Rect, Vec2};
use crate::layout::{BoxId, LayoutBox, Paint};
use crate::render::painter::{DrawCommand, GradientStop, Painter, RoundedRect};

/// Engine state the painter needs besides the box itself.
#[derive(Debug, Clone, Copy)]
pub struct PaintContext<'a> {
    pub default_font: &'a Font,
    pub selection: Option<&'a Selection>,
    /// Foreground and background of selected text.
    pub selection_colors: (Rgba, Rgba),
}

/// Paint one box. Custom-painted boxes only run their callback.
pub fn paint_box(
    painter: &mut dyn Painter,
    id: BoxId,
    lay: &LayoutBox,
    style: &Style,
    ctx: &PaintContext<'_>,
) {
    if let Paint::Custom(callback) = lay.paint {
        callback(painter, lay);
        return;
    }

    let border_box = RoundedRect::new(lay.rect, style.border_radius);
    let padding_box = RoundedRect::new(
        lay.rect.inset(style.border_width),
        style.border_radius - style.border_width,
    );

    draw_outset_shadows(painter, style, border_box);

    painter.draw(DrawCommand::FillRoundedRect {
        shape: border_box,
        color: style.background_color,
    });

    if style.border_width != 0.0 {
        painter.draw(DrawCommand::FillRing {
            outer: border_box,
            inner: padding_box,
            color: style.border_color,
        });
    }

    // Square clip: rounded clips break text antialiasing on some backends.
    painter.draw(DrawCommand::PushClip(padding_box.rect));

    if !style.gradient.is_empty() {
        painter.draw(DrawCommand::LinearGradient {
            rect: padding_box.rect,
            stops: gradient_stops(&style.gradient),
        });
    }

    draw_inset_shadows(painter, style, padding_box);

    if let Some(text) = lay.text() {
        let selection = ctx.selection.filter(|s| s.dest == id);
        draw_text(painter, lay, style, text, selection, ctx);
    }

    painter.draw(DrawCommand::PopClip);
}

/// Evenly spaced stops from 0 to 1.
fn gradient_stops(colors: &[Rgba]) -> Vec<GradientStop> {
    let step = if colors.len() > 1 { 1.0 / (colors.len() - 1) as f64 } else { 0.0 };
    colors
        .iter()
        .enumerate()
        .map(|(i, &color)| GradientStop { offset: i as f64 * step, color })
        .collect()
}

fn draw_outset_shadows(painter: &mut dyn Painter, style: &Style, border_box: RoundedRect) {
    // Later declarations sit underneath earlier ones.
    for shadow in style.outset_shadows.iter().rev() {
        let rect = border_box
            .rect
            .inset(-shadow.spread)
            .translate(Vec2::new(shadow.h_offset, shadow.v_offset));
        painter.draw(DrawCommand::OutsetShadow {
            shape: RoundedRect::new(rect, style.border_radius + shadow.spread),
            blur: shadow.blur_radius,
            color: shadow.color,
            mask: border_box,
        });
    }
}

fn draw_inset_shadows(painter: &mut dyn Painter, style: &Style, padding_box: RoundedRect) {
    for shadow in &style.inset_shadows {
        let rect = padding_box
            .rect
            .inset(shadow.spread)
            .translate(Vec2::new(shadow.h_offset, shadow.v_offset));
        painter.draw(DrawCommand::InsetShadow {
            bounds: padding_box,
            hole: RoundedRect::new(rect, padding_box.radius - shadow.spread),
            blur: shadow.blur_radius,
            color: shadow.color,
        });
    }
}

/// Top-left corner of the text run inside `rect`.
fn text_origin(rect: Rect, border_width: f64, align: TextAlign, text_width: f64, text_height: f64) -> Vec2 {
    let inner_width = rect.width() - 2.0 * border_width;
    let inner_height = rect.height() - 2.0 * border_width;
    let x = match align {
        TextAlign::Left => 0.0,
        TextAlign::Right => inner_width - text_width,
        TextAlign::Center => (inner_width - text_width) / 2.0,
    };
    let y = (inner_height - text_height) / 2.0;
    Vec2::new(rect.min.x + border_width + x, rect.min.y + border_width + y)
}

fn draw_text(
    painter: &mut dyn Painter,
    lay: &LayoutBox,
    style: &Style,
    text: &str,
    selection: Option<&Selection>,
    ctx: &PaintContext<'_>,
) {
    let font = LayoutBox::font(style, ctx.default_font);
    let size = painter.measure(text, &font);
    let align = lay.text_align.unwrap_or(style.text_align);
    let origin = text_origin(lay.rect, style.border_width, align, size.width, size.height);

    for shadow in &style.text_shadows {
        painter.draw(DrawCommand::Text {
            origin: origin + Vec2::new(shadow.h_offset, shadow.v_offset),
            text: text.to_owned(),
            font: font.clone(),
            color: shadow.color,
            background: None,
            blur: shadow.blur_radius,
        });
    }

    let Some(selection) = selection else {
        run(painter, origin, text, &font, style.color, None);
        return;
    };

    let (fg, bg) = ctx.selection_colors;
    let (prefix, selected, suffix) = selection.split(text);
    let mut pos = origin;
    pos = run(painter, pos, prefix, &font, style.color, None);
    pos = run(painter, pos, selected, &font, fg, Some(bg));
    run(painter, pos, suffix, &font, style.color, None);
}

/// Draw one text run and return where the next run starts. Empty runs draw
/// nothing.
fn run(
    painter: &mut dyn Painter,
    origin: Vec2,
    text: &str,
    font: &Font,
    color: Rgba,
    background: Option<Rgba>,
) -> Vec2 {
    if text.is_empty() {
        return origin;
    }
    let width = painter.measure(text, font).width;
    painter.draw(DrawCommand::Text {
        origin,
        text: text.to_owned(),
        font: font.clone(),
        color,
        background,
        blur: 0.0,
    });
    Vec2::new(origin.x + width, origin.y)
}

// ===========================================================================
// Tests
// ===========================================================================
