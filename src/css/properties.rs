//! Property parsing: declaration values → typed style fields.
//!
//! Applies declaration values onto a [`Style`], evaluating color functions
//! and shadow lists and recording each property in the style's mask. Values
//! must already have their variables substituted.

use crate::css::color::Rgba;
use crate::css::model::{split_list, DeclarationValue};
use crate::css::style::*;

/// Errors from property parsing.
#[derive(Debug, thiserror::Error)]
pub enum PropertyError {
    #[error("unknown property: {0}")]
    UnknownProperty(String),
    #[error("invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },
}

fn invalid(property: &str, message: impl Into<String>) -> PropertyError {
    PropertyError::InvalidValue {
        property: property.into(),
        message: message.into(),
    }
}

/// Parse a length: a bare number or a `px`/`pt` dimension.
pub fn parse_length(value: &DeclarationValue, property: &str) -> Result<f64, PropertyError> {
    match value {
        DeclarationValue::Number(n) => Ok(*n),
        DeclarationValue::Dimension(n, unit) if unit == "px" || unit == "pt" => Ok(*n),
        DeclarationValue::Dimension(_, unit) => Err(invalid(property, format!("unsupported unit: {unit}"))),
        other => Err(invalid(property, format!("expected number or length, got: {other:?}"))),
    }
}

/// Parse a plain number (used for color function factors).
fn parse_number(value: &DeclarationValue, property: &str) -> Result<f64, PropertyError> {
    match value {
        DeclarationValue::Number(n) => Ok(*n),
        DeclarationValue::Dimension(n, unit) if unit == "%" => Ok(*n / 100.0),
        other => Err(invalid(property, format!("expected number, got: {other:?}"))),
    }
}

/// Require exactly one value.
fn require_single<'a>(
    values: &'a [DeclarationValue],
    property: &str,
) -> Result<&'a DeclarationValue, PropertyError> {
    match values {
        [single] => Ok(single),
        _ => Err(invalid(property, format!("expected 1 value, got {}", values.len()))),
    }
}

/// Extract a single identifier from values.
fn require_single_ident<'a>(
    values: &'a [DeclarationValue],
    property: &str,
) -> Result<&'a str, PropertyError> {
    match require_single(values, property)? {
        DeclarationValue::Ident(name) => Ok(name.as_str()),
        other => Err(invalid(property, format!("expected identifier, got: {other:?}"))),
    }
}

/// Whether the values are the single keyword `none`.
fn is_none(values: &[DeclarationValue]) -> bool {
    matches!(values, [DeclarationValue::Ident(name)] if name == "none")
}

/// Evaluate one function argument that must hold exactly one value.
fn single_arg<'a>(
    args: &'a [Vec<DeclarationValue>],
    index: usize,
    property: &str,
) -> Result<&'a DeclarationValue, PropertyError> {
    let arg = args
        .get(index)
        .ok_or_else(|| invalid(property, format!("missing argument {}", index + 1)))?;
    require_single(arg, property)
}

/// Evaluate a color value: hex, keyword, `rgb()`, `rgba()`, `shade()`,
/// `mix()` or `alpha()`.
pub fn parse_color(value: &DeclarationValue, property: &str) -> Result<Rgba, PropertyError> {
    match value {
        DeclarationValue::Color(hex) => {
            Rgba::from_hex(hex).ok_or_else(|| invalid(property, format!("invalid hex color: #{hex}")))
        }
        DeclarationValue::Ident(name) => match name.as_str() {
            "transparent" => Ok(Rgba::TRANSPARENT),
            "white" => Ok(Rgba::WHITE),
            "black" => Ok(Rgba::BLACK),
            other => Err(invalid(property, format!("unknown color name: {other}"))),
        },
        DeclarationValue::Function { name, args } => {
            let expect_args = |n: usize| {
                if args.len() == n {
                    Ok(())
                } else {
                    Err(invalid(property, format!("{name}() takes {n} arguments, got {}", args.len())))
                }
            };
            let channel = |i: usize| -> Result<f64, PropertyError> {
                Ok(parse_number(single_arg(args, i, property)?, property)? / 255.0)
            };
            let color = |i: usize| parse_color(single_arg(args, i, property)?, property);
            let factor = |i: usize| parse_number(single_arg(args, i, property)?, property);

            match name.as_str() {
                "rgb" => {
                    expect_args(3)?;
                    Ok(Rgba::rgb(channel(0)?, channel(1)?, channel(2)?))
                }
                "rgba" => {
                    expect_args(4)?;
                    Ok(Rgba::new(channel(0)?, channel(1)?, channel(2)?, factor(3)?))
                }
                "shade" => {
                    expect_args(2)?;
                    Ok(color(0)?.shade(factor(1)?))
                }
                "mix" => {
                    expect_args(3)?;
                    Ok(color(0)?.mix(color(1)?, factor(2)?))
                }
                "alpha" => {
                    expect_args(2)?;
                    Ok(color(0)?.alpha(factor(1)?))
                }
                other => Err(invalid(property, format!("unknown color function: {other}()"))),
            }
        }
        other => Err(invalid(property, format!("expected color, got: {other:?}"))),
    }
}

/// Parse one shadow item: lengths followed by a color, optional `inset`.
///
/// Returns the shadow and whether it was inset.
fn parse_box_shadow(item: &[DeclarationValue]) -> Result<(BoxShadow, bool), PropertyError> {
    const PROPERTY: &str = "box-shadow";
    let mut inset = false;
    let mut lengths = Vec::new();
    let mut color = None;

    for value in item {
        match value {
            DeclarationValue::Ident(name) if name == "inset" => inset = true,
            DeclarationValue::Number(_) | DeclarationValue::Dimension(..) => {
                lengths.push(parse_length(value, PROPERTY)?);
            }
            other => {
                if color.is_some() {
                    return Err(invalid(PROPERTY, "more than one color in shadow"));
                }
                color = Some(parse_color(other, PROPERTY)?);
            }
        }
    }

    if !(2..=4).contains(&lengths.len()) {
        return Err(invalid(PROPERTY, format!("expected 2-4 lengths, got {}", lengths.len())));
    }
    let color = color.ok_or_else(|| invalid(PROPERTY, "missing shadow color"))?;

    let shadow = BoxShadow {
        h_offset: lengths[0],
        v_offset: lengths[1],
        blur_radius: lengths.get(2).copied().unwrap_or(0.0),
        spread: lengths.get(3).copied().unwrap_or(0.0),
        color,
    };
    Ok((shadow, inset))
}

/// Parse one text shadow item: `h v [blur] color`.
fn parse_text_shadow(item: &[DeclarationValue]) -> Result<TextShadow, PropertyError> {
    const PROPERTY: &str = "text-shadow";
    let (color_value, lengths) = item
        .split_last()
        .ok_or_else(|| invalid(PROPERTY, "empty shadow"))?;

    let lengths = lengths
        .iter()
        .map(|v| parse_length(v, PROPERTY))
        .collect::<Result<Vec<_>, _>>()?;
    if !(2..=3).contains(&lengths.len()) {
        return Err(invalid(PROPERTY, format!("expected 2-3 lengths, got {}", lengths.len())));
    }

    Ok(TextShadow {
        h_offset: lengths[0],
        v_offset: lengths[1],
        blur_radius: lengths.get(2).copied().unwrap_or(0.0),
        color: parse_color(color_value, PROPERTY)?,
    })
}

/// Parse `linear-gradient(c1, c2, ...)` into evenly spaced stops.
fn parse_gradient(values: &[DeclarationValue]) -> Result<Vec<Rgba>, PropertyError> {
    const PROPERTY: &str = "background-image";
    match require_single(values, PROPERTY)? {
        DeclarationValue::Function { name, args } if name == "linear-gradient" => {
            if args.len() < 2 {
                return Err(invalid(PROPERTY, "a gradient needs at least 2 stops"));
            }
            args.iter()
                .map(|arg| parse_color(require_single(arg, PROPERTY)?, PROPERTY))
                .collect()
        }
        other => Err(invalid(PROPERTY, format!("expected linear-gradient(), got: {other:?}"))),
    }
}

/// Apply a declaration (property name + values) to a mutable [`Style`].
///
/// Returns an error for unknown properties or invalid values.
pub fn apply_declaration(
    style: &mut Style,
    property: &str,
    values: &[DeclarationValue],
) -> Result<(), PropertyError> {
    let length = |values: &[DeclarationValue]| parse_length(require_single(values, property)?, property);
    let color = |values: &[DeclarationValue]| parse_color(require_single(values, property)?, property);

    let flag = match property {
        // Border
        "border-radius" => {
            style.border_radius = length(values)?;
            PropertyMask::BORDER_RADIUS
        }
        "border-width" => {
            style.border_width = length(values)?;
            PropertyMask::BORDER_WIDTH
        }
        "border-color" => {
            style.border_color = color(values)?;
            PropertyMask::BORDER_COLOR
        }

        // Box
        "padding" => {
            let (y, x) = match values {
                [all] => {
                    let v = parse_length(all, property)?;
                    (v, v)
                }
                [vertical, horizontal] => {
                    (parse_length(vertical, property)?, parse_length(horizontal, property)?)
                }
                _ => return Err(invalid(property, format!("expected 1-2 values, got {}", values.len()))),
            };
            style.padding_x = x;
            style.padding_y = y;
            PropertyMask::PADDING_X | PropertyMask::PADDING_Y
        }
        "padding-x" => {
            style.padding_x = length(values)?;
            PropertyMask::PADDING_X
        }
        "padding-y" => {
            style.padding_y = length(values)?;
            PropertyMask::PADDING_Y
        }
        "min-width" => {
            style.min_width = length(values)?;
            PropertyMask::MIN_WIDTH
        }
        "min-height" => {
            style.min_height = length(values)?;
            PropertyMask::MIN_HEIGHT
        }
        "background-color" => {
            style.background_color = color(values)?;
            PropertyMask::BACKGROUND_COLOR
        }
        "background-image" => {
            style.gradient = if is_none(values) { Vec::new() } else { parse_gradient(values)? };
            PropertyMask::BACKGROUND_IMAGE
        }
        "box-shadow" => {
            style.outset_shadows.clear();
            style.inset_shadows.clear();
            if !is_none(values) {
                for item in split_list(values) {
                    let (shadow, inset) = parse_box_shadow(item)?;
                    if inset {
                        style.inset_shadows.push(shadow);
                    } else {
                        style.outset_shadows.push(shadow);
                    }
                }
            }
            PropertyMask::BOX_SHADOW
        }

        // Text
        "color" => {
            style.color = color(values)?;
            PropertyMask::COLOR
        }
        "text-align" => {
            style.text_align = match require_single_ident(values, property)? {
                "left" => TextAlign::Left,
                "center" => TextAlign::Center,
                "right" => TextAlign::Right,
                other => return Err(invalid(property, format!("expected left|center|right, got: {other}"))),
            };
            PropertyMask::TEXT_ALIGN
        }
        "text-shadow" => {
            style.text_shadows = if is_none(values) {
                Vec::new()
            } else {
                split_list(values)
                    .into_iter()
                    .map(parse_text_shadow)
                    .collect::<Result<_, _>>()?
            };
            PropertyMask::TEXT_SHADOW
        }
        "font-family" => {
            style.font.family = Some(match require_single(values, property)? {
                DeclarationValue::String(s) | DeclarationValue::Ident(s) => s.clone(),
                other => return Err(invalid(property, format!("expected family name, got: {other:?}"))),
            });
            PropertyMask::FONT_FAMILY
        }
        "font-size" => {
            style.font.size = Some(length(values)?);
            PropertyMask::FONT_SIZE
        }
        "font-weight" => {
            style.font.weight = Some(match require_single_ident(values, property)? {
                "normal" => FontWeight::Normal,
                "bold" => FontWeight::Bold,
                other => return Err(invalid(property, format!("expected normal|bold, got: {other}"))),
            });
            PropertyMask::FONT_WEIGHT
        }

        // Unknown
        other => return Err(PropertyError::UnknownProperty(other.to_string())),
    };

    style.mask |= flag;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::parser::parse_css;

    /// Parse `label { <body> }` and apply its declarations to a fresh style.
    fn style_from(body: &str) -> Result<Style, PropertyError> {
        let sheet = parse_css(&format!("label {{ {body} }}")).expect("parse failed");
        let rule = sheet.rules().next().expect("rule").clone();
        let mut style = Style::named("label");
        for decl in &rule.declarations {
            apply_declaration(&mut style, &decl.property, &decl.values)?;
        }
        Ok(style)
    }

    fn close(a: Rgba, b: Rgba) -> bool {
        (a.r - b.r).abs() < 1e-6 && (a.g - b.g).abs() < 1e-6 && (a.b - b.b).abs() < 1e-6 && (a.a - b.a).abs() < 1e-6
    }

    // ── Lengths ──────────────────────────────────────────────────────

    #[test]
    fn border_and_radius() {
        let style = style_from("border-width: 1px; border-radius: 2.5px;").unwrap();
        assert_eq!(style.border_width, 1.0);
        assert_eq!(style.border_radius, 2.5);
        assert!(style.mask.contains(PropertyMask::BORDER_WIDTH | PropertyMask::BORDER_RADIUS));
        assert!(!style.mask.contains(PropertyMask::COLOR));
    }

    #[test]
    fn padding_two_values_is_vertical_then_horizontal() {
        let style = style_from("padding: 3px 12px;").unwrap();
        assert_eq!(style.padding_y, 3.0);
        assert_eq!(style.padding_x, 12.0);
    }

    #[test]
    fn padding_single_value() {
        let style = style_from("padding: 3px;").unwrap();
        assert_eq!((style.padding_x, style.padding_y), (3.0, 3.0));
    }

    #[test]
    fn length_rejects_percent() {
        assert!(matches!(
            style_from("min-width: 50%;"),
            Err(PropertyError::InvalidValue { .. })
        ));
    }

    // ── Colors ───────────────────────────────────────────────────────

    #[test]
    fn color_keywords_and_hex() {
        let style = style_from("color: #333333; background-color: transparent;").unwrap();
        assert_eq!(style.color, Rgba::from_hex("333333").unwrap());
        assert_eq!(style.background_color, Rgba::TRANSPARENT);
    }

    #[test]
    fn color_functions() {
        let style = style_from("border-color: alpha(#3d9bda, 0.8); color: rgba(0, 0, 0, 0.27);").unwrap();
        assert!(close(style.border_color, Rgba::from_hex("3d9bda").unwrap().alpha(0.8)));
        assert!(close(style.color, Rgba::new(0.0, 0.0, 0.0, 0.27)));
    }

    #[test]
    fn color_shade_and_mix() {
        let style = style_from("color: shade(white, 0.96); background-color: mix(black, white, 0.5);").unwrap();
        assert!(close(style.color, Rgba::rgb(0.96, 0.96, 0.96)));
        assert!(close(style.background_color, Rgba::rgb(0.5, 0.5, 0.5)));
    }

    #[test]
    fn color_function_arity() {
        assert!(style_from("color: shade(white);").is_err());
        assert!(style_from("color: rgb(1, 2);").is_err());
        assert!(style_from("color: lighten(white, 2);").is_err());
    }

    // ── Decorations ──────────────────────────────────────────────────

    #[test]
    fn box_shadow_list_splits_inset() {
        let style = style_from(
            "box-shadow: inset 0 0 0 1px rgba(255, 255, 255, 0.05), inset 0 1px 0 0 white, 0 1px 0 0 black;",
        )
        .unwrap();
        assert_eq!(style.inset_shadows.len(), 2);
        assert_eq!(style.outset_shadows.len(), 1);
        assert_eq!(style.inset_shadows[0].spread, 1.0);
        assert_eq!(style.inset_shadows[1].v_offset, 1.0);
        assert_eq!(style.outset_shadows[0].color, Rgba::BLACK);
    }

    #[test]
    fn box_shadow_none_clears() {
        let style = style_from("box-shadow: 0 1px black; box-shadow: none;").unwrap();
        assert!(style.outset_shadows.is_empty());
        assert!(style.mask.contains(PropertyMask::BOX_SHADOW));
    }

    #[test]
    fn box_shadow_requires_color() {
        assert!(style_from("box-shadow: 0 1px;").is_err());
    }

    #[test]
    fn text_shadow() {
        let style = style_from("text-shadow: 0 1px rgba(0, 0, 0, 0.3);").unwrap();
        assert_eq!(
            style.text_shadows,
            vec![TextShadow {
                h_offset: 0.0,
                v_offset: 1.0,
                blur_radius: 0.0,
                color: Rgba::new(0.0, 0.0, 0.0, 0.3),
            }]
        );
    }

    #[test]
    fn gradient_stops() {
        let style = style_from("background-image: linear-gradient(transparent, transparent, rgba(0, 0, 0, 0.04));").unwrap();
        assert_eq!(style.gradient.len(), 3);
        assert!(style.mask.contains(PropertyMask::BACKGROUND_IMAGE));
    }

    #[test]
    fn gradient_needs_two_stops() {
        assert!(style_from("background-image: linear-gradient(white);").is_err());
    }

    // ── Text ─────────────────────────────────────────────────────────

    #[test]
    fn font_properties() {
        let style = style_from(r#"font-family: "Open Sans"; font-size: 12pt; font-weight: bold; text-align: right;"#).unwrap();
        assert_eq!(style.font.family.as_deref(), Some("Open Sans"));
        assert_eq!(style.font.size, Some(12.0));
        assert_eq!(style.font.weight, Some(FontWeight::Bold));
        assert_eq!(style.text_align, TextAlign::Right);
    }

    #[test]
    fn unknown_property() {
        assert!(matches!(
            style_from("margin: 1px;"),
            Err(PropertyError::UnknownProperty(name)) if name == "margin"
        ));
    }
}
