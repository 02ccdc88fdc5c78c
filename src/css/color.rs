//! RGBA colors and the theme color math: shade, mix, alpha.
//!
//! Channels are stored as `f64` in `0.0..=1.0`. `shade` works in HSL space,
//! scaling lightness and saturation by the same factor.

use std::fmt;

// ---------------------------------------------------------------------------
// Rgba
// ---------------------------------------------------------------------------

/// A straight (non-premultiplied) RGBA color.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Rgba = Rgba::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Rgba = Rgba::rgb(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque color.
    #[inline]
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build a color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    /// Parse `rgb`, `rgba`, `rrggbb` or `rrggbbaa` hex digits, with or
    /// without a leading `#`.
    pub fn from_hex(hex: &str) -> Option<Rgba> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Rgba::from_rgba8(nibble(0)?, nibble(1)?, nibble(2)?, 255)),
            4 => Some(Rgba::from_rgba8(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
            6 => Some(Rgba::from_rgba8(byte(0)?, byte(2)?, byte(4)?, 255)),
            8 => Some(Rgba::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Scale lightness and saturation by `f`, clamping both to 1.
    pub fn shade(self, f: f64) -> Rgba {
        let mut hsla = self.to_hsla();
        hsla.l = (hsla.l * f).min(1.0);
        hsla.s = (hsla.s * f).min(1.0);
        Rgba::from_hsla(hsla)
    }

    /// Linear interpolation from `self` (f = 0) to `other` (f = 1), every
    /// channel clamped to `0..=1`.
    pub fn mix(self, other: Rgba, f: f64) -> Rgba {
        let lerp = |a: f64, b: f64| (a + (b - a) * f).clamp(0.0, 1.0);
        Rgba {
            r: lerp(self.r, other.r),
            g: lerp(self.g, other.g),
            b: lerp(self.b, other.b),
            a: lerp(self.a, other.a),
        }
    }

    /// Scale the alpha channel by `f`.
    pub fn alpha(self, f: f64) -> Rgba {
        Rgba { a: self.a * f, ..self }
    }

    pub fn to_hsla(self) -> Hsla {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = max - min;
        let l = (max + min) / 2.0;

        if delta == 0.0 {
            return Hsla { h: None, s: 0.0, l, a: self.a };
        }

        let degrees = if max == self.r {
            (60.0 * (self.g - self.b) / delta).rem_euclid(360.0)
        } else if max == self.g {
            60.0 * (self.b - self.r) / delta + 120.0
        } else {
            60.0 * (self.r - self.g) / delta + 240.0
        };

        let s = if l <= 0.5 {
            delta / (2.0 * l)
        } else {
            delta / (2.0 - 2.0 * l)
        };

        Hsla { h: Some(degrees / 360.0), s, l, a: self.a }
    }

    pub fn from_hsla(hsla: Hsla) -> Rgba {
        let chroma = (1.0 - (2.0 * hsla.l - 1.0).abs()) * hsla.s;
        let m = hsla.l - chroma / 2.0;

        let (r, g, b) = match hsla.h {
            None => (0.0, 0.0, 0.0),
            Some(h) => {
                let h_pr = (h * 6.0).rem_euclid(6.0);
                let x = chroma * (1.0 - (h_pr % 2.0 - 1.0).abs());
                match h_pr as u32 {
                    0 => (chroma, x, 0.0),
                    1 => (x, chroma, 0.0),
                    2 => (0.0, chroma, x),
                    3 => (0.0, x, chroma),
                    4 => (x, 0.0, chroma),
                    _ => (chroma, 0.0, x),
                }
            }
        };

        Rgba { r: r + m, g: g + m, b: b + m, a: hsla.a }
    }

    /// 8-bit channel values, rounded.
    pub fn to_rgb8(self) -> [u8; 3] {
        let c = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [c(self.r), c(self.g), c(self.b)]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_rgb8();
        write!(f, "rgba({r},{g},{b},{:.2})", self.a)
    }
}

// ---------------------------------------------------------------------------
// Hsla
// ---------------------------------------------------------------------------

/// Hue/saturation/lightness/alpha. `h` is in `0..1` and is `None` for
/// achromatic colors.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hsla {
    pub h: Option<f64>,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

// ===========================================================================
// Tests
// ===========================================================================
