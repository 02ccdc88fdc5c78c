//! Core geometry types: Vec2, Rect, Size.
//!
//! Coordinates are logical pixels with the origin at the top-left of the
//! application surface. Box positions are assigned explicitly by the caller.

use std::ops::{Add, Mul, Neg, Sub};

// ---------------------------------------------------------------------------
// Vec2
// ---------------------------------------------------------------------------

/// A 2D point or displacement in logical pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    /// The origin.
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Create a new vector.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        (self - other).length()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2 { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2 { x: -self.x, y: -self.y }
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2 { x: self.x * rhs, y: self.y * rhs }
    }
}

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A width/height pair, used for measured content.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Size) -> Size {
        Size {
            width: self.width.max(other.width),
            height: self.height.max(other.height),
        }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle given by its min (top-left) and max
/// (bottom-right) corners.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// A rectangle with no position. It contains no point.
    pub const UNPLACED: Rect = Rect {
        min: Vec2 { x: f64::NAN, y: f64::NAN },
        max: Vec2 { x: f64::NAN, y: f64::NAN },
    };

    /// Create a rectangle from its corners.
    #[inline]
    pub const fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from corner coordinates.
    #[inline]
    pub const fn from_coords(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { min: Vec2::new(x0, y0), max: Vec2::new(x1, y1) }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub fn from_origin_size(origin: Vec2, size: Size) -> Self {
        Self {
            min: origin,
            max: Vec2::new(origin.x + size.width, origin.y + size.height),
        }
    }

    #[inline]
    pub fn width(self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(self) -> f64 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn size(self) -> Size {
        Size::new(self.width(), self.height())
    }

    /// Whether every corner coordinate is a number.
    #[inline]
    pub fn is_placed(self) -> bool {
        !(self.min.x.is_nan() || self.min.y.is_nan() || self.max.x.is_nan() || self.max.y.is_nan())
    }

    /// Whether the point lies inside the rectangle. Both edges are inclusive.
    /// An unplaced rectangle contains nothing.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Shrink every side by `amount`, never inverting the rectangle.
    pub fn inset(self, amount: f64) -> Rect {
        let dx = amount.min(self.width() / 2.0);
        let dy = amount.min(self.height() / 2.0);
        Rect {
            min: Vec2::new(self.min.x + dx, self.min.y + dy),
            max: Vec2::new(self.max.x - dx, self.max.y - dy),
        }
    }

    /// Shrink the horizontal sides by `x` and the vertical sides by `y`.
    pub fn inset_xy(self, x: f64, y: f64) -> Rect {
        let dx = x.min(self.width() / 2.0);
        let dy = y.min(self.height() / 2.0);
        Rect {
            min: Vec2::new(self.min.x + dx, self.min.y + dy),
            max: Vec2::new(self.max.x - dx, self.max.y - dy),
        }
    }

    /// Move the rectangle by `offset`.
    #[inline]
    pub fn translate(self, offset: Vec2) -> Rect {
        Rect { min: self.min + offset, max: self.max + offset }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
