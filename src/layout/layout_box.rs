//! A single layout box: geometry, style references, selector state, content.

use crate::behavior::BehaviorId;
use crate::css::style::{Font, SelectorFlags, Style, TextAlign};
use crate::css::table::StyleId;
use crate::geometry::{Rect, Size};
use crate::render::painter::Painter;

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// What a box displays.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Content {
    #[default]
    None,
    /// A text run with its measured size.
    Text { text: String, size: Size },
}

impl Content {
    pub fn text(&self) -> Option<&str> {
        match self {
            Content::None => None,
            Content::Text { text, .. } => Some(text),
        }
    }

    /// Measured size, zero when there is no content.
    pub fn size(&self) -> Size {
        match self {
            Content::None => Size::ZERO,
            Content::Text { size, .. } => *size,
        }
    }
}

// ---------------------------------------------------------------------------
// Paint
// ---------------------------------------------------------------------------

/// Callback for boxes that draw themselves.
pub type PaintFn = fn(&mut dyn Painter, &LayoutBox);

/// How a box is painted.
#[derive(Clone, Copy, Default)]
pub enum Paint {
    /// Drawn from the box's current style.
    #[default]
    Styled,
    Custom(PaintFn),
}

impl std::fmt::Debug for Paint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Styled => write!(f, "Styled"),
            Self::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}

// ---------------------------------------------------------------------------
// LayoutBox
// ---------------------------------------------------------------------------

/// One widget instance for the current frame.
#[derive(Debug, Clone)]
pub struct LayoutBox {
    /// Unplaced until the caller assigns a position.
    pub rect: Rect,
    /// Style the box was created with.
    pub base_style: StyleId,
    /// Resolved style, `base_style` or one of its variants.
    pub current_style: StyleId,
    pub active: SelectorFlags,
    /// Selectors that flipped at least once since the last end of frame.
    pub changed: SelectorFlags,
    pub text_align: Option<TextAlign>,
    pub content: Content,
    /// Set for one frame when a behavior commits new content.
    pub content_changed: bool,
    pub behavior: Option<BehaviorId>,
    pub paint: Paint,
}

impl LayoutBox {
    pub fn new(style: StyleId) -> Self {
        Self {
            rect: Rect::UNPLACED,
            base_style: style,
            current_style: style,
            active: SelectorFlags::empty(),
            changed: SelectorFlags::empty(),
            text_align: None,
            content: Content::None,
            content_changed: false,
            behavior: None,
            paint: Paint::Styled,
        }
    }

    /// Set `sel`, recording the edge if it was clear.
    pub fn selector_set(&mut self, sel: SelectorFlags) {
        if !self.active.contains(sel) {
            self.active |= sel;
            self.changed |= sel;
        }
    }

    /// Clear `sel`, recording the edge if it was set.
    pub fn selector_unset(&mut self, sel: SelectorFlags) {
        if self.active.intersects(sel) {
            self.active &= !sel;
            self.changed |= sel;
        }
    }

    pub fn is_set(&self, sel: SelectorFlags) -> bool {
        self.active.contains(sel)
    }

    /// `sel` changed this frame and is now set.
    pub fn rising_edge(&self, sel: SelectorFlags) -> bool {
        self.changed.intersects(sel) && self.active.intersects(sel)
    }

    /// `sel` changed this frame and is now clear.
    pub fn falling_edge(&self, sel: SelectorFlags) -> bool {
        self.changed.intersects(sel) && !self.active.intersects(sel)
    }

    /// Store a text run with a precomputed size.
    pub fn set_text(&mut self, text: impl Into<String>, size: Size) {
        self.content = Content::Text { text: text.into(), size };
    }

    pub fn text(&self) -> Option<&str> {
        self.content.text()
    }

    /// Border-box size needed to show `content` with `style`: the larger of
    /// the minimum and content size, plus padding and border on both sides.
    pub fn size_for_content(style: &Style, content: Size) -> Size {
        Size::new(
            style.min_width.max(content.width) + 2.0 * (style.padding_x + style.border_width),
            style.min_height.max(content.height) + 2.0 * (style.padding_y + style.border_width),
        )
    }

    /// Font for this box's text under `style`.
    pub fn font(style: &Style, default: &Font) -> Font {
        style.font.resolve(default)
    }
}

// ===========================================================================
// Tests
// ===========================================================================
