//! Style record: the resolved visual properties of one named style.
//!
//! Every field has a zero default. The [`PropertyMask`] records which fields
//! were set by a declaration, so a state variant can be layered on top of its
//! base style with [`Style::merge`].

use bitflags::bitflags;

use crate::css::color::Rgba;
use crate::css::table::StyleId;

bitflags! {
    /// Which properties a style sets.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PropertyMask: u32 {
        const BORDER_RADIUS    = 1 << 0;
        const BORDER_COLOR     = 1 << 1;
        const BORDER_WIDTH     = 1 << 2;
        const PADDING_X        = 1 << 3;
        const PADDING_Y        = 1 << 4;
        const MIN_WIDTH        = 1 << 5;
        const MIN_HEIGHT       = 1 << 6;
        const BACKGROUND_COLOR = 1 << 7;
        const COLOR            = 1 << 8;
        const TEXT_ALIGN       = 1 << 9;
        const FONT_WEIGHT      = 1 << 10;
        /// Only vertical linear gradients.
        const BACKGROUND_IMAGE = 1 << 11;
        const BOX_SHADOW       = 1 << 12;
        const TEXT_SHADOW      = 1 << 13;
        const FONT_FAMILY      = 1 << 14;
        const FONT_SIZE        = 1 << 15;
    }
}

bitflags! {
    /// Interaction states of a layout box.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SelectorFlags: u8 {
        const ACTIVE   = 1 << 0;
        const HOVER    = 1 << 1;
        const FOCUS    = 1 << 2;
        const DISABLED = 1 << 3;
    }
}

/// Text alignment options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Center,
    Left,
    Right,
}

/// Font weight options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// The selector states a style can provide a variant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleState {
    Active,
    Focus,
    Disabled,
}

impl StyleState {
    pub const ALL: [StyleState; 3] = [StyleState::Active, StyleState::Focus, StyleState::Disabled];

    /// Name used after the `:` in selectors and as the variant suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            StyleState::Active => "active",
            StyleState::Focus => "focus",
            StyleState::Disabled => "disabled",
        }
    }

    pub fn from_name(name: &str) -> Option<StyleState> {
        StyleState::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// The selector flag that switches this variant on.
    pub fn flag(self) -> SelectorFlags {
        match self {
            StyleState::Active => SelectorFlags::ACTIVE,
            StyleState::Focus => SelectorFlags::FOCUS,
            StyleState::Disabled => SelectorFlags::DISABLED,
        }
    }
}

/// A box or inset shadow: offsets, blur radius, spread distance, color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxShadow {
    pub h_offset: f64,
    pub v_offset: f64,
    pub blur_radius: f64,
    pub spread: f64,
    pub color: Rgba,
}

/// A text shadow: offsets, blur radius, color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextShadow {
    pub h_offset: f64,
    pub v_offset: f64,
    pub blur_radius: f64,
    pub color: Rgba,
}

/// A fully resolved font.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub weight: FontWeight,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: "Open Sans".into(),
            size: 9.0,
            weight: FontWeight::Normal,
        }
    }
}

/// Font settings of a style. Unset fields fall back to the engine's default
/// font.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FontStyle {
    pub family: Option<String>,
    pub size: Option<f64>,
    pub weight: Option<FontWeight>,
}

impl FontStyle {
    pub fn resolve(&self, default: &Font) -> Font {
        Font {
            family: self.family.clone().unwrap_or_else(|| default.family.clone()),
            size: self.size.unwrap_or(default.size),
            weight: self.weight.unwrap_or(default.weight),
        }
    }
}

/// References to the state variants of a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Variants {
    pub active: Option<StyleId>,
    pub focus: Option<StyleId>,
    pub disabled: Option<StyleId>,
}

impl Variants {
    pub fn get(&self, state: StyleState) -> Option<StyleId> {
        match state {
            StyleState::Active => self.active,
            StyleState::Focus => self.focus,
            StyleState::Disabled => self.disabled,
        }
    }

    pub fn set(&mut self, state: StyleState, id: StyleId) {
        match state {
            StyleState::Active => self.active = Some(id),
            StyleState::Focus => self.focus = Some(id),
            StyleState::Disabled => self.disabled = Some(id),
        }
    }
}

/// One named style record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub name: String,
    pub mask: PropertyMask,

    // Border
    pub border_radius: f64,
    pub border_color: Rgba,
    pub border_width: f64,

    // Box
    pub padding_x: f64,
    pub padding_y: f64,
    pub min_width: f64,
    pub min_height: f64,
    pub background_color: Rgba,

    // Text
    pub color: Rgba,
    pub text_align: TextAlign,
    pub font: FontStyle,

    // Decoration
    pub outset_shadows: Vec<BoxShadow>,
    pub inset_shadows: Vec<BoxShadow>,
    pub text_shadows: Vec<TextShadow>,
    pub gradient: Vec<Rgba>,

    pub variants: Variants,
}

impl Style {
    /// An empty style with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Whether no property has been set.
    pub fn is_empty(&self) -> bool {
        self.mask.is_empty()
    }

    pub fn variant(&self, state: StyleState) -> Option<StyleId> {
        self.variants.get(state)
    }

    /// Merge `other` on top of `self`. Every property set in `other`'s mask
    /// replaces `self`'s value; the rest keep `self`'s value. Name and
    /// variants come from `other`.
    pub fn merge(&self, other: &Style) -> Style {
        let set = other.mask;
        let pick = |flag: PropertyMask| set.contains(flag);

        let mut out = self.clone();
        out.name = other.name.clone();
        out.mask = self.mask | other.mask;
        out.variants = other.variants;

        if pick(PropertyMask::BORDER_RADIUS) {
            out.border_radius = other.border_radius;
        }
        if pick(PropertyMask::BORDER_COLOR) {
            out.border_color = other.border_color;
        }
        if pick(PropertyMask::BORDER_WIDTH) {
            out.border_width = other.border_width;
        }
        if pick(PropertyMask::PADDING_X) {
            out.padding_x = other.padding_x;
        }
        if pick(PropertyMask::PADDING_Y) {
            out.padding_y = other.padding_y;
        }
        if pick(PropertyMask::MIN_WIDTH) {
            out.min_width = other.min_width;
        }
        if pick(PropertyMask::MIN_HEIGHT) {
            out.min_height = other.min_height;
        }
        if pick(PropertyMask::BACKGROUND_COLOR) {
            out.background_color = other.background_color;
        }
        if pick(PropertyMask::COLOR) {
            out.color = other.color;
        }
        if pick(PropertyMask::TEXT_ALIGN) {
            out.text_align = other.text_align;
        }
        if pick(PropertyMask::FONT_FAMILY) {
            out.font.family = other.font.family.clone();
        }
        if pick(PropertyMask::FONT_SIZE) {
            out.font.size = other.font.size;
        }
        if pick(PropertyMask::FONT_WEIGHT) {
            out.font.weight = other.font.weight;
        }
        if pick(PropertyMask::BACKGROUND_IMAGE) {
            out.gradient = other.gradient.clone();
        }
        if pick(PropertyMask::BOX_SHADOW) {
            out.outset_shadows = other.outset_shadows.clone();
            out.inset_shadows = other.inset_shadows.clone();
        }
        if pick(PropertyMask::TEXT_SHADOW) {
            out.text_shadows = other.text_shadows.clone();
        }

        out
    }
}

// ===========================================================================
// Tests
// ===========================================================================
