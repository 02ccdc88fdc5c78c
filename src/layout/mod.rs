//! Layout boxes: per-frame widget records and the registry that owns them.
//!
//! Box positions are assigned by the caller; the only sizing rule is the
//! content-size conversion in [`LayoutBox::size_for_content`].

pub mod layout_box;
pub mod registry;

pub use layout_box::{Content, LayoutBox, Paint, PaintFn};
pub use registry::{BoxId, BoxRegistry};
