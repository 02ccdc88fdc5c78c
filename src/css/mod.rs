//! Style engine: tokenizer, parser, color math, property parsing and the
//! compiled style table.

pub mod color;
pub mod tokenizer;
pub mod model;
pub mod parser;
pub mod style;
pub mod properties;
pub mod theme;
pub mod table;

pub use color::Rgba;
pub use style::{SelectorFlags, Style, StyleState};
pub use table::{StyleError, StyleId, StyleName, StyleTable};
