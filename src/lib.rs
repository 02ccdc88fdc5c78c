//! # cascade-ui
//!
//! An application-embedded UI engine that the host rebuilds and restyles
//! every frame.
//!
//! The host owns the window, the input source and the 2D renderer. Each
//! frame it hands the [`Engine`] one input sample; the engine turns it into
//! clicks, hover and focus changes, advances the widget behaviors and
//! describes what to draw as a list of abstract draw commands.
//!
//! ## Core Systems
//!
//! - **[`css`]**: stylesheet dialect, color math, the style table and its state variants
//! - **[`layout`]**: per-frame layout boxes in a fixed-capacity registry
//! - **[`selector`]**: hover/active selectors and the style cascade
//! - **[`focus`]**: circular focus chain over an index arena with slot recycling
//! - **[`event`]**: input samples, gesture detection, key bindings, clipboard
//! - **[`behavior`]**: button and numeric text-entry state machines, text selection
//! - **[`render`]**: painter backend seam and style-based box painting
//! - **[`engine`]**: the frame pipeline tying everything together
//! - **[`testing`]**: headless [`Pilot`](testing::Pilot) and a recording painter
//! - **[`geometry`]**: Vec2, Size, Rect primitives

// Foundation
pub mod geometry;

// Core systems
pub mod css;
pub mod focus;
pub mod layout;
pub mod selector;

// Input and behaviors
pub mod behavior;
pub mod event;

// Rendering
pub mod render;

// Engine
pub mod engine;

// Headless testing
pub mod testing;

pub use engine::{Engine, EngineConfig, FrameReport};
