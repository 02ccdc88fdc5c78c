//! Headless testing helpers: [`Pilot`] and [`RecordingPainter`].
//!
//! Use the [`Pilot`] to drive an [`Engine`](crate::engine::Engine) frame by
//! frame without a windowing backend, and the [`RecordingPainter`] to capture
//! painted output as plain text for snapshot-style assertions.

pub mod pilot;
pub mod recorder;

pub use pilot::Pilot;
pub use recorder::RecordingPainter;
