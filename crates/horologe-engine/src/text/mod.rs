//! Font loading and measurement.
//!
//! Shaping and rasterization are delegated to `fontdue`; the scene only refers
//! to fonts through opaque [`FontId`] handles.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
