//! Horologe face: an analog clock drawn as a stream of engine draw commands.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use horologe_face::prelude::*;
//!
//! let face = ClockRenderer::new();
//! let surface = Surface::fit_square(Vec2::new(800.0, 600.0), 0.9);
//! let cmds = face.render(&surface, &SystemClock::new());
//! // Or record into an existing list and hand it to a `SceneRenderer`:
//! face.paint(&surface, SystemClock::new().now(), &mut draw_list);
//! ```
//!
//! The layout is a pure function of time and surface size; nothing carries
//! over between frames.

pub mod app;
pub mod digital;
pub mod frame;
pub mod geometry;
pub mod renderer;
pub mod style;
pub mod surface;
pub mod time_sample;

// Top-level re-exports, e.g. `use horologe_face::Application`.
pub use app::Application;
pub use renderer::ClockRenderer;

/// Everything needed to draw or host a face.
pub mod prelude {
    pub use crate::app::Application;
    pub use crate::digital::format_digital;
    pub use crate::frame::ClockFrame;
    pub use crate::geometry::{hand_angle, on_ray};
    pub use crate::renderer::{layers, ClockRenderer};
    pub use crate::style::{FaceMetrics, FacePalette, FaceStyle, HandStyle};
    pub use crate::surface::Surface;
    pub use crate::time_sample::{HandAngles, TimeSample};

    // Re-export the engine primitives callers need.
    pub use horologe_engine::coords::Vec2;
    pub use horologe_engine::paint::Color;
    pub use horologe_engine::scene::{DrawCmd, DrawList, LineCap};
    pub use horologe_engine::text::FontId;
    pub use horologe_engine::time::{FixedClock, SystemClock, WallClock};
}
