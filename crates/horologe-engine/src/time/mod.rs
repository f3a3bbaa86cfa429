//! Time subsystem.
//!
//! Two unrelated notions of time live here:
//! - monotonic frame timing (`FrameClock`, `FrameTicker`) that drives redraws
//! - wall-clock time (`WallClock`) that the face reads to position its hands
//!
//! Intended usage:
//! - one `FrameClock` and one `FrameTicker` per window
//! - one `WallClock` per application, injected so tests can freeze it

mod frame_clock;
mod ticker;
mod wall_clock;

pub use frame_clock::{FrameClock, FrameTime};
pub use ticker::FrameTicker;
pub use wall_clock::{FixedClock, SystemClock, WallClock};
