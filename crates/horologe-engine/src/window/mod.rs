//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and Window, wires them to the GPU layer and
//! paces redraws with a fixed-rate ticker.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
