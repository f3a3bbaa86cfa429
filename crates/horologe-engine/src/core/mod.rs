//! Core engine-facing contracts.
//!
//! The interface between the runtime loop and the application: a callback
//! trait plus the per-frame context handed to it.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
