//! Pipelines used by [`SceneRenderer`](super::SceneRenderer).

mod common;

pub mod shape;
pub mod text;

pub use shape::{ShapeInstance, ShapeRenderer};
pub use text::{GlyphInstance, TextRenderer};
