pub mod ellipse;
pub mod line;
pub mod rounded_rect;
pub mod text;

pub use line::LineCap;
