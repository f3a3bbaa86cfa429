use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// End cap style for stroked segments.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LineCap {
    /// Stroke ends flush with the endpoints.
    #[default]
    Butt,
    /// Stroke ends in a half-disc of radius `width / 2` around each endpoint.
    Round,
}

/// Straight stroked segment payload.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    /// Stroke width in logical pixels.
    pub width: f32,
    pub cap: LineCap,
    pub color: Color,
}

impl LineCmd {
    #[inline]
    pub fn length(&self) -> f32 {
        (self.to - self.from).length()
    }
}

impl DrawList {
    /// Records a stroked line segment.
    #[inline]
    pub fn push_line(
        &mut self,
        z: ZIndex,
        from: Vec2,
        to: Vec2,
        width: f32,
        cap: LineCap,
        color: Color,
    ) {
        self.push(z, DrawCmd::Line(LineCmd { from, to, width: width.max(0.0), cap, color }));
    }
}
