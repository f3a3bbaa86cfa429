use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Filled axis-aligned ellipse payload.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipseCmd {
    pub center: Vec2,
    /// Semi-axes along x and y.
    pub radii: Vec2,
    pub color: Color,
}

impl EllipseCmd {
    #[inline]
    pub fn new(center: Vec2, radii: Vec2, color: Color) -> Self {
        Self { center, radii, color }
    }
}

impl DrawList {
    /// Records a solid circle.
    #[inline]
    pub fn push_solid_circle(&mut self, z: ZIndex, center: Vec2, radius: f32, color: Color) {
        let r = radius.max(0.0);
        self.push(z, DrawCmd::Ellipse(EllipseCmd::new(center, Vec2::splat(r), color)));
    }
}
