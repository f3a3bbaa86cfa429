use horologe_engine::coords::{Rect, Vec2};

use crate::style::FaceMetrics;
use crate::surface::Surface;

/// Layout of one face for one surface size.
///
/// Recomputed every frame; nothing here depends on the time. Lengths are in
/// logical pixels, already multiplied by the surface unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockFrame {
    /// `min(width, height)` of the surface.
    pub size: f32,
    pub padding: f32,
    /// Side of the white face: `max(size - 2 * padding, 0)`.
    pub face_size: f32,
    pub center: Vec2,
    pub corner_radius: f32,
    /// Radius the hands, numerals and ticks are laid out on.
    pub radius: f32,
    pub unit: f32,
}

impl ClockFrame {
    /// Returns `None` when the surface has no drawable area.
    pub fn compute(surface: &Surface, metrics: &FaceMetrics) -> Option<Self> {
        if !surface.is_drawable() {
            return None;
        }

        let unit = surface.effective_unit();
        let size = surface.size.x.min(surface.size.y);
        let padding = metrics.padding * unit;
        let face_size = (size - 2.0 * padding).max(0.0);
        let inner_disk = (face_size - 2.0 * metrics.inner_disk_inset * unit).max(0.0);

        Some(Self {
            size,
            padding,
            face_size,
            center: surface.rect().center(),
            corner_radius: (size * metrics.corner_ratio).max(0.0),
            radius: inner_disk * 0.5,
            unit,
        })
    }

    /// Square centered on the face, grown by `outset` units on every side
    /// (negative shrinks). Never smaller than a point.
    pub fn square(&self, outset: f32) -> Rect {
        let side = self.face_size + 2.0 * outset * self.unit;
        Rect::centered(self.center, Vec2::splat(side))
    }

    /// Corner radius of a layer whose radius differs from the face by
    /// `delta` units, clamped to `≥ 0`.
    pub fn corner(&self, delta: f32) -> f32 {
        (self.corner_radius + delta * self.unit).max(0.0)
    }

    /// Converts device-independent units to pixels.
    #[inline]
    pub fn px(&self, units: f32) -> f32 {
        units * self.unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(w: f32, h: f32) -> Option<ClockFrame> {
        ClockFrame::compute(&Surface::new(Vec2::zero(), Vec2::new(w, h)), &FaceMetrics::default())
    }

    // ── compute ───────────────────────────────────────────────────────────

    #[test]
    fn square_surface() {
        let f = frame(400.0, 400.0).unwrap();
        assert_eq!(f.size, 400.0);
        assert_eq!(f.face_size, 368.0);
        assert_eq!(f.center, Vec2::new(200.0, 200.0));
        assert_eq!(f.corner_radius, 24.0);
        assert_eq!(f.radius, 170.0);
    }

    #[test]
    fn uses_short_side_and_centers_in_the_long_one() {
        let f = ClockFrame::compute(
            &Surface::new(Vec2::new(10.0, 20.0), Vec2::new(600.0, 300.0)),
            &FaceMetrics::default(),
        )
        .unwrap();
        assert_eq!(f.size, 300.0);
        assert_eq!(f.center, Vec2::new(310.0, 170.0));
    }

    #[test]
    fn unit_scales_fixed_distances_only() {
        let s = Surface::new(Vec2::zero(), Vec2::splat(400.0)).with_unit(2.0);
        let f = ClockFrame::compute(&s, &FaceMetrics::default()).unwrap();
        assert_eq!(f.padding, 32.0);
        assert_eq!(f.face_size, 336.0);
        assert_eq!(f.corner_radius, 24.0);
        assert_eq!(f.radius, 140.0);
    }

    #[test]
    fn tiny_surface_collapses_without_going_negative() {
        let f = frame(20.0, 20.0).unwrap();
        assert_eq!(f.face_size, 0.0);
        assert_eq!(f.radius, 0.0);
    }

    #[test]
    fn empty_or_invalid_surface_has_no_frame() {
        assert!(frame(0.0, 0.0).is_none());
        assert!(frame(100.0, 0.0).is_none());
        assert!(frame(f32::NAN, 100.0).is_none());
    }

    // ── square / corner ───────────────────────────────────────────────────

    #[test]
    fn squares_nest_and_clamp() {
        let f = frame(20.0, 20.0).unwrap();
        assert_eq!(f.square(8.0).size, Vec2::splat(16.0));
        assert_eq!(f.square(-14.0).size, Vec2::zero());
        assert_eq!(f.square(-14.0).center(), f.center);
        assert_eq!(f.corner(-7.0), 0.0);
    }
}
