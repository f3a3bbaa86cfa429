use horologe_engine::coords::{Rect, Vec2};

/// The area a face is drawn into.
///
/// `unit` converts device-independent units into logical pixels. The engine
/// already works in logical pixels, so hosts normally leave it at `1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub origin: Vec2,
    pub size: Vec2,
    pub unit: f32,
}

impl Surface {
    #[inline]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size, unit: 1.0 }
    }

    #[inline]
    pub const fn with_unit(mut self, unit: f32) -> Self {
        self.unit = unit;
        self
    }

    /// Centered square whose side is `fraction * min(window.x, window.y)`.
    ///
    /// This is how a desktop window hosts the face: the square follows the
    /// window through every resize and stays centered in it.
    pub fn fit_square(window: Vec2, fraction: f32) -> Self {
        let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
        let side = (window.x.min(window.y) * fraction).max(0.0);
        let origin = Vec2::new((window.x - side) * 0.5, (window.y - side) * 0.5);
        Self::new(origin, Vec2::splat(side))
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin, self.size)
    }

    /// Unit scale actually used for layout; invalid scales fall back to `1.0`.
    #[inline]
    pub fn effective_unit(&self) -> f32 {
        if self.unit.is_finite() && self.unit > 0.0 { self.unit } else { 1.0 }
    }

    /// True when there is a finite, non-zero area to draw into.
    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.origin.is_finite()
            && self.size.is_finite()
            && self.size.x > 0.0
            && self.size.y > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── fit_square ────────────────────────────────────────────────────────

    #[test]
    fn fit_square_is_centered_on_the_short_side() {
        let s = Surface::fit_square(Vec2::new(800.0, 600.0), 0.9);
        assert_eq!(s.size, Vec2::new(540.0, 540.0));
        assert_eq!(s.origin, Vec2::new(130.0, 30.0));
        assert_eq!(s.rect().center(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn fit_square_of_empty_window_is_not_drawable() {
        let s = Surface::fit_square(Vec2::new(0.0, 600.0), 0.9);
        assert_eq!(s.size, Vec2::zero());
        assert!(!s.is_drawable());
    }

    #[test]
    fn fit_square_clamps_fraction() {
        let s = Surface::fit_square(Vec2::new(100.0, 100.0), 3.0);
        assert_eq!(s.size, Vec2::splat(100.0));
        let s = Surface::fit_square(Vec2::new(100.0, 100.0), f32::NAN);
        assert!(!s.is_drawable());
    }

    // ── unit ──────────────────────────────────────────────────────────────

    #[test]
    fn invalid_unit_falls_back_to_one() {
        let base = Surface::new(Vec2::zero(), Vec2::splat(10.0));
        assert_eq!(base.effective_unit(), 1.0);
        assert_eq!(base.with_unit(2.0).effective_unit(), 2.0);
        assert_eq!(base.with_unit(0.0).effective_unit(), 1.0);
        assert_eq!(base.with_unit(f32::INFINITY).effective_unit(), 1.0);
    }

    #[test]
    fn non_finite_size_is_not_drawable() {
        let s = Surface::new(Vec2::zero(), Vec2::new(f32::INFINITY, 10.0));
        assert!(!s.is_drawable());
    }
}
