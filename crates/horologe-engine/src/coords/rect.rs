use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Rectangle of `size` whose center sits on `center`.
    ///
    /// Negative extents are clamped to zero, so the result collapses to a point
    /// at `center` rather than flipping around it.
    #[inline]
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let w = size.x.max(0.0);
        let h = size.y.max(0.0);
        Rect::new(center.x - w * 0.5, center.y - h * 0.5, w, h)
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x, self.origin.y + self.size.y)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x * 0.5, self.origin.y + self.size.y * 0.5)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let mut x = self.origin.x;
        let mut y = self.origin.y;
        let mut w = self.size.x;
        let mut h = self.size.y;

        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }

        Rect::new(x, y, w, h)
    }

    /// True when `other` lies entirely inside `self` (edges may touch).
    #[inline]
    pub fn encloses(self, other: Rect) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        b.origin.x >= a.origin.x
            && b.origin.y >= a.origin.y
            && b.max().x <= a.max().x
            && b.max().y <= a.max().y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_positive_is_identity() {
        let rect = r(1.0, 2.0, 10.0, 20.0);
        assert_eq!(rect.normalized(), rect);
    }

    #[test]
    fn normalized_negative_width() {
        let rect = r(10.0, 0.0, -4.0, 5.0);
        let n = rect.normalized();
        assert_eq!(n.origin.x, 6.0);
        assert_eq!(n.size.x, 4.0);
    }

    // ── centered ──────────────────────────────────────────────────────────

    #[test]
    fn centered_places_center_on_point() {
        let rect = Rect::centered(Vec2::new(50.0, 40.0), Vec2::new(20.0, 10.0));
        assert_eq!(rect, r(40.0, 35.0, 20.0, 10.0));
        assert_eq!(rect.center(), Vec2::new(50.0, 40.0));
    }

    #[test]
    fn centered_negative_size_collapses_to_point() {
        let rect = Rect::centered(Vec2::new(5.0, 5.0), Vec2::new(-8.0, -2.0));
        assert_eq!(rect, r(5.0, 5.0, 0.0, 0.0));
        assert!(rect.is_empty());
    }

    // ── encloses ──────────────────────────────────────────────────────────

    #[test]
    fn encloses_nested_and_touching() {
        let outer = r(0.0, 0.0, 100.0, 100.0);
        assert!(outer.encloses(r(10.0, 10.0, 20.0, 20.0)));
        assert!(outer.encloses(outer));
    }

    #[test]
    fn encloses_rejects_overhang() {
        let outer = r(0.0, 0.0, 10.0, 10.0);
        assert!(!outer.encloses(r(5.0, 5.0, 10.0, 1.0)));
        assert!(!outer.encloses(r(-1.0, 0.0, 2.0, 2.0)));
    }

    // ── is_empty ──────────────────────────────────────────────────────────

    #[test]
    fn is_empty_zero_size() {
        assert!(r(0.0, 0.0, 0.0, 5.0).is_empty());
        assert!(r(0.0, 0.0, 5.0, 0.0).is_empty());
    }

    #[test]
    fn is_empty_positive_size() {
        assert!(!r(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
