/// Linear premultiplied RGBA color.
///
/// Invariant:
/// - `rgb` components are expected to be multiplied by `a` (premultiplied alpha).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32, // premultiplied
    pub g: f32, // premultiplied
    pub b: f32, // premultiplied
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Opaque color from components in `[0, 1]`.
    ///
    /// With `a = 1` straight and premultiplied forms coincide, so this is usable
    /// in `const` palettes.
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a premultiplied color from straight alpha components.
    #[inline]
    pub fn from_straight(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: (r.clamp(0.0, 1.0)) * a,
            g: (g.clamp(0.0, 1.0)) * a,
            b: (b.clamp(0.0, 1.0)) * a,
            a,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }

    /// Layout used by instance buffers and clear passes.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Color> for wgpu::Color {
    fn from(c: Color) -> Self {
        wgpu::Color {
            r: f64::from(c.r),
            g: f64::from(c.g),
            b: f64::from(c.b),
            a: f64::from(c.a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_is_opaque() {
        let c = Color::rgb(0.86, 0.74, 0.28);
        assert_eq!(c.a, 1.0);
        assert_eq!(c.to_array(), [0.86, 0.74, 0.28, 1.0]);
    }

    #[test]
    fn from_straight_premultiplies_and_clamps() {
        let c = Color::from_straight(1.0, 2.0, -1.0, 0.5);
        assert_eq!(c, Color { r: 0.5, g: 0.5, b: 0.0, a: 0.5 });
    }

    #[test]
    fn clear_color_keeps_components() {
        let w: wgpu::Color = Color::rgb(0.25, 0.5, 1.0).into();
        assert_eq!((w.r, w.g, w.b, w.a), (0.25, 0.5, 1.0, 1.0));
    }
}
