//! Angle and position math for the face.
//!
//! Angles are in degrees, measured counter-clockwise from 3 o'clock with +Y
//! up, so 12 o'clock is 90°. Screen space is +Y down; [`on_ray`] does the flip.

use horologe_engine::coords::Vec2;

/// Degrees a seconds or minutes hand turns per unit.
pub const DEGREES_PER_MINUTE: f64 = 6.0;
/// Degrees the hour hand turns per hour.
pub const DEGREES_PER_HOUR: f64 = 30.0;

/// Angle of a hand showing `value`, where one unit is `degrees_per_unit`.
///
/// Zero points at 12 o'clock and values grow clockwise.
#[inline]
pub fn hand_angle(value: f64, degrees_per_unit: f64) -> f64 {
    90.0 - value * degrees_per_unit
}

/// Point `distance` away from `center` along `angle_deg`.
#[inline]
pub fn on_ray(center: Vec2, distance: f32, angle_deg: f64) -> Vec2 {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let d = f64::from(distance);
    Vec2::new(
        (f64::from(center.x) + d * cos) as f32,
        (f64::from(center.y) - d * sin) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    // ── hand_angle ────────────────────────────────────────────────────────

    #[test]
    fn zero_points_up() {
        assert_eq!(hand_angle(0.0, DEGREES_PER_MINUTE), 90.0);
        assert_eq!(hand_angle(0.0, DEGREES_PER_HOUR), 90.0);
    }

    #[test]
    fn values_turn_clockwise() {
        assert_eq!(hand_angle(15.0, DEGREES_PER_MINUTE), 0.0);
        assert_eq!(hand_angle(3.0, DEGREES_PER_HOUR), 0.0);
        assert_eq!(hand_angle(9.0, DEGREES_PER_HOUR), -180.0);
    }

    // ── on_ray ────────────────────────────────────────────────────────────

    #[test]
    fn ninety_degrees_is_up_on_screen() {
        let p = on_ray(Vec2::new(100.0, 100.0), 10.0, 90.0);
        assert!(approx(p, Vec2::new(100.0, 90.0)), "{p:?}");
    }

    #[test]
    fn zero_degrees_is_right_and_minus_ninety_is_down() {
        let c = Vec2::new(50.0, 50.0);
        assert!(approx(on_ray(c, 20.0, 0.0), Vec2::new(70.0, 50.0)));
        assert!(approx(on_ray(c, 20.0, -90.0), Vec2::new(50.0, 70.0)));
    }

    #[test]
    fn zero_distance_is_center() {
        let c = Vec2::new(3.0, 4.0);
        assert_eq!(on_ray(c, 0.0, 37.0), c);
    }
}
