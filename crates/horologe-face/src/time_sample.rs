use chrono::{NaiveTime, Timelike};

use crate::geometry::{hand_angle, DEGREES_PER_HOUR, DEGREES_PER_MINUTE};

/// Fractional hand positions for one instant.
///
/// Each field carries the contribution of the finer fields, so hands sweep
/// instead of jumping: `hour ∈ [0, 12)`, `minute ∈ [0, 60)`, `second ∈ [0, 60)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSample {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

/// Hand angles in degrees; see [`hand_angle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl TimeSample {
    pub fn from_time(time: NaiveTime) -> Self {
        // chrono folds a leap second into nanoseconds ≥ 1e9; pin it to the
        // last microsecond so `second` stays below 60.
        let micros = (time.nanosecond() / 1_000).min(999_999);
        let second = f64::from(time.second()) + f64::from(micros) / 1_000_000.0;
        let minute = f64::from(time.minute()) + second / 60.0;
        let hour = f64::from(time.hour() % 12) + minute / 60.0;
        Self { hour, minute, second }
    }

    pub fn angles(&self) -> HandAngles {
        HandAngles {
            hour: hand_angle(self.hour, DEGREES_PER_HOUR),
            minute: hand_angle(self.minute, DEGREES_PER_MINUTE),
            second: hand_angle(self.second, DEGREES_PER_MINUTE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> TimeSample {
        TimeSample::from_time(NaiveTime::from_hms_opt(h, m, s).unwrap())
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ── from_time ─────────────────────────────────────────────────────────

    #[test]
    fn fractions_carry_upward() {
        let t = TimeSample::from_time(NaiveTime::from_hms_micro_opt(14, 30, 15, 500_000).unwrap());
        assert!(approx(t.second, 15.5));
        assert!(approx(t.minute, 30.0 + 15.5 / 60.0));
        assert!(approx(t.hour, 2.0 + t.minute / 60.0));
    }

    #[test]
    fn hour_wraps_at_twelve() {
        assert_eq!(at(12, 0, 0).hour, 0.0);
        assert_eq!(at(0, 0, 0).hour, 0.0);
        assert_eq!(at(23, 0, 0).hour, 11.0);
    }

    #[test]
    fn fields_stay_in_range_at_end_of_day() {
        let t = TimeSample::from_time(NaiveTime::from_hms_micro_opt(23, 59, 59, 999_999).unwrap());
        assert!(t.second < 60.0);
        assert!(t.minute < 60.0);
        assert!(t.hour < 12.0);
    }

    #[test]
    fn leap_second_is_clamped() {
        let t = TimeSample::from_time(NaiveTime::from_hms_micro_opt(23, 59, 59, 1_500_000).unwrap());
        assert!(t.second < 60.0);
    }

    // ── angles ────────────────────────────────────────────────────────────

    #[test]
    fn midnight_points_every_hand_up() {
        let a = at(0, 0, 0).angles();
        assert_eq!((a.hour, a.minute, a.second), (90.0, 90.0, 90.0));
    }

    #[test]
    fn three_oclock_hour_hand_is_horizontal() {
        assert!(approx(at(3, 0, 0).angles().hour, 0.0));
    }

    #[test]
    fn half_past_six() {
        let a = at(6, 30, 0).angles();
        assert!(approx(a.minute, -90.0));
        assert!(approx(a.hour, -105.0));
    }
}
