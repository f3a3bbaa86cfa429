use std::time::{Duration, Instant};

/// Fixed-period redraw scheduler.
///
/// The runtime parks the event loop until [`deadline`](Self::deadline), requests
/// a redraw once [`is_due`](Self::is_due) reports true, then calls
/// [`advance`](Self::advance). Deadlines stay on the original grid while the
/// loop keeps up; after a stall the grid is re-anchored instead of firing a
/// burst of catch-up frames.
#[derive(Debug, Clone)]
pub struct FrameTicker {
    interval: Duration,
    next: Instant,
}

impl FrameTicker {
    /// Slowest and fastest accepted rates, in Hz.
    pub const MIN_RATE: f32 = 1.0;
    pub const MAX_RATE: f32 = 240.0;

    /// Ticker whose first deadline is `start`.
    pub fn new(interval: Duration, start: Instant) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            next: start,
        }
    }

    /// Converts a refresh rate in Hz into a tick interval.
    ///
    /// Non-finite rates fall back to [`MIN_RATE`](Self::MIN_RATE); everything else
    /// is clamped into `[MIN_RATE, MAX_RATE]`.
    pub fn interval_for_rate(hz: f32) -> Duration {
        let hz = if hz.is_finite() { hz.clamp(Self::MIN_RATE, Self::MAX_RATE) } else { Self::MIN_RATE };
        Duration::from_secs_f32(1.0 / hz)
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Instant of the next scheduled tick.
    #[inline]
    pub fn deadline(&self) -> Instant {
        self.next
    }

    #[inline]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// Moves the deadline past `now`.
    pub fn advance(&mut self, now: Instant) {
        self.next += self.interval;
        if self.next <= now {
            self.next = now + self.interval;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    // ── interval_for_rate ─────────────────────────────────────────────────

    #[test]
    fn thirty_hz_is_about_33ms() {
        let i = FrameTicker::interval_for_rate(30.0);
        assert!(i > ms(33) && i < ms(34));
    }

    #[test]
    fn rate_is_clamped() {
        assert_eq!(FrameTicker::interval_for_rate(0.0), Duration::from_secs(1));
        assert_eq!(FrameTicker::interval_for_rate(f32::NAN), Duration::from_secs(1));
        assert!(FrameTicker::interval_for_rate(10_000.0) >= Duration::from_secs_f32(1.0 / 240.0));
    }

    // ── scheduling ────────────────────────────────────────────────────────

    #[test]
    fn first_tick_is_due_immediately() {
        let t0 = Instant::now();
        let ticker = FrameTicker::new(ms(33), t0);
        assert!(ticker.is_due(t0));
    }

    #[test]
    fn advance_keeps_grid_when_on_time() {
        let t0 = Instant::now();
        let mut ticker = FrameTicker::new(ms(33), t0);
        ticker.advance(t0 + ms(2));
        assert_eq!(ticker.deadline(), t0 + ms(33));
        assert!(!ticker.is_due(t0 + ms(20)));
        assert!(ticker.is_due(t0 + ms(33)));
    }

    #[test]
    fn advance_reanchors_after_stall() {
        let t0 = Instant::now();
        let mut ticker = FrameTicker::new(ms(33), t0);
        ticker.advance(t0 + ms(500));
        assert_eq!(ticker.deadline(), t0 + ms(533));
    }

    #[test]
    fn zero_interval_is_raised() {
        let ticker = FrameTicker::new(Duration::ZERO, Instant::now());
        assert_eq!(ticker.interval(), ms(1));
    }
}
