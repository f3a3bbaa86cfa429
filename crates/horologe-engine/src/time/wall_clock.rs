use chrono::{Local, NaiveTime};

/// Source of local wall-clock time with sub-second precision.
///
/// The face never calls the system clock directly; it reads through this
/// trait so tests can freeze time.
pub trait WallClock {
    fn now(&self) -> NaiveTime;
}

/// Wall clock backed by the operating system's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl WallClock for SystemClock {
    fn now(&self) -> NaiveTime {
        Local::now().time()
    }
}

/// Wall clock frozen at a single instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveTime);

impl FixedClock {
    #[must_use]
    pub const fn new(time: NaiveTime) -> Self {
        Self(time)
    }

    /// Frozen clock at `h:m:s.micro`, or `None` if any field is out of range.
    #[must_use]
    pub fn at(hour: u32, min: u32, sec: u32, micro: u32) -> Option<Self> {
        NaiveTime::from_hms_micro_opt(hour, min, sec, micro).map(Self)
    }
}

impl WallClock for FixedClock {
    fn now(&self) -> NaiveTime {
        self.0
    }
}

impl<C: WallClock + ?Sized> WallClock for &C {
    fn now(&self) -> NaiveTime {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn fixed_clock_is_frozen() {
        let clock = FixedClock::at(13, 5, 9, 250_000).unwrap();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().hour(), 13);
        assert_eq!(clock.now().nanosecond(), 250_000_000);
    }

    #[test]
    fn fixed_clock_rejects_bad_fields() {
        assert!(FixedClock::at(24, 0, 0, 0).is_none());
        assert!(FixedClock::at(0, 60, 0, 0).is_none());
    }

    #[test]
    fn system_clock_returns_valid_time() {
        let t = SystemClock::new().now();
        assert!(t.hour() < 24);
    }
}
