// ── Refresh countdown ──

/// Seconds left until the next automatic refresh.
///
/// Purely visual: it is decremented by its own 1-second timer and is not
/// what triggers refreshes. At zero it wraps back to `total`, so after any
/// `tick` the invariant `1 <= remaining <= total` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    total: u32,
}

impl Countdown {
    /// Start a full countdown. A zero total is treated as one second.
    pub fn new(total: u32) -> Self {
        let total = total.max(1);
        Self {
            remaining: total,
            total,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Advance by one second. Returns `true` when the count wrapped.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.remaining = self.total;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.remaining = self.total;
    }

    /// Elapsed share of the interval, `0.0..=1.0`.
    pub fn ratio(&self) -> f64 {
        f64::from(self.total - self.remaining) / f64::from(self.total)
    }

    /// Elapsed share of the interval in percent.
    pub fn progress_percent(&self) -> f64 {
        self.ratio() * 100.0
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_REFRESH_INTERVAL_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::Countdown;

    #[test]
    fn wraps_to_total_at_zero() {
        let mut countdown = Countdown::new(3);
        assert!(!countdown.tick());
        assert!(!countdown.tick());
        assert_eq!(countdown.remaining(), 1);
        assert!(countdown.tick());
        assert_eq!(countdown.remaining(), 3);
    }

    #[test]
    fn one_second_interval_stays_at_one() {
        let mut countdown = Countdown::new(1);
        for _ in 0..5 {
            countdown.tick();
            assert_eq!(countdown.remaining(), 1);
        }
    }

    #[test]
    fn progress_grows_as_time_passes() {
        let mut countdown = Countdown::new(4);
        assert!(countdown.progress_percent().abs() < f64::EPSILON);
        countdown.tick();
        assert!((countdown.progress_percent() - 25.0).abs() < f64::EPSILON);
        countdown.reset();
        assert_eq!(countdown.remaining(), 4);
    }

    #[test]
    fn zero_total_is_clamped() {
        assert_eq!(Countdown::new(0).total(), 1);
    }
}
