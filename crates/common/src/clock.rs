//! Wall-clock pacing for display-driven playback.
//!
//! Playback advances one tick per display refresh. A host loop wakes up
//! about once per interval, asks its [`TickPacer`] how many ticks have
//! fallen due at the current [`PlaybackClock`] reading, and advances that
//! many. A late wakeup catches up instead of stretching the animation.

use std::time::{Duration, Instant};

/// Monotonic clock anchored at the moment playback started.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    epoch: Instant,
}

impl PlaybackClock {
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.epoch.elapsed()
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}

/// Hands out playback ticks at a fixed rate.
///
/// Tick `n` (1-based) falls due at `n * interval` after the clock started.
#[derive(Debug, Clone)]
pub struct TickPacer {
    interval: Duration,
    issued: u64,
}

impl TickPacer {
    /// Pace ticks at `target_hz`. A rate of zero is treated as 1 Hz.
    pub fn new(target_hz: u32) -> Self {
        Self {
            interval: Duration::from_secs(1) / target_hz.max(1),
            issued: 0,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ticks handed out so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Number of ticks due by `elapsed` that were not handed out yet.
    /// They count as handed out once returned.
    pub fn take_due(&mut self, elapsed: Duration) -> u64 {
        let due = (elapsed.as_nanos() / self.interval.as_nanos().max(1)) as u64;
        let pending = due.saturating_sub(self.issued);
        self.issued += pending;
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_elapsed() {
        let clock = PlaybackClock::start();
        assert!(clock.elapsed() < Duration::from_secs(1));
        assert!(clock.elapsed_secs() >= 0.0);
    }

    #[test]
    fn test_pacer_hands_out_each_tick_once() {
        let mut pacer = TickPacer::new(60);
        assert_eq!(pacer.take_due(Duration::ZERO), 0);
        assert_eq!(pacer.take_due(Duration::from_millis(10)), 0);
        assert_eq!(pacer.take_due(Duration::from_millis(17)), 1);
        assert_eq!(pacer.take_due(Duration::from_millis(17)), 0);
        assert_eq!(pacer.issued(), 1);
    }

    #[test]
    fn test_pacer_catches_up_after_late_wakeup() {
        let mut pacer = TickPacer::new(60);
        assert_eq!(pacer.take_due(Duration::from_millis(17)), 1);
        // 100 ms at 60 Hz is six ticks in total
        assert_eq!(pacer.take_due(Duration::from_millis(100)), 5);
        assert_eq!(pacer.issued(), 6);
    }

    #[test]
    fn test_zero_rate_is_clamped() {
        let pacer = TickPacer::new(0);
        assert_eq!(pacer.interval(), Duration::from_secs(1));
    }
}
