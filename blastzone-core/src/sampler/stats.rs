//! Sample loop counters
//!
//! Tracks link and sensor health so the firmware can log without flooding
//! the probe when the sensor drops off the bus.

/// Log every Nth error of a streak (plus the first one)
pub const BUS_ERROR_LOG_INTERVAL: u32 = 100;

/// Running counters for the sample loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SampleStats {
    /// Frames fully handed to the serial transmitter
    pub frames_sent: u32,
    /// Frames dropped because the serial write failed or timed out
    pub frames_dropped: u32,
    /// Frames that carried stale or zeroed motion data
    pub stale_frames: u32,
    /// Total sensor read failures
    pub bus_errors: u32,
    /// Sensor read failures since the last good read
    pub consecutive_bus_errors: u32,
}

impl SampleStats {
    /// Create zeroed counters
    pub const fn new() -> Self {
        Self {
            frames_sent: 0,
            frames_dropped: 0,
            stale_frames: 0,
            bus_errors: 0,
            consecutive_bus_errors: 0,
        }
    }

    /// Record a good sensor read
    ///
    /// Returns the length of the error streak this read ended, if any.
    pub fn record_fresh(&mut self) -> Option<u32> {
        let streak = self.consecutive_bus_errors;
        self.consecutive_bus_errors = 0;
        (streak > 0).then_some(streak)
    }

    /// Record a failed sensor read
    pub fn record_bus_error(&mut self) {
        self.bus_errors = self.bus_errors.saturating_add(1);
        self.consecutive_bus_errors = self.consecutive_bus_errors.saturating_add(1);
        self.stale_frames = self.stale_frames.saturating_add(1);
    }

    /// Record the outcome of a frame write
    pub fn record_write(&mut self, sent: bool) {
        if sent {
            self.frames_sent = self.frames_sent.saturating_add(1);
        } else {
            self.frames_dropped = self.frames_dropped.saturating_add(1);
        }
    }

    /// Check if the current error should be logged
    ///
    /// True for the first error of a streak and every
    /// [`BUS_ERROR_LOG_INTERVAL`]th after it.
    pub fn should_log_bus_error(&self) -> bool {
        self.consecutive_bus_errors % BUS_ERROR_LOG_INTERVAL == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_reported_on_recovery() {
        let mut stats = SampleStats::new();
        assert_eq!(stats.record_fresh(), None);

        stats.record_bus_error();
        stats.record_bus_error();
        stats.record_bus_error();
        assert_eq!(stats.bus_errors, 3);
        assert_eq!(stats.stale_frames, 3);

        assert_eq!(stats.record_fresh(), Some(3));
        assert_eq!(stats.consecutive_bus_errors, 0);
        assert_eq!(stats.bus_errors, 3);
    }

    #[test]
    fn test_error_logging_is_rate_limited() {
        let mut stats = SampleStats::new();
        let mut logged = 0;
        for _ in 0..250 {
            stats.record_bus_error();
            if stats.should_log_bus_error() {
                logged += 1;
            }
        }
        // Errors #1, #101 and #201
        assert_eq!(logged, 3);
    }

    #[test]
    fn test_write_counters() {
        let mut stats = SampleStats::new();
        stats.record_write(true);
        stats.record_write(false);
        stats.record_write(true);
        assert_eq!(stats.frames_sent, 2);
        assert_eq!(stats.frames_dropped, 1);
    }
}
