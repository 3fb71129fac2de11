//! Reload duration validation
//!
//! Turns a requested countdown length into a lane full scale the renderer can
//! use: a whole number of tick periods and never fewer ticks than the lane has
//! positions.

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// Quantizes and clamps requested reload durations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadPolicy {
    /// Countdown step applied on every tick
    tick_period: Duration,
    /// Shortest accepted countdown, in ticks
    min_ticks: u32,
}

impl ReloadPolicy {
    /// Create a policy
    ///
    /// `min_ticks` below one is raised to one.
    pub const fn new(tick_period: Duration, min_ticks: u32) -> Self {
        Self {
            tick_period,
            min_ticks: if min_ticks == 0 { 1 } else { min_ticks },
        }
    }

    /// Policy whose minimum is one tick per lane position
    #[allow(clippy::cast_possible_truncation)]
    pub const fn for_positions(tick_period: Duration, position_count: usize) -> Self {
        let min_ticks = if position_count > u32::MAX as usize {
            u32::MAX
        } else {
            position_count as u32
        };
        Self::new(tick_period, min_ticks)
    }

    pub const fn tick_period(&self) -> Duration {
        self.tick_period
    }

    /// Tick period in whole milliseconds, at least one
    pub fn tick_millis(&self) -> u32 {
        u32::try_from(self.tick_period.as_millis())
            .unwrap_or(u32::MAX)
            .max(1)
    }

    /// Shortest full scale this policy produces, in milliseconds
    pub fn minimum(&self) -> u32 {
        self.tick_millis().saturating_mul(self.min_ticks)
    }

    /// Convert a requested duration into a lane full scale in milliseconds
    ///
    /// The request is rounded down to whole ticks. Requests shorter than the
    /// minimum are replaced by the minimum.
    pub fn quantize(&self, requested: Duration) -> u32 {
        let tick = u64::from(self.tick_millis());
        let max_ticks = u64::from(u32::MAX) / tick;
        let mut ticks = requested.as_millis() / tick;
        if ticks < u64::from(self.min_ticks) {
            #[cfg(feature = "esp32-log")]
            println!(
                "[ReloadPolicy.quantize] invalid reload of {:?} ms, using {:?} ticks",
                requested.as_millis(),
                self.min_ticks
            );
            ticks = u64::from(self.min_ticks);
        }
        u32::try_from(ticks.min(max_ticks) * tick).unwrap_or(u32::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_min_ticks_is_raised() {
        let policy = ReloadPolicy::new(Duration::from_millis(20), 0);
        assert_eq!(policy.minimum(), 20);
    }

    #[test]
    fn test_sub_millisecond_period() {
        let policy = ReloadPolicy::new(Duration::from_micros(500), 1);
        assert_eq!(policy.tick_millis(), 1);
        assert_eq!(policy.quantize(Duration::from_millis(7)), 7);
    }
}
