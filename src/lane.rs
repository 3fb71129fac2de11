//! Per-lane countdown state
//!
//! Lanes are plain value records owned by the tick driver. A lane is idle until
//! its first reload, counts down on every tick and stays at zero once it has
//! run out until the next reload.

use crate::color::Rgb;
use crate::mapping::SerpentineLayout;
use crate::render::render;

/// Errors returned by lane operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneError {
    /// No lane with the given index
    OutOfRange(usize),
    /// A lane can not be reloaded to zero
    ZeroDuration,
}

impl core::fmt::Display for LaneError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfRange(index) => write!(f, "lane {index} does not exist"),
            Self::ZeroDuration => f.write_str("lane reload duration is zero"),
        }
    }
}

/// One independently timed countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lane {
    /// Milliseconds left
    remaining: u32,
    /// Milliseconds at the last reload, zero while idle
    full_scale: u32,
}

impl Lane {
    /// Lane that was never reloaded
    pub const IDLE: Self = Self {
        remaining: 0,
        full_scale: 0,
    };

    pub const fn new() -> Self {
        Self::IDLE
    }

    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    pub const fn full_scale(&self) -> u32 {
        self.full_scale
    }

    /// Check if the lane is counting down
    pub const fn is_running(&self) -> bool {
        self.remaining > 0
    }

    /// Check if the lane was reloaded at least once since the last reset
    pub const fn is_loaded(&self) -> bool {
        self.full_scale > 0
    }

    /// Restart the countdown from `full_scale` milliseconds
    pub fn reload(&mut self, full_scale: u32) -> Result<(), LaneError> {
        if full_scale == 0 {
            return Err(LaneError::ZeroDuration);
        }
        self.full_scale = full_scale;
        self.remaining = full_scale;
        Ok(())
    }

    /// Advance the countdown by `elapsed` milliseconds, floored at zero
    pub fn tick(&mut self, elapsed: u32) {
        self.remaining = self.remaining.saturating_sub(elapsed);
    }

    /// Return to the idle state
    pub fn reset(&mut self) {
        *self = Self::IDLE;
    }

    /// Color of one logical position of this lane
    pub fn color_at(&self, position: usize, color: Rgb, position_count: usize) -> Rgb {
        render(position, self.remaining, self.full_scale, color, position_count)
    }
}

/// Fixed set of lanes sharing the same number of positions
#[derive(Debug, Clone)]
pub struct LaneSet<const LANES: usize, const POSITIONS: usize> {
    lanes: [Lane; LANES],
}

impl<const LANES: usize, const POSITIONS: usize> Default for LaneSet<LANES, POSITIONS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const LANES: usize, const POSITIONS: usize> LaneSet<LANES, POSITIONS> {
    /// Total number of logical positions across all lanes
    pub const LIGHT_COUNT: usize = LANES * POSITIONS;

    pub const fn new() -> Self {
        Self {
            lanes: [Lane::IDLE; LANES],
        }
    }

    pub const fn lanes(&self) -> &[Lane; LANES] {
        &self.lanes
    }

    /// Get a lane by index
    pub fn lane(&self, index: usize) -> Option<&Lane> {
        self.lanes.get(index)
    }

    /// Reload lane `index` to `full_scale` milliseconds
    pub fn reload(&mut self, index: usize, full_scale: u32) -> Result<(), LaneError> {
        self.lanes
            .get_mut(index)
            .ok_or(LaneError::OutOfRange(index))?
            .reload(full_scale)
    }

    /// Advance every lane by `elapsed` milliseconds
    ///
    /// Returns `true` if any lane is still running afterwards.
    pub fn tick(&mut self, elapsed: u32) -> bool {
        let mut running = false;
        for lane in &mut self.lanes {
            lane.tick(elapsed);
            running |= lane.is_running();
        }
        running
    }

    /// Reset every lane to idle
    pub fn reset(&mut self) {
        for lane in &mut self.lanes {
            lane.reset();
        }
    }

    /// Check if any lane is counting down
    pub fn is_running(&self) -> bool {
        self.lanes.iter().any(Lane::is_running)
    }

    /// Check if every lane is counting down at the same time
    pub fn all_running(&self) -> bool {
        !self.lanes.is_empty() && self.lanes.iter().all(Lane::is_running)
    }

    /// Check if every started lane has run out
    ///
    /// A set where no lane was ever reloaded is not finished.
    pub fn is_finished(&self) -> bool {
        !self.is_running() && self.lanes.iter().any(Lane::is_loaded)
    }

    /// Render all lanes into `frame`, addressing lights through `layout`
    ///
    /// Physical addresses past the end of `frame` are skipped.
    pub fn render_into(&self, layout: SerpentineLayout, color: Rgb, frame: &mut [Rgb]) {
        for (lane_index, lane) in self.lanes.iter().enumerate() {
            for position in 0..POSITIONS {
                let address = layout.lane_position(lane_index, position, POSITIONS);
                if let Some(led) = frame.get_mut(address) {
                    *led = lane.color_at(position, color, POSITIONS);
                }
            }
        }
    }
}
