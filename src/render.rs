//! Countdown bar rendering
//!
//! A lane of `position_count` lights is split into equal time buckets, one per
//! position. Position 0 is the last bucket to run out, so the lit bar shrinks
//! from the far end towards position 0 as the countdown approaches zero. The
//! bucket currently draining is shown with fractional brightness.
//!
//! All arithmetic is truncating integer math. When `full_scale` is not a
//! multiple of `position_count` the rounding error lands on the partial
//! position instead of being spread over the lane.

use crate::color::{BLACK, Rgb, scale_rgb};

/// State of a single position for a given countdown value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionState {
    /// Bucket still has its whole time slice
    Full,
    /// Bucket is draining, carries the elapsed share of its slice
    Partial {
        /// Time left inside the bucket
        local_remaining: u64,
        /// Duration one bucket represents
        span: u64,
    },
    /// Bucket is empty
    Off,
}

/// Classify `position` for a lane at `remaining` out of `full_scale`
///
/// `full_scale == 0` and positions outside the lane are `Off`. A `remaining`
/// above `full_scale` is clamped to `full_scale`.
#[allow(clippy::cast_possible_truncation)]
pub fn position_state(
    position: usize,
    remaining: u32,
    full_scale: u32,
    position_count: usize,
) -> PositionState {
    if remaining == 0 || full_scale == 0 || position >= position_count {
        return PositionState::Off;
    }

    let count = position_count as u64;
    let full_scale = u64::from(full_scale);
    let remaining = u64::from(remaining).min(full_scale);

    // Number of fully lit positions; never above `count` since remaining <= full_scale
    let lit = (remaining * count / full_scale) as usize;
    if position < lit {
        return PositionState::Full;
    }
    if position > lit {
        return PositionState::Off;
    }

    let span = full_scale / count;
    if span == 0 {
        // Lane shorter than one unit per light, nothing left to interpolate
        return PositionState::Off;
    }
    let bucket_floor = full_scale * lit as u64 / count;
    PositionState::Partial {
        local_remaining: remaining - bucket_floor,
        span,
    }
}

/// Compute the color of one logical position of a lane
///
/// # Arguments
/// * `position` - Logical position within the lane
/// * `remaining` - Countdown value left
/// * `full_scale` - Countdown value the lane was reloaded to
/// * `full_color` - Color of a fully lit position
/// * `position_count` - Number of positions in the lane
pub fn render(
    position: usize,
    remaining: u32,
    full_scale: u32,
    full_color: Rgb,
    position_count: usize,
) -> Rgb {
    match position_state(position, remaining, full_scale, position_count) {
        PositionState::Full => full_color,
        PositionState::Partial {
            local_remaining,
            span,
        } => scale_rgb(full_color, local_remaining, span),
        PositionState::Off => BLACK,
    }
}

/// Render a whole lane, one slice element per logical position
pub fn render_lane(remaining: u32, full_scale: u32, full_color: Rgb, leds: &mut [Rgb]) {
    let position_count = leds.len();
    for (position, led) in leds.iter_mut().enumerate() {
        *led = render(position, remaining, full_scale, full_color, position_count);
    }
}
