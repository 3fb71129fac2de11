//! Countdown tick driver
//!
//! Owns the lanes and the frame buffer. Every tick it applies queued intents,
//! advances all countdowns by one tick period, renders every lane through the
//! serpentine layout and hands the finished frame to the output in a single
//! write. The caller is responsible for sleeping between ticks.

use embassy_time::{Duration, Instant};

use crate::OutputDriver;
use crate::color::{BLACK, Rgb, WHITE};
use crate::intent::{IntentEffects, IntentProcessor, IntentReceiver, Palette};
use crate::lane::{LaneError, LaneSet};
use crate::mapping::SerpentineLayout;
use crate::reload::ReloadPolicy;

/// Default countdown step (50 ticks per second).
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(20);

/// Default color of lit positions.
pub const DEFAULT_ACTIVE_COLOR: Rgb = WHITE;

/// Driver configuration
#[derive(Debug, Clone, Copy)]
pub struct CountdownConfig {
    /// Countdown step and scheduling period
    pub tick_period: Duration,
    /// Initial colors
    pub palette: Palette,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            tick_period: DEFAULT_TICK_PERIOD,
            palette: Palette {
                active: DEFAULT_ACTIVE_COLOR,
                finished: None,
            },
        }
    }
}

/// Result of a tick.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (zero if behind schedule).
    pub sleep_duration: Duration,
    /// Whether any lane is still counting down.
    pub running: bool,
    /// Changes made by intents drained during this tick.
    pub effects: IntentEffects,
}

/// Tick-driven countdown display
///
/// * `LANES` - number of lanes
/// * `POSITIONS` - lights per lane, also the wiring segment length
/// * `LEDS` - lights on the physical strip, normally `LANES * POSITIONS`
/// * `INTENTS` - capacity of the intent channel
pub struct CountdownDriver<
    'a,
    O: OutputDriver,
    const LANES: usize,
    const POSITIONS: usize,
    const LEDS: usize,
    const INTENTS: usize,
> {
    output: O,
    intents: IntentProcessor<'a, INTENTS>,
    layout: SerpentineLayout,

    lanes: LaneSet<LANES, POSITIONS>,
    palette: Palette,
    frame: [Rgb; LEDS],

    tick_period: Duration,
    next_tick: Instant,
}

impl<
    'a,
    O: OutputDriver,
    const LANES: usize,
    const POSITIONS: usize,
    const LEDS: usize,
    const INTENTS: usize,
> CountdownDriver<'a, O, LANES, POSITIONS, LEDS, INTENTS>
{
    /// Create a driver
    ///
    /// The tick period is rounded down to whole milliseconds, at least one, so
    /// the schedule advances by exactly the time each tick takes off the lanes.
    pub fn new(intents: IntentReceiver<'a, INTENTS>, output: O, config: &CountdownConfig) -> Self {
        let policy = ReloadPolicy::for_positions(config.tick_period, POSITIONS);
        let tick_period = Duration::from_millis(u64::from(policy.tick_millis()));
        Self {
            output,
            intents: IntentProcessor::new(intents, policy),
            layout: SerpentineLayout::new(POSITIONS),
            lanes: LaneSet::new(),
            palette: config.palette,
            frame: [BLACK; LEDS],
            tick_period,
            next_tick: Instant::from_millis(0),
        }
    }

    /// Run one tick and return timing information.
    ///
    /// The caller should wait until `next_deadline` before ticking again.
    pub fn tick(&mut self, now: Instant) -> TickResult {
        // Skip the backlog after a long stall instead of bursting
        let max_drift = self.tick_period.as_millis() * 2;
        if now.as_millis() > self.next_tick.as_millis() + max_drift {
            self.next_tick = now;
        }

        let effects = self
            .intents
            .process_pending(&mut self.lanes, &mut self.palette);
        let running = self.lanes.tick(self.intents.policy().tick_millis());

        self.render_frame();
        self.output.write(&self.frame);

        self.next_tick += self.tick_period;
        let sleep_duration = if self.next_tick.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_tick.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        TickResult {
            next_deadline: self.next_tick,
            sleep_duration,
            running,
            effects,
        }
    }

    /// Render the current lane state into the frame buffer without ticking
    pub fn render_frame(&mut self) -> &[Rgb] {
        if self.lanes.is_running() {
            self.frame.fill(BLACK);
            self.lanes
                .render_into(self.layout, self.palette.active, &mut self.frame);
        } else {
            let fill = match self.palette.finished {
                Some(color) if self.lanes.is_finished() => color,
                _ => BLACK,
            };
            self.frame.fill(fill);
        }
        &self.frame
    }

    /// Restart a lane directly, bypassing the intent channel
    ///
    /// The duration goes through the same validation as a queued reload.
    pub fn reload(&mut self, lane: usize, duration: Duration) -> Result<(), LaneError> {
        let full_scale = self.intents.policy().quantize(duration);
        self.lanes.reload(lane, full_scale)
    }

    pub const fn lanes(&self) -> &LaneSet<LANES, POSITIONS> {
        &self.lanes
    }

    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Effective tick period, in whole milliseconds
    pub const fn tick_period(&self) -> Duration {
        self.tick_period
    }

    pub const fn layout(&self) -> SerpentineLayout {
        self.layout
    }

    /// Last rendered frame in physical order
    pub const fn frame(&self) -> &[Rgb; LEDS] {
        &self.frame
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }
}
