//! Requests from the rest of the prop
//!
//! Input handling and the parameter store never touch lane state directly.
//! They queue intents, and the tick driver applies them at the start of the
//! next tick.

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::channel::{Channel, Receiver, Sender, TrySendError};
use crate::color::Rgb;
use crate::lane::LaneSet;
use crate::reload::ReloadPolicy;

/// Request to change countdown or display state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneIntent {
    /// Restart a lane for roughly `duration`
    Reload { lane: usize, duration: Duration },
    /// Change the color of lit positions
    SetActiveColor(Rgb),
    /// Change the color shown once every started lane has run out
    SetFinishedColor(Option<Rgb>),
    /// Stop every lane and return to idle
    Clear,
}

/// Colors read by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub active: Rgb,
    pub finished: Option<Rgb>,
}

/// What a batch of intents changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentEffects {
    /// Lanes restarted
    pub reloaded: usize,
    /// Intents dropped because they named an unknown lane
    pub rejected: usize,
    /// Active or finished color changed
    pub palette_changed: bool,
    /// Lanes were reset
    pub cleared: bool,
}

impl IntentEffects {
    /// Check if anything changed
    pub const fn has_effects(&self) -> bool {
        self.reloaded > 0 || self.palette_changed || self.cleared
    }
}

pub type IntentSender<'a, const SIZE: usize> = Sender<'a, LaneIntent, SIZE>;

pub type IntentReceiver<'a, const SIZE: usize> = Receiver<'a, LaneIntent, SIZE>;

pub type IntentChannel<const SIZE: usize> = Channel<LaneIntent, SIZE>;

impl<const SIZE: usize> Sender<'_, LaneIntent, SIZE> {
    /// Queue a lane restart
    pub fn reload(&self, lane: usize, duration: Duration) -> Result<(), TrySendError<LaneIntent>> {
        self.try_send(LaneIntent::Reload { lane, duration })
    }

    pub fn set_active_color(&self, color: Rgb) -> Result<(), TrySendError<LaneIntent>> {
        self.try_send(LaneIntent::SetActiveColor(color))
    }

    pub fn set_finished_color(&self, color: Option<Rgb>) -> Result<(), TrySendError<LaneIntent>> {
        self.try_send(LaneIntent::SetFinishedColor(color))
    }

    /// Queue a reset of every lane
    pub fn clear_lanes(&self) -> Result<(), TrySendError<LaneIntent>> {
        self.try_send(LaneIntent::Clear)
    }
}

/// Applies queued intents to lanes and palette
pub struct IntentProcessor<'a, const SIZE: usize> {
    intents: IntentReceiver<'a, SIZE>,
    policy: ReloadPolicy,
}

impl<'a, const SIZE: usize> IntentProcessor<'a, SIZE> {
    pub const fn new(intents: IntentReceiver<'a, SIZE>, policy: ReloadPolicy) -> Self {
        Self { intents, policy }
    }

    pub const fn policy(&self) -> &ReloadPolicy {
        &self.policy
    }

    /// Drain the queue without blocking and apply every intent in order
    pub fn process_pending<const LANES: usize, const POSITIONS: usize>(
        &mut self,
        lanes: &mut LaneSet<LANES, POSITIONS>,
        palette: &mut Palette,
    ) -> IntentEffects {
        let mut effects = IntentEffects::default();
        for intent in self.intents.drain() {
            Self::apply(&self.policy, intent, lanes, palette, &mut effects);
        }
        effects
    }

    fn apply<const LANES: usize, const POSITIONS: usize>(
        policy: &ReloadPolicy,
        intent: LaneIntent,
        lanes: &mut LaneSet<LANES, POSITIONS>,
        palette: &mut Palette,
        effects: &mut IntentEffects,
    ) {
        match intent {
            LaneIntent::Reload { lane, duration } => {
                let full_scale = policy.quantize(duration);
                match lanes.reload(lane, full_scale) {
                    Ok(()) => effects.reloaded += 1,
                    #[cfg_attr(not(feature = "esp32-log"), allow(unused_variables))]
                    Err(error) => {
                        #[cfg(feature = "esp32-log")]
                        println!("[IntentProcessor.apply] reload rejected: {}", error);
                        effects.rejected += 1;
                    }
                }
            }
            LaneIntent::SetActiveColor(color) => {
                palette.active = color;
                effects.palette_changed = true;
            }
            LaneIntent::SetFinishedColor(color) => {
                palette.finished = color;
                effects.palette_changed = true;
            }
            LaneIntent::Clear => {
                lanes.reset();
                effects.cleared = true;
            }
        }
    }
}
