#![cfg_attr(not(test), no_std)]

pub mod channel;
pub mod color;
pub mod driver;
pub mod intent;
pub mod lane;
pub mod mapping;
pub mod output;
pub mod reload;
pub mod render;

pub use driver::{
    CountdownConfig, CountdownDriver, DEFAULT_ACTIVE_COLOR, DEFAULT_TICK_PERIOD, TickResult,
};
pub use intent::{
    IntentChannel, IntentEffects, IntentProcessor, IntentReceiver, IntentSender, LaneIntent,
    Palette,
};
pub use lane::{Lane, LaneError, LaneSet};
pub use mapping::{SerpentineLayout, physical_index};
pub use output::SmartLedsOutput;
pub use reload::ReloadPolicy;
pub use render::{render, render_lane};

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// Each call carries one complete frame in physical order.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
