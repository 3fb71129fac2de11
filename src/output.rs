//! Output adapters
//!
//! The driver writes a whole frame at once through [`OutputDriver`]. Any
//! `smart-leds` strip driver can be plugged in with [`SmartLedsOutput`].

use smart_leds::SmartLedsWrite;

use crate::OutputDriver;
use crate::color::Rgb;

/// Wraps a [`SmartLedsWrite`] strip driver
///
/// The tick loop has no way to act on transmission errors, so failed writes
/// are counted and the next frame is sent as usual.
#[derive(Debug)]
pub struct SmartLedsOutput<W> {
    writer: W,
    failed_writes: u32,
}

impl<W> SmartLedsOutput<W> {
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            failed_writes: 0,
        }
    }

    /// Number of frames the strip driver refused
    pub const fn failed_writes(&self) -> u32 {
        self.failed_writes
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: SmartLedsWrite<Color = Rgb>> OutputDriver for SmartLedsOutput<W> {
    fn write(&mut self, colors: &[Rgb]) {
        if self.writer.write(colors.iter().copied()).is_err() {
            self.failed_writes = self.failed_writes.saturating_add(1);
        }
    }
}
