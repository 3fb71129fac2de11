mod scale;

use smart_leds::RGB8;
pub use scale::{scale_channel, scale_rgb};

pub type Rgb = RGB8;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// All channels at full intensity
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

