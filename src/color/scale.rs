use crate::color::Rgb;

/// Scale one channel by `numerator / denominator` with truncating integer math
///
/// The result is clamped to the channel maximum, so a ratio above one
/// saturates instead of wrapping. A zero denominator yields zero.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
pub const fn scale_channel(channel: u8, numerator: u64, denominator: u64) -> u8 {
    if denominator == 0 {
        return 0;
    }
    let scaled = channel as u64 * numerator / denominator;
    if scaled > u8::MAX as u64 {
        u8::MAX
    } else {
        scaled as u8
    }
}

/// Scale every channel of `color` by `numerator / denominator`
#[inline]
pub const fn scale_rgb(color: Rgb, numerator: u64, denominator: u64) -> Rgb {
    Rgb {
        r: scale_channel(color.r, numerator, denominator),
        g: scale_channel(color.g, numerator, denominator),
        b: scale_channel(color.b, numerator, denominator),
    }
}
