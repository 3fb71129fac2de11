//! Serpentine wiring correction
//!
//! Light strips are built from fixed-length segments. When segments are
//! daisy-chained in a folded layout every odd segment runs backwards on the
//! wire, so the logical (left-to-right) position of a light differs from its
//! address on the strip. Everything above this module reasons in logical
//! positions only.

/// Translate a logical light index into its physical address on the wire
///
/// Even segments map straight through. Odd segments are mirrored within the
/// segment, so with `segment_length = 5` the lights `5..=9` land on
/// `9, 8, 7, 6, 5`.
///
/// A zero `segment_length` has no wiring to correct and returns the index
/// unchanged. In a partial odd segment at the very end of the index range the
/// mirrored address saturates at `usize::MAX`.
#[inline]
pub const fn physical_index(logical_index: usize, segment_length: usize) -> usize {
    if segment_length == 0 {
        return logical_index;
    }
    let segment = logical_index / segment_length;
    if segment.is_multiple_of(2) {
        return logical_index;
    }
    // Same as `segment_length * (2 * segment + 1) - logical_index - 1`
    // without the intermediate product.
    let offset = logical_index % segment_length;
    let segment_start = logical_index - offset;
    segment_start.saturating_add(segment_length - 1 - offset)
}

/// Logical index of `position` within `lane` on the concatenated strip
#[inline]
pub const fn logical_index(lane: usize, position: usize, position_count: usize) -> usize {
    lane * position_count + position
}

/// Serpentine strip wiring made of equally sized segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerpentineLayout {
    segment_length: usize,
}

impl SerpentineLayout {
    pub const fn new(segment_length: usize) -> Self {
        Self { segment_length }
    }

    /// Length of one soldered segment
    pub const fn segment_length(self) -> usize {
        self.segment_length
    }

    /// Physical address of a logical index
    pub const fn physical(self, logical_index: usize) -> usize {
        physical_index(logical_index, self.segment_length)
    }

    /// Physical address of `position` within `lane`
    pub const fn lane_position(self, lane: usize, position: usize, position_count: usize) -> usize {
        self.physical(logical_index(lane, position, position_count))
    }

    /// Check whether a segment is wired in reverse
    pub const fn is_reversed(self, segment: usize) -> bool {
        !segment.is_multiple_of(2)
    }
}
