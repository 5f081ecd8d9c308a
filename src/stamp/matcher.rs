//! Approximate colour matching.

use crate::types::Colour;

/// Tolerance used when none is configured.
pub const DEFAULT_TOLERANCE: u32 = 10;

/// Check whether `a` lies within `tolerance` of `b` on every channel.
///
/// Channels are widened to `i64` before the bounds are computed, so
/// `b - tolerance` may go below zero (and `b + tolerance` above 255) without
/// wrapping.
pub fn within_tolerance(a: Colour, b: Colour, tolerance: u32) -> bool {
    let tolerance = i64::from(tolerance);

    a.to_rgba().into_iter().zip(b.to_rgba()).all(|(a, b)| {
        let (a, b) = (i64::from(a), i64::from(b));
        !(a < b - tolerance || a > b + tolerance)
    })
}
