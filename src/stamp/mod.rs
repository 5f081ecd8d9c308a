//! Grid stamping.
//!
//! Walks a [`PixelGrid`] in row-major order and turns every opaque pixel that
//! matches a palette preset into a [`Placement`]. The grid is centred on the
//! world origin, one pixel per `world_unit`-sized cell, with every placement
//! lifted one unit above the ground plane.
//!
//! ```text
//!   index:  0   1   2        cursor x:  -150  -50   50   (W = 3, unit = 100)
//!           3   4   5                   wraps to -150 after three steps
//! ```

mod matcher;

pub use matcher::{within_tolerance, DEFAULT_TOLERANCE};

use crate::error::{Result, StampError};
use crate::extract::PixelGrid;
use crate::types::{Colour, Placement, PresetPalette, Transform, Vec3, DEFAULT_SCALE};

/// World-space side length of one cell when none is configured.
pub const DEFAULT_WORLD_UNIT: u32 = 100;

/// Knobs for a stamping pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StampOptions {
    /// Per-channel colour tolerance.
    pub tolerance: u32,
    /// World-space size of one grid cell.
    pub world_unit: u32,
}

impl Default for StampOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            world_unit: DEFAULT_WORLD_UNIT,
        }
    }
}

impl StampOptions {
    pub fn validate(&self) -> Result<()> {
        if self.world_unit == 0 {
            return Err(StampError::Build {
                message: "World unit must be non-zero".to_string(),
                help: Some("Use a positive cell size, e.g. --world-unit 100".to_string()),
            });
        }
        Ok(())
    }
}

/// Counts gathered during a stamping pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StampStats {
    /// Pixels that produced a placement.
    pub placed: usize,
    /// Opaque pixels no preset matched.
    pub unmatched: usize,
    /// Pixels skipped for zero alpha.
    pub transparent: usize,
}

/// Stamp a grid against a palette.
pub fn stamp(grid: &PixelGrid, palette: &PresetPalette, options: &StampOptions) -> Vec<Placement> {
    stamp_with_stats(grid, palette, options).0
}

/// Like [`stamp`], also returning per-pass counts.
pub fn stamp_with_stats(
    grid: &PixelGrid,
    palette: &PresetPalette,
    options: &StampOptions,
) -> (Vec<Placement>, StampStats) {
    let unit = i64::from(options.world_unit);
    let width = i64::from(grid.width());
    let height = i64::from(grid.height());

    let left = -(width * unit) / 2;
    let mut x = left;
    let mut y = -(height * unit) / 2;

    // Centring offset comes from a default transform, so it never varies per preset.
    let half_width = (DEFAULT_SCALE * 0.5 * unit as f64) as i64;
    let half_height = (DEFAULT_SCALE * 0.5 * unit as f64) as i64;

    let mut placements = Vec::new();
    let mut stats = StampStats::default();

    for &colour in grid.pixels() {
        if colour.is_transparent() {
            stats.transparent += 1;
        } else {
            match match_preset(palette, colour, options.tolerance) {
                Some((key, object)) => {
                    let location =
                        Vec3::new((x + half_width) as f64, (y + half_height) as f64, unit as f64);
                    placements.push(Placement {
                        key: key.to_string(),
                        object: object.to_string(),
                        transform: Transform::at(location),
                    });
                    stats.placed += 1;
                }
                None => stats.unmatched += 1,
            }
        }

        // Advance on every pixel to stay in step with the row-major index.
        x += unit;
        if 2 * x >= width * unit {
            x = left;
            y += unit;
        }
    }

    (placements, stats)
}

/// Find the first preset, in palette order, matching `colour`.
///
/// Entries whose key has no object are passed over as if they did not match.
pub fn match_preset<'a>(
    palette: &'a PresetPalette,
    colour: Colour,
    tolerance: u32,
) -> Option<(&'a str, &'a str)> {
    palette
        .entries()
        .filter(|&(_, reference)| within_tolerance(colour, reference, tolerance))
        .find_map(|(key, _)| palette.object(key).map(|object| (key, object)))
}
