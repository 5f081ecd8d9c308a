//! PNG previews of a stamping pass.
//!
//! Each source pixel becomes a `scale`x`scale` block: matched cells keep the
//! reference colour of the preset that claimed them, opaque pixels nothing
//! matched turn magenta, and transparent pixels stay transparent.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{Result, StampError};
use crate::extract::PixelGrid;
use crate::stamp::{match_preset, StampOptions};
use crate::types::{Colour, PresetPalette};

/// Colour marking opaque pixels no preset matched.
pub const UNMATCHED: Colour = Colour::rgb(255, 0, 255);

/// Build the preview image for a grid.
pub fn render_preview(
    grid: &PixelGrid,
    palette: &PresetPalette,
    options: &StampOptions,
    scale: u32,
) -> RgbaImage {
    let scale = scale.max(1);
    let mut img: RgbaImage = ImageBuffer::new(grid.width() * scale, grid.height() * scale);

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let Some(colour) = grid.get(x, y) else {
                continue;
            };

            let shown = if colour.is_transparent() {
                Colour::TRANSPARENT
            } else {
                match_preset(palette, colour, options.tolerance)
                    .and_then(|(key, _)| palette.colour(key))
                    .unwrap_or(UNMATCHED)
            };

            let rgba = Rgba(shown.to_rgba());
            for sy in 0..scale {
                for sx in 0..scale {
                    img.put_pixel(x * scale + sx, y * scale + sy, rgba);
                }
            }
        }
    }

    img
}

/// Render and save a preview PNG.
pub fn write_preview(
    grid: &PixelGrid,
    palette: &PresetPalette,
    options: &StampOptions,
    path: &Path,
    scale: u32,
) -> Result<()> {
    render_preview(grid, palette, options, scale)
        .save(path)
        .map_err(|e| StampError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write preview PNG: {}", e),
        })
}
