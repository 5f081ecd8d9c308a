//! Row-major pixel grids.

use crate::error::{Result, StampError};
use crate::types::Colour;

/// A flat, row-major grid of colours (`index = y * width + x`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PixelGrid {
    width: u32,
    height: u32,
    pixels: Vec<Colour>,
}

impl PixelGrid {
    /// Create a grid, checking that `pixels` holds exactly `width * height`
    /// colours.
    pub fn new(width: u32, height: u32, pixels: Vec<Colour>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(StampError::Build {
                message: format!(
                    "Pixel grid {}x{} needs {} pixels, got {}",
                    width,
                    height,
                    expected,
                    pixels.len()
                ),
                help: None,
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// The 0x0 grid: nothing to generate.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as (width, height).
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Get the colour at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Option<Colour> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[Colour] {
        &self.pixels
    }
}
