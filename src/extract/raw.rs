//! Raw texture sources stored in B, G, R, A byte order.

use std::path::Path;

use crate::error::{Result, StampError};
use crate::types::Colour;

use super::PixelGrid;

/// Bytes per texel in a raw texture.
pub const BYTES_PER_TEXEL: usize = 4;

/// Uncompressed texture data in B, G, R, A byte order.
///
/// This is the fallback source a palette can carry for when the requested
/// image cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTexture {
    pub width: u32,
    pub height: u32,
    data: Vec<u8>,
}

impl RawTexture {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Read a raw texture file of known dimensions.
    pub fn load(path: &Path, width: u32, height: u32) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| StampError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read raw texture: {}", e),
        })?;

        Ok(Self::new(width, height, data))
    }

    /// Number of bytes the declared dimensions require.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_TEXEL
    }

    /// Raw byte buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Swizzle into an RGBA grid.
    ///
    /// Returns `None` for a zero-sized texture or when the buffer is too short
    /// for the declared dimensions. Trailing bytes are ignored.
    pub fn to_grid(&self) -> Option<PixelGrid> {
        let needed = self.expected_len();
        if needed == 0 || self.data.len() < needed {
            return None;
        }

        let pixels = self.data[..needed]
            .chunks_exact(BYTES_PER_TEXEL)
            .map(|texel| Colour::from_bgra([texel[0], texel[1], texel[2], texel[3]]))
            .collect();

        PixelGrid::new(self.width, self.height, pixels).ok()
    }
}
