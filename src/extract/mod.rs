//! Pixel extraction.
//!
//! Turns encoded image bytes into a [`PixelGrid`]. Images decode through the
//! `image` crate; when that fails the caller may supply a [`RawTexture`]
//! (B, G, R, A bytes) to fall back on. If neither yields pixels the result is
//! the empty 0x0 grid, which means there is nothing to generate.

mod grid;
mod raw;

pub use grid::PixelGrid;
pub use raw::{RawTexture, BYTES_PER_TEXEL};

use crate::types::Colour;

/// Where an extracted grid came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractSource {
    /// The image bytes decoded.
    Decoded,
    /// The raw fallback texture was used.
    Fallback,
    /// No pixel data was available.
    None,
}

/// Decode an encoded image (PNG, BMP, ...) into an RGBA grid.
pub fn decode_image(bytes: &[u8]) -> Option<PixelGrid> {
    let img = image::load_from_memory(bytes).ok()?.to_rgba8();
    let (width, height) = img.dimensions();
    let pixels: Vec<Colour> = img.pixels().map(|p| Colour::from(*p)).collect();

    PixelGrid::new(width, height, pixels).ok()
}

/// Extract a pixel grid, falling back to a raw texture when decoding fails.
pub fn extract(image: Option<&[u8]>, fallback: Option<&RawTexture>) -> PixelGrid {
    extract_with_source(image, fallback).0
}

/// Like [`extract`], also reporting which path produced the grid.
pub fn extract_with_source(
    image: Option<&[u8]>,
    fallback: Option<&RawTexture>,
) -> (PixelGrid, ExtractSource) {
    if let Some(grid) = image.and_then(decode_image) {
        return (grid, ExtractSource::Decoded);
    }

    match fallback.and_then(RawTexture::to_grid) {
        Some(grid) => (grid, ExtractSource::Fallback),
        None => (PixelGrid::empty(), ExtractSource::None),
    }
}
