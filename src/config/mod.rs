//! Configuration files: preset palettes and the project manifest.

mod manifest;
mod palette_file;

pub use manifest::{Manifest, MANIFEST_FILE};
