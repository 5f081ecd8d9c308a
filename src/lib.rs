//! levelstamp - Colour-coded bitmaps to game levels
//!
//! Each pixel of a source image is matched against an ordered palette of
//! preset colours; matching pixels become placement commands for the grid
//! cell they occupy. Object identifiers are opaque: a host engine resolves
//! and spawns them through a [`PlacementSink`].

pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod generate;
pub mod output;
pub mod render;
pub mod sink;
pub mod stamp;
pub mod types;
pub mod validation;

pub use config::Manifest;
pub use error::{Result, StampError};
pub use extract::{extract, extract_with_source, ExtractSource, PixelGrid, RawTexture};
pub use generate::{generate, generate_from_grid, plan_level, GenerateOutcome, LevelPlan};
pub use render::{write_plan_json, write_preview};
pub use sink::{apply_plan, CollectSink, PlacementSink, PrintSink};
pub use stamp::{match_preset, stamp, within_tolerance, StampOptions, StampStats};
pub use types::{
    Colour, Fixture, FixtureKind, Fixtures, LightFixture, Placement, PresetPalette, Rotator,
    Transform, Vec3,
};
pub use validation::{validate_palette, Diagnostic, Severity, ValidationResult};
