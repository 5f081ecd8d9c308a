//! Core domain types for levelstamp.
//!
//! - `Colour` - RGBA colour values
//! - `PresetPalette` - Ordered colour keys mapped to placeable objects
//! - `Transform` - World-space placement of an object
//! - `Placement` / `Fixture` - What a generation pass produces

mod colour;
mod placement;
mod preset;
mod transform;

pub use colour::Colour;
pub use placement::{Fixture, FixtureKind, Placement};
pub use preset::{
    Fixtures, LightFixture, PresetPalette, DEFAULT_FLOOR_KEY, DEFAULT_LIGHT_BRIGHTNESS,
};
pub use transform::{Rotator, Transform, Vec3, DEFAULT_SCALE};
