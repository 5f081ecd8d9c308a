//! Output units of a generation pass.

use serde::Serialize;

use super::Transform;

/// An instruction to place one object for one matched grid cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    /// Palette key that matched the pixel.
    pub key: String,

    /// Placeable object identifier resolved from the key.
    pub object: String,

    pub transform: Transform,
}

/// What a fixture is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureKind {
    Light,
    Reflection,
    Sky,
    Floor,
}

/// A level-wide object placed independent of pixel data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fixture {
    pub kind: FixtureKind,
    pub object: String,
    pub transform: Transform,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f32>,
}
