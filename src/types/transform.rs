//! World-space transforms for placed objects.

use serde::Serialize;

/// Scale of a freshly constructed transform on every axis.
pub const DEFAULT_SCALE: f64 = 1.0;

/// A point or extent in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// All three components set to `v`.
    pub const fn splat(v: f64) -> Self {
        Self::new(v, v, v)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

/// Rotation in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rotator {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl From<[f64; 3]> for Rotator {
    fn from([pitch, yaw, roll]: [f64; 3]) -> Self {
        Self { pitch, yaw, roll }
    }
}

/// Location, rotation and scale of a placed object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transform {
    pub location: Vec3,
    pub rotation: Rotator,
    pub scale: Vec3,
}

impl Transform {
    /// A transform at `location` with no rotation and default scale.
    pub fn at(location: Vec3) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: Rotator) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            location: Vec3::default(),
            rotation: Rotator::default(),
            scale: Vec3::splat(DEFAULT_SCALE),
        }
    }
}
