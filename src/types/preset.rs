//! Preset palettes: ordered colour keys mapped to placeable objects.

use std::collections::HashMap;

use crate::extract::RawTexture;

use super::{Colour, Transform};

/// Brightness given to the level light when none is configured.
pub const DEFAULT_LIGHT_BRIGHTNESS: f32 = 3.0;

/// Key looked up in the object map for the floor fixture by default.
pub const DEFAULT_FLOOR_KEY: &str = "Floor";

/// An ordered palette of presets.
///
/// Colour entries keep their declaration order, which is also their match
/// priority. Objects are looked up by key; a colour key with no object is
/// allowed here and is skipped during stamping.
#[derive(Debug, Clone, Default)]
pub struct PresetPalette {
    /// Palette name
    pub name: String,

    /// Reference colours in priority order
    colours: Vec<(String, Colour)>,

    /// Placeable object identifiers by preset key
    objects: HashMap<String, String>,

    /// Raw texture used when the source image cannot be decoded
    default_texture: Option<RawTexture>,

    /// Level-wide objects placed regardless of pixel data
    fixtures: Fixtures,
}

/// Level-wide objects configured on a palette.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fixtures {
    pub light: Option<LightFixture>,
    pub reflection: Option<String>,
    pub sky: Option<String>,
    /// Key into the palette's object map.
    pub floor: Option<String>,
}

/// The level's main light.
#[derive(Debug, Clone, PartialEq)]
pub struct LightFixture {
    pub object: String,
    pub transform: Transform,
    pub brightness: f32,
}

impl PresetPalette {
    /// Create a new empty palette.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a reference colour for `key`.
    ///
    /// Re-inserting an existing key replaces its colour but keeps its
    /// original priority.
    pub fn insert_colour(&mut self, key: impl Into<String>, colour: Colour) {
        let key = key.into();
        match self.colours.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = colour,
            None => self.colours.push((key, colour)),
        }
    }

    /// Register the placeable object for `key`.
    pub fn insert_object(&mut self, key: impl Into<String>, object: impl Into<String>) {
        self.objects.insert(key.into(), object.into());
    }

    /// Builder-style variant of `insert_colour` + `insert_object`.
    pub fn with_preset(
        mut self,
        key: impl Into<String>,
        colour: Colour,
        object: impl Into<String>,
    ) -> Self {
        let key = key.into();
        self.insert_object(key.clone(), object);
        self.insert_colour(key, colour);
        self
    }

    pub fn set_default_texture(&mut self, texture: Option<RawTexture>) {
        self.default_texture = texture;
    }

    pub fn set_fixtures(&mut self, fixtures: Fixtures) {
        self.fixtures = fixtures;
    }

    /// Iterate colour entries in priority order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, Colour)> {
        self.colours.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// Get the reference colour for a key.
    pub fn colour(&self, key: &str) -> Option<Colour> {
        self.entries().find(|(k, _)| *k == key).map(|(_, c)| c)
    }

    /// Resolve a key to its placeable object identifier.
    pub fn object(&self, key: &str) -> Option<&str> {
        self.objects.get(key).map(|s| s.as_str())
    }

    /// All keys in the object map (unordered).
    pub fn object_keys(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(|s| s.as_str())
    }

    pub fn default_texture(&self) -> Option<&RawTexture> {
        self.default_texture.as_ref()
    }

    pub fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    /// Number of colour entries.
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }
}
