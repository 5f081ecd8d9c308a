//! Preset palette files (`*.palette.yaml`).
//!
//! ```yaml
//! name: arena
//! colours:            # first match wins
//!   Wall: "#FF0000"
//!   Crate: "#804000"
//! objects:
//!   Wall: /Game/Blocks/BP_Wall
//!   Crate: /Game/Blocks/BP_Crate
//!   Floor: /Game/Blocks/BP_Floor
//! default_texture:
//!   path: fallback.bgra
//!   width: 13
//!   height: 11
//! fixtures:
//!   light: { object: DirectionalLight, location: [0, 0, 1000], rotation: [-45, 0, 0] }
//!   sky: /Game/BP_Sky_Sphere
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, StampError};
use crate::extract::RawTexture;
use crate::types::{
    Colour, Fixtures, LightFixture, PresetPalette, Transform, DEFAULT_LIGHT_BRIGHTNESS,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PaletteFile {
    name: Option<String>,

    /// Kept as a mapping so declaration order survives.
    #[serde(default)]
    colours: serde_yaml::Mapping,

    #[serde(default)]
    objects: BTreeMap<String, String>,

    default_texture: Option<TextureEntry>,

    #[serde(default)]
    fixtures: FixturesEntry,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TextureEntry {
    path: PathBuf,
    width: u32,
    height: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FixturesEntry {
    light: Option<LightEntry>,
    reflection: Option<String>,
    sky: Option<String>,
    floor: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LightEntry {
    object: String,
    #[serde(default)]
    location: [f64; 3],
    #[serde(default)]
    rotation: [f64; 3],
    #[serde(default = "default_brightness")]
    brightness: f32,
}

fn default_brightness() -> f32 {
    DEFAULT_LIGHT_BRIGHTNESS
}

impl PresetPalette {
    /// Load a palette file. Relative texture paths resolve against the
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StampError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read palette: {}", e),
        })?;

        let mut palette = Self::parse(&content, path.parent())?;
        if palette.name.is_empty() {
            palette.name = palette_name_from_path(path);
        }
        Ok(palette)
    }

    /// Parse a palette from YAML.
    ///
    /// `base_dir` anchors a relative `default_texture.path`; without it the
    /// path is used as given.
    pub fn parse(content: &str, base_dir: Option<&Path>) -> Result<Self> {
        let file: PaletteFile = serde_yaml::from_str(content).map_err(|e| StampError::Parse {
            message: format!("Invalid palette: {}", e),
            help: Some("Check the palette YAML syntax".to_string()),
        })?;

        let mut palette = PresetPalette::new(file.name.unwrap_or_default());

        for (key, value) in &file.colours {
            let (Some(key), Some(value)) = (key.as_str(), value.as_str()) else {
                return Err(StampError::Parse {
                    message: format!("Invalid colour entry: {:?}: {:?}", key, value),
                    help: Some("Colour entries look like `Wall: \"#FF0000\"`".to_string()),
                });
            };
            palette.insert_colour(key, Colour::from_hex(value)?);
        }

        for (key, object) in file.objects {
            palette.insert_object(key, object);
        }

        if let Some(texture) = file.default_texture {
            let path = match base_dir {
                Some(dir) if texture.path.is_relative() => dir.join(&texture.path),
                _ => texture.path,
            };
            palette.set_default_texture(Some(RawTexture::load(
                &path,
                texture.width,
                texture.height,
            )?));
        }

        palette.set_fixtures(file.fixtures.into());

        Ok(palette)
    }
}

impl From<FixturesEntry> for Fixtures {
    fn from(entry: FixturesEntry) -> Self {
        Fixtures {
            light: entry.light.map(|light| LightFixture {
                object: light.object,
                transform: Transform::at(light.location.into())
                    .with_rotation(light.rotation.into()),
                brightness: light.brightness,
            }),
            reflection: entry.reflection,
            sky: entry.sky,
            floor: entry.floor,
        }
    }
}

/// `levels/arena.palette.yaml` -> `arena`
fn palette_name_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("palette");
    stem.strip_suffix(".palette").unwrap_or(stem).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vec3;
    use std::fs;
    use tempfile::tempdir;

    const ARENA: &str = r##"
name: arena
colours:
  Wall: "#FF0000"
  Crate: "#804000"
  Spawn: "#00F"
objects:
  Wall: /Game/Blocks/BP_Wall
  Crate: /Game/Blocks/BP_Crate
  Spawn: /Game/Blocks/BP_Spawn
  Floor: /Game/Blocks/BP_Floor
fixtures:
  light:
    object: DirectionalLight
    location: [0, 0, 1000]
    rotation: [-45, 0, 0]
  reflection: SphereReflectionCapture
  sky: /Game/BP_Sky_Sphere
"##;

    #[test]
    fn test_parse_keeps_colour_order() {
        let palette = PresetPalette::parse(ARENA, None).unwrap();

        assert_eq!(palette.name, "arena");
        let keys: Vec<&str> = palette.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Wall", "Crate", "Spawn"]);
        assert_eq!(palette.colour("Spawn"), Some(Colour::rgb(0, 0, 255)));
        assert_eq!(palette.object("Floor"), Some("/Game/Blocks/BP_Floor"));
    }

    #[test]
    fn test_parse_order_is_not_alphabetical() {
        let yaml = "colours:\n  Zed: \"#000\"\n  Alpha: \"#FFF\"\n";
        let palette = PresetPalette::parse(yaml, None).unwrap();
        let keys: Vec<&str> = palette.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Zed", "Alpha"]);
    }

    #[test]
    fn test_parse_fixtures() {
        let palette = PresetPalette::parse(ARENA, None).unwrap();
        let fixtures = palette.fixtures();

        let light = fixtures.light.as_ref().unwrap();
        assert_eq!(light.object, "DirectionalLight");
        assert_eq!(light.transform.location, Vec3::new(0.0, 0.0, 1000.0));
        assert_eq!(light.transform.rotation.pitch, -45.0);
        assert_eq!(light.brightness, DEFAULT_LIGHT_BRIGHTNESS);
        assert_eq!(fixtures.sky.as_deref(), Some("/Game/BP_Sky_Sphere"));
        assert!(fixtures.floor.is_none());
    }

    #[test]
    fn test_parse_bad_hex() {
        let yaml = "colours:\n  Wall: \"#XYZ\"\n";
        assert!(PresetPalette::parse(yaml, None).is_err());
    }

    #[test]
    fn test_parse_non_string_colour() {
        let yaml = "colours:\n  Wall: 12\n";
        let err = PresetPalette::parse(yaml, None).unwrap_err();
        assert!(matches!(err, StampError::Parse { .. }));
    }

    #[test]
    fn test_parse_unknown_field() {
        let yaml = "colors:\n  Wall: \"#FF0000\"\n";
        assert!(PresetPalette::parse(yaml, None).is_err());
    }

    #[test]
    fn test_object_without_colour_is_allowed() {
        let yaml = "colours:\n  Wall: \"#F00\"\nobjects:\n  Ghost: BP_Ghost\n";
        let palette = PresetPalette::parse(yaml, None).unwrap();
        assert_eq!(palette.len(), 1);
        assert_eq!(palette.object("Wall"), None);
        assert_eq!(palette.object("Ghost"), Some("BP_Ghost"));
    }

    #[test]
    fn test_load_resolves_texture_relative_to_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("fallback.bgra"), [0u8, 0, 255, 255]).unwrap();
        let path = dir.path().join("arena.palette.yaml");
        fs::write(
            &path,
            "colours:\n  Wall: \"#F00\"\ndefault_texture:\n  path: fallback.bgra\n  width: 1\n  height: 1\n",
        )
        .unwrap();

        let palette = PresetPalette::load(&path).unwrap();

        assert_eq!(palette.name, "arena");
        let texture = palette.default_texture().unwrap();
        assert_eq!(texture.to_grid().unwrap().pixels(), &[Colour::rgb(255, 0, 0)]);
    }

    #[test]
    fn test_load_missing_texture_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.palette.yaml");
        fs::write(
            &path,
            "default_texture:\n  path: nowhere.bgra\n  width: 1\n  height: 1\n",
        )
        .unwrap();

        assert!(PresetPalette::load(&path).is_err());
    }

    #[test]
    fn test_name_from_path() {
        assert_eq!(palette_name_from_path(Path::new("a/arena.palette.yaml")), "arena");
        assert_eq!(palette_name_from_path(Path::new("dungeon.yaml")), "dungeon");
    }
}
