//! Checks run against a preset palette.
//!
//! Each check returns its own `ValidationResult`; `validate_palette` merges
//! them.

use crate::stamp::within_tolerance;
use crate::types::PresetPalette;

use super::warning::{Diagnostic, ValidationResult};

/// A palette with no colours places nothing.
pub fn check_empty_palette(palette: &PresetPalette) -> ValidationResult {
    let mut result = ValidationResult::new();

    if palette.is_empty() {
        result.push(
            Diagnostic::warning(
                "levelstamp::check::empty-palette",
                format!("Palette '{}' has no colours", palette.name),
            )
            .with_help("Add entries under `colours:`, e.g. `Wall: \"#FF0000\"`"),
        );
    }

    result
}

/// Colour keys with no object are skipped during stamping.
pub fn check_missing_objects(palette: &PresetPalette) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (key, _) in palette.entries() {
        if palette.object(key).is_none() {
            result.push(
                Diagnostic::warning(
                    "levelstamp::check::missing-object",
                    format!("Colour '{}' has no object and will never be placed", key),
                )
                .for_key(key)
                .with_help(format!("Add `{}: <object>` under `objects:`", key)),
            );
        }
    }

    result
}

/// Objects nothing refers to: no colour and not the floor fixture.
pub fn check_unused_objects(palette: &PresetPalette) -> ValidationResult {
    let mut result = ValidationResult::new();
    let floor_key = palette
        .fixtures()
        .floor
        .as_deref()
        .unwrap_or(crate::types::DEFAULT_FLOOR_KEY);

    let mut unused: Vec<&str> = palette
        .object_keys()
        .filter(|key| *key != floor_key && palette.colour(key).is_none())
        .collect();
    unused.sort_unstable();

    for key in unused {
        result.push(
            Diagnostic::warning(
                "levelstamp::check::unused-object",
                format!("Object '{}' has no colour", key),
            )
            .for_key(key),
        );
    }

    result
}

/// A later preset whose colour already matches an earlier one can only win
/// for pixels the earlier preset misses.
pub fn check_shadowed_presets(palette: &PresetPalette, tolerance: u32) -> ValidationResult {
    let mut result = ValidationResult::new();
    let entries: Vec<(&str, _)> = palette.entries().collect();

    for (i, &(key, colour)) in entries.iter().enumerate() {
        let earlier = entries[..i].iter().find(|&&(other, reference)| {
            palette.object(other).is_some() && within_tolerance(colour, reference, tolerance)
        });

        if let Some(&(other, _)) = earlier {
            result.push(
                Diagnostic::warning(
                    "levelstamp::check::shadowed",
                    format!(
                        "Colour '{}' ({}) is matched by earlier preset '{}' at tolerance {}",
                        key, colour, other, tolerance
                    ),
                )
                .for_key(key)
                .with_help("Move it above the earlier preset or pick a more distinct colour"),
            );
        }
    }

    result
}

/// Reference colours with zero alpha only match near-transparent pixels,
/// and never at tolerance 0.
pub fn check_transparent_presets(palette: &PresetPalette, tolerance: u32) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (key, colour) in palette.entries() {
        if !colour.is_transparent() {
            continue;
        }

        let diagnostic = if tolerance == 0 {
            Diagnostic::error(
                "levelstamp::check::transparent",
                format!("Colour '{}' is fully transparent and can never match", key),
            )
        } else {
            Diagnostic::warning(
                "levelstamp::check::transparent",
                format!(
                    "Colour '{}' is fully transparent; only pixels with alpha 1-{} can match",
                    key,
                    tolerance.min(255)
                ),
            )
        };
        result.push(diagnostic.for_key(key));
    }

    result
}

/// A configured floor key must resolve to an object.
pub fn check_floor_fixture(palette: &PresetPalette) -> ValidationResult {
    let mut result = ValidationResult::new();

    if let Some(key) = palette.fixtures().floor.as_deref() {
        if palette.object(key).is_none() {
            result.push(
                Diagnostic::error(
                    "levelstamp::check::floor",
                    format!("Floor fixture refers to '{}', which has no object", key),
                )
                .for_key(key),
            );
        }
    }

    result
}

/// The default texture must hold enough bytes for its dimensions.
pub fn check_default_texture(palette: &PresetPalette) -> ValidationResult {
    let mut result = ValidationResult::new();

    let Some(texture) = palette.default_texture() else {
        return result;
    };

    if texture.expected_len() == 0 {
        result.push(Diagnostic::error(
            "levelstamp::check::default-texture",
            format!(
                "Default texture has zero size ({}x{})",
                texture.width, texture.height
            ),
        ));
    } else if texture.data().len() < texture.expected_len() {
        result.push(
            Diagnostic::error(
                "levelstamp::check::default-texture",
                format!(
                    "Default texture is {} bytes, {}x{} BGRA needs {}",
                    texture.data().len(),
                    texture.width,
                    texture.height,
                    texture.expected_len()
                ),
            )
            .with_help("Raw textures are 4 bytes per texel in B, G, R, A order"),
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::RawTexture;
    use crate::types::{Colour, Fixtures};

    fn codes(result: &ValidationResult) -> Vec<&str> {
        result.iter().map(|d| d.code.as_str()).collect()
    }

    #[test]
    fn test_empty_palette() {
        let result = check_empty_palette(&PresetPalette::new("none"));
        assert_eq!(codes(&result), vec!["levelstamp::check::empty-palette"]);
    }

    #[test]
    fn test_missing_object() {
        let mut palette = PresetPalette::new("p");
        palette.insert_colour("Ghost", Colour::WHITE);

        let result = check_missing_objects(&palette);
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.iter().next().unwrap().key.as_deref(), Some("Ghost"));
    }

    #[test]
    fn test_unused_object_ignores_floor() {
        let mut palette = PresetPalette::new("p").with_preset("Wall", Colour::BLACK, "BP_Wall");
        palette.insert_object("Floor", "BP_Floor");
        palette.insert_object("Tree", "BP_Tree");

        let result = check_unused_objects(&palette);
        let keys: Vec<_> = result.iter().filter_map(|d| d.key.as_deref()).collect();
        assert_eq!(keys, vec!["Tree"]);
    }

    #[test]
    fn test_shadowed_preset() {
        let palette = PresetPalette::new("p")
            .with_preset("Wall", Colour::rgb(255, 0, 0), "BP_Wall")
            .with_preset("Lava", Colour::rgb(250, 0, 0), "BP_Lava")
            .with_preset("Grass", Colour::rgb(0, 255, 0), "BP_Grass");

        let result = check_shadowed_presets(&palette, 10);
        assert_eq!(result.warning_count(), 1);
        assert_eq!(result.iter().next().unwrap().key.as_deref(), Some("Lava"));

        assert!(check_shadowed_presets(&palette, 0).is_clean());
    }

    #[test]
    fn test_shadow_needs_object() {
        let mut palette = PresetPalette::new("p");
        palette.insert_colour("Ghost", Colour::rgb(255, 0, 0));
        let palette = palette.with_preset("Wall", Colour::rgb(255, 0, 0), "BP_Wall");

        assert!(check_shadowed_presets(&palette, 10).is_clean());
    }

    #[test]
    fn test_transparent_preset() {
        let palette = PresetPalette::new("p").with_preset("Hole", Colour::TRANSPARENT, "BP_Hole");

        assert_eq!(check_transparent_presets(&palette, 0).error_count(), 1);
        assert_eq!(check_transparent_presets(&palette, 10).warning_count(), 1);
    }

    #[test]
    fn test_floor_fixture() {
        let mut palette = PresetPalette::new("p");
        palette.set_fixtures(Fixtures {
            floor: Some("Ground".to_string()),
            ..Fixtures::default()
        });
        assert!(check_floor_fixture(&palette).has_errors());

        palette.insert_object("Ground", "BP_Ground");
        assert!(check_floor_fixture(&palette).is_clean());
    }

    #[test]
    fn test_default_texture_size() {
        let mut palette = PresetPalette::new("p");
        assert!(check_default_texture(&palette).is_clean());

        palette.set_default_texture(Some(RawTexture::new(2, 2, vec![0; 12])));
        assert!(check_default_texture(&palette).has_errors());

        palette.set_default_texture(Some(RawTexture::new(0, 2, vec![])));
        assert!(check_default_texture(&palette).has_errors());

        palette.set_default_texture(Some(RawTexture::new(2, 2, vec![0; 16])));
        assert!(check_default_texture(&palette).is_clean());
    }
}
