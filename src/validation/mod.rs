//! Palette validation.
//!
//! Runs a suite of checks against a preset palette and reports errors and
//! warnings. Used by `levelstamp check` and before every `levelstamp build`.

mod checks;
mod warning;

pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::types::PresetPalette;

/// Run all palette checks at the given tolerance.
pub fn validate_palette(palette: &PresetPalette, tolerance: u32) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_empty_palette(palette));
    result.merge(checks::check_missing_objects(palette));
    result.merge(checks::check_unused_objects(palette));
    result.merge(checks::check_shadowed_presets(palette, tolerance));
    result.merge(checks::check_transparent_presets(palette, tolerance));
    result.merge(checks::check_floor_fixture(palette));
    result.merge(checks::check_default_texture(palette));

    result
}
