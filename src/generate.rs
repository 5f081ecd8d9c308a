//! Level generation entry point.
//!
//! Ties extraction and stamping together and adds the level-wide fixtures a
//! palette configures (light, reflection capture, sky, floor).

use serde::Serialize;

use crate::error::Result;
use crate::extract::{extract_with_source, ExtractSource, PixelGrid};
use crate::stamp::{stamp_with_stats, StampOptions, StampStats};
use crate::types::{
    Fixture, FixtureKind, Placement, PresetPalette, Transform, Vec3, DEFAULT_FLOOR_KEY,
};

/// Result of a generation call.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutcome {
    /// A level was planned (possibly with zero placements).
    Success(LevelPlan),
    /// No palette was supplied; nothing was attempted.
    MissingPalette,
    /// Neither the image nor the palette's default texture yielded pixels.
    NoPixelData,
}

impl GenerateOutcome {
    /// The plan, if generation succeeded.
    pub fn plan(&self) -> Option<&LevelPlan> {
        match self {
            GenerateOutcome::Success(plan) => Some(plan),
            _ => None,
        }
    }

    pub fn into_plan(self) -> Option<LevelPlan> {
        match self {
            GenerateOutcome::Success(plan) => Some(plan),
            _ => None,
        }
    }
}

/// Everything needed to build one level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelPlan {
    /// Palette the level was stamped with.
    pub palette: String,

    /// Source grid size in cells.
    pub grid: [u32; 2],

    pub world_unit: u32,

    /// Level-wide objects, placed before any cell.
    pub fixtures: Vec<Fixture>,

    /// One entry per matched pixel, in row-major order.
    pub placements: Vec<Placement>,

    #[serde(skip)]
    pub stats: StampStats,

    #[serde(skip)]
    pub source: Option<ExtractSource>,
}

/// Generate a level plan from image bytes and a palette.
///
/// `image` is optional; when it is missing or fails to decode, the palette's
/// default texture is used instead.
pub fn generate(
    image: Option<&[u8]>,
    palette: Option<&PresetPalette>,
    options: &StampOptions,
) -> Result<GenerateOutcome> {
    let Some(palette) = palette else {
        return Ok(GenerateOutcome::MissingPalette);
    };

    let (grid, source) = extract_with_source(image, palette.default_texture());
    generate_from_grid(&grid, source, palette, options)
}

/// Like [`generate`], for a grid the caller already extracted and wants to
/// keep (for a preview, say).
pub fn generate_from_grid(
    grid: &PixelGrid,
    source: ExtractSource,
    palette: &PresetPalette,
    options: &StampOptions,
) -> Result<GenerateOutcome> {
    options.validate()?;

    if grid.is_empty() {
        return Ok(GenerateOutcome::NoPixelData);
    }

    let mut plan = plan_level(grid, palette, options);
    plan.source = Some(source);

    Ok(GenerateOutcome::Success(plan))
}

/// Build a plan from an already-extracted grid.
pub fn plan_level(grid: &PixelGrid, palette: &PresetPalette, options: &StampOptions) -> LevelPlan {
    let (placements, stats) = stamp_with_stats(grid, palette, options);

    LevelPlan {
        palette: palette.name.clone(),
        grid: [grid.width(), grid.height()],
        world_unit: options.world_unit,
        fixtures: fixtures_for(grid, palette),
        placements,
        stats,
        source: None,
    }
}

/// Resolve the palette's configured fixtures for a grid.
fn fixtures_for(grid: &PixelGrid, palette: &PresetPalette) -> Vec<Fixture> {
    let config = palette.fixtures();
    let mut fixtures = Vec::new();

    if let Some(light) = &config.light {
        fixtures.push(Fixture {
            kind: FixtureKind::Light,
            object: light.object.clone(),
            transform: light.transform,
            brightness: Some(light.brightness),
        });
    }

    if let Some(object) = &config.reflection {
        fixtures.push(Fixture {
            kind: FixtureKind::Reflection,
            object: object.clone(),
            transform: Transform::default(),
            brightness: None,
        });
    }

    if let Some(object) = &config.sky {
        fixtures.push(Fixture {
            kind: FixtureKind::Sky,
            object: object.clone(),
            transform: Transform::default(),
            brightness: None,
        });
    }

    let floor_key = config.floor.as_deref().unwrap_or(DEFAULT_FLOOR_KEY);
    if let Some(object) = palette.object(floor_key) {
        // Floor spans the whole grid at the origin
        let scale = Vec3::new(f64::from(grid.width()), f64::from(grid.height()), 1.0);
        fixtures.push(Fixture {
            kind: FixtureKind::Floor,
            object: object.to_string(),
            transform: Transform::default().with_scale(scale),
            brightness: None,
        });
    }

    fixtures
}
