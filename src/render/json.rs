//! JSON output for level plans.

use std::fs;
use std::path::Path;

use crate::error::{Result, StampError};
use crate::generate::LevelPlan;

/// Serialize a plan as pretty-printed JSON.
pub fn plan_to_json(plan: &LevelPlan) -> Result<String> {
    serde_json::to_string_pretty(plan).map_err(|e| StampError::Build {
        message: format!("Failed to serialize level plan: {}", e),
        help: None,
    })
}

/// Write a plan to `path` as JSON.
pub fn write_plan_json(plan: &LevelPlan, path: &Path) -> Result<()> {
    let json = plan_to_json(plan)?;
    fs::write(path, json).map_err(|e| StampError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write level plan: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PixelGrid;
    use crate::generate::plan_level;
    use crate::stamp::StampOptions;
    use crate::types::{Colour, PresetPalette};
    use tempfile::tempdir;

    #[test]
    fn test_write_plan_json() {
        let palette = PresetPalette::new("arena")
            .with_preset("Wall", Colour::rgb(255, 0, 0), "BP_Wall")
            .with_preset("Floor", Colour::rgb(0, 255, 0), "BP_Floor");
        let grid = PixelGrid::new(1, 2, vec![Colour::rgb(255, 0, 0), Colour::TRANSPARENT]).unwrap();
        let plan = plan_level(&grid, &palette, &StampOptions::default());

        let dir = tempdir().unwrap();
        let path = dir.path().join("arena.level.json");
        write_plan_json(&plan, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["world_unit"], 100);
        assert_eq!(value["fixtures"][0]["kind"], "floor");
        assert_eq!(value["fixtures"][0]["transform"]["scale"]["y"], 2.0);
        assert!(value["fixtures"][0].get("brightness").is_none());
        assert_eq!(value["placements"].as_array().unwrap().len(), 1);
        assert_eq!(value["placements"][0]["key"], "Wall");
    }

    #[test]
    fn test_write_plan_json_bad_dir() {
        let palette = PresetPalette::new("arena");
        let plan = plan_level(&PixelGrid::empty(), &palette, &StampOptions::default());

        let err = write_plan_json(&plan, Path::new("/nonexistent/dir/level.json")).unwrap_err();
        assert!(matches!(err, StampError::Io { .. }));
    }
}
