//! Build command implementation.
//!
//! Stamps every input image against a palette and writes one level plan per
//! image (`<name>.level.json`), or prints placements with `--print`. Images
//! found in a directory keep their subdirectory in the output, and the output
//! directory itself is never read back as input.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Manifest;
use crate::discovery::{collect_images, SourceImage};
use crate::error::{Result, StampError};
use crate::extract::{extract_with_source, ExtractSource, PixelGrid};
use crate::generate::{generate_from_grid, GenerateOutcome, LevelPlan};
use crate::output::{display_path, plural, Printer};
use crate::render::{write_plan_json, write_preview};
use crate::sink::{apply_plan, PrintSink};
use crate::stamp::StampOptions;
use crate::types::PresetPalette;
use crate::validation::validate_palette;

use super::print_diagnostics;

/// Generate level plans from images
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Images or directories to stamp (default: manifest sources)
    pub inputs: Vec<PathBuf>,

    /// Preset palette file
    #[arg(long, short)]
    pub palette: Option<PathBuf>,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Per-channel colour tolerance
    #[arg(long)]
    pub tolerance: Option<u32>,

    /// World-space size of one cell
    #[arg(long)]
    pub world_unit: Option<u32>,

    /// Print placements to stdout instead of writing files
    #[arg(long)]
    pub print: bool,

    /// Also write a `<stem>.preview.png` showing which pixels matched
    #[arg(long)]
    pub preview: bool,

    /// Manifest file (default: ./levelstamp.yaml if present)
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

/// Run the build. Returns the number of levels generated.
pub fn run(args: BuildArgs, printer: &Printer) -> Result<usize> {
    let manifest = match &args.manifest {
        Some(path) => Manifest::load(path)?,
        None => Manifest::discover(Path::new("."))?,
    };

    let Some(palette_path) = args.palette.clone().or_else(|| manifest.palette.clone()) else {
        printer.warning("Skipped", "no palette given, nothing to generate");
        return Ok(0);
    };

    let options = manifest.stamp_options(args.tolerance, args.world_unit);
    options.validate()?;

    printer.status("Loading", &display_path(&palette_path));
    let palette = PresetPalette::load(&palette_path)?;

    let diagnostics = validate_palette(&palette, options.tolerance);
    print_diagnostics(&diagnostics, printer);
    diagnostics.into_result()?;

    let output_dir = args.output.clone().unwrap_or_else(|| manifest.output.clone());
    if !args.print {
        fs::create_dir_all(&output_dir).map_err(|e| StampError::Io {
            path: output_dir.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let inputs = if args.inputs.is_empty() {
        manifest.effective_sources()
    } else {
        args.inputs.clone()
    };
    let skip_dir = (!args.print).then_some(output_dir.as_path());
    let images = collect_images(&inputs, &manifest, skip_dir);
    check_unique_names(&images)?;

    let mut built = 0;

    if images.is_empty() {
        // Nothing to read; the palette's default texture may still yield a level
        printer.info("Fallback", "no input images, using the palette's default texture");
        if build_one(None, &palette.name, &palette, &options, &args, &output_dir, printer)? {
            built += 1;
        }
    }

    for image in &images {
        let bytes = match fs::read(&image.path) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                printer.warning(
                    "Fallback",
                    &format!(
                        "{}: {}, using the palette's default texture",
                        display_path(&image.path),
                        e
                    ),
                );
                None
            }
        };

        if build_one(bytes.as_deref(), &image.name, &palette, &options, &args, &output_dir, printer)? {
            built += 1;
        }
    }

    printer.status(
        "Finished",
        &format!("{} with palette '{}'", plural(built, "level", "levels"), palette.name),
    );

    Ok(built)
}

/// Two images mapping to the same level name would overwrite each other.
fn check_unique_names(images: &[SourceImage]) -> Result<()> {
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for image in images {
        if let Some(first) = seen.insert(&image.name, &image.path) {
            return Err(StampError::Build {
                message: format!(
                    "{} and {} both build level '{}'",
                    display_path(first),
                    display_path(&image.path),
                    image.name
                ),
                help: Some("Rename one of the images or build them separately".to_string()),
            });
        }
    }
    Ok(())
}

/// Generate and emit one level. Returns false when there was nothing to build.
fn build_one(
    image: Option<&[u8]>,
    name: &str,
    palette: &PresetPalette,
    options: &StampOptions,
    args: &BuildArgs,
    output_dir: &Path,
    printer: &Printer,
) -> Result<bool> {
    let (grid, source) = extract_with_source(image, palette.default_texture());
    let plan = match generate_from_grid(&grid, source, palette, options)? {
        GenerateOutcome::Success(plan) => plan,
        GenerateOutcome::NoPixelData => {
            printer.warning("Skipped", &format!("{}: no pixel data", name));
            return Ok(false);
        }
        GenerateOutcome::MissingPalette => return Ok(false),
    };

    if plan.source == Some(ExtractSource::Fallback) && image.is_some() {
        printer.warning(
            "Fallback",
            &format!("{}: could not decode image, used the default texture", name),
        );
    }

    printer.status(
        "Stamping",
        &format!(
            "{} ({}x{}, {}, {} unmatched)",
            name,
            plan.grid[0],
            plan.grid[1],
            plural(plan.placements.len(), "placement", "placements"),
            plan.stats.unmatched
        ),
    );

    if args.print {
        let mut sink = PrintSink::new(io::stdout().lock());
        apply_plan(&plan, &mut sink)?;
    } else {
        write_outputs(&plan, &grid, name, palette, options, args, output_dir, printer)?;
    }

    Ok(true)
}

#[allow(clippy::too_many_arguments)]
fn write_outputs(
    plan: &LevelPlan,
    grid: &PixelGrid,
    name: &str,
    palette: &PresetPalette,
    options: &StampOptions,
    args: &BuildArgs,
    output_dir: &Path,
    printer: &Printer,
) -> Result<()> {
    let json_path = output_dir.join(format!("{}.level.json", name));
    if let Some(parent) = json_path.parent() {
        fs::create_dir_all(parent).map_err(|e| StampError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }
    write_plan_json(plan, &json_path)?;
    printer.info("Wrote", &display_path(&json_path));

    if args.preview {
        let preview_path = output_dir.join(format!("{}.preview.png", name));
        write_preview(grid, palette, options, &preview_path, 1)?;
        printer.info("Wrote", &display_path(&preview_path));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    const PALETTE: &str = r##"
name: arena
colours:
  Wall: "#FF0000"
  Crate: "#804000"
objects:
  Wall: BP_Wall
  Crate: BP_Crate
  Floor: BP_Floor
"##;

    fn args(inputs: Vec<PathBuf>, palette: Option<PathBuf>, output: &Path) -> BuildArgs {
        BuildArgs {
            inputs,
            palette,
            output: Some(output.to_path_buf()),
            tolerance: None,
            world_unit: None,
            print: false,
            preview: false,
            manifest: None,
        }
    }

    fn quiet() -> Printer {
        Printer::new().quiet(true)
    }

    #[test]
    fn test_build_writes_level_json() {
        let dir = tempdir().unwrap();
        let palette_path = dir.path().join("arena.palette.yaml");
        fs::write(&palette_path, PALETTE).unwrap();

        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 1, Rgba([128, 64, 0, 255]));
        let image_path = dir.path().join("arena.png");
        img.save(&image_path).unwrap();

        let output = dir.path().join("levels");
        let built = run(args(vec![image_path], Some(palette_path), &output), &quiet()).unwrap();

        assert_eq!(built, 1);
        let json = fs::read_to_string(output.join("arena.level.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["palette"], "arena");
        assert_eq!(value["grid"], serde_json::json!([2, 2]));
        assert_eq!(value["fixtures"][0]["object"], "BP_Floor");
        let keys: Vec<&str> = value["placements"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["key"].as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["Wall", "Crate"]);
    }

    #[test]
    fn test_build_directory_with_preview() {
        let dir = tempdir().unwrap();
        let palette_path = dir.path().join("arena.palette.yaml");
        fs::write(&palette_path, PALETTE).unwrap();

        let maps = dir.path().join("maps");
        fs::create_dir_all(&maps).unwrap();
        for name in ["one", "two"] {
            RgbaImage::from_pixel(3, 1, Rgba([255, 0, 0, 255]))
                .save(maps.join(format!("{}.png", name)))
                .unwrap();
        }

        let output = dir.path().join("out");
        let mut build_args = args(vec![maps], Some(palette_path), &output);
        build_args.preview = true;

        assert_eq!(run(build_args, &quiet()).unwrap(), 2);
        assert!(output.join("one.level.json").exists());
        assert!(output.join("two.level.json").exists());

        let preview = image::open(output.join("two.preview.png")).unwrap().to_rgba8();
        assert_eq!(preview.dimensions(), (3, 1));
    }

    #[test]
    fn test_build_without_palette_is_noop() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("out");

        let mut build_args = args(vec![dir.path().join("x.png")], None, &output);
        build_args.manifest = Some(dir.path().join("levelstamp.yaml"));
        fs::write(dir.path().join("levelstamp.yaml"), "tolerance: 5\n").unwrap();

        assert_eq!(run(build_args, &quiet()).unwrap(), 0);
        assert!(!output.exists());
    }

    #[test]
    fn test_unreadable_image_uses_default_texture() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("fallback.bgra"), [0u8, 0, 255, 255]).unwrap();
        let palette_path = dir.path().join("arena.palette.yaml");
        fs::write(
            &palette_path,
            format!(
                "{}default_texture:\n  path: fallback.bgra\n  width: 1\n  height: 1\n",
                PALETTE
            ),
        )
        .unwrap();

        let output = dir.path().join("out");
        let missing = dir.path().join("missing.png");
        let built = run(args(vec![missing], Some(palette_path), &output), &quiet()).unwrap();

        assert_eq!(built, 1);
        let json = fs::read_to_string(output.join("missing.level.json")).unwrap();
        assert!(json.contains("BP_Wall"));
    }

    #[test]
    fn test_undecodable_image_without_fallback_skipped() {
        let dir = tempdir().unwrap();
        let palette_path = dir.path().join("arena.palette.yaml");
        fs::write(&palette_path, PALETTE).unwrap();
        let bogus = dir.path().join("bogus.png");
        fs::write(&bogus, b"not a png").unwrap();

        let output = dir.path().join("out");
        let built = run(args(vec![bogus], Some(palette_path), &output), &quiet()).unwrap();

        assert_eq!(built, 0);
        assert!(!output.join("bogus.level.json").exists());
    }

    #[test]
    fn test_nested_images_with_same_stem() {
        let dir = tempdir().unwrap();
        let palette_path = dir.path().join("arena.palette.yaml");
        fs::write(&palette_path, PALETTE).unwrap();

        let maps = dir.path().join("maps");
        fs::create_dir_all(maps.join("act2")).unwrap();
        RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 255]))
            .save(maps.join("arena.png"))
            .unwrap();
        RgbaImage::from_pixel(2, 1, Rgba([128, 64, 0, 255]))
            .save(maps.join("act2").join("arena.png"))
            .unwrap();

        let output = dir.path().join("out");
        let built = run(args(vec![maps], Some(palette_path), &output), &quiet()).unwrap();

        assert_eq!(built, 2);
        let top = fs::read_to_string(output.join("arena.level.json")).unwrap();
        let nested = fs::read_to_string(output.join("act2").join("arena.level.json")).unwrap();
        assert!(top.contains("BP_Wall"));
        assert!(nested.contains("BP_Crate"));
    }

    #[test]
    fn test_duplicate_level_names_rejected() {
        let dir = tempdir().unwrap();
        let palette_path = dir.path().join("arena.palette.yaml");
        fs::write(&palette_path, PALETTE).unwrap();

        for sub in ["a", "b"] {
            fs::create_dir_all(dir.path().join(sub)).unwrap();
            RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 255]))
                .save(dir.path().join(sub).join("arena.png"))
                .unwrap();
        }

        let inputs = vec![dir.path().join("a/arena.png"), dir.path().join("b/arena.png")];
        let output = dir.path().join("out");
        let result = run(args(inputs, Some(palette_path), &output), &quiet());

        assert!(matches!(result, Err(StampError::Build { .. })));
        assert!(!output.join("arena.level.json").exists());
    }

    #[test]
    fn test_rebuild_ignores_own_output() {
        let dir = tempdir().unwrap();
        let palette_path = dir.path().join("arena.palette.yaml");
        fs::write(&palette_path, PALETTE).unwrap();
        RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]))
            .save(dir.path().join("arena.png"))
            .unwrap();

        let output = dir.path().join("levels");
        for _ in 0..2 {
            let mut build_args = args(vec![dir.path().to_path_buf()], Some(palette_path.clone()), &output);
            build_args.preview = true;
            assert_eq!(run(build_args, &quiet()).unwrap(), 1);
        }

        let mut files: Vec<String> = fs::read_dir(&output)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        files.sort();
        assert_eq!(files, vec!["arena.level.json", "arena.preview.png"]);
    }

    #[test]
    fn test_build_rejects_zero_world_unit() {
        let dir = tempdir().unwrap();
        let palette_path = dir.path().join("arena.palette.yaml");
        fs::write(&palette_path, PALETTE).unwrap();

        let mut build_args = args(vec![], Some(palette_path), dir.path());
        build_args.world_unit = Some(0);

        assert!(run(build_args, &quiet()).is_err());
    }

    #[test]
    fn test_build_fails_on_palette_errors() {
        let dir = tempdir().unwrap();
        let palette_path = dir.path().join("bad.palette.yaml");
        fs::write(&palette_path, "colours:\n  Wall: \"#F00\"\nfixtures:\n  floor: Ground\n").unwrap();

        let result = run(
            args(vec![dir.path().join("x.png")], Some(palette_path), dir.path()),
            &quiet(),
        );
        assert!(matches!(result, Err(StampError::Validation { .. })));
    }
}
