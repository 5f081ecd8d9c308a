use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::stamp::DEFAULT_TOLERANCE;
use crate::types::PresetPalette;
use crate::validation::validate_palette;

use super::print_diagnostics;

/// Check a preset palette for problems
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Palette file to check
    #[arg(required = true)]
    pub palette: PathBuf,

    /// Tolerance to check shadowed presets at
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    pub tolerance: u32,
}

pub fn run(args: CheckArgs, printer: &Printer) -> Result<()> {
    printer.status("Checking", &display_path(&args.palette));

    let palette = PresetPalette::load(&args.palette)?;
    let result = validate_palette(&palette, args.tolerance);
    print_diagnostics(&result, printer);

    let summary = format!(
        "'{}': {}, {}, {}",
        palette.name,
        plural(palette.len(), "preset", "presets"),
        plural(result.error_count(), "error", "errors"),
        plural(result.warning_count(), "warning", "warnings"),
    );

    if result.has_errors() {
        printer.error("Failed", &summary);
    } else {
        printer.status("Finished", &summary);
    }

    result.into_result().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn check(yaml: &str) -> Result<()> {
        let dir = tempdir().unwrap();
        let path = dir.path().join("p.palette.yaml");
        fs::write(&path, yaml).unwrap();

        run(
            CheckArgs {
                palette: path,
                tolerance: DEFAULT_TOLERANCE,
            },
            &Printer::new().quiet(true),
        )
    }

    #[test]
    fn test_check_passes_with_warnings() {
        assert!(check("colours:\n  Wall: \"#F00\"\n").is_ok());
    }

    #[test]
    fn test_check_fails_on_errors() {
        assert!(check("colours:\n  Hole: \"#0000\"\nobjects:\n  Hole: BP_Hole\n").is_ok());
        assert!(check("fixtures:\n  floor: Ground\n").is_err());
    }

    #[test]
    fn test_check_missing_file() {
        let result = run(
            CheckArgs {
                palette: PathBuf::from("/nonexistent/p.palette.yaml"),
                tolerance: 0,
            },
            &Printer::new().quiet(true),
        );
        assert!(result.is_err());
    }
}
