pub mod build;
pub mod check;
pub mod sample;

use clap::{Parser, Subcommand};

use crate::output::Printer;
use crate::validation::{Severity, ValidationResult};

/// levelstamp - Stamp game levels out of colour-coded bitmaps
#[derive(Parser, Debug)]
#[command(name = "levelstamp")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only print warnings and errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate level plans from images
    Build(build::BuildArgs),

    /// Check a preset palette for problems
    Check(check::CheckArgs),

    /// Print a palette skeleton from an image's colours
    Sample(sample::SampleArgs),
}

/// Print palette diagnostics through the status printer.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let verb = d.severity.to_string();
        let line = format!("[{}] {}", d.code, d.message);

        match d.severity {
            Severity::Error => printer.error(&verb, &line),
            Severity::Warning => printer.warning(&verb, &line),
        }

        if let Some(help) = &d.help {
            printer.info("help", &printer.dim(help));
        }
    }
}
