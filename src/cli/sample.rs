use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use clap::Args;

use crate::error::{Result, StampError};
use crate::output::{display_path, plural, Printer};
use crate::types::Colour;

/// Print a palette skeleton from an image's colours
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Image to sample colours from
    #[arg(required = true)]
    pub file: PathBuf,

    /// Maximum number of colours to output
    #[arg(long)]
    pub max: Option<usize>,
}

pub fn run(args: SampleArgs, printer: &Printer) -> Result<()> {
    let path = &args.file;
    let display = display_path(path);

    let img = image::open(path)
        .map_err(|e| StampError::Io {
            path: path.clone(),
            message: e.to_string(),
        })?
        .to_rgba8();

    let mut colours = count_colours(img.pixels().map(|p| Colour::from(*p)));
    if let Some(max) = args.max {
        colours.truncate(max);
    }

    printer.status(
        "Sampled",
        &format!("{} from {}", plural(colours.len(), "colour", "colours"), display),
    );

    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sampled");
    print!("{}", palette_skeleton(name, &colours));

    Ok(())
}

/// Count opaque colours, most frequent first (ties broken by colour value).
fn count_colours(pixels: impl Iterator<Item = Colour>) -> Vec<(Colour, usize)> {
    let mut counts: HashMap<Colour, usize> = HashMap::new();
    for colour in pixels.filter(|c| !c.is_transparent()) {
        *counts.entry(colour).or_insert(0) += 1;
    }

    let mut colours: Vec<(Colour, usize)> = counts.into_iter().collect();
    colours.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.to_rgba().cmp(&b.0.to_rgba())));
    colours
}

/// Render a palette YAML with one `preset-N` key per colour and no objects.
fn palette_skeleton(name: &str, colours: &[(Colour, usize)]) -> String {
    let mut out = format!("name: {}\ncolours:\n", name);
    for (i, (colour, count)) in colours.iter().enumerate() {
        let _ = writeln!(
            out,
            "  preset-{}: \"{}\"  # {}",
            i + 1,
            colour,
            plural(*count, "pixel", "pixels")
        );
    }
    out.push_str("objects: {}\n");
    out
}
