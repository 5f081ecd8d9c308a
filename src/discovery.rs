//! Input discovery for batch builds.
//!
//! Expands files and directories into the list of source images to stamp.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::Manifest;

/// Extensions treated as source images.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "bmp", "tga", "gif", "jpg", "jpeg"];

/// Check whether a path looks like a source image.
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

/// A source image and the level name derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub path: PathBuf,

    /// Output name without extension. Images found under a directory input
    /// keep their relative subdirectories (`act2/arena`); explicit files use
    /// their stem.
    pub name: String,
}

impl SourceImage {
    fn from_file(path: &Path) -> Self {
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("level")
            .to_string();
        Self {
            path: path.to_path_buf(),
            name,
        }
    }

    fn under_root(path: PathBuf, root: &Path) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(&path).with_extension("");
        let name = relative
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .collect::<Vec<_>>()
            .join("/");
        Self { path, name }
    }
}

/// Expand inputs into source images.
///
/// Files are kept as given, whatever their extension (a bad file still gets
/// the palette's fallback texture). Directories are walked recursively for
/// image files, skipping manifest excludes and anything under `skip_dir`
/// (the build's own output). Results of each directory are sorted;
/// duplicates are dropped.
pub fn collect_images(
    inputs: &[PathBuf],
    manifest: &Manifest,
    skip_dir: Option<&Path>,
) -> Vec<SourceImage> {
    let skip = skip_dir.and_then(|d| d.canonicalize().ok());
    let mut images: Vec<SourceImage> = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .follow_links(true)
                .into_iter()
                .filter_entry(|e| {
                    !is_skipped_dir(e.path(), e.file_type().is_dir(), skip.as_deref())
                })
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .filter(|p| is_image(p) && !manifest.is_excluded(p))
                .collect();
            found.sort();
            images.extend(found.into_iter().map(|p| SourceImage::under_root(p, input)));
        } else {
            images.push(SourceImage::from_file(input));
        }
    }

    let mut seen = std::collections::HashSet::new();
    images.retain(|image| seen.insert(image.path.clone()));
    images
}

fn is_skipped_dir(path: &Path, is_dir: bool, skip: Option<&Path>) -> bool {
    match skip {
        Some(skip) if is_dir => path.canonicalize().is_ok_and(|p| p == skip),
        _ => false,
    }
}
