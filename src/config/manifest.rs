//! Project manifest (`levelstamp.yaml`).
//!
//! Every field is optional; command-line flags override what is set here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StampError};
use crate::stamp::StampOptions;

/// File name looked up in the working directory.
pub const MANIFEST_FILE: &str = "levelstamp.yaml";

/// Project manifest loaded from levelstamp.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Palette file used when `--palette` is not given.
    pub palette: Option<PathBuf>,

    /// Per-channel colour tolerance.
    pub tolerance: Option<u32>,

    /// World-space size of one cell.
    pub world_unit: Option<u32>,

    /// Output directory for level plans.
    pub output: PathBuf,

    /// Images or directories to build when no inputs are given.
    pub sources: Vec<PathBuf>,

    /// Patterns to skip while scanning directories.
    pub excludes: Vec<String>,
}

fn default_output() -> PathBuf {
    PathBuf::from("levels")
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            palette: None,
            tolerance: None,
            world_unit: None,
            output: default_output(),
            sources: vec![],
            excludes: vec![],
        }
    }
}

impl Manifest {
    /// Load manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| StampError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Load `levelstamp.yaml` from `dir` if present, defaults otherwise.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| StampError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILE)),
        })
    }

    /// Stamping options from the manifest, with explicit overrides on top.
    pub fn stamp_options(&self, tolerance: Option<u32>, world_unit: Option<u32>) -> StampOptions {
        let defaults = StampOptions::default();
        StampOptions {
            tolerance: tolerance.or(self.tolerance).unwrap_or(defaults.tolerance),
            world_unit: world_unit.or(self.world_unit).unwrap_or(defaults.world_unit),
        }
    }

    /// Source paths, defaulting to the current directory.
    pub fn effective_sources(&self) -> Vec<PathBuf> {
        if self.sources.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.sources.clone()
        }
    }

    /// Check a path against the exclude patterns.
    ///
    /// `*.ext` matches a file-name suffix, `name/` matches any directory
    /// component, anything else matches a path component exactly.
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.excludes.iter().any(|pattern| {
            if let Some(suffix) = pattern.strip_prefix('*') {
                return path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(suffix));
            }

            let name = pattern.trim_end_matches('/');
            let components: Vec<&str> = path
                .components()
                .filter_map(|c| c.as_os_str().to_str())
                .collect();

            if pattern.ends_with('/') {
                // Directory components only, not the file itself
                components
                    .split_last()
                    .is_some_and(|(_, dirs)| dirs.contains(&name))
            } else {
                components.contains(&name)
            }
        })
    }
}
