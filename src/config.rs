//! Run configuration.

use crate::error::{MapError, Result};
use crate::types::ViewAngle;
use crate::world::SectionPacking;
use std::path::{Path, PathBuf};

/// Configuration for a map render.
///
/// Built once, validated with [`MapConfig::validate`] and then passed by
/// reference to everything that needs it.
#[derive(Debug, Clone)]
pub struct MapConfig {
    /// Resource pack archive or extracted directory.
    pub resource_pack: PathBuf,
    /// Directory that receives the rendered tiles.
    pub output_dir: PathBuf,
    /// World save directory (containing `region/`) or a directory of `.mca` files.
    pub world_dir: PathBuf,
    pub view_angle: ViewAngle,
    /// Biome used for grass, foliage and water tints.
    pub biome: String,
    pub packing: SectionPacking,
}

impl MapConfig {
    pub fn new(resource_pack: impl Into<PathBuf>, world_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            resource_pack: resource_pack.into(),
            output_dir: output_dir.into(),
            world_dir: world_dir.into(),
            view_angle: ViewAngle::SouthWest,
            biome: "plains".to_string(),
            packing: SectionPacking::default(),
        }
    }

    pub fn with_view_angle(mut self, view_angle: ViewAngle) -> Self {
        self.view_angle = view_angle;
        self
    }

    pub fn with_biome(mut self, biome: impl Into<String>) -> Self {
        self.biome = biome.into();
        self
    }

    pub fn with_packing(mut self, packing: SectionPacking) -> Self {
        self.packing = packing;
        self
    }

    /// Check that every input path is readable and the output directory is
    /// usable. Creates the output directory if it does not exist.
    pub fn validate(&self) -> Result<()> {
        require_exists(&self.resource_pack, "resource pack")?;
        require_dir(&self.world_dir, "world directory")?;
        if self.biome.trim().is_empty() {
            return Err(MapError::Config("biome must not be empty".to_string()));
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(MapError::Config(format!(
                "output path {} is not a directory",
                self.output_dir.display()
            )));
        }
        std::fs::create_dir_all(&self.output_dir).map_err(|e| {
            MapError::Config(format!(
                "cannot create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })
    }
}

fn require_exists(path: &Path, what: &str) -> Result<()> {
    std::fs::metadata(path)
        .map(|_| ())
        .map_err(|e| MapError::Config(format!("{} {} is not readable: {}", what, path.display(), e)))
}

fn require_dir(path: &Path, what: &str) -> Result<()> {
    std::fs::read_dir(path)
        .map(|_| ())
        .map_err(|e| MapError::Config(format!("{} {} is not readable: {}", what, path.display(), e)))
}
