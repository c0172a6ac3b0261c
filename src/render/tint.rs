//! Biome tinting for grass, foliage and water.
//!
//! Tinted textures are stored grayscale in the pack and multiplied by a
//! biome color when a face carries a `tintindex`.

/// Tint colors for one biome.
#[derive(Debug, Clone, PartialEq)]
pub struct TintColors {
    pub grass: [f32; 3],
    pub foliage: [f32; 3],
    pub water: [f32; 3],
}

impl Default for TintColors {
    fn default() -> Self {
        // Plains
        Self {
            grass: [0.56, 0.74, 0.35],
            foliage: [0.47, 0.66, 0.23],
            water: [0.247, 0.463, 0.894],
        }
    }
}

impl TintColors {
    /// Colors for a biome tag, with or without the `minecraft:` namespace.
    /// Unknown biomes use the plains colors.
    pub fn for_biome(biome: &str) -> Self {
        let mut colors = Self::default();
        let biome = biome.strip_prefix("minecraft:").unwrap_or(biome);

        match biome {
            "swamp" | "mangrove_swamp" => {
                colors.grass = [0.41, 0.55, 0.27];
                colors.foliage = [0.41, 0.55, 0.27];
                colors.water = [0.38, 0.48, 0.27];
            }
            "badlands" | "wooded_badlands" | "eroded_badlands" => {
                colors.grass = [0.56, 0.50, 0.30];
                colors.foliage = [0.62, 0.56, 0.35];
            }
            "jungle" | "bamboo_jungle" | "sparse_jungle" => {
                colors.grass = [0.35, 0.75, 0.15];
                colors.foliage = [0.30, 0.72, 0.20];
            }
            "dark_forest" => {
                colors.grass = [0.31, 0.55, 0.20];
                colors.foliage = [0.31, 0.55, 0.20];
            }
            "snowy_plains" | "snowy_taiga" | "snowy_beach" | "snowy_slopes" => {
                colors.grass = [0.50, 0.70, 0.50];
                colors.foliage = [0.39, 0.61, 0.39];
            }
            "desert" => {
                colors.grass = [0.75, 0.72, 0.45];
                colors.foliage = [0.68, 0.68, 0.40];
            }
            "ocean" | "deep_ocean" | "cold_ocean" | "deep_cold_ocean" => {
                colors.water = [0.24, 0.36, 0.75];
            }
            "warm_ocean" | "lukewarm_ocean" | "deep_lukewarm_ocean" => {
                colors.water = [0.26, 0.53, 0.80];
            }
            "frozen_ocean" | "deep_frozen_ocean" => {
                colors.water = [0.24, 0.30, 0.60];
            }
            _ => {}
        }

        colors
    }
}

/// Looks up the tint for a block by name.
#[derive(Debug, Clone, Default)]
pub struct TintProvider {
    colors: TintColors,
}

impl TintProvider {
    pub fn for_biome(biome: &str) -> Self {
        Self {
            colors: TintColors::for_biome(biome),
        }
    }

    pub fn colors(&self) -> &TintColors {
        &self.colors
    }

    /// Tint for a face of `block_id` (unnamespaced) with the given tint index,
    /// or `None` when the face is drawn as-is.
    pub fn tint_for(&self, block_id: &str, tint_index: i32) -> Option<[f32; 3]> {
        if tint_index < 0 {
            return None;
        }
        match categorize(block_id)? {
            TintCategory::Grass => Some(self.colors.grass),
            TintCategory::Foliage => Some(self.colors.foliage),
            TintCategory::Water => Some(self.colors.water),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TintCategory {
    Grass,
    Foliage,
    Water,
}

fn categorize(block_id: &str) -> Option<TintCategory> {
    if matches!(
        block_id,
        "grass_block" | "grass" | "short_grass" | "tall_grass" | "fern" | "large_fern" | "potted_fern" | "sugar_cane"
    ) {
        return Some(TintCategory::Grass);
    }
    // Azalea, cherry and the fixed-color leaves are not biome tinted
    if (block_id.ends_with("_leaves")
        && !matches!(
            block_id,
            "azalea_leaves" | "flowering_azalea_leaves" | "cherry_leaves" | "spruce_leaves" | "birch_leaves"
        ))
        || block_id == "vine"
    {
        return Some(TintCategory::Foliage);
    }
    if matches!(block_id, "water" | "bubble_column" | "water_cauldron") {
        return Some(TintCategory::Water);
    }
    None
}
