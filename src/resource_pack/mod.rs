//! Resource pack loading and parsing.
//!
//! A pack supplies the blockstate definitions, block models and textures that
//! the tile renderer consumes. Packs load from a ZIP archive (a game jar or a
//! resource pack zip) or from an extracted directory.

pub mod blockstate;
pub mod extract;
pub mod loader;
pub mod model;
pub mod texture;

pub use blockstate::{BlockstateDefinition, ModelVariant, MultipartCase, MultipartCondition};
pub use model::{BlockModel, ModelElement, ModelFace};
pub use texture::TextureData;

use std::collections::HashMap;

/// A loaded resource pack, keyed by full resource location
/// (e.g., "minecraft:block/stone").
#[derive(Debug, Default, Clone)]
pub struct ResourcePack {
    blockstates: HashMap<String, BlockstateDefinition>,
    models: HashMap<String, BlockModel>,
    textures: HashMap<String, TextureData>,
}

impl ResourcePack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a blockstate definition by block name (e.g., "minecraft:stone").
    pub fn get_blockstate(&self, resource_location: &str) -> Option<&BlockstateDefinition> {
        self.blockstates.get(&normalize_location(resource_location))
    }

    /// Get a model by resource location (e.g., "minecraft:block/stone").
    pub fn get_model(&self, resource_location: &str) -> Option<&BlockModel> {
        self.models.get(&normalize_location(resource_location))
    }

    /// Get a texture by resource location (e.g., "minecraft:block/stone").
    pub fn get_texture(&self, resource_location: &str) -> Option<&TextureData> {
        self.textures.get(&normalize_location(resource_location))
    }

    pub fn add_blockstate(&mut self, namespace: &str, block_id: &str, definition: BlockstateDefinition) {
        self.blockstates
            .insert(format!("{}:{}", namespace, block_id), definition);
    }

    pub fn add_model(&mut self, namespace: &str, model_path: &str, model: BlockModel) {
        self.models.insert(format!("{}:{}", namespace, model_path), model);
    }

    pub fn add_texture(&mut self, namespace: &str, texture_path: &str, texture: TextureData) {
        self.textures
            .insert(format!("{}:{}", namespace, texture_path), texture);
    }

    pub fn blockstate_count(&self) -> usize {
        self.blockstates.len()
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Get all namespaces in the resource pack.
    pub fn namespaces(&self) -> Vec<&str> {
        let mut namespaces: Vec<&str> = self
            .blockstates
            .keys()
            .chain(self.models.keys())
            .chain(self.textures.keys())
            .filter_map(|key| key.split_once(':').map(|(ns, _)| ns))
            .collect();
        namespaces.sort_unstable();
        namespaces.dedup();
        namespaces
    }
}

/// Add the default "minecraft" namespace when a location has none.
/// "block/stone" -> "minecraft:block/stone"
pub fn normalize_location(resource_location: &str) -> String {
    if resource_location.contains(':') {
        resource_location.to_string()
    } else {
        format!("minecraft:{}", resource_location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_location() {
        assert_eq!(normalize_location("minecraft:block/stone"), "minecraft:block/stone");
        assert_eq!(normalize_location("mymod:block/custom"), "mymod:block/custom");
        assert_eq!(normalize_location("block/stone"), "minecraft:block/stone");
    }

    #[test]
    fn test_lookup_with_and_without_namespace() {
        let mut pack = ResourcePack::new();
        pack.add_model("minecraft", "block/stone", BlockModel::default());
        pack.add_texture("mymod", "block/ore", TextureData::placeholder());

        assert!(pack.get_model("block/stone").is_some());
        assert!(pack.get_model("minecraft:block/stone").is_some());
        assert!(pack.get_texture("block/ore").is_none());
        assert!(pack.get_texture("mymod:block/ore").is_some());
        assert_eq!(pack.namespaces(), vec!["minecraft", "mymod"]);
        assert_eq!(pack.model_count(), 1);
        assert_eq!(pack.texture_count(), 1);
    }
}
