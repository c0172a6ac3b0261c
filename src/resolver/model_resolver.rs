//! Model inheritance resolution.

use crate::error::{MapError, Result};
use crate::resource_pack::{normalize_location, BlockModel, ResourcePack};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// Resolves model parent chains into flattened models.
pub struct ModelResolver<'a> {
    pack: &'a ResourcePack,
    cache: RefCell<HashMap<String, BlockModel>>,
}

impl<'a> ModelResolver<'a> {
    pub fn new(pack: &'a ResourcePack) -> Self {
        Self {
            pack,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Resolve a model with all inherited textures and elements.
    ///
    /// The returned model has no parent. Its elements come from the nearest
    /// model in the chain that defines any; its textures merge child over parent.
    pub fn resolve(&self, model_location: &str) -> Result<BlockModel> {
        let location = normalize_location(model_location);
        if let Some(cached) = self.cache.borrow().get(&location) {
            return Ok(cached.clone());
        }

        let chain = self.collect_chain(&location)?;
        let resolved = merge_chain(&chain);

        self.cache.borrow_mut().insert(location, resolved.clone());
        Ok(resolved)
    }

    /// Walk parents from the child up, stopping at a `builtin/` parent or a
    /// model without a parent.
    ///
    /// A missing ancestor above a model that already has elements ends the
    /// chain with a warning; below that point it is an error.
    fn collect_chain(&self, location: &str) -> Result<Vec<&'a BlockModel>> {
        let mut chain: Vec<&'a BlockModel> = Vec::new();
        let mut visited = HashSet::new();
        let mut current = Some(location.to_string());

        while let Some(loc) = current {
            if is_builtin(&loc) {
                break;
            }
            if !visited.insert(loc.clone()) {
                return Err(MapError::CircularModel(format!("{} (at {})", location, loc)));
            }
            let Some(model) = self.pack.get_model(&loc) else {
                if chain.iter().any(|m| m.has_elements()) {
                    log::warn!("{}: parent model {} not found, using inherited geometry", location, loc);
                    break;
                }
                return Err(MapError::ResourceNotFound(format!("model {}", loc)));
            };
            chain.push(model);
            current = model.parent.as_deref().map(normalize_location);
        }

        Ok(chain)
    }
}

fn is_builtin(location: &str) -> bool {
    let path = location.split_once(':').map_or(location, |(_, path)| path);
    path.starts_with("builtin/")
}

fn merge_chain(chain: &[&BlockModel]) -> BlockModel {
    let mut merged = BlockModel::default();
    for model in chain.iter().rev() {
        merged
            .textures
            .extend(model.textures.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    if let Some(with_elements) = chain.iter().find(|m| m.has_elements()) {
        merged.elements = with_elements.elements.clone();
    }
    merged
}
