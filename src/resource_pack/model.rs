//! Block model parsing.
//!
//! Block models describe geometry as cuboid elements in a 0-16 model space.
//! Only the fields the tile renderer uses are read; rotations, UVs and
//! display transforms are ignored.

use crate::types::Direction;
use serde::Deserialize;
use std::collections::HashMap;

/// A parsed block model from models/*.json.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlockModel {
    /// Parent model to inherit from.
    #[serde(default)]
    pub parent: Option<String>,

    /// Texture variable definitions (e.g., "all" -> "block/stone").
    #[serde(default)]
    pub textures: HashMap<String, String>,

    /// Model elements (cuboids).
    #[serde(default)]
    pub elements: Vec<ModelElement>,
}

impl BlockModel {
    /// Check if this model has its own elements (not inherited).
    pub fn has_elements(&self) -> bool {
        !self.elements.is_empty()
    }

    /// Follow `#variable` references through this model's texture map.
    ///
    /// Returns the final texture location, or `None` when a variable is
    /// undefined or the chain loops.
    pub fn resolve_texture(&self, reference: &str) -> Option<String> {
        let mut current = reference;
        for _ in 0..=self.textures.len() {
            match current.strip_prefix('#') {
                Some(key) => current = self.textures.get(key)?,
                None => return Some(current.to_string()),
            }
        }
        None
    }
}

/// A cuboid element within a model.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelElement {
    /// Minimum corner (0-16 range).
    pub from: [f32; 3],
    /// Maximum corner (0-16 range).
    pub to: [f32; 3],
    /// Face definitions.
    #[serde(default)]
    pub faces: HashMap<Direction, ModelFace>,
}

impl ModelElement {
    pub fn new(from: [f32; 3], to: [f32; 3]) -> Self {
        Self {
            from,
            to,
            faces: HashMap::new(),
        }
    }

    /// Corners reordered so that `from <= to` on every axis.
    pub fn normalized(&self) -> ([f32; 3], [f32; 3]) {
        let mut lo = [0.0; 3];
        let mut hi = [0.0; 3];
        for axis in 0..3 {
            lo[axis] = self.from[axis].min(self.to[axis]);
            hi[axis] = self.from[axis].max(self.to[axis]);
        }
        (lo, hi)
    }
}

/// A face of a model element.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelFace {
    /// Texture reference (e.g., "#side" or "block/stone").
    pub texture: String,
    /// Tint index for biome coloring (-1 = no tint).
    #[serde(default = "default_tint_index")]
    pub tintindex: i32,
}

fn default_tint_index() -> i32 {
    -1
}

impl ModelFace {
    pub fn has_tint(&self) -> bool {
        self.tintindex >= 0
    }
}
