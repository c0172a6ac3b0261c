//! Merging face buffers into tiles, and the rendered-block cache.

use super::face::{FaceBuffer, Pixel};
use super::tile::Tile;
use crate::types::Orientation;
use std::collections::HashMap;
use std::rc::Rc;

/// Merge face buffers in order; a set pixel overwrites whatever is below it.
///
/// Pixels no face sets stay fully transparent.
pub fn composite(faces: &[&FaceBuffer]) -> Tile {
    let mut tile = Tile::blank();
    for face in faces {
        for (x, y, pixel) in face.iter() {
            if let Pixel::Set { rgba, .. } = pixel {
                tile.set(x, y, rgba);
            }
        }
    }
    tile
}

/// The four orientation tiles of one block identifier.
#[derive(Debug, Clone)]
pub struct RenderedBlock {
    pub identifier: String,
    tiles: [Tile; 4],
}

impl RenderedBlock {
    pub fn new(identifier: impl Into<String>, tiles: [Tile; 4]) -> Self {
        Self {
            identifier: identifier.into(),
            tiles,
        }
    }

    pub fn tile(&self, orientation: Orientation) -> &Tile {
        &self.tiles[orientation.index()]
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Orientation, &Tile)> {
        Orientation::ALL.into_iter().zip(self.tiles.iter())
    }

    /// True when every orientation rendered nothing.
    pub fn is_blank(&self) -> bool {
        self.tiles.iter().all(Tile::is_blank)
    }
}

/// Append-only cache of rendered blocks keyed by identifier.
#[derive(Debug, Default)]
pub struct SpriteCache {
    entries: HashMap<String, Rc<RenderedBlock>>,
    order: Vec<String>,
}

impl SpriteCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, identifier: &str) -> Option<Rc<RenderedBlock>> {
        self.entries.get(identifier).cloned()
    }

    /// Insert a block unless its identifier is already present. The cached
    /// entry is returned either way; existing entries are never replaced.
    pub fn insert(&mut self, block: RenderedBlock) -> Rc<RenderedBlock> {
        if let Some(existing) = self.entries.get(&block.identifier) {
            return Rc::clone(existing);
        }
        let identifier = block.identifier.clone();
        let entry = Rc::new(block);
        self.entries.insert(identifier.clone(), Rc::clone(&entry));
        self.order.push(identifier);
        entry
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached blocks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<RenderedBlock>> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }
}
