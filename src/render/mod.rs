//! Isometric tile rendering.
//!
//! A block's resolved geometry is drawn once per orientation: every element
//! is rasterized into top, left and right face buffers, which are then
//! composited top first. Rendered blocks are cached by identifier.

pub mod compositor;
pub mod face;
pub mod projection;
pub mod tile;
pub mod tint;

pub use compositor::{composite, RenderedBlock, SpriteCache};
pub use face::{FaceBuffer, FaceKind, Pixel};
pub use projection::{model_to_image, project, Extents};
pub use tile::{Tile, TILE_SIZE};
pub use tint::TintProvider;

use crate::resolver::{GeometryResolver, ModelGeometry};
use crate::resource_pack::ResourcePack;
use crate::types::{BlockType, Orientation};
use std::rc::Rc;

/// Draw resolved geometry for one orientation.
pub fn render_geometry(geometry: &ModelGeometry, orientation: Orientation) -> Tile {
    let mut top = FaceBuffer::new(FaceKind::Top);
    let mut left = FaceBuffer::new(FaceKind::Left);
    let mut right = FaceBuffer::new(FaceKind::Right);
    let total = orientation.after(geometry.rotation);

    for element in &geometry.elements {
        let extents = Extents::of(element);
        face::rasterize_top(&mut top, &extents, total, &geometry.top);
        face::rasterize_left(&mut left, &extents, total, &geometry.side);
        face::rasterize_right(&mut right, &extents, total, &geometry.side);
    }

    composite(&[&top, &left, &right])
}

/// Renders block types to tiles against one resource pack.
pub struct SpriteRenderer<'a> {
    resolver: GeometryResolver<'a>,
    tints: TintProvider,
    cache: SpriteCache,
}

impl<'a> SpriteRenderer<'a> {
    pub fn new(pack: &'a ResourcePack, biome: &str) -> Self {
        Self {
            resolver: GeometryResolver::new(pack),
            tints: TintProvider::for_biome(biome),
            cache: SpriteCache::new(),
        }
    }

    /// Render all four orientations of a block, or return the cached result
    /// for its identifier without resolving geometry again.
    pub fn render(&mut self, block: &BlockType) -> Rc<RenderedBlock> {
        let identifier = self.resolver.identifier(block);
        if let Some(cached) = self.cache.get(&identifier) {
            return cached;
        }

        let mut geometry = self.resolver.resolve(block);
        self.apply_tint(block, &mut geometry);

        let tiles = Orientation::ALL.map(|orientation| render_geometry(&geometry, orientation));
        log::debug!("rendered {}", identifier);
        self.cache.insert(RenderedBlock::new(identifier, tiles))
    }

    fn apply_tint(&self, block: &BlockType, geometry: &mut ModelGeometry) {
        if let Some(tint) = self.tints.tint_for(block.block_id(), geometry.top_tint) {
            geometry.top = geometry.top.tinted(tint);
        }
        if let Some(tint) = self.tints.tint_for(block.block_id(), geometry.side_tint) {
            geometry.side = geometry.side.tinted(tint);
        }
    }

    pub fn cache(&self) -> &SpriteCache {
        &self.cache
    }

    /// Number of times geometry was resolved, i.e. cache misses.
    pub fn resolution_count(&self) -> usize {
        self.resolver.resolution_count()
    }
}
