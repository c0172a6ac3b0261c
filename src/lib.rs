//! # voxel-isomap
//!
//! Renders the block types of a voxel world save into isometric 16x16 tiles,
//! one per block state and viewing orientation, for compositing into a map.
//!
//! ## Overview
//!
//! - [`world`] reads region files, decodes chunk NBT and unpacks each
//!   section's palette indices into a 16x16x16 grid.
//! - [`resource_pack`] loads blockstates, models and textures from a ZIP
//!   archive or an extracted directory.
//! - [`resolver`] turns a block state into cuboid geometry and its top and
//!   side textures.
//! - [`render`] projects that geometry into tiles and caches the result per
//!   block identifier.
//! - [`schedule`] orders regions and chunks by distance from the viewing
//!   corner.
//! - [`pipeline`] runs all of the above over a world directory.
//!
//! ## Quick Start
//!
//! ```ignore
//! use voxel_isomap::{load_resource_pack, BlockType, SpriteRenderer, Orientation};
//!
//! let pack = load_resource_pack("path/to/client.jar")?;
//! let mut renderer = SpriteRenderer::new(&pack, "plains");
//!
//! let block = BlockType::new("minecraft:oak_stairs").with_property("facing", "east");
//! let rendered = renderer.render(&block);
//! let png = voxel_isomap::export::encode_png(rendered.tile(Orientation::R0))?;
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod render;
pub mod resolver;
pub mod resource_pack;
pub mod schedule;
pub mod types;
pub mod world;

pub use config::MapConfig;
pub use error::{MapError, Result};
pub use pipeline::{render_world, run, RenderSummary};
pub use render::{RenderedBlock, SpriteRenderer, Tile};
pub use resolver::{GeometryResolver, ModelGeometry};
pub use resource_pack::{BlockModel, BlockstateDefinition, ModelElement, ResourcePack};
pub use types::{BlockType, Direction, Orientation, ViewAngle};
pub use world::{BlockGrid, Chunk, PackedIntegerArray, RegionFile, SectionPacking};

/// Load a resource pack from a file path (ZIP or directory).
pub fn load_resource_pack<P: AsRef<std::path::Path>>(path: P) -> Result<ResourcePack> {
    resource_pack::loader::load_from_path(path)
}

/// Load a resource pack from ZIP bytes.
pub fn load_resource_pack_from_bytes(data: &[u8]) -> Result<ResourcePack> {
    resource_pack::loader::load_from_bytes(data)
}
