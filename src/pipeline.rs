//! End-to-end world rendering.
//!
//! Regions are visited nearest-first from the viewing corner, then the chunks
//! of each region in the same order, then sections bottom to top. Each
//! distinct block state met along the way is rendered once and its tiles are
//! written out.

use crate::config::MapConfig;
use crate::error::Result;
use crate::export::png::write_block;
use crate::render::SpriteRenderer;
use crate::resource_pack::{loader, ResourcePack};
use crate::schedule;
use crate::types::ViewAngle;
use crate::world::{list_regions, Chunk, ChunkCoord, RegionCoord, RegionFile};
use std::path::{Path, PathBuf};

/// Counts gathered during a render.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub regions: usize,
    pub chunks: usize,
    pub sections: usize,
    /// Chunks or regions that failed to decode and were skipped.
    pub skipped: usize,
    /// Distinct block identifiers rendered.
    pub blocks: usize,
    pub tiles_written: usize,
}

/// Validate the configuration, load the pack and render the world.
pub fn run(config: &MapConfig) -> Result<RenderSummary> {
    config.validate()?;
    let pack = loader::load_from_path(&config.resource_pack)?;
    log::info!(
        "loaded resource pack {}: {} blockstates, {} models, {} textures",
        config.resource_pack.display(),
        pack.blockstate_count(),
        pack.model_count(),
        pack.texture_count()
    );
    render_world(config, &pack)
}

/// Region files of a world in the order they are rendered for `angle`.
pub fn scheduled_regions(world_dir: &Path, angle: ViewAngle) -> Result<Vec<(RegionCoord, PathBuf)>> {
    Ok(schedule::order(list_regions(world_dir)?, angle))
}

/// Render every block state found in the world to `config.output_dir`.
pub fn render_world(config: &MapConfig, pack: &ResourcePack) -> Result<RenderSummary> {
    let mut renderer = SpriteRenderer::new(pack, &config.biome);
    let mut summary = RenderSummary::default();

    let regions = scheduled_regions(&config.world_dir, config.view_angle)?;
    log::info!("rendering {} regions viewed from {}", regions.len(), config.view_angle);

    for (coord, path) in regions {
        let region = match RegionFile::open(&path) {
            Ok(region) => region,
            Err(e) => {
                log::warn!("skipping region {}: {}", coord, e);
                summary.skipped += 1;
                continue;
            }
        };
        summary.regions += 1;
        log::info!("region {}", coord);

        for chunk_coord in schedule::order(region.chunk_coords(), config.view_angle) {
            let (local_x, local_z) = chunk_coord.local();
            let chunk = match region.read_chunk(local_x, local_z) {
                Ok(Some(chunk)) => chunk,
                Ok(None) => continue,
                Err(e) => {
                    log::warn!("skipping chunk {} in {}: {}", chunk_coord, coord, e);
                    summary.skipped += 1;
                    continue;
                }
            };
            summary.chunks += 1;
            render_chunk(&chunk, config, &mut renderer, &mut summary)?;
        }
    }

    log::info!(
        "rendered {} block states from {} chunks in {} regions ({} skipped), {} tiles written",
        summary.blocks,
        summary.chunks,
        summary.regions,
        summary.skipped,
        summary.tiles_written
    );
    Ok(summary)
}

fn render_chunk(
    chunk: &Chunk,
    config: &MapConfig,
    renderer: &mut SpriteRenderer<'_>,
    summary: &mut RenderSummary,
) -> Result<()> {
    for section in chunk.sections_ascending() {
        if section.is_all_air() {
            continue;
        }
        let grid = section.block_grid(config.packing);
        if !grid.is_decodable() {
            log::debug!("chunk {} section Y={} has no decodable blocks", chunk.coord, section.y);
            continue;
        }
        summary.sections += 1;
        log::debug!("chunk {} section Y={}", chunk.coord, section.y);

        for index in grid.unique_indices() {
            let Some(block) = section.palette.get(index) else {
                continue;
            };
            if block.is_air() {
                continue;
            }
            let before = renderer.cache().len();
            let rendered = renderer.render(block);
            if renderer.cache().len() > before {
                summary.blocks += 1;
                summary.tiles_written += write_block(&config.output_dir, &rendered)?.len();
            }
        }
    }
    Ok(())
}

/// Decode one chunk of a region file, for inspection tools.
pub fn read_single_chunk(region_path: &Path, chunk_x: i32, chunk_z: i32) -> Result<Option<Chunk>> {
    let region = RegionFile::open(region_path)?;
    region.read_chunk(chunk_x, chunk_z)
}

/// Read one chunk of a region file as a raw NBT tree, together with its
/// world chunk position.
pub fn read_single_chunk_nbt(
    region_path: &Path,
    chunk_x: i32,
    chunk_z: i32,
) -> Result<Option<(ChunkCoord, fastnbt::Value)>> {
    let region = RegionFile::open(region_path)?;
    let coord = region.coord().chunk(chunk_x, chunk_z);
    Ok(region.read_chunk_nbt(chunk_x, chunk_z)?.map(|value| (coord, value)))
}
