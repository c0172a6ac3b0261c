//! PNG export of rendered tiles.
//!
//! Tiles are written as `<output>/<orientation>/<identifier>.png`, with the
//! identifier percent-encoded so that it is a single safe file name and no two
//! identifiers share one.

use crate::error::{MapError, Result};
use crate::render::{RenderedBlock, Tile, TILE_SIZE};
use crate::types::Orientation;
use image::ImageEncoder;
use std::path::{Path, PathBuf};

/// Encode a tile as an RGBA PNG.
pub fn encode_png(tile: &Tile) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(std::io::Cursor::new(&mut bytes));

    encoder
        .write_image(
            tile.pixels(),
            TILE_SIZE as u32,
            TILE_SIZE as u32,
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| MapError::Export(format!("failed to encode PNG: {}", e)))?;

    Ok(bytes)
}

/// Turn a block identifier into a file stem.
///
/// Characters outside `[A-Za-z0-9_.=,-]` and the brackets are written as
/// `%XX` per UTF-8 byte, so `minecraft:oak_stairs[facing=east,half=bottom]`
/// becomes `minecraft%3Aoak_stairs[facing=east,half=bottom]`. The mapping is
/// one-to-one.
pub fn sanitize_identifier(identifier: &str) -> String {
    let mut out = String::with_capacity(identifier.len() + 4);
    for c in identifier.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '=' | ',' | '[' | ']') {
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            for byte in c.encode_utf8(&mut buf).bytes() {
                out.push_str(&format!("%{:02X}", byte));
            }
        }
    }
    out
}

/// Where the tile for `identifier` in `orientation` is written.
pub fn tile_path(output_dir: &Path, orientation: Orientation, identifier: &str) -> PathBuf {
    output_dir
        .join(orientation.to_string())
        .join(format!("{}.png", sanitize_identifier(identifier)))
}

/// Write all four orientation tiles of a block. Returns the written paths.
pub fn write_block(output_dir: &Path, block: &RenderedBlock) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(4);
    for (orientation, tile) in block.tiles() {
        let path = tile_path(output_dir, orientation, &block.identifier);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, encode_png(tile)?)?;
        written.push(path);
    }
    log::debug!("wrote {} tiles for {}", written.len(), block.identifier);
    Ok(written)
}
