//! Plain-text dumps of decoded sections and raw chunk NBT, for inspecting
//! world data.

use crate::error::{MapError, Result};
use crate::world::{BlockGrid, Chunk, ChunkCoord, Palette, SectionPacking, SECTION_SIZE};
use fastnbt::Value;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Column width for one block name.
const CELL_WIDTH: usize = 32;

/// Format a decoded section as one table per layer, rows along z and
/// columns along x.
pub fn format_section(grid: &BlockGrid, palette: &Palette) -> std::result::Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Section printout:")?;
    for y in 0..SECTION_SIZE {
        writeln!(out, "Y={}:", y)?;
        for z in 0..SECTION_SIZE {
            for x in 0..SECTION_SIZE {
                let name = palette
                    .get(grid.get(x, y, z))
                    .map_or_else(|| "unknown".to_string(), |block| block.to_string());
                write!(out, "{:<width$.width$} ", name, width = CELL_WIDTH)?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }
    Ok(out)
}

/// Write one dump file per decodable section of a chunk, named
/// `y<Y>-c.<x>.<z>.txt`. Returns the written paths.
pub fn dump_chunk(chunk: &Chunk, packing: SectionPacking, output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    for section in chunk.sections_ascending() {
        let grid = section.block_grid(packing);
        if !grid.is_decodable() {
            log::info!("chunk {} section Y={} has no blocks", chunk.coord, section.y);
            continue;
        }

        let text = format_section(&grid, &section.palette)
            .map_err(|e| MapError::Export(format!("failed to format section: {}", e)))?;
        let path = output_dir.join(format!("y{}-c.{}.{}.txt", section.y, chunk.coord.x, chunk.coord.z));
        std::fs::write(&path, text)?;
        written.push(path);
    }
    Ok(written)
}

/// Format an NBT tree, one tag per line, children indented under their
/// compound or list. Compound keys are sorted; arrays print their length only.
pub fn format_nbt(root: &Value) -> std::result::Result<String, std::fmt::Error> {
    let mut out = String::new();
    match root {
        Value::Compound(entries) => write_entries(&mut out, entries, 0)?,
        other => write_tag(&mut out, "", other, 0)?,
    }
    Ok(out)
}

fn write_entries(
    out: &mut String,
    entries: &std::collections::HashMap<String, Value>,
    depth: usize,
) -> std::fmt::Result {
    let mut keys: Vec<&String> = entries.keys().collect();
    keys.sort();
    for key in keys {
        write_tag(out, key, &entries[key], depth)?;
    }
    Ok(())
}

fn write_tag(out: &mut String, name: &str, value: &Value, depth: usize) -> std::fmt::Result {
    write!(out, "{:indent$}{}", "", name, indent = depth * 2)?;
    match value {
        Value::Byte(v) => writeln!(out, " (byte) = {}", v),
        Value::Short(v) => writeln!(out, " (short) = {}", v),
        Value::Int(v) => writeln!(out, " (int) = {}", v),
        Value::Long(v) => writeln!(out, " (long) = {}", v),
        Value::Float(v) => writeln!(out, " (float) = {}", v),
        Value::Double(v) => writeln!(out, " (double) = {}", v),
        Value::String(v) => writeln!(out, " (string) = \"{}\"", v),
        Value::ByteArray(v) => writeln!(out, " (byte array, {} values)", v.len()),
        Value::IntArray(v) => writeln!(out, " (int array, {} values)", v.len()),
        Value::LongArray(v) => writeln!(out, " (long array, {} values)", v.len()),
        Value::List(items) => {
            writeln!(out, " (list, {} items)", items.len())?;
            for (i, item) in items.iter().enumerate() {
                write_tag(out, &format!("[{}]", i), item, depth + 1)?;
            }
            Ok(())
        }
        Value::Compound(entries) => {
            writeln!(out, " (compound, {} entries)", entries.len())?;
            write_entries(out, entries, depth + 1)
        }
    }
}

/// Write the NBT tree of a chunk to `c.<x>.<z>.nbt.txt`.
pub fn dump_nbt(coord: ChunkCoord, root: &Value, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let text = format_nbt(root).map_err(|e| MapError::Export(format!("failed to format NBT: {}", e)))?;
    let path = output_dir.join(format!("c.{}.{}.nbt.txt", coord.x, coord.z));
    std::fs::write(&path, text)?;
    Ok(path)
}
