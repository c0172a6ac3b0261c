//! Chunk NBT decoding.
//!
//! Only the fields needed to rebuild block grids are read: the chunk position
//! and, per section, `Y` plus the `block_states` palette and packed data.

use super::region::ChunkCoord;
use super::section::{Palette, Section};
use crate::error::Result;
use crate::types::BlockType;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
struct ChunkNbt {
    #[serde(rename = "xPos", default)]
    x_pos: i32,
    #[serde(rename = "zPos", default)]
    z_pos: i32,
    #[serde(rename = "yPos", default)]
    y_pos: Option<i32>,
    #[serde(default)]
    sections: Vec<SectionNbt>,
}

#[derive(Debug, Deserialize)]
struct SectionNbt {
    #[serde(rename = "Y")]
    y: i8,
    #[serde(default)]
    block_states: Option<BlockStatesNbt>,
}

#[derive(Debug, Deserialize)]
struct BlockStatesNbt {
    #[serde(default)]
    palette: Vec<PaletteEntryNbt>,
    #[serde(default)]
    data: Option<fastnbt::LongArray>,
}

#[derive(Debug, Deserialize)]
struct PaletteEntryNbt {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Properties", default)]
    properties: HashMap<String, String>,
}

/// A decoded chunk column.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub coord: ChunkCoord,
    /// Lowest section index, when the chunk records it.
    pub min_section_y: Option<i32>,
    /// Sections in file order.
    pub sections: Vec<Section>,
}

impl Chunk {
    /// Decode an uncompressed chunk NBT payload.
    pub fn from_nbt_bytes(data: &[u8]) -> Result<Self> {
        let nbt: ChunkNbt = fastnbt::from_bytes(data)?;

        let sections = nbt
            .sections
            .into_iter()
            .map(|section| {
                let (palette, data) = match section.block_states {
                    Some(states) => {
                        let palette = states
                            .palette
                            .into_iter()
                            .map(|entry| BlockType {
                                name: entry.name,
                                properties: entry.properties,
                            })
                            .collect();
                        (Palette::new(palette), states.data.map(|d| d.to_vec()))
                    }
                    None => (Palette::default(), None),
                };
                Section {
                    y: section.y,
                    palette,
                    data,
                }
            })
            .collect();

        Ok(Self {
            coord: ChunkCoord::new(nbt.x_pos, nbt.z_pos),
            min_section_y: nbt.y_pos,
            sections,
        })
    }

    /// Sections ordered bottom to top. Sections below `min_section_y` lie
    /// outside the world and are left out.
    pub fn sections_ascending(&self) -> Vec<&Section> {
        let mut sections: Vec<&Section> = self
            .sections
            .iter()
            .filter(|s| self.min_section_y.map_or(true, |min| i32::from(s.y) >= min))
            .collect();
        sections.sort_by_key(|s| s.y);
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::packed::SectionPacking;
    use fastnbt::{LongArray, Value};

    fn compound(entries: Vec<(&str, Value)>) -> Value {
        Value::Compound(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    fn palette_entry(name: &str, props: &[(&str, &str)]) -> Value {
        let mut entries = vec![("Name", Value::String(name.to_string()))];
        if !props.is_empty() {
            entries.push((
                "Properties",
                compound(
                    props
                        .iter()
                        .map(|(k, v)| (*k, Value::String(v.to_string())))
                        .collect(),
                ),
            ));
        }
        compound(entries)
    }

    #[test]
    fn test_decode_chunk_sections() {
        // 2-entry palette, 1 bit per entry: every other block is stone.
        let data = vec![0x5555_5555_5555_5555i64; 64];
        let chunk_value = compound(vec![
            ("xPos", Value::Int(3)),
            ("zPos", Value::Int(-2)),
            ("yPos", Value::Int(-4)),
            (
                "sections",
                Value::List(vec![
                    compound(vec![
                        ("Y", Value::Byte(0)),
                        (
                            "block_states",
                            compound(vec![
                                (
                                    "palette",
                                    Value::List(vec![
                                        palette_entry("minecraft:air", &[]),
                                        palette_entry(
                                            "minecraft:oak_log",
                                            &[("axis", "y")],
                                        ),
                                    ]),
                                ),
                                ("data", Value::LongArray(LongArray::new(data))),
                            ]),
                        ),
                    ]),
                    compound(vec![
                        ("Y", Value::Byte(-1)),
                        (
                            "block_states",
                            compound(vec![(
                                "palette",
                                Value::List(vec![palette_entry("minecraft:stone", &[])]),
                            )]),
                        ),
                    ]),
                ]),
            ),
        ]);
        let bytes = fastnbt::to_bytes(&chunk_value).unwrap();

        let chunk = Chunk::from_nbt_bytes(&bytes).unwrap();
        assert_eq!(chunk.coord, ChunkCoord::new(3, -2));
        assert_eq!(chunk.min_section_y, Some(-4));
        assert_eq!(chunk.sections.len(), 2);

        let log_section = &chunk.sections[0];
        assert_eq!(log_section.palette.len(), 2);
        assert_eq!(
            log_section.palette.get(1).unwrap().properties.get("axis"),
            Some(&"y".to_string())
        );
        let grid = log_section.block_grid(SectionPacking::Compact);
        assert_eq!(grid.get(0, 0, 0), 1);
        assert_eq!(grid.get(1, 0, 0), 0);

        let stone_section = &chunk.sections[1];
        assert!(stone_section.data.is_none());
        assert_eq!(stone_section.block_grid(SectionPacking::Compact).unique_indices(), vec![0]);

        let ascending: Vec<i8> = chunk.sections_ascending().iter().map(|s| s.y).collect();
        assert_eq!(ascending, vec![-1, 0]);
    }

    #[test]
    fn test_sections_below_world_floor_are_dropped() {
        let section = |y: i8| {
            compound(vec![
                ("Y", Value::Byte(y)),
                (
                    "block_states",
                    compound(vec![("palette", Value::List(vec![palette_entry("minecraft:air", &[])]))]),
                ),
            ])
        };
        let chunk_value = compound(vec![
            ("xPos", Value::Int(0)),
            ("zPos", Value::Int(0)),
            ("yPos", Value::Int(-4)),
            ("sections", Value::List(vec![section(-5), section(-4), section(3)])),
        ]);
        let chunk = Chunk::from_nbt_bytes(&fastnbt::to_bytes(&chunk_value).unwrap()).unwrap();

        let ascending: Vec<i8> = chunk.sections_ascending().iter().map(|s| s.y).collect();
        assert_eq!(ascending, vec![-4, 3]);
    }

    #[test]
    fn test_garbage_is_an_error() {
        assert!(Chunk::from_nbt_bytes(&[0xFF, 0x00, 0x13]).is_err());
    }
}
