//! Chunk sections: palettes and decoded 16x16x16 block grids.

use super::packed::{PackedIntegerArray, SectionPacking};
use crate::types::BlockType;

/// Edge length of a section.
pub const SECTION_SIZE: usize = 16;
/// Number of blocks in a section.
pub const BLOCKS_PER_SECTION: usize = SECTION_SIZE * SECTION_SIZE * SECTION_SIZE;

/// Per-section lookup table from small ids to block descriptors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    entries: Vec<BlockType>,
}

impl Palette {
    pub fn new(entries: Vec<BlockType>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an index, falling back to entry 0 when out of range.
    pub fn get(&self, index: u16) -> Option<&BlockType> {
        self.entries
            .get(index as usize)
            .or_else(|| self.entries.first())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BlockType> {
        self.entries.iter()
    }
}

/// Palette indices of one section, addressed by `(x, y, z)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockGrid {
    indices: Vec<u16>,
    decodable: bool,
}

impl BlockGrid {
    /// All-zero grid with no decodable blocks.
    pub fn empty() -> Self {
        Self {
            indices: vec![0; BLOCKS_PER_SECTION],
            decodable: false,
        }
    }

    /// Grid where every cell holds the same palette index.
    pub fn uniform(index: u16) -> Self {
        Self {
            indices: vec![index; BLOCKS_PER_SECTION],
            decodable: true,
        }
    }

    /// Decode a packed index array into a grid.
    ///
    /// A zero palette size or absent data leaves the grid empty. Decoded
    /// indices outside the palette are clamped to 0.
    pub fn build(data: Option<&[i64]>, palette_size: usize, packing: SectionPacking) -> Self {
        let data = match data {
            Some(data) if palette_size > 0 => data,
            _ => return Self::empty(),
        };

        let array = PackedIntegerArray::new(data);
        let width = packing.entry_width(palette_size);
        let mut grid = Self {
            indices: vec![0; BLOCKS_PER_SECTION],
            decodable: true,
        };

        for i in 0..BLOCKS_PER_SECTION {
            let mut index = array.entry(i, width, packing) as usize;
            if index >= palette_size {
                index = 0;
            }
            let (x, y, z) = linear_to_xyz(i);
            grid.set(x, y, z, index as u16);
        }

        grid
    }

    /// Whether the grid holds decoded data (as opposed to the empty fallback).
    pub fn is_decodable(&self) -> bool {
        self.decodable
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> u16 {
        self.indices[xyz_to_linear(x, y, z)]
    }

    fn set(&mut self, x: usize, y: usize, z: usize, index: u16) {
        self.indices[xyz_to_linear(x, y, z)] = index;
    }

    /// Iterate all cells as `(x, y, z, index)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, usize, u16)> + '_ {
        self.indices.iter().enumerate().map(|(i, &index)| {
            let (x, y, z) = linear_to_xyz(i);
            (x, y, z, index)
        })
    }

    /// Distinct palette indices present in the grid, ascending.
    pub fn unique_indices(&self) -> Vec<u16> {
        if !self.decodable {
            return Vec::new();
        }
        let mut seen: Vec<u16> = self.indices.clone();
        seen.sort_unstable();
        seen.dedup();
        seen
    }
}

/// Map a linear section index to `(x, y, z)`: y-major, then z, then x.
pub fn linear_to_xyz(i: usize) -> (usize, usize, usize) {
    let y = i / (SECTION_SIZE * SECTION_SIZE);
    let z = (i / SECTION_SIZE) % SECTION_SIZE;
    let x = i % SECTION_SIZE;
    (x, y, z)
}

fn xyz_to_linear(x: usize, y: usize, z: usize) -> usize {
    (y * SECTION_SIZE + z) * SECTION_SIZE + x
}

/// One 16-block-tall slice of a chunk column.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Section index along the vertical axis.
    pub y: i8,
    pub palette: Palette,
    /// Packed palette indices; `None` for uniform sections.
    pub data: Option<Vec<i64>>,
}

impl Section {
    /// Decode this section's block grid.
    ///
    /// A single-entry palette without data is a uniform section of entry 0.
    pub fn block_grid(&self, packing: SectionPacking) -> BlockGrid {
        match (&self.data, self.palette.len()) {
            (None, 1) => BlockGrid::uniform(0),
            (data, palette_size) => BlockGrid::build(data.as_deref(), palette_size, packing),
        }
    }

    /// Whether every block in the section is air (or the section is empty).
    pub fn is_all_air(&self) -> bool {
        self.palette.iter().all(|block| block.is_air())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::packed::{bits_per_entry, pack_compact, pack_padded};

    #[test]
    fn test_linearization_is_bijection() {
        let mut seen = vec![false; BLOCKS_PER_SECTION];
        for i in 0..BLOCKS_PER_SECTION {
            let (x, y, z) = linear_to_xyz(i);
            assert!(x < 16 && y < 16 && z < 16);
            assert_eq!((x, y, z), (i % 16, i / 256, (i / 16) % 16));
            let back = xyz_to_linear(x, y, z);
            assert!(!seen[back]);
            seen[back] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_uniform_index_two_with_palette_of_five() {
        assert_eq!(bits_per_entry(5), 3);
        let words = pack_compact(&[2; BLOCKS_PER_SECTION], 3);
        let grid = BlockGrid::build(Some(&words), 5, SectionPacking::Compact);

        assert!(grid.is_decodable());
        for (x, y, z, index) in grid.iter() {
            assert_eq!(index, 2, "cell ({}, {}, {})", x, y, z);
        }
        assert_eq!(grid.unique_indices(), vec![2]);
    }

    #[test]
    fn test_scatter_order() {
        let values: Vec<u32> = (0..BLOCKS_PER_SECTION as u32).map(|i| i % 3).collect();
        let words = pack_compact(&values, 2);
        let grid = BlockGrid::build(Some(&words), 3, SectionPacking::Compact);

        // i = 1 -> x = 1; i = 16 -> z = 1; i = 256 -> y = 1
        assert_eq!(grid.get(1, 0, 0), 1);
        assert_eq!(grid.get(0, 0, 1), (16 % 3) as u16);
        assert_eq!(grid.get(0, 1, 0), (256 % 3) as u16);
        assert_eq!(grid.get(15, 15, 15), (4095 % 3) as u16);
    }

    #[test]
    fn test_out_of_range_index_clamps_to_zero() {
        // Palette of 3 uses 2 bits, so the value 3 is representable but invalid.
        let words = pack_compact(&[3; BLOCKS_PER_SECTION], 2);
        let grid = BlockGrid::build(Some(&words), 3, SectionPacking::Compact);
        assert!(grid.iter().all(|(_, _, _, index)| index == 0));
    }

    #[test]
    fn test_missing_data_or_empty_palette() {
        let grid = BlockGrid::build(None, 4, SectionPacking::Compact);
        assert!(!grid.is_decodable());
        assert!(grid.unique_indices().is_empty());

        let words = [0i64; 8];
        let grid = BlockGrid::build(Some(&words), 0, SectionPacking::Compact);
        assert!(!grid.is_decodable());
    }

    #[test]
    fn test_padded_section() {
        let values: Vec<u32> = (0..BLOCKS_PER_SECTION as u32).map(|i| (i / 256) % 5).collect();
        let words = pack_padded(&values, 4);
        let grid = BlockGrid::build(Some(&words), 5, SectionPacking::Padded);
        assert_eq!(grid.get(7, 3, 9), 3);
        assert_eq!(grid.get(0, 6, 0), 1);
    }

    #[test]
    fn test_uniform_section_without_data() {
        let section = Section {
            y: 4,
            palette: Palette::new(vec![BlockType::new("minecraft:stone")]),
            data: None,
        };
        let grid = section.block_grid(SectionPacking::Compact);
        assert!(grid.is_decodable());
        assert_eq!(grid.unique_indices(), vec![0]);
        assert!(!section.is_all_air());
    }

    #[test]
    fn test_palette_fallback() {
        let palette = Palette::new(vec![
            BlockType::new("minecraft:air"),
            BlockType::new("minecraft:dirt"),
        ]);
        assert_eq!(palette.get(1).unwrap().name, "minecraft:dirt");
        assert_eq!(palette.get(9).unwrap().name, "minecraft:air");
        assert!(Palette::default().get(0).is_none());
    }
}
