//! World save decoding.
//!
//! Region files are split into chunks, chunks into 16-block sections, and each
//! section's packed palette indices are decoded into a [`BlockGrid`].

pub mod chunk;
pub mod packed;
pub mod region;
pub mod section;

pub use chunk::Chunk;
pub use packed::{bits_per_entry, PackedIntegerArray, SectionPacking};
pub use region::{list_regions, ChunkCoord, RegionCoord, RegionFile};
pub use section::{BlockGrid, Palette, Section, BLOCKS_PER_SECTION, SECTION_SIZE};
