//! Region (`.mca`) files.
//!
//! A region holds up to 32x32 chunks. The first 4 KiB sector is a location
//! table of 1024 big-endian entries (3-byte sector offset, 1-byte sector
//! count) ordered by (z, x); the second sector holds timestamps. Each chunk
//! payload starts with a 4-byte length and a compression byte.

use super::chunk::Chunk;
use crate::error::{MapError, Result};
use flate2::read::{GzDecoder, ZlibDecoder};
use std::io::Read;
use std::path::{Path, PathBuf};

const SECTOR_SIZE: usize = 4096;
const HEADER_SIZE: usize = 2 * SECTOR_SIZE;
/// Chunks along one edge of a region.
pub const REGION_SIZE: i32 = 32;

/// Region coordinates, as encoded in `r.<x>.<z>.mca`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionCoord {
    pub x: i32,
    pub z: i32,
}

impl RegionCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Parse a region file name such as `r.-1.2.mca`.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = name.strip_prefix("r.")?.strip_suffix(".mca")?;
        let (x, z) = stem.split_once('.')?;
        Some(Self::new(x.parse().ok()?, z.parse().ok()?))
    }

    pub fn file_name(&self) -> String {
        format!("r.{}.{}.mca", self.x, self.z)
    }

    /// Absolute coordinates of a chunk inside this region.
    pub fn chunk(&self, local_x: i32, local_z: i32) -> ChunkCoord {
        ChunkCoord::new(self.x * REGION_SIZE + local_x, self.z * REGION_SIZE + local_z)
    }
}

impl std::fmt::Display for RegionCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r.{}.{}", self.x, self.z)
    }
}

/// Absolute chunk coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Position within the owning region, each in `[0, 32)`.
    pub fn local(&self) -> (i32, i32) {
        (self.x.rem_euclid(REGION_SIZE), self.z.rem_euclid(REGION_SIZE))
    }

    pub fn region(&self) -> RegionCoord {
        RegionCoord::new(self.x.div_euclid(REGION_SIZE), self.z.div_euclid(REGION_SIZE))
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Compression {
    Gzip,
    Zlib,
    Uncompressed,
}

impl Compression {
    fn from_byte(b: u8) -> Result<Self> {
        match b {
            1 => Ok(Compression::Gzip),
            2 => Ok(Compression::Zlib),
            3 => Ok(Compression::Uncompressed),
            other => Err(MapError::MalformedRegion(format!(
                "unsupported compression type {}",
                other
            ))),
        }
    }
}

/// An in-memory region file.
#[derive(Debug, Clone)]
pub struct RegionFile {
    coord: RegionCoord,
    data: Vec<u8>,
}

impl RegionFile {
    /// Read a region file; its coordinates come from the file name.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let coord = RegionCoord::from_file_name(&name).ok_or_else(|| {
            MapError::MalformedRegion(format!("not a region file name: {}", path.display()))
        })?;
        let data = std::fs::read(path)?;
        Self::from_bytes(coord, data)
    }

    pub fn from_bytes(coord: RegionCoord, data: Vec<u8>) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(MapError::MalformedRegion(format!(
                "{} is {} bytes, shorter than the {} byte header",
                coord,
                data.len(),
                HEADER_SIZE
            )));
        }
        Ok(Self { coord, data })
    }

    pub fn coord(&self) -> RegionCoord {
        self.coord
    }

    /// Sector offset and count for a local chunk, if the chunk is present.
    fn location(&self, local_x: i32, local_z: i32) -> Option<(usize, usize)> {
        let index = (local_x.rem_euclid(REGION_SIZE) + local_z.rem_euclid(REGION_SIZE) * REGION_SIZE) as usize;
        let entry = &self.data[index * 4..index * 4 + 4];
        let offset = ((entry[0] as usize) << 16) | ((entry[1] as usize) << 8) | entry[2] as usize;
        let sectors = entry[3] as usize;
        if offset < 2 || sectors == 0 {
            None
        } else {
            Some((offset, sectors))
        }
    }

    /// Chunks present in the location table.
    pub fn chunk_coords(&self) -> Vec<ChunkCoord> {
        let mut coords = Vec::new();
        for local_z in 0..REGION_SIZE {
            for local_x in 0..REGION_SIZE {
                if self.location(local_x, local_z).is_some() {
                    coords.push(self.coord.chunk(local_x, local_z));
                }
            }
        }
        coords
    }

    /// Decompressed NBT bytes of a chunk, `None` if the chunk was never generated.
    pub fn read_chunk_data(&self, local_x: i32, local_z: i32) -> Result<Option<Vec<u8>>> {
        let Some((offset, _)) = self.location(local_x, local_z) else {
            return Ok(None);
        };

        let start = offset * SECTOR_SIZE;
        let header = self.data.get(start..start + 5).ok_or_else(|| {
            MapError::MalformedRegion(format!(
                "chunk ({}, {}) of {} points past the end of the file",
                local_x, local_z, self.coord
            ))
        })?;
        let length = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
        if length <= 1 {
            return Ok(None);
        }
        let compression = Compression::from_byte(header[4])?;

        let payload = self
            .data
            .get(start + 5..start + 4 + length)
            .ok_or_else(|| {
                MapError::MalformedRegion(format!(
                    "chunk ({}, {}) of {} is truncated",
                    local_x, local_z, self.coord
                ))
            })?;

        let mut decompressed = Vec::new();
        match compression {
            Compression::Zlib => {
                ZlibDecoder::new(payload).read_to_end(&mut decompressed)?;
            }
            Compression::Gzip => {
                GzDecoder::new(payload).read_to_end(&mut decompressed)?;
            }
            Compression::Uncompressed => decompressed.extend_from_slice(payload),
        }
        Ok(Some(decompressed))
    }

    /// Decode a chunk as a raw NBT tree, `None` if the chunk was never generated.
    pub fn read_chunk_nbt(&self, local_x: i32, local_z: i32) -> Result<Option<fastnbt::Value>> {
        match self.read_chunk_data(local_x, local_z)? {
            Some(bytes) => Ok(Some(fastnbt::from_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Decode a chunk, `None` if the chunk was never generated.
    pub fn read_chunk(&self, local_x: i32, local_z: i32) -> Result<Option<Chunk>> {
        match self.read_chunk_data(local_x, local_z)? {
            Some(bytes) => Chunk::from_nbt_bytes(&bytes).map(Some),
            None => Ok(None),
        }
    }
}

/// Find the region files of a world save.
///
/// Looks in `<world>/region` when it exists, otherwise in `<world>` itself.
/// Files whose names are not `r.<x>.<z>.mca` are ignored.
pub fn list_regions<P: AsRef<Path>>(world: P) -> Result<Vec<(RegionCoord, PathBuf)>> {
    let world = world.as_ref();
    let region_dir = world.join("region");
    let dir = if region_dir.is_dir() { region_dir } else { world.to_path_buf() };

    let mut regions = Vec::new();
    for entry in std::fs::read_dir(&dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if let Some(coord) = RegionCoord::from_file_name(&name) {
            regions.push((coord, entry.path()));
        }
    }
    regions.sort_by_key(|(coord, _)| *coord);
    Ok(regions)
}
