//! Packed palette-index arrays.
//!
//! Block indices are stored as fixed-width unsigned integers in an array of
//! 64-bit words. Word 0's least significant bit is bit 0 of the stream.

use std::str::FromStr;

use crate::error::MapError;

/// Widest entry a chunk section can need (4096 entries, bounded palette).
pub const MAX_BITS_PER_ENTRY: u32 = 32;

/// Bits per entry for a palette: `max(1, ceil(log2(palette_size)))`.
pub fn bits_per_entry(palette_size: usize) -> u32 {
    if palette_size <= 1 {
        return 1;
    }
    let bits = usize::BITS - (palette_size - 1).leading_zeros();
    bits.clamp(1, MAX_BITS_PER_ENTRY)
}

/// How entries are laid out across words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SectionPacking {
    /// Entries form one continuous bitstream and may straddle two words.
    /// Width is `bits_per_entry(palette_size)`.
    #[default]
    Compact,
    /// Each word holds `floor(64 / bits)` whole entries, the remaining high
    /// bits are padding. Width is at least 4 bits.
    Padded,
}

impl SectionPacking {
    /// Entry width for a palette of the given size.
    pub fn entry_width(&self, palette_size: usize) -> u32 {
        match self {
            SectionPacking::Compact => bits_per_entry(palette_size),
            SectionPacking::Padded => bits_per_entry(palette_size).max(4),
        }
    }
}

impl FromStr for SectionPacking {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(SectionPacking::Compact),
            "padded" => Ok(SectionPacking::Padded),
            other => Err(MapError::Config(format!(
                "unknown section packing '{}' (expected compact or padded)",
                other
            ))),
        }
    }
}

/// Read-only view over a packed word array.
#[derive(Debug, Clone, Copy)]
pub struct PackedIntegerArray<'a> {
    words: &'a [i64],
}

impl<'a> PackedIntegerArray<'a> {
    pub fn new(words: &'a [i64]) -> Self {
        Self { words }
    }

    /// Read the `width`-bit value starting at `bit_index` of the bitstream.
    ///
    /// When the span crosses into a word that does not exist the missing high
    /// bits read as zero. A start past the end of the array reads as zero.
    pub fn get_bits(&self, bit_index: usize, width: u32) -> u32 {
        debug_assert!((1..=MAX_BITS_PER_ENTRY).contains(&width));
        let width = width.clamp(1, MAX_BITS_PER_ENTRY);

        let word = bit_index / 64;
        let offset = (bit_index % 64) as u32;

        let Some(&low) = self.words.get(word) else {
            return 0;
        };
        let mut value = (low as u64) >> offset;

        // offset > 0 whenever this holds, since width <= 32
        if offset + width > 64 {
            if let Some(&high) = self.words.get(word + 1) {
                value |= (high as u64) << (64 - offset);
            }
        }

        let mask = (1u64 << width) - 1;
        (value & mask) as u32
    }

    /// Read entry `index` when entries never straddle words.
    pub fn get_padded(&self, index: usize, width: u32) -> u32 {
        let width = width.clamp(1, MAX_BITS_PER_ENTRY);
        let per_word = (64 / width) as usize;
        let Some(&word) = self.words.get(index / per_word) else {
            return 0;
        };
        let shift = (index % per_word) as u32 * width;
        let mask = (1u64 << width) - 1;
        (((word as u64) >> shift) & mask) as u32
    }

    /// Read entry `index` using the given layout.
    pub fn entry(&self, index: usize, width: u32, packing: SectionPacking) -> u32 {
        match packing {
            SectionPacking::Compact => self.get_bits(index * width as usize, width),
            SectionPacking::Padded => self.get_padded(index, width),
        }
    }
}

/// Pack values into a continuous bitstream (test helper).
#[cfg(test)]
pub(crate) fn pack_compact(values: &[u32], width: u32) -> Vec<i64> {
    let total_bits = values.len() * width as usize;
    let mut words = vec![0u64; total_bits.div_ceil(64)];
    for (i, &value) in values.iter().enumerate() {
        let bit = i * width as usize;
        let (word, offset) = (bit / 64, (bit % 64) as u32);
        let value = value as u64 & ((1u64 << width) - 1);
        words[word] |= value << offset;
        if offset + width > 64 {
            words[word + 1] |= value >> (64 - offset);
        }
    }
    words.into_iter().map(|w| w as i64).collect()
}

/// Pack values with whole entries per word (test helper).
#[cfg(test)]
pub(crate) fn pack_padded(values: &[u32], width: u32) -> Vec<i64> {
    let per_word = (64 / width) as usize;
    let mut words = vec![0u64; values.len().div_ceil(per_word)];
    for (i, &value) in values.iter().enumerate() {
        let shift = (i % per_word) as u32 * width;
        words[i / per_word] |= (value as u64 & ((1u64 << width) - 1)) << shift;
    }
    words.into_iter().map(|w| w as i64).collect()
}
