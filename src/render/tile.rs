//! Fixed-size RGBA tiles.

/// Tile edge length in pixels.
pub const TILE_SIZE: usize = 16;

const TILE_BYTES: usize = TILE_SIZE * TILE_SIZE * 4;

/// A 16x16 RGBA8 image, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pixels: Vec<u8>,
}

impl Tile {
    /// A fully transparent tile.
    pub fn blank() -> Self {
        Self {
            pixels: vec![0; TILE_BYTES],
        }
    }

    /// Wrap raw RGBA data. Returns `None` unless it is exactly 16x16.
    pub fn from_rgba(pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == TILE_BYTES).then_some(Self { pixels })
    }

    /// Pixel at `(x, y)`, with `y` growing downward.
    ///
    /// Panics when either coordinate is outside `[0, 16)`.
    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        let i = Self::offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    pub fn set(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let i = Self::offset(x, y);
        self.pixels[i..i + 4].copy_from_slice(&rgba);
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// True when no pixel has any opacity.
    pub fn is_blank(&self) -> bool {
        self.pixels.chunks_exact(4).all(|p| p[3] == 0)
    }

    /// Multiply the color channels by `tint` (components in `[0, 1]`).
    pub fn tinted(&self, tint: [f32; 3]) -> Tile {
        let mut out = self.clone();
        for pixel in out.pixels.chunks_exact_mut(4) {
            for (channel, factor) in pixel.iter_mut().zip(tint) {
                *channel = (*channel as f32 * factor).round().clamp(0.0, 255.0) as u8;
            }
        }
        out
    }

    fn offset(x: usize, y: usize) -> usize {
        assert!(x < TILE_SIZE && y < TILE_SIZE, "tile coordinate ({x}, {y}) out of range");
        (y * TILE_SIZE + x) * 4
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::blank()
    }
}
