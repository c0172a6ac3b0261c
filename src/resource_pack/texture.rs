//! Texture loading and handling.

use crate::error::{MapError, Result};
use crate::render::tile::{Tile, TILE_SIZE};

/// Raw texture data loaded from PNG.
#[derive(Debug, Clone)]
pub struct TextureData {
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// RGBA8 pixel data (4 bytes per pixel).
    pub pixels: Vec<u8>,
    /// Number of stacked animation frames (1 if not animated).
    pub frame_count: u32,
}

impl TextureData {
    /// Create a new texture from RGBA data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
            frame_count: 1,
        }
    }

    /// Create a placeholder texture (magenta/black checkerboard).
    pub fn placeholder() -> Self {
        let size = TILE_SIZE as u32;
        let mut pixels = Vec::with_capacity((size * size * 4) as usize);

        for y in 0..size {
            for x in 0..size {
                if ((x / 2) + (y / 2)) % 2 == 0 {
                    pixels.extend_from_slice(&[255, 0, 255, 255]);
                } else {
                    pixels.extend_from_slice(&[0, 0, 0, 255]);
                }
            }
        }

        Self::new(size, size, pixels)
    }

    /// Get the first frame of an animated texture (or the whole texture if not animated).
    pub fn first_frame(&self) -> TextureData {
        if self.frame_count <= 1 {
            return self.clone();
        }

        let frame_height = self.height / self.frame_count;
        let frame_size = (self.width * frame_height * 4) as usize;

        Self::new(self.width, frame_height, self.pixels[..frame_size].to_vec())
    }

    /// Convert the first frame into a 16x16 tile.
    ///
    /// Any other size is rejected rather than resampled.
    pub fn to_tile(&self, name: &str) -> Result<Tile> {
        let frame = self.first_frame();
        if frame.width as usize != TILE_SIZE || frame.height as usize != TILE_SIZE {
            return Err(MapError::InvalidTexture {
                name: name.to_string(),
                width: frame.width,
                height: frame.height,
            });
        }
        Tile::from_rgba(frame.pixels).ok_or_else(|| MapError::InvalidTexture {
            name: name.to_string(),
            width: self.width,
            height: self.height,
        })
    }
}

/// Load a texture from PNG bytes.
pub fn load_texture_from_bytes(data: &[u8]) -> std::result::Result<TextureData, image::ImageError> {
    let img = image::load_from_memory(data)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    // Animated textures stack square frames vertically
    let is_animated = width > 0 && height > width && height % width == 0;
    let frame_count = if is_animated { height / width } else { 1 };

    Ok(TextureData {
        width,
        height,
        pixels: rgba.into_raw(),
        frame_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> TextureData {
        let pixels = rgba.repeat((width * height) as usize);
        TextureData::new(width, height, pixels)
    }

    #[test]
    fn test_placeholder_texture() {
        let tex = TextureData::placeholder();
        assert_eq!(tex.width, 16);
        assert_eq!(tex.height, 16);
        assert_eq!(tex.pixels.len(), 16 * 16 * 4);
        assert_eq!(&tex.pixels[0..4], &[255, 0, 255, 255]);
    }

    #[test]
    fn test_to_tile_accepts_16x16() {
        let tile = solid(16, 16, [10, 20, 30, 255]).to_tile("block/test").unwrap();
        assert_eq!(tile.get(5, 9), [10, 20, 30, 255]);
    }

    #[test]
    fn test_to_tile_rejects_other_sizes() {
        let err = solid(32, 32, [1, 2, 3, 255]).to_tile("block/big").unwrap_err();
        assert!(matches!(
            err,
            MapError::InvalidTexture { width: 32, height: 32, .. }
        ));
    }

    #[test]
    fn test_animated_first_frame() {
        let mut tex = solid(16, 48, [0, 0, 0, 255]);
        tex.frame_count = 3;
        tex.pixels[0..4].copy_from_slice(&[9, 9, 9, 255]);

        let tile = tex.to_tile("block/water_still").unwrap();
        assert_eq!(tile.get(0, 0), [9, 9, 9, 255]);
    }

    #[test]
    fn test_load_png_detects_frames() {
        let img = image::RgbaImage::from_pixel(16, 32, image::Rgba([1, 2, 3, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let tex = load_texture_from_bytes(&bytes).unwrap();
        assert_eq!((tex.width, tex.height, tex.frame_count), (16, 32, 2));
        assert_eq!(tex.first_frame().height, 16);
    }
}
