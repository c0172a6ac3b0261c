//! Per-face rasterization into tile-sized buffers.
//!
//! Each element contributes up to three visible faces in the rotated frame:
//! its top, the face at minimum x (left) and the face at maximum z (right).
//! Texels are looked up in the element's unrotated frame, so textures turn
//! with the block.

use super::projection::{model_to_image, Extents};
use super::tile::{Tile, TILE_SIZE};
use crate::types::Orientation;

/// Which visible face a pixel came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceKind {
    Top,
    Left,
    Right,
}

/// A face buffer pixel. `Unset` is distinct from any color, including
/// opaque black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pixel {
    #[default]
    Unset,
    Set { face: FaceKind, rgba: [u8; 4] },
}

/// One face's contribution to a tile. The first write to a pixel wins.
#[derive(Debug, Clone)]
pub struct FaceBuffer {
    kind: FaceKind,
    pixels: Vec<Pixel>,
}

impl FaceBuffer {
    pub fn new(kind: FaceKind) -> Self {
        Self {
            kind,
            pixels: vec![Pixel::Unset; TILE_SIZE * TILE_SIZE],
        }
    }


    pub fn get(&self, x: usize, y: usize) -> Pixel {
        self.pixels[y * TILE_SIZE + x]
    }

    /// Paint a pixel unless it is already set. Returns whether it was painted.
    pub fn paint(&mut self, x: usize, y: usize, rgba: [u8; 4]) -> bool {
        let pixel = &mut self.pixels[y * TILE_SIZE + x];
        if *pixel != Pixel::Unset {
            return false;
        }
        *pixel = Pixel::Set { face: self.kind, rgba };
        true
    }

    /// Pixels in row-major order with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Pixel)> + '_ {
        self.pixels
            .iter()
            .enumerate()
            .map(|(i, p)| (i % TILE_SIZE, i / TILE_SIZE, *p))
    }

    /// Project a texel to `(x, y, z)` and paint it. Transparent texels and
    /// points outside the tile are skipped.
    fn plot(&mut self, point: (f32, f32, f32), texel: [u8; 4]) {
        if texel[3] == 0 {
            return;
        }
        if let Some((ix, iy)) = model_to_image(point.0, point.1, point.2) {
            self.paint(ix, iy, texel);
        }
    }
}

/// Rasterize the top face of an element whose unrotated bounds are `extents`.
///
/// `texture` is addressed as `(x, z)` in the unrotated frame.
pub fn rasterize_top(buffer: &mut FaceBuffer, extents: &Extents, orientation: Orientation, texture: &Tile) {
    let rotated = extents.rotated(orientation);
    let y = rotated.to[1];
    let inverse = orientation.inverse();

    for rx in rotated.cells(0) {
        for rz in rotated.cells(2) {
            let (ux, uz) = inverse.rotate_cell(rx, rz);
            let texel = texture.get(ux as usize, uz as usize);
            buffer.plot((rx as f32, y, rz as f32), texel);
        }
    }
}

/// Rasterize the face at the rotated minimum x, walking `(y, z)`.
pub fn rasterize_left(buffer: &mut FaceBuffer, extents: &Extents, orientation: Orientation, texture: &Tile) {
    let rotated = extents.rotated(orientation);
    let plane = rotated.from[0];
    let cell_x = (plane.floor() as i32).clamp(0, 15);
    let inverse = orientation.inverse();

    for y in rotated.cells(1) {
        for rz in rotated.cells(2) {
            let (ux, uz) = inverse.rotate_cell(cell_x, rz);
            let u = if orientation.swaps_axes() { ux } else { uz };
            let texel = texture.get(u as usize, (15 - y) as usize);
            buffer.plot((plane, y as f32, rz as f32), texel);
        }
    }
}

/// Rasterize the face at the rotated maximum z, walking `(y, x)`.
pub fn rasterize_right(buffer: &mut FaceBuffer, extents: &Extents, orientation: Orientation, texture: &Tile) {
    let rotated = extents.rotated(orientation);
    let plane = rotated.to[2];
    let cell_z = (plane.ceil() as i32 - 1).clamp(0, 15);
    let inverse = orientation.inverse();

    for y in rotated.cells(1) {
        for rx in rotated.cells(0) {
            let (ux, uz) = inverse.rotate_cell(rx, cell_z);
            let u = if orientation.swaps_axes() { uz } else { ux };
            let texel = texture.get(u as usize, (15 - y) as usize);
            buffer.plot((rx as f32, y as f32, plane), texel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(rgba: [u8; 4]) -> Tile {
        Tile::from_rgba(rgba.repeat(TILE_SIZE * TILE_SIZE)).unwrap()
    }

    fn cube() -> Extents {
        Extents::new([0.0; 3], [16.0; 3])
    }

    #[test]
    fn test_first_paint_wins() {
        let mut buffer = FaceBuffer::new(FaceKind::Left);
        assert!(buffer.paint(2, 3, [1, 1, 1, 255]));
        assert!(!buffer.paint(2, 3, [9, 9, 9, 255]));
        assert_eq!(
            buffer.get(2, 3),
            Pixel::Set {
                face: FaceKind::Left,
                rgba: [1, 1, 1, 255]
            }
        );
        assert_eq!(buffer.get(0, 0), Pixel::Unset);
    }

    #[test]
    fn test_black_is_not_unset() {
        let mut buffer = FaceBuffer::new(FaceKind::Top);
        buffer.paint(0, 0, [0, 0, 0, 255]);
        assert_ne!(buffer.get(0, 0), Pixel::Unset);
    }

    #[test]
    fn test_cube_top_occupies_upper_band() {
        let mut buffer = FaceBuffer::new(FaceKind::Top);
        rasterize_top(&mut buffer, &cube(), Orientation::R0, &solid([10, 200, 10, 255]));

        let set: Vec<(usize, usize)> = buffer
            .iter()
            .filter(|(_, _, p)| *p != Pixel::Unset)
            .map(|(x, y, _)| (x, y))
            .collect();
        assert!(!set.is_empty());
        assert!(set.iter().all(|&(_, y)| y <= 7));
        assert!(set.contains(&(0, 3)));
    }

    #[test]
    fn test_side_faces_sit_below_top() {
        let mut left = FaceBuffer::new(FaceKind::Left);
        let mut right = FaceBuffer::new(FaceKind::Right);
        rasterize_left(&mut left, &cube(), Orientation::R0, &solid([1, 2, 3, 255]));
        rasterize_right(&mut right, &cube(), Orientation::R0, &solid([4, 5, 6, 255]));

        // Bottom-left corner of the left face, bottom corner of the right face
        assert_ne!(left.get(0, 11), Pixel::Unset);
        assert_ne!(right.get(8, 15), Pixel::Unset);
        assert!(left.iter().all(|(x, _, p)| p == Pixel::Unset || x <= 8));
        assert!(right.iter().all(|(x, _, p)| p == Pixel::Unset || x >= 8));
    }

    #[test]
    fn test_transparent_texels_skip() {
        let mut buffer = FaceBuffer::new(FaceKind::Top);
        rasterize_top(&mut buffer, &cube(), Orientation::R2, &Tile::blank());
        assert!(buffer.iter().all(|(_, _, p)| p == Pixel::Unset));
    }

    #[test]
    fn test_texture_turns_with_orientation() {
        let mut texture = solid([0, 0, 255, 255]);
        // Mark the unrotated 2x2 corner at x = 0, z = 0
        for (x, z) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            texture.set(x, z, [255, 0, 0, 255]);
        }
        let red = Pixel::Set {
            face: FaceKind::Top,
            rgba: [255, 0, 0, 255],
        };

        let mut r0 = FaceBuffer::new(FaceKind::Top);
        rasterize_top(&mut r0, &cube(), Orientation::R0, &texture);
        // Cell (0, 0) projects to (0, 3)
        assert_eq!(r0.get(0, 3), red);

        let mut r2 = FaceBuffer::new(FaceKind::Top);
        rasterize_top(&mut r2, &cube(), Orientation::R2, &texture);
        // Under R2 the marked corner lands at rotated (14..16, 14..16), around (15, 3)
        assert_eq!(r2.get(15, 3), red);
        assert_ne!(r2.get(0, 3), red);
    }

    #[test]
    fn test_slab_top_is_lower() {
        let slab = Extents::new([0.0; 3], [16.0, 8.0, 16.0]);
        let mut buffer = FaceBuffer::new(FaceKind::Top);
        rasterize_top(&mut buffer, &slab, Orientation::R0, &solid([7, 7, 7, 255]));
        assert_ne!(buffer.get(0, 7), Pixel::Unset);
        assert_eq!(buffer.get(0, 3), Pixel::Unset);
    }
}
