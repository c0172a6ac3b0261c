//! Axonometric projection of model space onto a 16x16 tile.
//!
//! Model coordinates run `[0, 16]` on each axis with `y` up. The tile origin is
//! the top-left pixel. A unit step in `x` moves half a pixel right and a
//! quarter pixel up, a step in `z` moves half a pixel right and a quarter
//! pixel down, and a step in `y` moves half a pixel up.

use super::tile::TILE_SIZE;
use crate::resource_pack::ModelElement;
use crate::types::Orientation;

/// Image row of the model-space origin.
const ORIGIN_ROW: f32 = 11.0;

/// Project a model-space point to integer image coordinates.
///
/// Halves round away from zero.
pub fn project(x: f32, y: f32, z: f32) -> (i32, i32) {
    let image_x = 0.5 * x + 0.5 * z;
    let image_y = -0.25 * x + ORIGIN_ROW + 0.25 * z - 0.5 * y;
    (image_x.round() as i32, image_y.round() as i32)
}

/// Project a point and keep it only if it lands inside the tile.
pub fn model_to_image(x: f32, y: f32, z: f32) -> Option<(usize, usize)> {
    let (ix, iy) = project(x, y, z);
    let range = 0..TILE_SIZE as i32;
    (range.contains(&ix) && range.contains(&iy)).then_some((ix as usize, iy as usize))
}

/// Axis-aligned bounds of an element, `from <= to` on every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub from: [f32; 3],
    pub to: [f32; 3],
}

impl Extents {
    pub fn new(from: [f32; 3], to: [f32; 3]) -> Self {
        let mut lo = [0.0; 3];
        let mut hi = [0.0; 3];
        for axis in 0..3 {
            lo[axis] = from[axis].min(to[axis]).clamp(0.0, 16.0);
            hi[axis] = from[axis].max(to[axis]).clamp(0.0, 16.0);
        }
        Self { from: lo, to: hi }
    }

    pub fn of(element: &ModelElement) -> Self {
        let (from, to) = element.normalized();
        Self::new(from, to)
    }

    /// Bounds after rotating the footprint about the vertical axis.
    pub fn rotated(&self, orientation: Orientation) -> Self {
        let (ax, az) = orientation.rotate_point(self.from[0], self.from[2]);
        let (bx, bz) = orientation.rotate_point(self.to[0], self.to[2]);
        Self::new([ax, self.from[1], az], [bx, self.to[1], bz])
    }

    /// Unit cells covered along an axis, as `[start, end)`.
    pub fn cells(&self, axis: usize) -> std::ops::Range<i32> {
        let start = self.from[axis].floor() as i32;
        let end = (self.to[axis].ceil() as i32).max(start);
        start.clamp(0, 16)..end.clamp(0, 16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_points() {
        assert_eq!(model_to_image(0.0, 0.0, 0.0), Some((0, 11)));
        assert_eq!(model_to_image(0.0, 0.0, 16.0), Some((8, 15)));
        assert_eq!(model_to_image(0.0, 16.0, 0.0), Some((0, 3)));
        assert_eq!(project(16.0, 0.0, 16.0), (16, 11));
        assert_eq!(model_to_image(16.0, 0.0, 16.0), None);
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        // 0.5 * 1 = 0.5 -> 1
        assert_eq!(project(1.0, 0.0, 0.0).0, 1);
        // 11 - 0.75 - 10.5 = -0.25 -> 0
        assert_eq!(project(3.0, 21.0, 0.0).1, 0);
        // 11 - 0.5 * 23 = -0.5 -> -1
        assert_eq!(project(0.0, 23.0, 0.0).1, -1);
        assert_eq!(model_to_image(0.0, 23.0, 0.0), None);
    }

    #[test]
    fn test_projection_is_deterministic() {
        for (x, y, z) in [(3.0, 7.0, 9.0), (15.0, 0.0, 1.0), (8.0, 8.0, 8.0)] {
            assert_eq!(project(x, y, z), project(x, y, z));
        }
    }

    #[test]
    fn test_rotation_laws() {
        let slab = Extents::new([0.0, 0.0, 2.0], [16.0, 8.0, 6.0]);

        assert_eq!(slab.rotated(Orientation::R0), slab);
        assert_eq!(slab.rotated(Orientation::R1).rotated(Orientation::R3), slab);
        assert_eq!(slab.rotated(Orientation::R3).rotated(Orientation::R1), slab);
        assert_eq!(slab.rotated(Orientation::R2).rotated(Orientation::R2), slab);
    }

    #[test]
    fn test_rotated_footprint() {
        let strip = Extents::new([0.0, 0.0, 2.0], [16.0, 8.0, 6.0]);

        // Swap, then reflect x about 8
        let r1 = strip.rotated(Orientation::R1);
        assert_eq!((r1.from, r1.to), ([10.0, 0.0, 0.0], [14.0, 8.0, 16.0]));

        // Reflect both
        let r2 = strip.rotated(Orientation::R2);
        assert_eq!((r2.from, r2.to), ([0.0, 0.0, 10.0], [16.0, 8.0, 14.0]));

        // Swap, then reflect z about 8
        let r3 = strip.rotated(Orientation::R3);
        assert_eq!((r3.from, r3.to), ([2.0, 0.0, 0.0], [6.0, 8.0, 16.0]));
    }

    #[test]
    fn test_cells() {
        let extents = Extents::new([0.5, 0.0, 0.0], [3.0, 16.0, 16.0]);
        assert_eq!(extents.cells(0), 0..3);
        assert_eq!(extents.cells(1), 0..16);
        let flat = Extents::new([0.0, 4.0, 0.0], [16.0, 4.0, 16.0]);
        assert!(flat.cells(1).is_empty());
    }
}
