//! Work ordering by distance from the viewing corner.
//!
//! Regions (and chunks inside a region) are visited nearest-first from the
//! corner of their bounding box that faces the viewer, so a composite built
//! in this order is deterministic for a given view.

use crate::types::ViewAngle;
use crate::world::{ChunkCoord, RegionCoord};

/// Anything laid out on the horizontal `(x, z)` grid.
pub trait GridUnit {
    fn grid_position(&self) -> (i32, i32);
}

impl GridUnit for RegionCoord {
    fn grid_position(&self) -> (i32, i32) {
        (self.x, self.z)
    }
}

impl GridUnit for ChunkCoord {
    fn grid_position(&self) -> (i32, i32) {
        (self.x, self.z)
    }
}

impl<T: GridUnit, U> GridUnit for (T, U) {
    fn grid_position(&self) -> (i32, i32) {
        self.0.grid_position()
    }
}

/// Reference point the distances are measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewCorner {
    pub x: i32,
    pub z: i32,
}

impl ViewCorner {
    /// Bounding-box corner of `units` on the viewer's side, or `None` when
    /// there are no units.
    pub fn of<T: GridUnit>(units: &[T], angle: ViewAngle) -> Option<Self> {
        let positions = units.iter().map(GridUnit::grid_position);
        let (min_x, max_x, min_z, max_z) = positions.fold(None::<(i32, i32, i32, i32)>, |acc, (x, z)| {
            Some(match acc {
                None => (x, x, z, z),
                Some((lx, hx, lz, hz)) => (lx.min(x), hx.max(x), lz.min(z), hz.max(z)),
            })
        })?;

        let (sx, sz) = angle.axis_signs();
        Some(Self {
            x: if sx > 0 { max_x } else { min_x },
            z: if sz > 0 { max_z } else { min_z },
        })
    }

    pub fn distance(&self, (x, z): (i32, i32)) -> i64 {
        (self.x as i64 - x as i64).abs() + (self.z as i64 - z as i64).abs()
    }
}

/// Sort units by Manhattan distance from the view corner, nearest first.
///
/// The sort is stable: units at equal distance keep their input order.
pub fn order<T: GridUnit>(mut units: Vec<T>, angle: ViewAngle) -> Vec<T> {
    if let Some(corner) = ViewCorner::of(&units, angle) {
        units.sort_by_key(|unit| corner.distance(unit.grid_position()));
    }
    units
}
