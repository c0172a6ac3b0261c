//! Viewing angles and the tile orientations they select.

use crate::error::MapError;
use std::str::FromStr;

/// One of the four compass-diagonal directions the map can be viewed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewAngle {
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ViewAngle {
    pub const ALL: [ViewAngle; 4] = [
        ViewAngle::NorthEast,
        ViewAngle::NorthWest,
        ViewAngle::SouthEast,
        ViewAngle::SouthWest,
    ];

    /// Short label as accepted on the command line.
    pub fn label(&self) -> &'static str {
        match self {
            ViewAngle::NorthEast => "NE",
            ViewAngle::NorthWest => "NW",
            ViewAngle::SouthEast => "SE",
            ViewAngle::SouthWest => "SW",
        }
    }

    /// Axis preferences `(x, z)`: +1 when the viewer sits on the positive side.
    ///
    /// East is +x and south is +z.
    pub fn axis_signs(&self) -> (i32, i32) {
        match self {
            ViewAngle::SouthEast => (1, 1),
            ViewAngle::NorthEast => (1, -1),
            ViewAngle::SouthWest => (-1, 1),
            ViewAngle::NorthWest => (-1, -1),
        }
    }

    /// Tile orientation whose rotated frame puts this viewer on the (-x, +z) side.
    pub fn orientation(&self) -> Orientation {
        match self {
            ViewAngle::SouthWest => Orientation::R0,
            ViewAngle::SouthEast => Orientation::R1,
            ViewAngle::NorthEast => Orientation::R2,
            ViewAngle::NorthWest => Orientation::R3,
        }
    }
}

impl FromStr for ViewAngle {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "ne" | "northeast" => Ok(ViewAngle::NorthEast),
            "nw" | "northwest" => Ok(ViewAngle::NorthWest),
            "se" | "southeast" => Ok(ViewAngle::SouthEast),
            "sw" | "southwest" => Ok(ViewAngle::SouthWest),
            _ => Err(MapError::UnknownViewAngle(s.to_string())),
        }
    }
}

impl std::fmt::Display for ViewAngle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Rotation applied to model geometry before projection.
///
/// - `R0`: identity
/// - `R1`: swap x/z, then reflect x about the midline
/// - `R2`: reflect both x and z about the midline
/// - `R3`: swap x/z, then reflect z about the midline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    R0,
    R1,
    R2,
    R3,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::R0,
        Orientation::R1,
        Orientation::R2,
        Orientation::R3,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            Orientation::R0 => 0,
            Orientation::R1 => 1,
            Orientation::R2 => 2,
            Orientation::R3 => 3,
        }
    }

    /// The orientation that undoes this one.
    pub fn inverse(&self) -> Self {
        match self {
            Orientation::R1 => Orientation::R3,
            Orientation::R3 => Orientation::R1,
            other => *other,
        }
    }

    /// Quarter-turn orientation for a blockstate `y` rotation in degrees.
    ///
    /// A `y = 90` variant turns north faces east, which is the same point map as `R1`.
    pub fn from_degrees(degrees: i32) -> Self {
        Self::ALL[(degrees.rem_euclid(360) / 90) as usize]
    }

    /// Apply `first`, then `self`.
    pub fn after(&self, first: Orientation) -> Self {
        Self::ALL[(self.index() + first.index()) % 4]
    }

    /// Whether the x and z axes trade places under this rotation.
    pub fn swaps_axes(&self) -> bool {
        matches!(self, Orientation::R1 | Orientation::R3)
    }

    /// Rotate a model-space point (coordinates in `[0, 16]`).
    pub fn rotate_point(&self, x: f32, z: f32) -> (f32, f32) {
        match self {
            Orientation::R0 => (x, z),
            Orientation::R1 => (16.0 - z, x),
            Orientation::R2 => (16.0 - x, 16.0 - z),
            Orientation::R3 => (z, 16.0 - x),
        }
    }

    /// Rotate a unit cell index (cells in `[0, 16)`).
    ///
    /// A cell `[v, v + 1)` reflects onto `[15 - v, 16 - v)`.
    pub fn rotate_cell(&self, x: i32, z: i32) -> (i32, i32) {
        match self {
            Orientation::R0 => (x, z),
            Orientation::R1 => (15 - z, x),
            Orientation::R2 => (15 - x, 15 - z),
            Orientation::R3 => (z, 15 - x),
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!("NE".parse::<ViewAngle>().unwrap(), ViewAngle::NorthEast);
        assert_eq!("sw".parse::<ViewAngle>().unwrap(), ViewAngle::SouthWest);
        assert_eq!("north-west".parse::<ViewAngle>().unwrap(), ViewAngle::NorthWest);
        assert_eq!("SouthEast".parse::<ViewAngle>().unwrap(), ViewAngle::SouthEast);
    }

    #[test]
    fn test_unknown_label_is_fatal() {
        let err = "north".parse::<ViewAngle>().unwrap_err();
        assert!(matches!(err, MapError::UnknownViewAngle(ref s) if s == "north"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_each_angle_has_distinct_orientation() {
        let mut seen: Vec<Orientation> = ViewAngle::ALL.iter().map(|a| a.orientation()).collect();
        seen.sort();
        assert_eq!(seen, Orientation::ALL.to_vec());
    }

    #[test]
    fn test_cell_rotation_inverse() {
        for orientation in Orientation::ALL {
            for x in 0..16 {
                for z in 0..16 {
                    let (a, b) = orientation.rotate_cell(x, z);
                    assert!((0..16).contains(&a) && (0..16).contains(&b));
                    assert_eq!(orientation.inverse().rotate_cell(a, b), (x, z));
                }
            }
        }
    }

    #[test]
    fn test_composition_matches_repeated_rotation() {
        for first in Orientation::ALL {
            for second in Orientation::ALL {
                let composed = second.after(first);
                let (a, b) = first.rotate_cell(2, 7);
                assert_eq!(composed.rotate_cell(2, 7), second.rotate_cell(a, b));
            }
        }
        assert_eq!(Orientation::from_degrees(90), Orientation::R1);
        assert_eq!(Orientation::from_degrees(270), Orientation::R3);
        assert_eq!(Orientation::from_degrees(-90), Orientation::R3);
        assert_eq!(Orientation::R1.after(Orientation::R3), Orientation::R0);
    }

    #[test]
    fn test_point_rotation_inverse() {
        for orientation in Orientation::ALL {
            let (a, b) = orientation.rotate_point(3.0, 12.0);
            assert_eq!(orientation.inverse().rotate_point(a, b), (3.0, 12.0));
        }
        assert_eq!(Orientation::R0.rotate_point(3.0, 12.0), (3.0, 12.0));
    }
}
