//! Hexagonal grid geometry expressed in offset and cube coordinates.

use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use crate::CoreError;

const UNIT_VECTORS: [Cube; 6] = [
    Cube::new(1, -1, 0),
    Cube::new(1, 0, -1),
    Cube::new(0, 1, -1),
    Cube::new(-1, 1, 0),
    Cube::new(-1, 0, 1),
    Cube::new(0, -1, 1),
];

/// Location of a map cell in the map's native column and row addressing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Offset {
    x: i32,
    y: i32,
}

impl Offset {
    /// Creates a new offset coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Converts the offset coordinate into its cube representation.
    ///
    /// Odd rows are shifted half a cell to the right, so the column is
    /// corrected by `floor(y / 2)` before deriving the remaining axes.
    #[must_use]
    pub const fn to_cube(self) -> Cube {
        let x = self.x - self.y.div_euclid(2);
        let z = self.y;
        Cube::new(x, -x - z, z)
    }

    /// Reports whether the cell lies on a map of the provided dimensions.
    #[must_use]
    pub const fn is_within(self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.x < width && self.y >= 0 && self.y < height
    }
}

/// Three-axis hex coordinate whose components always sum to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cube {
    x: i32,
    y: i32,
    z: i32,
}

impl Cube {
    const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Builds a cube coordinate from its `x` and `z` axes, deriving `y`.
    #[must_use]
    pub const fn from_axial(x: i32, z: i32) -> Self {
        Self::new(x, -x - z, z)
    }

    /// Component along the `x` axis.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Component along the `y` axis.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Component along the `z` axis.
    #[must_use]
    pub const fn z(&self) -> i32 {
        self.z
    }

    /// Converts the cube coordinate back into offset addressing.
    #[must_use]
    pub const fn to_offset(self) -> Offset {
        Offset::new(self.x + self.z.div_euclid(2), self.z)
    }

    /// Number of steps separating two cells on the hex grid.
    #[must_use]
    pub fn distance(self, other: Cube) -> i32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        let dz = (self.z - other.z).abs();
        dx.max(dy).max(dz)
    }

    /// Cell reached by walking `steps` cells in `direction`.
    #[must_use]
    pub fn neighbor(self, direction: Direction, steps: i32) -> Cube {
        self + direction.unit() * steps
    }
}

impl Add for Cube {
    type Output = Cube;

    fn add(self, rhs: Cube) -> Cube {
        Cube::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Cube {
    type Output = Cube;

    fn sub(self, rhs: Cube) -> Cube {
        self + -rhs
    }
}

impl Neg for Cube {
    type Output = Cube;

    fn neg(self) -> Cube {
        Cube::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<i32> for Cube {
    type Output = Cube;

    fn mul(self, rhs: i32) -> Cube {
        Cube::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// One of the six hex directions, also used as a ship orientation.
///
/// Index 0 points towards increasing columns and the remaining indices rotate
/// counter-clockwise in steps of sixty degrees.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Direction(u8);

impl Direction {
    /// Number of distinct directions on the hex grid.
    pub const COUNT: u8 = 6;

    /// Creates a direction from its index, rejecting values outside `0..6`.
    pub fn new(index: i32) -> Result<Self, CoreError> {
        u8::try_from(index)
            .ok()
            .filter(|value| *value < Self::COUNT)
            .map(Self)
            .ok_or(CoreError::InvalidDirection(index))
    }

    /// Index of the direction in `0..6`.
    #[must_use]
    pub const fn index(&self) -> u8 {
        self.0
    }

    /// Rotates the direction by `delta` sixty-degree steps, wrapping around.
    #[must_use]
    pub const fn rotated(self, delta: i32) -> Self {
        let index = (self.0 as i32 + delta).rem_euclid(Self::COUNT as i32);
        Self(index as u8)
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        self.rotated(3)
    }

    /// Iterator over all six directions in index order.
    pub fn all() -> impl Iterator<Item = Direction> {
        (0..Self::COUNT).map(Self)
    }

    fn unit(self) -> Cube {
        UNIT_VECTORS[usize::from(self.0)]
    }
}

#[cfg(test)]
mod tests {
    use super::{Cube, Direction, Offset};
    use crate::CoreError;

    #[test]
    fn even_and_odd_rows_convert_as_expected() {
        assert_eq!(Offset::new(10, 10).to_cube(), Cube::from_axial(5, 10));
        assert_eq!(Offset::new(3, 1).to_cube(), Cube::from_axial(3, 1));
        assert_eq!(Cube::from_axial(3, 1).to_offset(), Offset::new(3, 1));
    }

    #[test]
    fn negative_rows_use_floor_division() {
        let cube = Offset::new(0, -1).to_cube();
        assert_eq!(cube, Cube::from_axial(1, -1));
        assert_eq!(cube.to_offset(), Offset::new(0, -1));
    }

    #[test]
    fn direction_zero_moves_along_the_row() {
        let start = Offset::new(4, 7).to_cube();
        assert_eq!(start.neighbor(Direction::default(), 2).to_offset(), Offset::new(6, 7));
    }

    #[test]
    fn opposite_directions_cancel_out() {
        let start = Offset::new(8, 5).to_cube();
        for direction in Direction::all() {
            let there = start.neighbor(direction, 3);
            assert_eq!(there.neighbor(direction.opposite(), 3), start);
        }
    }

    #[test]
    fn rotation_wraps_in_both_directions() {
        let zero = Direction::default();
        assert_eq!(zero.rotated(-1).index(), 5);
        assert_eq!(zero.rotated(7).index(), 1);
    }

    #[test]
    fn out_of_range_direction_is_rejected() {
        assert_eq!(Direction::new(6), Err(CoreError::InvalidDirection(6)));
        assert_eq!(Direction::new(-1), Err(CoreError::InvalidDirection(-1)));
        assert_eq!(Direction::new(5).map(|direction| direction.index()), Ok(5));
    }

    #[test]
    fn cube_arithmetic_preserves_zero_sum() {
        let a = Cube::from_axial(2, -7);
        let b = Cube::from_axial(-4, 3);
        for value in [a + b, a - b, -a, a * 3] {
            assert_eq!(value.x() + value.y() + value.z(), 0);
        }
    }
}
