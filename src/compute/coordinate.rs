//! Integer grid coordinates and the movement direction set.

use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A position (or displacement) on the board.
///
/// Out-of-bounds values are valid coordinates; the board decides what they
/// mean when they are looked up.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    /// The zero displacement.
    pub const ZERO: Coordinate = Coordinate { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether this is the zero displacement.
    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Whether both components are in {-1, 0, 1}.
    #[inline]
    pub fn is_unit_step(&self) -> bool {
        (-1..=1).contains(&self.x) && (-1..=1).contains(&self.y)
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    #[inline]
    fn add(self, other: Coordinate) -> Coordinate {
        Coordinate::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    #[inline]
    fn sub(self, other: Coordinate) -> Coordinate {
        Coordinate::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<i32> for Coordinate {
    type Output = Coordinate;

    #[inline]
    fn mul(self, factor: i32) -> Coordinate {
        Coordinate::new(self.x * factor, self.y * factor)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Every step a specimen may take, staying in place included.
pub const DIRECTIONS: [Coordinate; 9] = [
    Coordinate::new(-1, -1),
    Coordinate::new(-1, 0),
    Coordinate::new(-1, 1),
    Coordinate::new(0, -1),
    Coordinate::new(0, 0),
    Coordinate::new(0, 1),
    Coordinate::new(1, -1),
    Coordinate::new(1, 0),
    Coordinate::new(1, 1),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Coordinate::new(3, -2);
        let b = Coordinate::new(-1, 5);
        assert_eq!(a + b, Coordinate::new(2, 3));
        assert_eq!(a - b, Coordinate::new(4, -7));
        assert_eq!(a * 3, Coordinate::new(9, -6));
        assert_eq!(a + Coordinate::ZERO, a);
    }

    #[test]
    fn test_directions_cover_neighborhood() {
        assert_eq!(DIRECTIONS.len(), 9);
        assert_eq!(DIRECTIONS.iter().filter(|d| d.is_zero()).count(), 1);
        assert!(DIRECTIONS.iter().all(Coordinate::is_unit_step));

        let unique: std::collections::HashSet<_> = DIRECTIONS.iter().collect();
        assert_eq!(unique.len(), 9);
    }

    #[test]
    fn test_unit_step() {
        assert!(Coordinate::new(1, -1).is_unit_step());
        assert!(!Coordinate::new(2, 0).is_unit_step());
        assert!(!Coordinate::new(0, -3).is_unit_step());
    }
}
