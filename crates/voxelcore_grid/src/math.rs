//! Integer vector type used for grid coordinates, box extents and origins.

use std::ops::{Add, Sub};

/// Integer 3D vector - a cell coordinate, box corner, or grid origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IVec3 {
    /// X component
    pub x: i32,
    /// Y component
    pub y: i32,
    /// Z component
    pub z: i32,
}

impl IVec3 {
    /// Creates a new IVec3
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// All-ones vector
    pub const ONE: Self = Self::new(1, 1, 1);

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Creates from array
    #[must_use]
    pub const fn from_array(arr: [i32; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }

    /// Component-wise minimum
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Component-wise addition clamped to the `i32` range
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self::new(
            self.x.saturating_add(other.x),
            self.y.saturating_add(other.y),
            self.z.saturating_add(other.z),
        )
    }
}

impl From<[i32; 3]> for IVec3 {
    fn from(arr: [i32; 3]) -> Self {
        Self::from_array(arr)
    }
}

impl From<IVec3> for [i32; 3] {
    fn from(v: IVec3) -> Self {
        v.to_array()
    }
}

impl Add for IVec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for IVec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = IVec3::new(1, 2, 3);
        assert_eq!(a + IVec3::ONE, IVec3::new(2, 3, 4));
        assert_eq!(a - a, IVec3::ZERO);
    }

    #[test]
    fn test_min_max() {
        let a = IVec3::new(-1, 5, 2);
        let b = IVec3::new(3, 0, 2);
        assert_eq!(a.min(b), IVec3::new(-1, 0, 2));
        assert_eq!(a.max(b), IVec3::new(3, 5, 2));
    }

    #[test]
    fn test_saturating_add() {
        let a = IVec3::new(i32::MAX - 1, i32::MIN + 1, 4);
        let b = IVec3::new(5, -5, -4);
        assert_eq!(a.saturating_add(b), IVec3::new(i32::MAX, i32::MIN, 0));
    }
}
