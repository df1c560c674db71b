//! Dense voxel grid.
//!
//! Grids have arbitrary (positive) dimensions fixed at construction.
//! Voxels are stored in X-Y-Z order (x fastest), the same order the VXM
//! run-length stream walks them.

use crate::error::{GridError, GridResult};
use crate::math::IVec3;

/// Material index of an empty cell.
pub const AIR: u8 = 0;

/// A fixed-size dense grid of material indices.
///
/// Material `0` is air; `1..=255` index into a palette owned by the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelGrid {
    /// Dimensions along X, Y and Z.
    size: [usize; 3],

    /// Semantic pivot. Not used for addressing.
    origin: IVec3,

    /// Voxel data.
    /// Layout: voxels[z * size_x * size_y + y * size_x + x]
    voxels: Vec<u8>,

    /// Number of non-air voxels (for quick empty checks).
    solid_count: usize,
}

impl VoxelGrid {
    /// Creates an empty grid with its origin at zero.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if any dimension is not positive.
    pub fn new(size_x: i32, size_y: i32, size_z: i32) -> GridResult<Self> {
        Self::with_origin(size_x, size_y, size_z, IVec3::ZERO)
    }

    /// Creates an empty grid with the given origin.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if any dimension is not positive.
    pub fn with_origin(size_x: i32, size_y: i32, size_z: i32, origin: IVec3) -> GridResult<Self> {
        let invalid = || GridError::InvalidDimensions {
            x: size_x.into(),
            y: size_y.into(),
            z: size_z.into(),
        };

        let size = [
            usize::try_from(size_x).map_err(|_| invalid())?,
            usize::try_from(size_y).map_err(|_| invalid())?,
            usize::try_from(size_z).map_err(|_| invalid())?,
        ];
        let volume = Self::volume(size).ok_or_else(invalid)?;

        Ok(Self {
            size,
            origin,
            voxels: vec![AIR; volume],
            solid_count: 0,
        })
    }

    /// Creates a grid around an existing voxel buffer in native index order.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] for non-positive dimensions and
    /// [`GridError::BufferLength`] if `voxels` does not match the volume.
    pub fn from_voxels(size: [usize; 3], origin: IVec3, voxels: Vec<u8>) -> GridResult<Self> {
        let expected = Self::volume(size).ok_or_else(|| {
            let dim = |s: usize| i64::try_from(s).unwrap_or(i64::MAX);
            GridError::InvalidDimensions {
                x: dim(size[0]),
                y: dim(size[1]),
                z: dim(size[2]),
            }
        })?;

        if voxels.len() != expected {
            return Err(GridError::BufferLength {
                expected,
                got: voxels.len(),
            });
        }

        let solid_count = voxels.iter().filter(|&&v| v != AIR).count();
        Ok(Self {
            size,
            origin,
            voxels,
            solid_count,
        })
    }

    /// Volume of a grid, or `None` if a dimension is zero, too large to be
    /// addressed with `i32` coordinates, or the product overflows.
    fn volume(size: [usize; 3]) -> Option<usize> {
        let addressable = |s: usize| s > 0 && i32::try_from(s).is_ok();
        if !size.into_iter().all(addressable) {
            return None;
        }
        size[0].checked_mul(size[1])?.checked_mul(size[2])
    }

    /// Size along X.
    #[inline]
    #[must_use]
    pub const fn size_x(&self) -> usize {
        self.size[0]
    }

    /// Size along Y.
    #[inline]
    #[must_use]
    pub const fn size_y(&self) -> usize {
        self.size[1]
    }

    /// Size along Z.
    #[inline]
    #[must_use]
    pub const fn size_z(&self) -> usize {
        self.size[2]
    }

    /// Dimensions as `[x, y, z]`.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> [usize; 3] {
        self.size
    }

    /// The semantic pivot point.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> IVec3 {
        self.origin
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.voxels.len()
    }

    /// Number of non-air cells.
    #[inline]
    #[must_use]
    pub const fn solid_count(&self) -> usize {
        self.solid_count
    }

    /// Returns true if every cell is air.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.solid_count == 0
    }

    /// The flat voxel buffer in native index order.
    #[inline]
    #[must_use]
    pub fn voxels(&self) -> &[u8] {
        &self.voxels
    }

    /// Linear index of an in-bounds cell.
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds (debug builds only).
    #[inline]
    #[must_use]
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < self.size[0]);
        debug_assert!(y < self.size[1]);
        debug_assert!(z < self.size[2]);
        x + y * self.size[0] + z * self.size[0] * self.size[1]
    }

    /// Linear index for signed coordinates, or `None` outside the grid.
    #[inline]
    fn checked_index(&self, x: i32, y: i32, z: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.size[0])?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.size[1])?;
        let z = usize::try_from(z).ok().filter(|&z| z < self.size[2])?;
        Some(self.index(x, y, z))
    }

    /// Returns true if the coordinates lie inside the grid on every axis.
    #[inline]
    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        self.checked_index(x, y, z).is_some()
    }

    /// Gets the material at the given position.
    ///
    /// Use this where the caller's own invariants guarantee the position is
    /// inside the grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> GridResult<u8> {
        self.checked_index(x, y, z)
            .map(|idx| self.voxels[idx])
            .ok_or(GridError::OutOfBounds { x, y, z })
    }

    /// Gets the material at the given position, or air outside the grid.
    #[inline]
    #[must_use]
    pub fn get_safe(&self, x: i32, y: i32, z: i32) -> u8 {
        self.checked_index(x, y, z).map_or(AIR, |idx| self.voxels[idx])
    }

    /// Sets the material at the given position. Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, material: u8) {
        let Some(idx) = self.checked_index(x, y, z) else {
            return;
        };

        let old = self.voxels[idx];
        if old != AIR && material == AIR {
            self.solid_count -= 1;
        } else if old == AIR && material != AIR {
            self.solid_count += 1;
        }

        self.voxels[idx] = material;
    }

    /// Sets every cell of the half-open box `[min, max_exclusive)` to `material`.
    ///
    /// Parts of the box outside the grid are clipped.
    pub fn fill_box(&mut self, min: IVec3, max_exclusive: IVec3, material: u8) {
        let lo = min.max(IVec3::ZERO);
        let hi = max_exclusive.min(self.extent());

        for z in lo.z..hi.z {
            for y in lo.y..hi.y {
                for x in lo.x..hi.x {
                    self.set(x, y, z, material);
                }
            }
        }
    }

    /// Clears every cell of the half-open box `[min, max_exclusive)` to air.
    pub fn carve_box(&mut self, min: IVec3, max_exclusive: IVec3) {
        self.fill_box(min, max_exclusive, AIR);
    }

    /// Dimensions as a signed vector. Always fits: construction rejects sizes
    /// beyond `i32::MAX`.
    fn extent(&self) -> IVec3 {
        let dim = |s: usize| i32::try_from(s).unwrap_or(i32::MAX);
        IVec3::new(dim(self.size[0]), dim(self.size[1]), dim(self.size[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = VoxelGrid::new(3, 4, 5).unwrap();
        assert_eq!(grid.size(), [3, 4, 5]);
        assert_eq!(grid.voxel_count(), 60);
        assert!(grid.is_empty());
        assert!(grid.voxels().iter().all(|&v| v == AIR));
    }

    #[test]
    fn test_rejects_non_positive_dimensions() {
        assert!(matches!(
            VoxelGrid::new(0, 4, 4),
            Err(GridError::InvalidDimensions { x: 0, y: 4, z: 4 })
        ));
        assert!(VoxelGrid::new(4, -1, 4).is_err());
        assert!(VoxelGrid::new(4, 4, 0).is_err());
    }

    #[test]
    fn test_index_order_is_x_fastest() {
        let grid = VoxelGrid::new(4, 3, 2).unwrap();
        assert_eq!(grid.index(1, 0, 0), 1);
        assert_eq!(grid.index(0, 1, 0), 4);
        assert_eq!(grid.index(0, 0, 1), 12);
        assert_eq!(grid.index(3, 2, 1), 3 + 2 * 4 + 12);
    }

    #[test]
    fn test_out_of_bounds_contract() {
        let mut grid = VoxelGrid::new(4, 4, 4).unwrap();

        grid.set(-1, 0, 0, 5);
        assert!(grid.is_empty());
        assert_eq!(grid.get_safe(-1, 0, 0), 0);
        assert_eq!(
            grid.get(-1, 0, 0),
            Err(GridError::OutOfBounds { x: -1, y: 0, z: 0 })
        );
        assert!(grid.get(4, 0, 0).is_err());
        assert!(!grid.in_bounds(0, 4, 0));
        assert!(grid.in_bounds(3, 3, 3));
    }

    #[test]
    fn test_set_tracks_solid_count() {
        let mut grid = VoxelGrid::new(2, 2, 2).unwrap();
        grid.set(0, 0, 0, 3);
        grid.set(0, 0, 0, 4);
        assert_eq!(grid.solid_count(), 1);
        assert_eq!(grid.get(0, 0, 0), Ok(4));

        grid.set(0, 0, 0, AIR);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_fill_and_carve_box() {
        let mut grid = VoxelGrid::new(4, 4, 4).unwrap();
        grid.fill_box(IVec3::ZERO, IVec3::new(2, 2, 2), 7);

        assert_eq!(grid.voxels().iter().filter(|&&v| v == 7).count(), 8);
        assert_eq!(grid.solid_count(), 8);

        grid.set(3, 3, 3, 9);
        grid.carve_box(IVec3::ZERO, IVec3::new(2, 2, 2));

        assert_eq!(grid.solid_count(), 1);
        assert_eq!(grid.get(3, 3, 3), Ok(9));
        assert_eq!(grid.voxels().iter().filter(|&&v| v == AIR).count(), 63);
    }

    #[test]
    fn test_fill_box_clips_to_grid() {
        let mut grid = VoxelGrid::new(4, 4, 4).unwrap();
        grid.fill_box(IVec3::new(-3, -3, -3), IVec3::new(1, 1, 10), 2);

        // Only x=0, y=0, z=0..4 survive.
        assert_eq!(grid.solid_count(), 4);
        for z in 0..4 {
            assert_eq!(grid.get(0, 0, z), Ok(2));
        }
    }

    #[test]
    fn test_from_voxels() {
        let mut voxels = vec![0u8; 8];
        voxels[7] = 1;
        let grid = VoxelGrid::from_voxels([2, 2, 2], IVec3::new(1, -1, 0), voxels).unwrap();

        assert_eq!(grid.origin(), IVec3::new(1, -1, 0));
        assert_eq!(grid.solid_count(), 1);
        assert_eq!(grid.get(1, 1, 1), Ok(1));

        assert!(matches!(
            VoxelGrid::from_voxels([2, 2, 2], IVec3::ZERO, vec![0; 7]),
            Err(GridError::BufferLength { expected: 8, got: 7 })
        ));
        assert!(VoxelGrid::from_voxels([0, 2, 2], IVec3::ZERO, Vec::new()).is_err());
    }
}
