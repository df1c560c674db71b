//! Shape primitives for generator collaborators.
//!
//! Generators only ever touch a grid through these helpers and the grid's own
//! `set`/`get_safe`, so overshooting coordinates are always clipped.

use crate::grid::VoxelGrid;
use crate::math::IVec3;

/// Solid axis-aligned box over `[min, max_exclusive)`.
pub fn fill_box(grid: &mut VoxelGrid, min: IVec3, max_exclusive: IVec3, material: u8) {
    grid.fill_box(min, max_exclusive, material);
}

/// Axis-aligned box given by its minimum corner and size.
pub fn box_at(grid: &mut VoxelGrid, corner: IVec3, size: IVec3, material: u8) {
    grid.fill_box(corner, corner.saturating_add(size), material);
}
