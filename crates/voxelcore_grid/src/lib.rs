//! # VoxelCore Grid
//!
//! The in-memory data model shared by every VoxelCore tool.
//!
//! ## Design Principles
//!
//! 1. **Dense**: one `u8` material index per cell, no sparse structures
//! 2. **Fixed size**: dimensions are chosen at construction and never change
//! 3. **Dual contract**: `get` fails loudly, `get_safe`/`set` treat the
//!    outside of the grid as air
//! 4. **Colorless**: the grid never stores color, palettes travel alongside it
//!
//! ## Example
//!
//! ```rust
//! use voxelcore_grid::{IVec3, VoxelGrid};
//!
//! let mut grid = VoxelGrid::new(4, 4, 4)?;
//! grid.fill_box(IVec3::new(0, 0, 0), IVec3::new(2, 2, 2), 7);
//!
//! assert_eq!(grid.get(1, 1, 1)?, 7);
//! assert_eq!(grid.get_safe(-1, 0, 0), 0);
//! # Ok::<(), voxelcore_grid::GridError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod grid;
pub mod math;
pub mod palette;
pub mod primitives;

pub use error::{GridError, GridResult};
pub use grid::{VoxelGrid, AIR};
pub use math::IVec3;
pub use palette::{Palette, Rgba, PALETTE_BYTES, PALETTE_LEN};
