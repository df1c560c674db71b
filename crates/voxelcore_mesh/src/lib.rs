//! # VoxelCore Mesh
//!
//! Converts a [`VoxelGrid`](voxelcore_grid::VoxelGrid) and a palette into a
//! triangle surface with per-vertex ambient occlusion.
//!
//! ## Algorithm
//!
//! 1. For each axis (X, Y, Z), walk the `size + 1` boundary planes
//! 2. Build a 2D mask of material/air transitions on each plane
//! 3. Greedily merge cells with the same material and facing into rectangles
//! 4. Emit one quad per rectangle, shading each corner by its occluders
//!
//! ## Example
//!
//! ```rust
//! use voxelcore_grid::{IVec3, Palette, VoxelGrid};
//! use voxelcore_mesh::GreedyMesher;
//!
//! let mut grid = VoxelGrid::new(4, 4, 4)?;
//! grid.fill_box(IVec3::ZERO, IVec3::new(4, 4, 4), 1);
//!
//! let mut mesher = GreedyMesher::new();
//! let mesh = mesher.mesh(&grid, &Palette::default());
//! assert_eq!(mesh.quad_count(), 6);
//! # Ok::<(), voxelcore_grid::GridError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod ao;
pub mod config;
pub mod error;
pub mod greedy;
pub mod mesh;

pub use config::MesherConfig;
pub use error::{MeshError, MeshResult};
pub use greedy::{build_mesh, GreedyMesher};
pub use mesh::{Mesh, MeshVertex};
