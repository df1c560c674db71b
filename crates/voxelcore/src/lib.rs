//! # VoxelCore
//!
//! Voxel modeling core: a dense material grid, a greedy mesher with baked
//! ambient occlusion, and the VXM binary format.
//!
//! ## Architecture
//!
//! ```text
//!                 ┌────────────────────┐
//!   generators ──>│   voxelcore_grid   │<── edits sidecar
//!                 │  VoxelGrid/Palette │
//!                 └─────────┬──────────┘
//!                           │
//!            ┌──────────────┴──────────────┐
//!            v                             v
//!   ┌─────────────────┐           ┌─────────────────┐
//!   │ voxelcore_mesh  │           │  voxelcore_io   │
//!   │ GreedyMesher+AO │           │ VxmCodec (gzip) │
//!   └─────────────────┘           └─────────────────┘
//! ```
//!
//! The mesher and the codec never talk to each other; the grid is the only
//! shared type.
//!
//! ## Example
//!
//! ```rust
//! use voxelcore::grid::{IVec3, Palette, VoxelGrid};
//! use voxelcore::CoreConfig;
//!
//! let config = CoreConfig::from_toml_str("[mesher]\nambient_occlusion = false")?;
//!
//! let mut grid = VoxelGrid::new(4, 4, 4)?;
//! grid.fill_box(IVec3::ZERO, IVec3::new(4, 1, 4), 1);
//!
//! let mesh = config.mesher().mesh(&grid, &Palette::default());
//! assert_eq!(mesh.quad_count(), 6);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod report;

// Re-export the units
pub use voxelcore_grid as grid;
pub use voxelcore_io as io;
pub use voxelcore_mesh as mesh;

// Re-export commonly used types
pub use config::{ConfigError, ConfigResult, CoreConfig};
pub use report::ModelReport;
pub use voxelcore_grid::{IVec3, Palette, VoxelGrid};
pub use voxelcore_io::{VoxelEdits, VxmCodec, VxmDocument, VxmError};
pub use voxelcore_mesh::{GreedyMesher, Mesh, MesherConfig};
