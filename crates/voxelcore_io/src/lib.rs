//! # VoxelCore IO
//!
//! Persistence for VoxelCore grids.
//!
//! - **VXM**: lossless binary container for a grid, its palette and opaque
//!   metadata. One gzip stream with a fixed header and an RLE voxel body.
//! - **Edits sidecar**: sparse JSON record of added/removed voxels kept next
//!   to a `.vxm` file.
//!
//! ## Example
//!
//! ```rust
//! use voxelcore_grid::{IVec3, VoxelGrid};
//! use voxelcore_io::VxmCodec;
//!
//! let mut grid = VoxelGrid::new(8, 8, 8)?;
//! grid.fill_box(IVec3::ZERO, IVec3::new(8, 1, 8), 1);
//!
//! let codec = VxmCodec::new();
//! let mut bytes = Vec::new();
//! codec.write_to(&grid, None, Some("{\"name\":\"floor\"}"), &mut bytes)?;
//!
//! let doc = codec.read_from(bytes.as_slice())?;
//! assert_eq!(doc.grid.voxels(), grid.voxels());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod edits;
pub mod error;
pub mod header;
pub mod rle;
pub mod vxm;

pub use edits::{VoxelCoord, VoxelEdits};
pub use error::{VxmError, VxmResult};
pub use header::VxmHeader;
pub use vxm::{VxmCodec, VxmConfig, VxmDocument, DEFAULT_METADATA};
