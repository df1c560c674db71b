//! # Mesh Error Types

use thiserror::Error;
use voxelcore_grid::GridError;

/// Errors that can occur before meshing starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// The raw palette handed to the mesher was not 256 RGBA entries.
    #[error("invalid palette: {0}")]
    InvalidPalette(#[from] GridError),
}

/// Result type for mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;
