//! # Grid Error Types
//!
//! Construction, bounds and palette validation failures.

use thiserror::Error;

/// Errors that can occur while building or addressing a grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A dimension was zero or negative, or the volume does not fit in memory.
    #[error("grid dimensions must be positive, got {x}x{y}x{z}")]
    InvalidDimensions {
        /// Requested size along X.
        x: i64,
        /// Requested size along Y.
        y: i64,
        /// Requested size along Z.
        z: i64,
    },

    /// A checked accessor was called with coordinates outside the grid.
    #[error("coordinates ({x}, {y}, {z}) are out of bounds")]
    OutOfBounds {
        /// X coordinate.
        x: i32,
        /// Y coordinate.
        y: i32,
        /// Z coordinate.
        z: i32,
    },

    /// A raw voxel buffer did not match the grid volume.
    #[error("voxel buffer holds {got} cells, grid volume is {expected}")]
    BufferLength {
        /// Cells required by the dimensions.
        expected: usize,
        /// Cells actually supplied.
        got: usize,
    },

    /// A raw palette was not exactly 256 RGBA entries.
    #[error("palette must be 1024 bytes (256 RGBA entries), got {0}")]
    InvalidPaletteLength(usize),
}

/// Result type for grid operations.
pub type GridResult<T> = Result<T, GridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GridError::OutOfBounds { x: -1, y: 0, z: 0 };
        assert_eq!(err.to_string(), "coordinates (-1, 0, 0) are out of bounds");

        let err = GridError::InvalidPaletteLength(12);
        assert!(err.to_string().contains("1024"));
        assert!(err.to_string().contains("12"));
    }
}
