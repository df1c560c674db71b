//! # IO Error Types
//!
//! Validation errors are raised before anything is written. Format errors are
//! raised while loading and never come with a partial grid.

use std::io;

use thiserror::Error;
use voxelcore_grid::GridError;

/// Errors that can occur while saving or loading VXM files and edit sidecars.
#[derive(Error, Debug)]
pub enum VxmError {
    /// Underlying reader, writer or filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A raw palette was not 256 RGBA entries.
    #[error("palette must be 1024 bytes (256 RGBA entries), got {len}")]
    InvalidPalette {
        /// Length of the rejected buffer.
        len: usize,
    },

    /// A grid axis does not fit the 16-bit size fields.
    #[error("grid {x}x{y}x{z} exceeds the 65535 per-axis limit of the VXM format")]
    DimensionsTooLarge {
        /// Size along X.
        x: usize,
        /// Size along Y.
        y: usize,
        /// Size along Z.
        z: usize,
    },

    /// An origin component does not fit the 16-bit signed origin fields.
    #[error("origin ({x}, {y}, {z}) does not fit in 16-bit signed fields")]
    OriginOutOfRange {
        /// Origin X.
        x: i32,
        /// Origin Y.
        y: i32,
        /// Origin Z.
        z: i32,
    },

    /// The stream does not start with `VXM1`.
    #[error("invalid magic {0:?}, expected \"VXM1\"")]
    BadMagic([u8; 4]),

    /// The header carries a version this reader does not understand.
    #[error("unsupported VXM version {0}")]
    UnsupportedVersion(u16),

    /// Only little-endian payloads are supported.
    #[error("unsupported endianness flag {0}, only little-endian VXM is supported")]
    UnsupportedEndianness(u8),

    /// The header describes a grid with a zero-sized axis.
    #[error("invalid grid dimensions {x}x{y}x{z} in header")]
    InvalidDimensions {
        /// Size along X.
        x: u16,
        /// Size along Y.
        y: u16,
        /// Size along Z.
        z: u16,
    },

    /// An RLE record runs past the end of the voxel buffer.
    #[error("RLE record of {run} at voxel {index} exceeds the voxel count {total}")]
    RleOverrun {
        /// Voxel index the record starts at.
        index: usize,
        /// Run length of the record.
        run: u16,
        /// Total voxel count from the header.
        total: usize,
    },

    /// The voxel buffer could not grow to the size the header describes.
    #[error("cannot allocate {voxels} voxels")]
    OutOfMemory {
        /// Voxel count from the header.
        voxels: usize,
    },

    /// The stream ended inside the named section.
    #[error("unexpected end of stream in {0}")]
    Truncated(&'static str),

    /// The decoded payload could not be turned into a grid.
    #[error(transparent)]
    Grid(#[from] GridError),

    /// The edits sidecar is not valid JSON.
    #[error("invalid edits file: {0}")]
    Edits(#[from] serde_json::Error),
}

impl VxmError {
    /// Maps an I/O error from a read inside `section`, turning a premature
    /// end of stream into [`VxmError::Truncated`].
    pub(crate) fn from_read(err: io::Error, section: &'static str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::Truncated(section)
        } else {
            Self::Io(err)
        }
    }
}

/// Result type for codec operations.
pub type VxmResult<T> = Result<T, VxmError>;
