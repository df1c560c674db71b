//! Fixed 20-byte VXM header.

use voxelcore_grid::{IVec3, VoxelGrid};

use crate::error::{VxmError, VxmResult};

/// Magic bytes at the start of every VXM payload.
pub const MAGIC: [u8; 4] = *b"VXM1";

/// Current format version.
pub const VERSION: u16 = 1;

/// Endianness flag for little-endian payloads (the only supported one).
pub const ENDIAN_LITTLE: u8 = 0;

/// VXM header as it appears after decompression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VxmHeader {
    /// Magic bytes.
    pub magic: [u8; 4],
    /// Format version.
    pub version: u16,
    /// Endianness flag.
    pub endianness: u8,
    /// Reserved, written as 0 and ignored on read.
    pub reserved: u8,
    /// Grid dimensions [x, y, z].
    pub size: [u16; 3],
    /// Grid origin [x, y, z].
    pub origin: [i16; 3],
}

impl VxmHeader {
    /// Size of header in bytes.
    pub const SIZE: usize = 20;

    /// Builds the header for a grid.
    ///
    /// # Errors
    ///
    /// Returns [`VxmError::DimensionsTooLarge`] or
    /// [`VxmError::OriginOutOfRange`] if the grid cannot be represented.
    pub fn for_grid(grid: &VoxelGrid) -> VxmResult<Self> {
        let [sx, sy, sz] = grid.size();
        let too_large = || VxmError::DimensionsTooLarge { x: sx, y: sy, z: sz };
        let size = [
            u16::try_from(sx).map_err(|_| too_large())?,
            u16::try_from(sy).map_err(|_| too_large())?,
            u16::try_from(sz).map_err(|_| too_large())?,
        ];

        let origin = grid.origin();
        let out_of_range = || VxmError::OriginOutOfRange {
            x: origin.x,
            y: origin.y,
            z: origin.z,
        };
        let origin = [
            i16::try_from(origin.x).map_err(|_| out_of_range())?,
            i16::try_from(origin.y).map_err(|_| out_of_range())?,
            i16::try_from(origin.z).map_err(|_| out_of_range())?,
        ];

        Ok(Self {
            magic: MAGIC,
            version: VERSION,
            endianness: ENDIAN_LITTLE,
            reserved: 0,
            size,
            origin,
        })
    }

    /// Serializes the header to bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6] = self.endianness;
        bytes[7] = self.reserved;
        for (i, s) in self.size.iter().enumerate() {
            let at = 8 + i * 2;
            bytes[at..at + 2].copy_from_slice(&s.to_le_bytes());
        }
        for (i, o) in self.origin.iter().enumerate() {
            let at = 14 + i * 2;
            bytes[at..at + 2].copy_from_slice(&o.to_le_bytes());
        }
        bytes
    }

    /// Deserializes header from bytes. Use [`validate`](Self::validate)
    /// before trusting the fields.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; Self::SIZE]) -> Self {
        let u16_at = |at: usize| u16::from_le_bytes([bytes[at], bytes[at + 1]]);
        let i16_at = |at: usize| i16::from_le_bytes([bytes[at], bytes[at + 1]]);

        Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: u16_at(4),
            endianness: bytes[6],
            reserved: bytes[7],
            size: [u16_at(8), u16_at(10), u16_at(12)],
            origin: [i16_at(14), i16_at(16), i16_at(18)],
        }
    }

    /// Checks magic, version, endianness and dimensions, in that order.
    ///
    /// # Errors
    ///
    /// Returns the first format error found.
    pub fn validate(&self) -> VxmResult<()> {
        if self.magic != MAGIC {
            return Err(VxmError::BadMagic(self.magic));
        }
        if self.version != VERSION {
            return Err(VxmError::UnsupportedVersion(self.version));
        }
        if self.endianness != ENDIAN_LITTLE {
            return Err(VxmError::UnsupportedEndianness(self.endianness));
        }
        if self.size.contains(&0) || self.voxel_count().is_none() {
            return Err(self.invalid_dimensions());
        }
        Ok(())
    }

    pub(crate) fn invalid_dimensions(&self) -> VxmError {
        let [x, y, z] = self.size;
        VxmError::InvalidDimensions { x, y, z }
    }

    /// Grid dimensions as `usize`.
    #[must_use]
    pub fn grid_size(&self) -> [usize; 3] {
        self.size.map(usize::from)
    }

    /// Total voxel count described by the header, or `None` if it does not
    /// fit in `usize`.
    #[must_use]
    pub fn voxel_count(&self) -> Option<usize> {
        self.grid_size()
            .iter()
            .try_fold(1usize, |count, &axis| count.checked_mul(axis))
    }

    /// Grid origin.
    #[must_use]
    pub fn grid_origin(&self) -> IVec3 {
        let [x, y, z] = self.origin.map(i32::from);
        IVec3::new(x, y, z)
    }
}
