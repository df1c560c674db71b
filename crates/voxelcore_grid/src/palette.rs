//! 256-entry RGBA palette.
//!
//! Material indices in a [`VoxelGrid`](crate::VoxelGrid) index straight into a
//! palette. The palette is never stored on the grid, so one grid can be shown
//! with different palettes in the same process.

use bytemuck::{Pod, Zeroable};

use crate::error::{GridError, GridResult};

/// Number of palette entries - one per possible material index.
pub const PALETTE_LEN: usize = 256;

/// Size of a raw palette in bytes (256 × RGBA).
pub const PALETTE_BYTES: usize = PALETTE_LEN * 4;

/// One palette color, 8 bits per channel.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Opaque light gray used for every material of the default palette.
    pub const LIGHT_GRAY: Self = Self::new(230, 230, 230, 255);

    /// Creates a color from its channels.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels normalised to `0.0..=1.0`.
    #[inline]
    #[must_use]
    pub fn to_f32(self) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            f32::from(self.a) / 255.0,
        ]
    }
}

/// A full 256-entry palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: [Rgba; PALETTE_LEN],
}

impl Palette {
    /// Creates a palette where every entry is `color`.
    #[must_use]
    pub const fn filled(color: Rgba) -> Self {
        Self {
            entries: [color; PALETTE_LEN],
        }
    }

    /// Builds a palette from raw RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidPaletteLength`] unless `bytes` is exactly
    /// [`PALETTE_BYTES`] long.
    pub fn from_bytes(bytes: &[u8]) -> GridResult<Self> {
        if bytes.len() != PALETTE_BYTES {
            return Err(GridError::InvalidPaletteLength(bytes.len()));
        }

        let mut palette = Self::filled(Rgba::TRANSPARENT);
        palette
            .entries
            .copy_from_slice(bytemuck::cast_slice::<u8, Rgba>(bytes));
        Ok(palette)
    }

    /// The palette as 1024 raw bytes, ready for the VXM container.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.entries[..])
    }

    /// Color of a material.
    #[inline]
    #[must_use]
    pub const fn get(&self, material: u8) -> Rgba {
        self.entries[material as usize]
    }

    /// Replaces the color of a material.
    #[inline]
    pub fn set(&mut self, material: u8, color: Rgba) {
        self.entries[usize::from(material)] = color;
    }

    /// All entries in material order.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[Rgba; PALETTE_LEN] {
        &self.entries
    }
}

impl Default for Palette {
    /// Index 0 transparent black, every other index opaque light gray.
    fn default() -> Self {
        let mut palette = Self::filled(Rgba::LIGHT_GRAY);
        palette.entries[0] = Rgba::TRANSPARENT;
        palette
    }
}
