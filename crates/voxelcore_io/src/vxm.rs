//! VXM save and load.
//!
//! ```text
//! gzip ┌──────────────────────────────────────────────┐
//!      │ Header (20 bytes)                            │
//!      ├──────────────────────────────────────────────┤
//!      │ Palette (1024 bytes, 256 × RGBA)             │
//!      ├──────────────────────────────────────────────┤
//!      │ Voxel stream (3-byte RLE records)            │
//!      ├──────────────────────────────────────────────┤
//!      │ Metadata length (u32) │ Metadata bytes       │
//!      └──────────────────────────────────────────────┘
//! ```

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use voxelcore_grid::{Palette, VoxelGrid, PALETTE_BYTES};

use crate::error::{VxmError, VxmResult};
use crate::header::{VxmHeader, MAGIC};
use crate::rle;

/// Metadata written when the caller supplies none.
pub const DEFAULT_METADATA: &str = "{}";

/// Codec settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VxmConfig {
    /// Gzip level, 0 (store) to 9 (best).
    pub compression_level: u32,
}

impl Default for VxmConfig {
    fn default() -> Self {
        Self {
            compression_level: 9,
        }
    }
}

/// Everything a VXM file holds.
#[derive(Clone, Debug)]
pub struct VxmDocument {
    /// The voxel grid, with dimensions and origin from the header.
    pub grid: VoxelGrid,
    /// The stored palette.
    pub palette: Palette,
    /// Metadata bytes exactly as stored.
    pub metadata: Vec<u8>,
}

impl VxmDocument {
    /// Metadata as text. Invalid UTF-8 is replaced, not rejected.
    #[must_use]
    pub fn metadata_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.metadata)
    }
}

/// Reader and writer for the VXM container.
#[derive(Clone, Debug, Default)]
pub struct VxmCodec {
    config: VxmConfig,
}

impl VxmCodec {
    /// Creates a codec with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a codec with custom settings.
    #[must_use]
    pub fn with_config(config: VxmConfig) -> Self {
        Self { config }
    }

    /// Current settings.
    #[must_use]
    pub fn config(&self) -> &VxmConfig {
        &self.config
    }

    /// Writes a grid to `path`.
    ///
    /// `None` palette writes the default palette, `None` metadata writes
    /// `"{}"`. The grid is validated before the file is created.
    ///
    /// # Errors
    ///
    /// Returns a validation error for grids the format cannot hold and
    /// [`VxmError::Io`] for filesystem failures.
    pub fn save_to_path(
        &self,
        grid: &VoxelGrid,
        path: impl AsRef<Path>,
        palette: Option<&Palette>,
        metadata: Option<&str>,
    ) -> VxmResult<()> {
        let default_palette = Palette::default();
        let palette = palette.unwrap_or(&default_palette);
        let metadata = metadata.unwrap_or(DEFAULT_METADATA).as_bytes();
        self.save_parts(grid, palette, metadata, path.as_ref())
    }

    /// Writes a loaded document back to `path`, metadata bytes untouched.
    ///
    /// # Errors
    ///
    /// See [`save_to_path`](Self::save_to_path).
    pub fn save_document(&self, document: &VxmDocument, path: impl AsRef<Path>) -> VxmResult<()> {
        self.save_parts(
            &document.grid,
            &document.palette,
            &document.metadata,
            path.as_ref(),
        )
    }

    fn save_parts(&self, grid: &VoxelGrid, palette: &Palette, metadata: &[u8], path: &Path) -> VxmResult<()> {
        let header = VxmHeader::for_grid(grid)?;

        let file = File::create(path)?;
        self.write_validated(grid, header, palette, metadata, BufWriter::new(file))?;

        tracing::debug!(path = %path.display(), "saved VXM");
        Ok(())
    }

    /// Writes a grid to `path` with a raw RGBA palette.
    ///
    /// # Errors
    ///
    /// Returns [`VxmError::InvalidPalette`] if `palette_rgba` is not exactly
    /// 1024 bytes; no file is created in that case.
    pub fn save_rgba(
        &self,
        grid: &VoxelGrid,
        path: impl AsRef<Path>,
        palette_rgba: Option<&[u8]>,
        metadata: Option<&str>,
    ) -> VxmResult<()> {
        let palette = palette_rgba.map(parse_palette).transpose()?;
        self.save_to_path(grid, path, palette.as_ref(), metadata)
    }

    /// Writes a grid to any writer as one gzip stream.
    ///
    /// # Errors
    ///
    /// See [`save_to_path`](Self::save_to_path).
    pub fn write_to<W: Write>(
        &self,
        grid: &VoxelGrid,
        palette: Option<&Palette>,
        metadata: Option<&str>,
        writer: W,
    ) -> VxmResult<()> {
        let header = VxmHeader::for_grid(grid)?;
        let default_palette = Palette::default();
        let palette = palette.unwrap_or(&default_palette);
        let metadata = metadata.unwrap_or(DEFAULT_METADATA).as_bytes();
        self.write_validated(grid, header, palette, metadata, writer)
    }

    fn write_validated<W: Write>(
        &self,
        grid: &VoxelGrid,
        header: VxmHeader,
        palette: &Palette,
        metadata: &[u8],
        writer: W,
    ) -> VxmResult<()> {
        let metadata_len = u32::try_from(metadata.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "metadata exceeds 4 GiB"))?;

        let mut stream = Vec::new();
        let records = rle::encode(grid.voxels(), &mut stream);

        let level = Compression::new(self.config.compression_level.min(9));
        let mut encoder = GzEncoder::new(writer, level);
        encoder.write_all(&header.to_bytes())?;
        encoder.write_all(palette.as_bytes())?;
        encoder.write_all(&stream)?;
        encoder.write_all(&metadata_len.to_le_bytes())?;
        encoder.write_all(metadata)?;
        encoder.finish()?.flush()?;

        tracing::debug!(
            size_x = grid.size_x(),
            size_y = grid.size_y(),
            size_z = grid.size_z(),
            records,
            stream_bytes = stream.len(),
            metadata_bytes = metadata.len(),
            "encoded VXM"
        );
        Ok(())
    }

    /// Reads a VXM file.
    ///
    /// # Errors
    ///
    /// Returns [`VxmError::Io`] if the file cannot be opened and a format
    /// error if its contents are not a valid VXM payload.
    pub fn load_from_path(&self, path: impl AsRef<Path>) -> VxmResult<VxmDocument> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let document = self.read_from(BufReader::new(file))?;

        tracing::debug!(
            path = %path.display(),
            solid = document.grid.solid_count(),
            "loaded VXM"
        );
        Ok(document)
    }

    /// Reads a VXM payload from any gzip-compressed reader.
    ///
    /// # Errors
    ///
    /// Returns the first format error encountered. No partial grid is
    /// returned.
    pub fn read_from<R: Read>(&self, reader: R) -> VxmResult<VxmDocument> {
        let mut reader = BufReader::new(GzDecoder::new(reader));

        let mut header_bytes = [0u8; VxmHeader::SIZE];
        read_section(&mut reader, &mut header_bytes[..4], "header")?;
        if header_bytes[..4] != MAGIC {
            let mut magic = [0u8; 4];
            magic.copy_from_slice(&header_bytes[..4]);
            return Err(VxmError::BadMagic(magic));
        }
        read_section(&mut reader, &mut header_bytes[4..], "header")?;

        let header = VxmHeader::from_bytes(&header_bytes);
        header.validate()?;

        let mut palette_bytes = [0u8; PALETTE_BYTES];
        read_section(&mut reader, &mut palette_bytes, "palette")?;
        let palette = parse_palette(&palette_bytes)?;

        let total = header.voxel_count().ok_or_else(|| header.invalid_dimensions())?;
        let voxels = rle::decode(&mut reader, total)?;

        let mut len_bytes = [0u8; 4];
        read_section(&mut reader, &mut len_bytes, "metadata length")?;
        let metadata_len = u32::from_le_bytes(len_bytes);

        let mut metadata = Vec::new();
        reader
            .by_ref()
            .take(u64::from(metadata_len))
            .read_to_end(&mut metadata)?;
        if metadata.len() as u64 != u64::from(metadata_len) {
            return Err(VxmError::Truncated("metadata"));
        }

        let grid = VoxelGrid::from_voxels(header.grid_size(), header.grid_origin(), voxels)?;
        tracing::debug!(
            size_x = grid.size_x(),
            size_y = grid.size_y(),
            size_z = grid.size_z(),
            metadata_bytes = metadata.len(),
            "decoded VXM"
        );

        Ok(VxmDocument {
            grid,
            palette,
            metadata,
        })
    }
}

/// Validates a raw 1024-byte palette.
fn parse_palette(bytes: &[u8]) -> VxmResult<Palette> {
    Palette::from_bytes(bytes).map_err(|_| VxmError::InvalidPalette { len: bytes.len() })
}

fn read_section<R: Read>(reader: &mut R, buf: &mut [u8], section: &'static str) -> VxmResult<()> {
    reader
        .read_exact(buf)
        .map_err(|e| VxmError::from_read(e, section))
}
