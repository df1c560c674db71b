//! Sparse edit record stored next to a `.vxm` file.
//!
//! Viewers record the voxels a user added and removed so the edits can be
//! replayed on a freshly generated or loaded grid. The record is pretty JSON
//! at `<stem>.edits.json`:
//!
//! ```json
//! {
//!   "Added": [{ "X": 1, "Y": 2, "Z": 3 }],
//!   "Removed": []
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use voxelcore_grid::{IVec3, VoxelGrid, AIR};

use crate::error::VxmResult;

/// Extension that replaces `.vxm` for the sidecar.
const EDITS_EXTENSION: &str = "edits.json";

/// Grid coordinate as written in the sidecar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VoxelCoord {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl VoxelCoord {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl From<IVec3> for VoxelCoord {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<VoxelCoord> for IVec3 {
    fn from(c: VoxelCoord) -> Self {
        Self::new(c.x, c.y, c.z)
    }
}

/// Voxels added and removed on top of a stored grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct VoxelEdits {
    /// Cells set to the edit material.
    pub added: Vec<VoxelCoord>,
    /// Cells cleared to air.
    pub removed: Vec<VoxelCoord>,
}

impl VoxelEdits {
    /// Sidecar path for a `.vxm` file: `model.vxm` → `model.edits.json`.
    #[must_use]
    pub fn edits_path(vxm_path: impl AsRef<Path>) -> PathBuf {
        vxm_path.as_ref().with_extension(EDITS_EXTENSION)
    }

    /// Returns true if nothing was added or removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Writes the sidecar for `vxm_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, vxm_path: impl AsRef<Path>) -> VxmResult<()> {
        self.save_to_path(Self::edits_path(vxm_path))
    }

    /// Writes the record to an explicit path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save_to_path(&self, path: impl AsRef<Path>) -> VxmResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        tracing::debug!(
            path = %path.display(),
            added = self.added.len(),
            removed = self.removed.len(),
            "saved edits"
        );
        Ok(())
    }

    /// Loads the sidecar for `vxm_path`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the sidecar exists but cannot be read or parsed.
    pub fn try_load(vxm_path: impl AsRef<Path>) -> VxmResult<Option<Self>> {
        Self::try_load_path(Self::edits_path(vxm_path))
    }

    /// Loads a record from an explicit path, or `None` if the file is missing.
    /// A JSON `null` loads as an empty record.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn try_load_path(path: impl AsRef<Path>) -> VxmResult<Option<Self>> {
        let json = match fs::read_to_string(path.as_ref()) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let edits: Option<Self> = serde_json::from_str(&json)?;
        Ok(Some(edits.unwrap_or_default()))
    }

    /// Applies the record: every added cell becomes `material`, then every
    /// removed cell becomes air. Out-of-range cells are ignored.
    pub fn apply(&self, grid: &mut VoxelGrid, material: u8) {
        for c in &self.added {
            grid.set(c.x, c.y, c.z, material);
        }
        for c in &self.removed {
            grid.set(c.x, c.y, c.z, AIR);
        }
    }
}
