//! Summary of a stored model, as printed by `vxm_tool info`.

use std::fmt;

use voxelcore_grid::IVec3;
use voxelcore_io::VxmDocument;
use voxelcore_mesh::GreedyMesher;

/// Grid and mesh statistics for one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelReport {
    /// Grid dimensions.
    pub size: [usize; 3],
    /// Stored origin.
    pub origin: IVec3,
    /// Non-air voxels.
    pub solid_count: usize,
    /// Metadata text (lossy UTF-8).
    pub metadata: String,
    /// Quads in the greedy mesh.
    pub quads: usize,
    /// Vertices in the greedy mesh.
    pub vertices: usize,
    /// Indices in the greedy mesh.
    pub indices: usize,
}

impl ModelReport {
    /// Meshes the document's grid and collects the statistics.
    #[must_use]
    pub fn build(document: &VxmDocument, mesher: &mut GreedyMesher) -> Self {
        let grid = &document.grid;
        let mesh = mesher.mesh(grid, &document.palette);

        Self {
            size: grid.size(),
            origin: grid.origin(),
            solid_count: grid.solid_count(),
            metadata: document.metadata_text().into_owned(),
            quads: mesh.quad_count(),
            vertices: mesh.vertex_count(),
            indices: mesh.indices.len(),
        }
    }
}

impl fmt::Display for ModelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.size;
        let total = x * y * z;
        writeln!(f, "Dimensions:  {x} x {y} x {z} ({total} voxels)")?;
        writeln!(f, "Origin:      ({}, {}, {})", self.origin.x, self.origin.y, self.origin.z)?;
        writeln!(f, "Solid:       {}", self.solid_count)?;
        writeln!(f, "Metadata:    {}", self.metadata)?;
        write!(
            f,
            "Mesh:        {} quads, {} vertices, {} indices",
            self.quads, self.vertices, self.indices
        )
    }
}
