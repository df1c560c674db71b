//! Greedy meshing algorithm.
//!
//! Reduces polygon count by merging adjacent faces with the same material and
//! facing into maximal rectangles.
//!
//! ## Algorithm
//!
//! For each axis `d` (with in-plane axes `u = d+1`, `v = d+2`, mod 3):
//! 1. Sweep the boundary planes `-1 ..= size_d - 1`
//! 2. Build a `size_u × size_v` mask: a cell holds a face where the voxel
//!    behind the plane differs from the one in front of it
//! 3. Greedily grow rectangles along `u`, then `v`, consuming mask cells
//! 4. Emit one quad per rectangle with AO-shaded corner colors

use std::time::{Duration, Instant};

use voxelcore_grid::{Palette, VoxelGrid, AIR};

use crate::ao::{self, SweepAxes};
use crate::config::MesherConfig;
use crate::error::MeshResult;
use crate::mesh::Mesh;

/// Time budget per 32³ block of voxels before meshing is logged as slow.
const SLOW_MESH_MS_PER_BLOCK: u64 = 10;

/// Voxels in one budget block.
const BLOCK_VOXELS: usize = 32 * 32 * 32;

/// Meshing budget for a grid of `voxels` cells, scaled by volume.
fn slow_mesh_budget(voxels: usize) -> Duration {
    let blocks = u64::try_from(voxels.div_ceil(BLOCK_VOXELS)).unwrap_or(u64::MAX);
    Duration::from_millis(SLOW_MESH_MS_PER_BLOCK.saturating_mul(blocks.max(1)))
}

/// Face mask entry for greedy meshing.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
struct MaskCell {
    material: u8,
    /// +1 faces towards increasing `d`, -1 towards decreasing `d`.
    normal: i8,
}

impl MaskCell {
    const EMPTY: Self = Self {
        material: AIR,
        normal: 0,
    };

    /// Face between `behind` (at the plane) and `ahead` (one step along `d`).
    #[inline]
    fn between(behind: u8, ahead: u8) -> Self {
        if behind == ahead {
            Self::EMPTY
        } else if behind != AIR {
            Self {
                material: behind,
                normal: 1,
            }
        } else {
            Self {
                material: ahead,
                normal: -1,
            }
        }
    }

    #[inline]
    fn is_empty(self) -> bool {
        self.material == AIR
    }
}

/// A merged rectangle on one boundary plane.
#[derive(Clone, Copy, Debug)]
struct Rect {
    u: i32,
    v: i32,
    width: i32,
    height: i32,
}

/// Greedy meshing engine.
///
/// Owns the scratch mask, which grows to the largest plane seen and is reused
/// across axis sweeps and across calls. Keep one mesher per thread.
pub struct GreedyMesher {
    /// Working mask for face detection, indexed `v * size_u + u`.
    mask: Vec<MaskCell>,
    /// Shading settings.
    config: MesherConfig,
}

impl GreedyMesher {
    /// Creates a mesher with the default shading.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(MesherConfig::default())
    }

    /// Creates a mesher with custom shading.
    #[must_use]
    pub fn with_config(config: MesherConfig) -> Self {
        Self {
            mask: Vec::new(),
            config,
        }
    }

    /// Current shading settings.
    #[must_use]
    pub fn config(&self) -> &MesherConfig {
        &self.config
    }

    /// Meshes a grid with a raw 1024-byte RGBA palette.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidPalette`](crate::MeshError::InvalidPalette)
    /// if the palette is not 256 RGBA entries. Nothing is meshed in that case.
    pub fn mesh_rgba(&mut self, grid: &VoxelGrid, palette_rgba: &[u8]) -> MeshResult<Mesh> {
        let palette = Palette::from_bytes(palette_rgba)?;
        Ok(self.mesh(grid, &palette))
    }

    /// Meshes a full grid.
    ///
    /// Output is deterministic: the same grid and palette always produce the
    /// same buffers.
    #[allow(clippy::cast_possible_truncation)]
    pub fn mesh(&mut self, grid: &VoxelGrid, palette: &Palette) -> Mesh {
        let start = Instant::now();
        let mut mesh = Mesh::default();

        // Skip empty grids entirely
        if grid.is_empty() {
            return mesh;
        }

        for d in 0..3 {
            self.sweep_axis(grid, palette, SweepAxes::along(d), &mut mesh);
        }

        let elapsed = start.elapsed();
        tracing::debug!(
            size_x = grid.size_x(),
            size_y = grid.size_y(),
            size_z = grid.size_z(),
            quads = mesh.quad_count(),
            elapsed_us = elapsed.as_micros() as u64,
            "meshed grid"
        );
        let budget = slow_mesh_budget(grid.voxel_count());
        if elapsed > budget {
            tracing::warn!(
                elapsed_ms = elapsed.as_millis() as u64,
                budget_ms = budget.as_millis() as u64,
                voxels = grid.voxel_count(),
                "slow mesh generation"
            );
        }

        mesh
    }

    /// Meshes faces perpendicular to one axis.
    fn sweep_axis(&mut self, grid: &VoxelGrid, palette: &Palette, axes: SweepAxes, mesh: &mut Mesh) {
        let size = grid.size();
        let (size_u, size_v) = (size[axes.u], size[axes.v]);
        let size_d = dim(size[axes.d]);

        let plane_len = size_u * size_v;
        if self.mask.len() < plane_len {
            self.mask.resize(plane_len, MaskCell::EMPTY);
        }

        for plane in -1..size_d {
            self.build_mask(grid, axes, plane, size_u, size_v);
            self.extract_quads(grid, palette, axes, plane, size_u, size_v, mesh);
        }
    }

    /// Fills the mask for the boundary between layer `plane` and `plane + 1`.
    ///
    /// Every cell of the active region is overwritten, so no clearing is
    /// needed between planes.
    fn build_mask(&mut self, grid: &VoxelGrid, axes: SweepAxes, plane: i32, size_u: usize, size_v: usize) {
        let mut n = 0;
        for v in 0..dim(size_v) {
            for u in 0..dim(size_u) {
                let [x, y, z] = axes.position(plane, u, v);
                let [ax, ay, az] = axes.position(plane + 1, u, v);

                // Layers -1 and size_d are outside the grid and read as air.
                let behind = grid.get_safe(x, y, z);
                let ahead = grid.get_safe(ax, ay, az);

                self.mask[n] = MaskCell::between(behind, ahead);
                n += 1;
            }
        }
    }

    /// Greedily extracts rectangles from the mask and emits them as quads.
    #[allow(clippy::too_many_arguments)]
    fn extract_quads(
        &mut self,
        grid: &VoxelGrid,
        palette: &Palette,
        axes: SweepAxes,
        plane: i32,
        size_u: usize,
        size_v: usize,
        mesh: &mut Mesh,
    ) {
        let mask = &mut self.mask[..size_u * size_v];

        let mut n = 0;
        for v in 0..size_v {
            let mut u = 0;
            while u < size_u {
                let cell = mask[n];
                if cell.is_empty() {
                    u += 1;
                    n += 1;
                    continue;
                }

                // Find width - extend as far as possible with the same face
                let mut width = 1;
                while u + width < size_u && mask[n + width] == cell {
                    width += 1;
                }

                // Find height - extend rows whose whole run matches
                let mut height = 1;
                while v + height < size_v {
                    let row = n + height * size_u;
                    if mask[row..row + width].iter().any(|&c| c != cell) {
                        break;
                    }
                    height += 1;
                }

                let rect = Rect {
                    u: dim(u),
                    v: dim(v),
                    width: dim(width),
                    height: dim(height),
                };
                emit_quad(grid, palette, &self.config, axes, plane, rect, cell, mesh);

                // Clear used cells from mask
                for dv in 0..height {
                    let row = n + dv * size_u;
                    mask[row..row + width].fill(MaskCell::EMPTY);
                }

                u += width;
                n += width;
            }
        }
    }
}

impl Default for GreedyMesher {
    fn default() -> Self {
        Self::new()
    }
}

/// Meshes a grid with a fresh default mesher.
#[must_use]
pub fn build_mesh(grid: &VoxelGrid, palette: &Palette) -> Mesh {
    GreedyMesher::new().mesh(grid, palette)
}

/// Converts a grid dimension or plane offset to a signed coordinate.
/// Grids never exceed `i32::MAX` per axis.
#[inline]
fn dim(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Builds the four corners, normal and shaded colors of one rectangle.
#[allow(clippy::too_many_arguments, clippy::cast_precision_loss)]
fn emit_quad(
    grid: &VoxelGrid,
    palette: &Palette,
    config: &MesherConfig,
    axes: SweepAxes,
    plane: i32,
    rect: Rect,
    cell: MaskCell,
    mesh: &mut Mesh,
) {
    let (u0, v0) = (rect.u, rect.v);
    let (u1, v1) = (rect.u + rect.width, rect.v + rect.height);

    // Faces sit on the lattice plane between layers `plane` and `plane + 1`.
    let lattice = plane + 1;
    let corner = |u: i32, v: i32| axes.position(lattice, u, v).map(|c| c as f32);
    let p = [corner(u0, v0), corner(u1, v0), corner(u1, v1), corner(u0, v1)];

    let sign = i32::from(cell.normal);
    let mut normal = [0.0; 3];
    normal[axes.d] = sign as f32;

    // The air layer the face looks into.
    let solid_layer = if sign > 0 { plane } else { plane + 1 };
    let layer = solid_layer + sign;

    let occlusion = [
        ao::corner_occlusion(grid, axes, layer, (u0, v0), (-1, -1)),
        ao::corner_occlusion(grid, axes, layer, (u1 - 1, v0), (1, -1)),
        ao::corner_occlusion(grid, axes, layer, (u1 - 1, v1 - 1), (1, 1)),
        ao::corner_occlusion(grid, axes, layer, (u0, v1 - 1), (-1, 1)),
    ];

    let base = palette.get(cell.material).to_f32();
    let c = occlusion.map(|occ| ao::apply_shade(base, ao::shade(occ, config)));

    if sign > 0 {
        mesh.push_quad([p[0], p[3], p[2], p[1]], normal, [c[0], c[3], c[2], c[1]]);
    } else {
        mesh.push_quad(p, normal, c);
    }
}
