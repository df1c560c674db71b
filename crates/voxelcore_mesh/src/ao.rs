//! Per-vertex ambient occlusion.
//!
//! A quad corner looks at the air layer in front of its face and counts three
//! neighbours there: the two cells sharing an edge with the corner and the
//! diagonal cell between them.
//!
//! ```text
//!   side_v ─ corner
//!     │        │
//!   base  ─  side_u        (all on the layer the normal points into)
//! ```
//!
//! Two occupied sides fully enclose the corner no matter what the diagonal
//! holds, so that case counts as 3.

use voxelcore_grid::{VoxelGrid, AIR};

use crate::config::MesherConfig;

/// Maximum occlusion level.
pub const MAX_OCCLUSION: u8 = 3;

/// Axis permutation of a sweep: the normal axis `d` and the two in-plane axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweepAxes {
    /// Axis the faces point along.
    pub d: usize,
    /// First in-plane axis, `(d + 1) % 3`.
    pub u: usize,
    /// Second in-plane axis, `(d + 2) % 3`.
    pub v: usize,
}

impl SweepAxes {
    /// Axes for a sweep along `d`.
    #[inline]
    #[must_use]
    pub const fn along(d: usize) -> Self {
        Self {
            d,
            u: (d + 1) % 3,
            v: (d + 2) % 3,
        }
    }

    /// Assembles a grid position from its sweep-space components.
    #[inline]
    #[must_use]
    pub fn position(self, d: i32, u: i32, v: i32) -> [i32; 3] {
        let mut pos = [0; 3];
        pos[self.d] = d;
        pos[self.u] = u;
        pos[self.v] = v;
        pos
    }
}

/// Occlusion level (0..=3) of one quad corner.
///
/// `layer` is the coordinate along `d` of the air layer in front of the face,
/// `(u, v)` the voxel the corner belongs to and `(sign_u, sign_v)` the
/// direction from that voxel's center towards the corner.
#[must_use]
pub fn corner_occlusion(
    grid: &VoxelGrid,
    axes: SweepAxes,
    layer: i32,
    (u, v): (i32, i32),
    (sign_u, sign_v): (i32, i32),
) -> u8 {
    let occupied = |pos: [i32; 3]| u8::from(grid.get_safe(pos[0], pos[1], pos[2]) != AIR);

    let side_u = occupied(axes.position(layer, u + sign_u, v));
    let side_v = occupied(axes.position(layer, u, v + sign_v));
    let corner = occupied(axes.position(layer, u + sign_u, v + sign_v));

    if side_u == 1 && side_v == 1 {
        MAX_OCCLUSION
    } else {
        side_u + side_v + corner
    }
}

/// Brightness multiplier for an occlusion level.
#[inline]
#[must_use]
pub fn shade(occlusion: u8, config: &MesherConfig) -> f32 {
    if !config.ambient_occlusion {
        return 1.0;
    }
    let raw = 1.0 - f32::from(occlusion) * config.ao_step;
    raw.min(1.0).max(config.min_shade)
}

/// Applies a shade factor to RGB, leaving alpha untouched.
#[inline]
#[must_use]
pub fn apply_shade([r, g, b, a]: [f32; 4], shade: f32) -> [f32; 4] {
    [r * shade, g * shade, b * shade, a]
}
