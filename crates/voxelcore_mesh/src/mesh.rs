//! Mesh output buffers.

use bytemuck::{Pod, Zeroable};

/// Triangle surface produced by the mesher.
///
/// Positions are in grid space (one unit per voxel). Every quad contributes
/// four consecutive vertices and six indices. Triangles wind clockwise when
/// viewed from the side their normal points to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// One normal per vertex.
    pub normals: Vec<[f32; 3]>,
    /// One RGBA color per vertex, channels in `0.0..=1.0`.
    pub colors: Vec<[f32; 4]>,
    /// Triangle list.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Returns true if the mesh has no geometry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of quads (four vertices each).
    #[inline]
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.positions.len() / 4
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Appends one quad. Corners must already be in emission order.
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn push_quad(
        &mut self,
        corners: [[f32; 3]; 4],
        normal: [f32; 3],
        colors: [[f32; 4]; 4],
    ) {
        let base = self.positions.len() as u32;

        self.positions.extend_from_slice(&corners);
        self.normals.extend_from_slice(&[normal; 4]);
        self.colors.extend_from_slice(&colors);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Interleaves the attribute streams into a single vertex buffer.
    #[must_use]
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.colors)
            .map(|((&position, &normal), &color)| MeshVertex {
                position,
                normal,
                color,
            })
            .collect()
    }
}

/// Interleaved vertex - packed for GPU upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position in grid space [x, y, z]
    pub position: [f32; 3],
    /// Normal direction [nx, ny, nz]
    pub normal: [f32; 3],
    /// Shaded color [r, g, b, a]
    pub color: [f32; 4],
}

impl MeshVertex {
    /// Views a vertex slice as raw bytes for a vertex buffer upload.
    #[inline]
    #[must_use]
    pub fn slice_as_bytes(vertices: &[Self]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_quad_indices() {
        let mut mesh = Mesh::default();
        let corners = [[0.0; 3]; 4];
        mesh.push_quad(corners, [0.0, 1.0, 0.0], [[1.0; 4]; 4]);
        mesh.push_quad(corners, [0.0, 1.0, 0.0], [[1.0; 4]; 4]);

        assert_eq!(mesh.quad_count(), 2);
        assert_eq!(mesh.triangle_count(), 4);
        assert_eq!(&mesh.indices[6..], &[4, 5, 6, 4, 6, 7]);
    }

    #[test]
    fn test_interleaved_bytes() {
        let mut mesh = Mesh::default();
        mesh.push_quad([[1.0, 2.0, 3.0]; 4], [0.0, 0.0, -1.0], [[0.5; 4]; 4]);

        let vertices = mesh.interleaved();
        assert_eq!(vertices.len(), 4);
        assert_eq!(vertices[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(vertices[3].normal, [0.0, 0.0, -1.0]);
        assert_eq!(MeshVertex::slice_as_bytes(&vertices).len(), 4 * 40);
    }
}
