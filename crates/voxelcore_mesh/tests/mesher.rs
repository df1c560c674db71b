//! Greedy mesher behaviour on whole grids.

use voxelcore_grid::{GridError, IVec3, Palette, VoxelGrid};
use voxelcore_mesh::{build_mesh, GreedyMesher, Mesh, MeshError, MesherConfig};

const GRAY: f32 = 230.0 / 255.0;

fn solid(x: i32, y: i32, z: i32) -> VoxelGrid {
    let mut grid = VoxelGrid::new(x, y, z).unwrap();
    grid.fill_box(IVec3::ZERO, IVec3::new(x, y, z), 1);
    grid
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Extent of quad `q` along each axis.
fn quad_extent(mesh: &Mesh, q: usize) -> [f32; 3] {
    let corners = &mesh.positions[q * 4..q * 4 + 4];
    let mut extent = [0.0f32; 3];
    for (axis, e) in extent.iter_mut().enumerate() {
        let min = corners.iter().map(|p| p[axis]).fold(f32::MAX, f32::min);
        let max = corners.iter().map(|p| p[axis]).fold(f32::MIN, f32::max);
        *e = max - min;
    }
    extent
}

#[test]
fn test_cuboid_is_six_full_faces() {
    let grid = solid(3, 4, 5);
    let mesh = GreedyMesher::new().mesh(&grid, &Palette::default());

    assert_eq!(mesh.quad_count(), 6);
    assert_eq!(mesh.vertex_count(), 24);
    assert_eq!(mesh.normals.len(), 24);
    assert_eq!(mesh.colors.len(), 24);
    assert_eq!(mesh.indices.len(), 36);

    // Each face spans the full cuboid in its two in-plane axes.
    for q in 0..mesh.quad_count() {
        let normal = mesh.normals[q * 4];
        let extent = quad_extent(&mesh, q);
        let d = normal.iter().position(|&c| c != 0.0).unwrap();
        let full = [3.0, 4.0, 5.0];
        for axis in 0..3 {
            if axis == d {
                assert_eq!(extent[axis], 0.0);
            } else {
                assert_eq!(extent[axis], full[axis]);
            }
        }
    }
}

#[test]
fn test_empty_grid_produces_nothing() {
    let grid = VoxelGrid::new(16, 16, 16).unwrap();
    let mesh = build_mesh(&grid, &Palette::default());

    assert!(mesh.is_empty());
    assert_eq!(mesh.triangle_count(), 0);
}

#[test]
fn test_slab_merges_into_six_quads() {
    let grid = solid(4, 4, 1);
    let mesh = build_mesh(&grid, &Palette::default());

    assert_eq!(mesh.quad_count(), 6);

    let mut large = 0;
    for q in 0..mesh.quad_count() {
        let normal = mesh.normals[q * 4];
        if normal[2] != 0.0 {
            assert_eq!(quad_extent(&mesh, q), [4.0, 4.0, 0.0]);
            large += 1;
        }
    }
    assert_eq!(large, 2);
}

#[test]
fn test_hollow_cube_has_inner_faces() {
    let mut grid = solid(3, 3, 3);
    grid.carve_box(IVec3::ONE, IVec3::new(2, 2, 2));

    let mesh = build_mesh(&grid, &Palette::default());
    assert_eq!(mesh.quad_count(), 12);
}

#[test]
fn test_triangles_wind_against_normal() {
    let mut grid = solid(3, 2, 2);
    grid.set(2, 1, 1, 0);
    grid.set(0, 0, 0, 2);

    let mesh = build_mesh(&grid, &Palette::default());
    assert!(!mesh.is_empty());

    for tri in mesh.indices.chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.positions[i as usize]);
        let face = cross(sub(b, a), sub(c, a));
        let normal = mesh.normals[tri[0] as usize];

        assert!(dot(face, normal) < 0.0, "triangle {tri:?} faces along its normal");
    }
}

#[test]
fn test_corner_shading_next_to_step() {
    // (0,0,0) with a raised neighbour at (1,1,0): the top face of the first
    // voxel is occluded on its +x edge only.
    let mut grid = VoxelGrid::new(2, 2, 1).unwrap();
    grid.set(0, 0, 0, 1);
    grid.set(1, 1, 0, 1);

    let mesh = build_mesh(&grid, &Palette::default());

    let top = (0..mesh.quad_count())
        .find(|&q| mesh.normals[q * 4] == [0.0, 1.0, 0.0] && mesh.positions[q * 4][1] == 1.0)
        .expect("top face of the lower voxel");

    for v in top * 4..top * 4 + 4 {
        let [x, ..] = mesh.positions[v];
        let expected = if x == 1.0 { GRAY * 0.82 } else { GRAY };
        let color = mesh.colors[v];

        assert!((color[0] - expected).abs() < 1e-5, "vertex {v}: {color:?}");
        assert!((color[3] - 1.0).abs() < f32::EPSILON);
    }
}

#[test]
fn test_flat_config_skips_occlusion() {
    let mut grid = solid(3, 1, 3);
    grid.set(1, 0, 1, 0);

    let mesh = GreedyMesher::with_config(MesherConfig::flat()).mesh(&grid, &Palette::default());
    for color in &mesh.colors {
        assert!((color[0] - GRAY).abs() < f32::EPSILON);
    }
}

#[test]
fn test_meshing_is_deterministic() {
    let mut grid = VoxelGrid::new(8, 8, 8).unwrap();
    grid.fill_box(IVec3::ZERO, IVec3::new(8, 2, 8), 1);
    grid.fill_box(IVec3::new(2, 2, 2), IVec3::new(5, 6, 4), 3);
    grid.carve_box(IVec3::new(3, 0, 3), IVec3::new(4, 3, 7));

    let palette = Palette::default();
    let mut mesher = GreedyMesher::new();
    let first = mesher.mesh(&grid, &palette);
    let second = mesher.mesh(&grid, &palette);

    assert_eq!(first, second);
    assert_eq!(first, build_mesh(&grid, &palette));
}

#[test]
fn test_origin_does_not_move_vertices() {
    let mut placed = VoxelGrid::with_origin(2, 2, 2, IVec3::new(-10, 4, 7)).unwrap();
    placed.fill_box(IVec3::ZERO, IVec3::new(2, 2, 2), 1);

    assert_eq!(
        build_mesh(&placed, &Palette::default()),
        build_mesh(&solid(2, 2, 2), &Palette::default())
    );
}

#[test]
fn test_short_palette_is_rejected() {
    let grid = solid(2, 2, 2);
    let result = GreedyMesher::new().mesh_rgba(&grid, &[255u8; 1023]);

    assert_eq!(
        result,
        Err(MeshError::InvalidPalette(GridError::InvalidPaletteLength(1023)))
    );
}
