//! Vertex generation for [`GeometryDesc`]. Everything is emitted as a flat
//! shaded, non-indexed list so the renderer has a single vertex layout.

use super::gpu::GeometryDesc;
use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
    /// Texture coordinate, v pointing down the image. Zero unless mapped.
    pub uv: [f32; 2],
}

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

const TETRA_VERTS: [[f32; 3]; 4] = [
    [1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
];
const TETRA_FACES: [[usize; 3]; 4] = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];

const OCTA_VERTS: [[f32; 3]; 6] = [
    [1.0, 0.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.0, 0.0, -1.0],
];
const OCTA_FACES: [[usize; 3]; 8] = [
    [0, 2, 4],
    [0, 4, 3],
    [0, 3, 5],
    [0, 5, 2],
    [1, 2, 5],
    [1, 5, 3],
    [1, 3, 4],
    [1, 4, 2],
];

const PHI: f32 = 1.618_034; // (1 + sqrt 5) / 2
const ICOSA_VERTS: [[f32; 3]; 12] = [
    [-1.0, PHI, 0.0],
    [1.0, PHI, 0.0],
    [-1.0, -PHI, 0.0],
    [1.0, -PHI, 0.0],
    [0.0, -1.0, PHI],
    [0.0, 1.0, PHI],
    [0.0, -1.0, -PHI],
    [0.0, 1.0, -PHI],
    [PHI, 0.0, -1.0],
    [PHI, 0.0, 1.0],
    [-PHI, 0.0, -1.0],
    [-PHI, 0.0, 1.0],
];
const ICOSA_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

pub fn build_vertices(desc: &GeometryDesc) -> Vec<Vertex> {
    match desc {
        GeometryDesc::Box { size } => box_vertices(*size * 0.5),
        GeometryDesc::Plane { size } => {
            let (hx, hy) = (size.x * 0.5, size.y * 0.5);
            let a = Vec3::new(-hx, -hy, 0.0);
            let b = Vec3::new(hx, -hy, 0.0);
            let c = Vec3::new(hx, hy, 0.0);
            let d = Vec3::new(-hx, hy, 0.0);
            let mut out = Vec::with_capacity(6);
            push_mapped_triangle(&mut out, [a, b, c], [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]);
            push_mapped_triangle(&mut out, [a, c, d], [[0.0, 1.0], [1.0, 0.0], [0.0, 0.0]]);
            out
        }
        GeometryDesc::Tetrahedron { radius } => polyhedron(&TETRA_VERTS, &TETRA_FACES, *radius),
        GeometryDesc::Octahedron { radius } => polyhedron(&OCTA_VERTS, &OCTA_FACES, *radius),
        GeometryDesc::Icosahedron { radius } => polyhedron(&ICOSA_VERTS, &ICOSA_FACES, *radius),
        GeometryDesc::Triangles(mesh) => mesh
            .positions
            .iter()
            .zip(mesh.normals.iter())
            .map(|(p, n)| Vertex {
                position: *p,
                normal: *n,
                color: WHITE,
                uv: [0.0; 2],
            })
            .collect(),
        GeometryDesc::Points(cloud) => cloud
            .positions
            .iter()
            .zip(cloud.colors.iter())
            .map(|(p, c)| Vertex {
                position: *p,
                normal: [0.0, 1.0, 0.0],
                color: *c,
                uv: [0.0; 2],
            })
            .collect(),
    }
}

/// Appends a triangle with its face normal; winding is kept as given.
fn push_triangle(out: &mut Vec<Vertex>, a: Vec3, b: Vec3, c: Vec3) {
    push_mapped_triangle(out, [a, b, c], [[0.0; 2]; 3]);
}

fn push_mapped_triangle(out: &mut Vec<Vertex>, corners: [Vec3; 3], uvs: [[f32; 2]; 3]) {
    let [a, b, c] = corners;
    let n = (b - a).cross(c - a).normalize_or_zero().to_array();
    for (p, uv) in corners.into_iter().zip(uvs) {
        out.push(Vertex {
            position: p.to_array(),
            normal: n,
            color: WHITE,
            uv,
        });
    }
}

fn polyhedron(verts: &[[f32; 3]], faces: &[[usize; 3]], radius: f32) -> Vec<Vertex> {
    let pts: Vec<Vec3> = verts
        .iter()
        .map(|v| Vec3::from_array(*v).normalize() * radius)
        .collect();
    let mut out = Vec::with_capacity(faces.len() * 3);
    for [i, j, k] in faces.iter().copied() {
        let (a, b, c) = (pts[i], pts[j], pts[k]);
        // Orient every face outward regardless of the table's winding.
        let centroid = (a + b + c) / 3.0;
        if (b - a).cross(c - a).dot(centroid) < 0.0 {
            push_triangle(&mut out, a, c, b);
        } else {
            push_triangle(&mut out, a, b, c);
        }
    }
    out
}

fn box_vertices(h: Vec3) -> Vec<Vertex> {
    let corners = |sx: f32, sy: f32, sz: f32| Vec3::new(sx * h.x, sy * h.y, sz * h.z);
    // Each face listed counter-clockwise when viewed from outside.
    let faces: [[Vec3; 4]; 6] = [
        [corners(1., -1., -1.), corners(1., 1., -1.), corners(1., 1., 1.), corners(1., -1., 1.)],
        [corners(-1., -1., 1.), corners(-1., 1., 1.), corners(-1., 1., -1.), corners(-1., -1., -1.)],
        [corners(-1., 1., -1.), corners(-1., 1., 1.), corners(1., 1., 1.), corners(1., 1., -1.)],
        [corners(-1., -1., 1.), corners(-1., -1., -1.), corners(1., -1., -1.), corners(1., -1., 1.)],
        [corners(-1., -1., 1.), corners(1., -1., 1.), corners(1., 1., 1.), corners(-1., 1., 1.)],
        [corners(1., -1., -1.), corners(-1., -1., -1.), corners(-1., 1., -1.), corners(1., 1., -1.)],
    ];
    let mut out = Vec::with_capacity(36);
    for [a, b, c, d] in faces {
        push_triangle(&mut out, a, b, c);
        push_triangle(&mut out, a, c, d);
    }
    out
}
