// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle meshes shared by floors, walls and furniture
//!
//! Buffers are flat f32 arrays in the layout renderers upload directly;
//! all geometric queries read them back as f64.

use crate::bounds::Aabb;
use nalgebra::{Matrix4, Point3, Vector3};

/// Indexed triangle mesh with per-vertex normals
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Vertex positions (x, y, z)
    pub positions: Vec<f32>,
    /// Vertex normals (nx, ny, nz)
    pub normals: Vec<f32>,
    /// Triangle indices (i0, i1, i2)
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    pub fn with_capacity(vertex_count: usize, index_count: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_count * 3),
            normals: Vec::with_capacity(vertex_count * 3),
            indices: Vec::with_capacity(index_count),
        }
    }

    /// Axis-aligned box mesh with flat-shaded faces (24 vertices).
    pub fn cuboid(aabb: &Aabb) -> Self {
        let mut mesh = Mesh::with_capacity(24, 36);
        if aabb.is_empty() {
            return mesh;
        }
        let c = aabb.corners();
        // (corner indices, outward normal), counter-clockwise seen from outside
        let faces: [([usize; 4], Vector3<f64>); 6] = [
            ([0, 1, 2, 3], -Vector3::y()),
            ([4, 7, 6, 5], Vector3::y()),
            ([0, 4, 5, 1], -Vector3::z()),
            ([2, 6, 7, 3], Vector3::z()),
            ([0, 3, 7, 4], -Vector3::x()),
            ([1, 5, 6, 2], Vector3::x()),
        ];
        for (quad, normal) in faces {
            let base = mesh.vertex_count() as u32;
            for i in quad {
                mesh.add_vertex(c[i], normal);
            }
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base, base + 2, base + 3);
        }
        mesh
    }

    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>, normal: Vector3<f64>) {
        self.positions
            .extend_from_slice(&[position.x as f32, position.y as f32, position.z as f32]);
        self.normals
            .extend_from_slice(&[normal.x as f32, normal.y as f32, normal.z as f32]);
    }

    #[inline]
    pub fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }

    #[inline]
    pub fn vertex(&self, index: usize) -> Point3<f64> {
        let i = index * 3;
        Point3::new(
            self.positions[i] as f64,
            self.positions[i + 1] as f64,
            self.positions[i + 2] as f64,
        )
    }

    /// Iterate triangles as vertex triples. Triangles with out-of-range
    /// indices are skipped.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3<f64>; 3]> + '_ {
        let count = self.vertex_count();
        self.indices.chunks_exact(3).filter_map(move |tri| {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            if a < count && b < count && c < count {
                Some([self.vertex(a), self.vertex(b), self.vertex(c)])
            } else {
                None
            }
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// No vertices
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Empty box for an empty mesh
    pub fn bounds(&self) -> Aabb {
        let mut aabb = Aabb::empty();
        for i in 0..self.vertex_count() {
            aabb.expand_to_include(&self.vertex(i));
        }
        aabb
    }

    /// Sum of triangle areas projected onto the horizontal (XZ) plane
    pub fn projected_area_xz(&self) -> f64 {
        self.triangles()
            .map(|[a, b, c]| {
                let cross = (b.x - a.x) * (c.z - a.z) - (b.z - a.z) * (c.x - a.x);
                cross.abs() / 2.0
            })
            .sum()
    }

    pub fn translate(&mut self, offset: &Vector3<f64>) {
        for chunk in self.positions.chunks_exact_mut(3) {
            chunk[0] = (chunk[0] as f64 + offset.x) as f32;
            chunk[1] = (chunk[1] as f64 + offset.y) as f32;
            chunk[2] = (chunk[2] as f64 + offset.z) as f32;
        }
    }

    /// Apply an affine transform to positions and normals in-place
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        let linear = matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let normal_matrix = linear
            .try_inverse()
            .map(|m| m.transpose())
            .unwrap_or(linear);

        for chunk in self.positions.chunks_exact_mut(3) {
            let p = matrix.transform_point(&Point3::new(
                chunk[0] as f64,
                chunk[1] as f64,
                chunk[2] as f64,
            ));
            chunk[0] = p.x as f32;
            chunk[1] = p.y as f32;
            chunk[2] = p.z as f32;
        }

        for chunk in self.normals.chunks_exact_mut(3) {
            let n = normal_matrix * Vector3::new(chunk[0] as f64, chunk[1] as f64, chunk[2] as f64);
            let n = n.try_normalize(1e-12).unwrap_or(n);
            chunk[0] = n.x as f32;
            chunk[1] = n.y as f32;
            chunk[2] = n.z as f32;
        }
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}
