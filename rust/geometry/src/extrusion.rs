// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - converting horizontal footprints to vertical solids
//!
//! Footprints live in the plan plane: a `Point2 { x, y }` becomes the world
//! point `(x, height, y)`. Solids grow along +Y.

use crate::error::{Error, Result};
use crate::mesh::Mesh;
use crate::polygon::polygon_signed_area;
use crate::triangulation::triangulate_polygon;
use nalgebra::{Point2, Point3, Vector2, Vector3};

/// Extrude a closed footprint from `base` up to `base + height`.
pub fn extrude_footprint(footprint: &[Point2<f64>], base: f64, height: f64) -> Result<Mesh> {
    if height <= 0.0 {
        return Err(Error::InvalidExtrusion(
            "Height must be positive".to_string(),
        ));
    }
    if footprint.len() < 3 {
        return Err(Error::InvalidFootprint(format!(
            "Footprint needs at least 3 vertices, got {}",
            footprint.len()
        )));
    }

    // Side normals below assume counter-clockwise winding in plan space
    let ccw: Vec<Point2<f64>> = if polygon_signed_area(footprint) < 0.0 {
        footprint.iter().rev().copied().collect()
    } else {
        footprint.to_vec()
    };

    let triangles = triangulate_polygon(&ccw)?;
    let n = ccw.len();
    let mut mesh = Mesh::with_capacity(n * 6, triangles.len() * 2 + n * 6);

    create_cap(&ccw, &triangles, base, false, &mut mesh);
    create_cap(&ccw, &triangles, base + height, true, &mut mesh);
    create_side_walls(&ccw, base, height, &mut mesh);

    Ok(mesh)
}

/// Rectangle of `length` x `thickness` centered on `center`, with its long
/// axis rotated by `angle` radians from +X. Counter-clockwise.
pub fn rectangle_footprint(
    center: Point2<f64>,
    length: f64,
    thickness: f64,
    angle: f64,
) -> [Point2<f64>; 4] {
    let along = Vector2::new(angle.cos(), angle.sin()) * (length / 2.0);
    let across = Vector2::new(-angle.sin(), angle.cos()) * (thickness / 2.0);
    [
        center - along - across,
        center + along - across,
        center + along + across,
        center - along + across,
    ]
}

#[inline]
fn to_world(p: &Point2<f64>, y: f64) -> Point3<f64> {
    Point3::new(p.x, y, p.y)
}

fn create_cap(points: &[Point2<f64>], triangles: &[usize], y: f64, top: bool, mesh: &mut Mesh) {
    let base = mesh.vertex_count() as u32;
    let normal = if top { Vector3::y() } else { -Vector3::y() };
    for p in points {
        mesh.add_vertex(to_world(p, y), normal);
    }
    // Plan CCW maps to clockwise when seen from +Y (plan y becomes world z),
    // so the top cap flips the order to face upward.
    for tri in triangles.chunks_exact(3) {
        let (a, b, c) = (tri[0] as u32, tri[1] as u32, tri[2] as u32);
        if top {
            mesh.add_triangle(base + a, base + c, base + b);
        } else {
            mesh.add_triangle(base + a, base + b, base + c);
        }
    }
}

fn create_side_walls(points: &[Point2<f64>], base: f64, height: f64, mesh: &mut Mesh) {
    let n = points.len();
    for i in 0..n {
        let p0 = &points[i];
        let p1 = &points[(i + 1) % n];
        let edge = p1 - p0;
        let len = edge.norm();
        if len < 1e-12 {
            continue;
        }
        // Outward normal of a CCW ring in plan space
        let normal = Vector3::new(edge.y / len, 0.0, -edge.x / len);

        let start = mesh.vertex_count() as u32;
        mesh.add_vertex(to_world(p0, base), normal);
        mesh.add_vertex(to_world(p1, base), normal);
        mesh.add_vertex(to_world(p1, base + height), normal);
        mesh.add_vertex(to_world(p0, base + height), normal);
        mesh.add_triangle(start, start + 2, start + 1);
        mesh.add_triangle(start, start + 3, start + 2);
    }
}
