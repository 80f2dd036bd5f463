// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plan-Lite Geometry
//!
//! Pure geometry building blocks for procedural structures: polygon and
//! segment helpers, axis-aligned bounds, rays, camera projection, triangle
//! meshes, earcutr triangulation and vertical footprint extrusion.
//!
//! World space is Y-up. Plan coordinates `(x, y)` map to world `(x, 0, y)`.

pub mod bounds;
pub mod camera;
pub mod error;
pub mod extrusion;
pub mod mesh;
pub mod polygon;
pub mod ray;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

pub use bounds::{boxes_intersect, Aabb};
pub use camera::{Camera, Viewport};
pub use error::{Error, Result};
pub use extrusion::{extrude_footprint, rectangle_footprint};
pub use mesh::Mesh;
pub use polygon::{point_in_polygon, polygon_bounds, polygon_signed_area, Segment2};
pub use ray::{ray_aabb, ray_plane_y, ray_triangle, Ray};
pub use triangulation::triangulate_polygon;
