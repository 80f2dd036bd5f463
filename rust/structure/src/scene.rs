// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene-node model for imported and generated meshes
//!
//! A `SceneNode` is a named group of mesh parts, each carrying its own
//! material, plus a yaw-and-translate transform. Cloning a node is a deep
//! copy: materials are owned per instance so recoloring one never leaks
//! into another.

use nalgebra::{Matrix4, Point3, Rotation3, Vector3};
use plan_lite_geometry::{Aabb, Mesh};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Linear RGB color with channels in `[0, 1]`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    pub fn to_bytes(&self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Exact channel equality, used to verify color restores
    pub fn bits_eq(&self, other: &Rgb) -> bool {
        self.r.to_bits() == other.r.to_bits()
            && self.g.to_bits() == other.g.to_bits()
            && self.b.to_bits() == other.b.to_bits()
    }
}

/// Error parsing a `#rrggbb` color
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(pub String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color '{}', expected #rrggbb", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ParseColorError(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ParseColorError(s.to_string()))
        };
        Ok(Rgb::from_bytes(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_bytes();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Surface material of one mesh part
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Material {
    pub name: String,
    pub color: Rgb,
    pub opacity: f32,
}

impl Material {
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            color,
            opacity: 1.0,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

/// One sub-mesh with its material
#[derive(Debug, Clone, PartialEq)]
pub struct MeshPart {
    pub name: String,
    pub mesh: Mesh,
    pub material: Material,
}

impl MeshPart {
    pub fn new(name: impl Into<String>, mesh: Mesh, material: Material) -> Self {
        Self {
            name: name.into(),
            mesh,
            material,
        }
    }
}

/// Placement of a node: yaw about +Y, then translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vector3<f64>,
    /// Rotation about the vertical axis, radians
    pub yaw: f64,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translation: Vector3::zeros(),
            yaw: 0.0,
        }
    }

    pub fn at(position: Point3<f64>, yaw: f64) -> Self {
        Self {
            translation: position.coords,
            yaw,
        }
    }

    pub fn position(&self) -> Point3<f64> {
        Point3::from(self.translation)
    }

    pub fn matrix(&self) -> Matrix4<f64> {
        Matrix4::new_translation(&self.translation)
            * Rotation3::from_axis_angle(&Vector3::y_axis(), self.yaw).to_homogeneous()
    }

    pub fn apply(&self, p: &Point3<f64>) -> Point3<f64> {
        self.matrix().transform_point(p)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Named group of mesh parts with a transform
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub parts: Vec<MeshPart>,
    pub transform: Transform,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: Vec::new(),
            transform: Transform::identity(),
        }
    }

    pub fn with_part(mut self, part: MeshPart) -> Self {
        self.parts.push(part);
        self
    }

    /// No geometry at all (e.g. a placeholder for a failed asset load)
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|p| p.mesh.is_empty())
    }

    /// Bounds of the parts in node space, ignoring the transform
    pub fn local_bounds(&self) -> Aabb {
        self.parts
            .iter()
            .fold(Aabb::empty(), |acc, p| acc.union(&p.mesh.bounds()))
    }

    /// World-space AABB of the transformed node.
    ///
    /// Rotated nodes use the box around the transformed local corners.
    pub fn world_bounds(&self) -> Aabb {
        let local = self.local_bounds();
        if local.is_empty() {
            return local;
        }
        let matrix = self.transform.matrix();
        let corners = local.corners().map(|c| matrix.transform_point(&c));
        Aabb::from_points(corners.iter())
    }

    /// Move part geometry so the node is centered horizontally on its own
    /// bounds with its lowest point at y = 0. Returns the applied offset.
    pub fn ground_and_center(&mut self) -> Vector3<f64> {
        let bounds = self.local_bounds();
        if bounds.is_empty() {
            return Vector3::zeros();
        }
        let center = bounds.center();
        let offset = Vector3::new(-center.x, -bounds.min.y, -center.z);
        for part in &mut self.parts {
            part.mesh.translate(&offset);
        }
        offset
    }

    /// Uniformly scale part geometry about the node origin
    pub fn scale_geometry(&mut self, factor: f64) {
        let matrix = Matrix4::new_scaling(factor);
        for part in &mut self.parts {
            part.mesh.transform(&matrix);
        }
    }

    /// World-space copies of all part meshes
    pub fn world_meshes(&self) -> impl Iterator<Item = (&MeshPart, Mesh)> + '_ {
        let matrix = self.transform.matrix();
        self.parts.iter().map(move |part| {
            let mut mesh = part.mesh.clone();
            mesh.transform(&matrix);
            (part, mesh)
        })
    }

    pub fn materials_mut(&mut self) -> impl Iterator<Item = &mut Material> {
        self.parts.iter_mut().map(|p| &mut p.material)
    }

    pub fn triangle_count(&self) -> usize {
        self.parts.iter().map(|p| p.mesh.triangle_count()).sum()
    }
}
