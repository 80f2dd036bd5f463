// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static structure loading
//!
//! Imports a pre-built architectural model instead of generating one. The
//! model is grounded at y = 0 and centered horizontally; floor height and
//! wall colliders are then derived per mesh part, from an explicit material
//! role table when the asset is annotated and from material names otherwise.

use crate::config::StaticLoaderConfig;
use crate::scene::{MeshPart, SceneNode};
use crate::types::{CameraFraming, CollisionBounds};
use nalgebra::{Point3, Vector3};
use plan_lite_geometry::{Aabb, Mesh};
use rustc_hash::FxHashMap;

/// Structural role of a material inside an imported model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialRole {
    Floor,
    Wall,
    Furnishing,
}

/// Explicit `(asset id, material name) -> role` annotations
#[derive(Debug, Clone, Default)]
pub struct MaterialRoleTable {
    roles: FxHashMap<(String, String), MaterialRole>,
}

impl MaterialRoleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, asset_id: &str, material: &str, role: MaterialRole) {
        self.roles
            .insert((asset_id.to_string(), material.to_string()), role);
    }

    pub fn with(mut self, asset_id: &str, material: &str, role: MaterialRole) -> Self {
        self.insert(asset_id, material, role);
        self
    }

    pub fn get(&self, asset_id: &str, material: &str) -> Option<MaterialRole> {
        self.roles
            .get(&(asset_id.to_string(), material.to_string()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// An imported structure ready for furniture placement
#[derive(Debug, Clone)]
pub struct StaticStructure {
    /// Grounded, centered model
    pub node: SceneNode,
    pub floor_height: f64,
    pub collision_bounds: CollisionBounds,
    /// Surfaces the pointer can place furniture on
    pub walkable: Vec<Mesh>,
    pub framing: CameraFraming,
    pub bounds: Aabb,
}

/// Ground, center and classify a pre-built model.
pub fn load_static_structure(
    mut node: SceneNode,
    roles: &MaterialRoleTable,
    asset_id: &str,
    config: &StaticLoaderConfig,
) -> StaticStructure {
    node.ground_and_center();
    let bounds = node.local_bounds();

    let classified: Vec<(MaterialRole, Aabb)> = node
        .parts
        .iter()
        .map(|part| (classify_part(part, roles, asset_id, config), part.mesh.bounds()))
        .collect();

    let floor_height = classified
        .iter()
        .filter(|(role, b)| *role == MaterialRole::Floor && !b.is_empty())
        .map(|(_, b)| b.min.y)
        .fold(None, |acc: Option<f64>, y| Some(acc.map_or(y, |a| a.min(y))))
        .unwrap_or(if bounds.is_empty() { 0.0 } else { bounds.min.y });

    let half_width = bounds.size().x / 2.0;
    let half_depth = bounds.size().z / 2.0;
    let colliders: Vec<Aabb> = classified
        .iter()
        .filter(|(role, b)| match role {
            MaterialRole::Floor => false,
            MaterialRole::Wall => true,
            MaterialRole::Furnishing => {
                b.size().y > config.min_wall_height
                    && in_perimeter_band(b, half_width, half_depth, config.perimeter_band)
            }
        })
        .map(|(_, b)| *b)
        .collect();

    let mut walkable: Vec<Mesh> = node
        .parts
        .iter()
        .zip(&classified)
        .filter(|(_, (role, _))| *role == MaterialRole::Floor)
        .map(|(part, _)| part.mesh.clone())
        .collect();
    if walkable.is_empty() && !bounds.is_empty() {
        // No recognizable floor: walk on the model's footprint
        walkable.push(floor_quad(&bounds, floor_height));
    }

    tracing::info!(
        asset = asset_id,
        parts = node.parts.len(),
        floor_height,
        colliders = colliders.len(),
        walkable = walkable.len(),
        "Loaded static structure"
    );

    let largest = bounds.size().x.max(bounds.size().z).max(bounds.size().y);
    StaticStructure {
        node,
        floor_height,
        collision_bounds: CollisionBounds::new(colliders),
        walkable,
        framing: CameraFraming {
            target: Point3::new(0.0, floor_height, 0.0),
            distance: if largest.is_finite() { largest * 2.2 } else { 10.0 },
        },
        bounds,
    }
}

fn classify_part(
    part: &MeshPart,
    roles: &MaterialRoleTable,
    asset_id: &str,
    config: &StaticLoaderConfig,
) -> MaterialRole {
    if let Some(role) = roles.get(asset_id, &part.material.name) {
        return role;
    }
    let name = part.material.name.to_lowercase();
    if config.floor_keywords.iter().any(|k| name.contains(k.as_str())) {
        MaterialRole::Floor
    } else {
        // Walls are inferred geometrically for unannotated parts
        MaterialRole::Furnishing
    }
}

/// Footprint lies entirely within the outer `band` fraction on some side
fn in_perimeter_band(b: &Aabb, half_width: f64, half_depth: f64, band: f64) -> bool {
    let inner_x = half_width * (1.0 - band);
    let inner_z = half_depth * (1.0 - band);
    b.min.x >= inner_x || b.max.x <= -inner_x || b.min.z >= inner_z || b.max.z <= -inner_z
}

fn floor_quad(bounds: &Aabb, y: f64) -> Mesh {
    let mut mesh = Mesh::with_capacity(4, 6);
    let up = Vector3::y();
    mesh.add_vertex(Point3::new(bounds.min.x, y, bounds.min.z), up);
    mesh.add_vertex(Point3::new(bounds.min.x, y, bounds.max.z), up);
    mesh.add_vertex(Point3::new(bounds.max.x, y, bounds.max.z), up);
    mesh.add_vertex(Point3::new(bounds.max.x, y, bounds.min.z), up);
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    mesh
}
