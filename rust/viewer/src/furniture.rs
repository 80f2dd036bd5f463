// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placed furniture instances

use crate::catalog::FurnitureType;
use crate::color::ColorOverride;
use nalgebra::{Point3, Vector3};
use plan_lite_geometry::Aabb;
use plan_lite_structure::{Rgb, SceneNode, Transform};
use uuid::Uuid;

/// Box edge (m) standing in for instances without geometry
const PLACEHOLDER_SIZE: f64 = 0.3;

/// One placed object, owned by the viewer's furniture container
#[derive(Debug, Clone, PartialEq)]
pub struct FurnitureItem {
    pub id: Uuid,
    pub furniture_type: FurnitureType,
    pub node: SceneNode,
    pub color_override: ColorOverride,
    /// Per-part color captured before the first override
    pub(crate) originals: Vec<Option<Rgb>>,
}

impl FurnitureItem {
    pub fn new(furniture_type: FurnitureType, node: SceneNode, position: Point3<f64>) -> Self {
        let mut node = node;
        node.transform = Transform::at(position, 0.0);
        let parts = node.parts.len();
        Self {
            id: Uuid::new_v4(),
            furniture_type,
            node,
            color_override: ColorOverride::Default,
            originals: vec![None; parts],
        }
    }

    pub fn position(&self) -> Point3<f64> {
        self.node.transform.position()
    }

    pub fn yaw(&self) -> f64 {
        self.node.transform.yaw
    }

    /// World bounds of the geometry; empty for placeholders
    pub fn bounds(&self) -> Aabb {
        self.node.world_bounds()
    }

    /// Bounds used for picking and collision. Placeholders get a small box
    /// resting on the floor at their position.
    pub fn pick_bounds(&self) -> Aabb {
        self.bounds_at(self.position(), self.yaw())
    }

    /// Bounds this item would have at another transform
    pub fn bounds_at(&self, position: Point3<f64>, yaw: f64) -> Aabb {
        let mut moved = self.node.clone();
        moved.transform = Transform::at(position, yaw);
        let bounds = moved.world_bounds();
        if !bounds.is_empty() {
            return bounds;
        }
        Aabb::from_center_size(
            position + Vector3::new(0.0, PLACEHOLDER_SIZE / 2.0, 0.0),
            Vector3::repeat(PLACEHOLDER_SIZE),
        )
    }

    pub fn set_transform(&mut self, position: Point3<f64>, yaw: f64) {
        self.node.transform = Transform::at(position, yaw);
    }
}
