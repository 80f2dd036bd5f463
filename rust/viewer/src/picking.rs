// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ray picking against furniture and walkable floors
//!
//! Furniture hits take priority over floor hits regardless of distance.
//! Among furniture, the nearest box wins; equal distances resolve to the
//! earlier-placed item so results are deterministic.

use crate::furniture::FurnitureItem;
use nalgebra::Point3;
use plan_lite_geometry::{ray_aabb, ray_triangle, Mesh, Ray};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickTarget {
    Furniture(Uuid),
    Floor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub target: PickTarget,
    pub distance: f64,
    pub point: Point3<f64>,
}

/// Nearest furniture box hit by the ray
pub fn pick_furniture(ray: &Ray, items: &[FurnitureItem]) -> Option<PickHit> {
    let mut best: Option<(f64, &FurnitureItem)> = None;
    for item in items {
        let Some(t) = ray_aabb(ray, &item.pick_bounds()) else {
            continue;
        };
        // Strict comparison keeps the earlier item on ties
        if best.map_or(true, |(bt, _)| t < bt) {
            best = Some((t, item));
        }
    }
    best.map(|(t, item)| PickHit {
        target: PickTarget::Furniture(item.id),
        distance: t,
        point: ray.at(t),
    })
}

/// Nearest walkable floor triangle hit by the ray
pub fn pick_floor(ray: &Ray, floors: &[Mesh]) -> Option<PickHit> {
    floors
        .iter()
        .flat_map(|mesh| mesh.triangles())
        .filter_map(|[a, b, c]| ray_triangle(ray, &a, &b, &c))
        .min_by(|a, b| a.total_cmp(b))
        .map(|t| PickHit {
            target: PickTarget::Floor,
            distance: t,
            point: ray.at(t),
        })
}

/// Furniture first, then floor
pub fn pick(ray: &Ray, items: &[FurnitureItem], floors: &[Mesh]) -> Option<PickHit> {
    pick_furniture(ray, items).or_else(|| pick_floor(ray, floors))
}
