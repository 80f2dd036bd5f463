// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Furniture-versus-structure collision

use plan_lite_geometry::Aabb;
use plan_lite_structure::CollisionBounds;

/// Wall and shell bounds of the loaded structure
#[derive(Debug, Clone, Default)]
pub struct CollisionWorld {
    bounds: CollisionBounds,
}

impl CollisionWorld {
    pub fn new(bounds: CollisionBounds) -> Self {
        Self { bounds }
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// True if the candidate box touches or overlaps any wall bound.
    /// Empty candidates never collide.
    pub fn collides(&self, candidate: &Aabb) -> bool {
        !candidate.is_empty() && self.bounds.intersects(candidate)
    }

    pub fn bounds(&self) -> &CollisionBounds {
        &self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn wall() -> CollisionWorld {
        CollisionWorld::new(CollisionBounds::new(vec![Aabb::new(
            Point3::new(2.0, 0.0, -3.0),
            Point3::new(2.2, 3.0, 3.0),
        )]))
    }

    #[test]
    fn test_overlap_and_touch() {
        let world = wall();
        let inside = Aabb::new(Point3::new(1.5, 0.0, 0.0), Point3::new(2.1, 1.0, 0.5));
        let touching = Aabb::new(Point3::new(1.0, 0.0, 0.0), Point3::new(2.0, 1.0, 0.5));
        let clear = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.9, 1.0, 0.5));
        assert!(world.collides(&inside));
        assert!(world.collides(&touching));
        assert!(!world.collides(&clear));
    }

    #[test]
    fn test_empty_candidate_never_collides() {
        assert!(!wall().collides(&Aabb::empty()));
        assert!(!CollisionWorld::default().collides(&Aabb::new(
            Point3::origin(),
            Point3::new(1.0, 1.0, 1.0)
        )));
    }
}
