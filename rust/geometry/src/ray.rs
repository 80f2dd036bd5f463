// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ray intersection tests used by picking

use crate::bounds::Aabb;
use nalgebra::{Point3, Vector3};

/// A ray in world space. `direction` is kept normalized by [`Ray::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f64>,
    pub direction: Vector3<f64>,
}

impl Ray {
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        let len = direction.norm();
        let direction = if len > 0.0 { direction / len } else { direction };
        Self { origin, direction }
    }

    #[inline]
    pub fn at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }
}

/// Slab test. Returns the distance to the nearest hit in front of the origin;
/// a ray starting inside the box reports its exit distance.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f64> {
    if aabb.is_empty() {
        return None;
    }

    let mut t_min = f64::NEG_INFINITY;
    let mut t_max = f64::INFINITY;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let dir = ray.direction[axis];
        let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

        if dir.abs() < 1e-12 {
            // Parallel to this slab: miss unless the origin lies between the planes
            if origin < lo || origin > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / dir;
        let mut t1 = (lo - origin) * inv;
        let mut t2 = (hi - origin) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return None;
        }
    }

    if t_max < 0.0 {
        return None;
    }
    Some(if t_min < 0.0 { t_max } else { t_min })
}

/// Möller-Trumbore ray-triangle intersection (double sided).
pub fn ray_triangle(
    ray: &Ray,
    v0: &Point3<f64>,
    v1: &Point3<f64>,
    v2: &Point3<f64>,
) -> Option<f64> {
    const EPSILON: f64 = 1e-10;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(&edge2);
    let a = edge1.dot(&h);

    // Parallel to the triangle plane
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(&h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(&edge1);
    let v = f * ray.direction.dot(&q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(&q);
    (t > EPSILON).then_some(t)
}

/// Intersection with the horizontal plane `y = height`.
pub fn ray_plane_y(ray: &Ray, height: f64) -> Option<Point3<f64>> {
    if ray.direction.y.abs() < 1e-12 {
        return None;
    }
    let t = (height - ray.origin.y) / ray.direction.y;
    (t >= 0.0).then(|| ray.at(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn down_from(x: f64, z: f64) -> Ray {
        Ray::new(Point3::new(x, 10.0, z), Vector3::new(0.0, -1.0, 0.0))
    }

    #[test]
    fn test_ray_aabb_hit_and_miss() {
        let aabb = Aabb::new(Point3::new(-1.0, 0.0, -1.0), Point3::new(1.0, 2.0, 1.0));
        assert_relative_eq!(ray_aabb(&down_from(0.0, 0.0), &aabb).unwrap(), 8.0);
        assert!(ray_aabb(&down_from(3.0, 0.0), &aabb).is_none());

        // Box behind the origin
        let up = Ray::new(Point3::new(0.0, 10.0, 0.0), Vector3::new(0.0, 1.0, 0.0));
        assert!(ray_aabb(&up, &aabb).is_none());
    }

    #[test]
    fn test_ray_aabb_from_inside() {
        let aabb = Aabb::new(Point3::new(-1.0, 0.0, -1.0), Point3::new(1.0, 2.0, 1.0));
        let ray = Ray::new(Point3::new(0.0, 1.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(ray_aabb(&ray, &aabb).unwrap(), 1.0);
    }

    #[test]
    fn test_ray_triangle() {
        let v0 = Point3::new(-1.0, 0.0, -1.0);
        let v1 = Point3::new(1.0, 0.0, -1.0);
        let v2 = Point3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(ray_triangle(&down_from(0.0, 0.0), &v0, &v1, &v2).unwrap(), 10.0);
        assert!(ray_triangle(&down_from(2.0, 0.0), &v0, &v1, &v2).is_none());
    }

    #[test]
    fn test_ray_plane() {
        let ray = Ray::new(Point3::new(0.0, 4.0, 0.0), Vector3::new(1.0, -1.0, 0.0));
        let hit = ray_plane_y(&ray, 0.0).unwrap();
        assert_relative_eq!(hit.x, 4.0, epsilon = 1e-9);
        assert_relative_eq!(hit.y, 0.0, epsilon = 1e-9);

        let flat = Ray::new(Point3::new(0.0, 4.0, 0.0), Vector3::new(1.0, 0.0, 0.0));
        assert!(ray_plane_y(&flat, 0.0).is_none());
    }
}
