// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Perspective camera: world-to-screen projection and screen rays

use crate::ray::Ray;
use nalgebra::{Matrix4, Perspective3, Point2, Point3, Vector3, Vector4};

/// Viewport size in pixels. Screen origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// False for a collapsed or non-finite viewport
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Width over height; 1 for an invalid viewport
    pub fn aspect(&self) -> f64 {
        if self.is_valid() {
            self.width / self.height
        } else {
            1.0
        }
    }

    /// Screen pixel to normalized device coordinates (`[-1, 1]`, Y up).
    /// An invalid viewport maps every pixel to the center.
    pub fn to_ndc(&self, screen: &Point2<f64>) -> Point2<f64> {
        if !self.is_valid() {
            return Point2::origin();
        }
        Point2::new(
            screen.x / self.width * 2.0 - 1.0,
            1.0 - screen.y / self.height * 2.0,
        )
    }

    pub fn from_ndc(&self, ndc: &Point2<f64>) -> Point2<f64> {
        Point2::new(
            (ndc.x + 1.0) / 2.0 * self.width,
            (1.0 - ndc.y) / 2.0 * self.height,
        )
    }
}

/// Right-handed, Y-up perspective camera
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f64>,
    pub target: Point3<f64>,
    /// Vertical field of view (radians)
    pub fov_y: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    pub fn new(position: Point3<f64>, target: Point3<f64>) -> Self {
        Self {
            position,
            target,
            fov_y: 50.0_f64.to_radians(),
            near: 0.1,
            far: 500.0,
        }
    }

    /// Same camera with another depth range
    pub fn with_depth_range(mut self, near: f64, far: f64) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Matrix4<f64> {
        Matrix4::look_at_rh(&self.position, &self.target, &Vector3::y())
    }

    /// Projection matrix (camera -> clip), OpenGL depth convention
    pub fn projection_matrix(&self, aspect: f64) -> Matrix4<f64> {
        Perspective3::new(aspect, self.fov_y, self.near, self.far).to_homogeneous()
    }

    pub fn view_projection(&self, viewport: &Viewport) -> Matrix4<f64> {
        self.projection_matrix(viewport.aspect()) * self.view_matrix()
    }

    /// Project a world point to screen pixels.
    ///
    /// Returns `None` when the point is behind the camera or its normalized
    /// depth falls outside `[-1, 1]` (closer than `near` or past `far`).
    pub fn project_to_screen(
        &self,
        world: &Point3<f64>,
        viewport: &Viewport,
    ) -> Option<Point2<f64>> {
        let clip = self.view_projection(viewport) * Vector4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }
        Some(viewport.from_ndc(&Point2::new(ndc.x, ndc.y)))
    }

    /// Cast a ray from a screen pixel into the scene.
    pub fn screen_ray(&self, screen: &Point2<f64>, viewport: &Viewport) -> Ray {
        let ndc = viewport.to_ndc(screen);
        let fallback = Ray::new(self.position, self.target - self.position);

        let Some(inverse) = self.view_projection(viewport).try_inverse() else {
            return fallback;
        };

        let near = inverse * Vector4::new(ndc.x, ndc.y, -1.0, 1.0);
        let far = inverse * Vector4::new(ndc.x, ndc.y, 1.0, 1.0);
        if near.w.abs() < 1e-12 || far.w.abs() < 1e-12 {
            return fallback;
        }
        let near = Point3::from(near.xyz() / near.w);
        let far = Point3::from(far.xyz() / far.w);
        Ray::new(near, far - near)
    }

    pub fn distance(&self) -> f64 {
        (self.position - self.target).norm()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(8.0, 8.0, 8.0), Point3::origin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn front_camera() -> (Camera, Viewport) {
        (
            Camera::new(Point3::new(0.0, 0.0, 10.0), Point3::origin()),
            Viewport::new(800.0, 600.0),
        )
    }

    #[test]
    fn test_project_target_to_center() {
        let (camera, viewport) = front_camera();
        let screen = camera.project_to_screen(&Point3::origin(), &viewport).unwrap();
        assert_relative_eq!(screen.x, 400.0, epsilon = 1e-6);
        assert_relative_eq!(screen.y, 300.0, epsilon = 1e-6);
    }

    #[test]
    fn test_project_up_is_screen_up() {
        let (camera, viewport) = front_camera();
        let screen = camera
            .project_to_screen(&Point3::new(0.0, 1.0, 0.0), &viewport)
            .unwrap();
        assert!(screen.y < 300.0);
    }

    #[test]
    fn test_project_rejects_behind_and_beyond() {
        let (camera, viewport) = front_camera();
        assert!(camera
            .project_to_screen(&Point3::new(0.0, 0.0, 20.0), &viewport)
            .is_none());
        assert!(camera
            .project_to_screen(&Point3::new(0.0, 0.0, -1000.0), &viewport)
            .is_none());
    }

    #[test]
    fn test_collapsed_viewport_does_not_panic() {
        let camera = Camera::new(Point3::new(0.0, 5.0, 10.0), Point3::origin());
        for viewport in [
            Viewport::new(0.0, 720.0),
            Viewport::new(1280.0, 0.0),
            Viewport::new(-4.0, f64::NAN),
        ] {
            assert!(!viewport.is_valid());
            assert_eq!(viewport.aspect(), 1.0);
            let ray = camera.screen_ray(&Point2::new(10.0, 10.0), &viewport);
            assert!(ray.direction.iter().all(|v| v.is_finite()));
            assert!(ray.direction.y < 0.0);
        }
    }

    #[test]
    fn test_far_plane_follows_depth_range() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 800.0), Point3::origin());
        let viewport = Viewport::new(800.0, 600.0);
        assert!(camera.project_to_screen(&Point3::origin(), &viewport).is_none());
        let camera = camera.with_depth_range(0.1, 3200.0);
        assert!(camera.project_to_screen(&Point3::origin(), &viewport).is_some());
    }

    #[test]
    fn test_screen_ray_round_trip() {
        let camera = Camera::new(Point3::new(3.0, 6.0, 9.0), Point3::origin());
        let viewport = Viewport::new(1024.0, 768.0);
        let world = Point3::new(1.0, 0.5, -2.0);

        let screen = camera.project_to_screen(&world, &viewport).unwrap();
        let ray = camera.screen_ray(&screen, &viewport);

        // The ray must pass through the original point
        let to_point = world - ray.origin;
        let along = to_point.dot(&ray.direction);
        let closest = ray.at(along);
        assert_relative_eq!((closest - world).norm(), 0.0, epsilon = 1e-6);
    }
}
