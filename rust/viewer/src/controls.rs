// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Orbit camera controls
//!
//! The controls are shared between the user (orbit/pan/zoom) and the drag
//! interaction, which suspends them while an object is being moved. Every
//! suspend must be paired with a resume; suspending twice keeps the first
//! snapshot.

use nalgebra::{Point3, Vector3};
use plan_lite_geometry::Camera;
use plan_lite_structure::CameraFraming;

const MIN_DISTANCE: f64 = 0.5;
const MAX_PITCH: f64 = 1.5;
const DAMPING: f64 = 6.0;
/// Far plane as a multiple of the orbit distance
const FAR_FACTOR: f64 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    /// Horizontal angle (radians)
    pub yaw: f64,
    /// Elevation angle (radians)
    pub pitch: f64,
    pub distance: f64,
    pub target: Point3<f64>,
    enabled: bool,
    /// Enabled flag captured by `suspend`
    saved: Option<bool>,
    /// Residual orbit velocity (radians/second)
    spin: f64,
}

impl OrbitControls {
    pub fn new() -> Self {
        Self {
            yaw: 0.6,
            pitch: 0.7,
            distance: 12.0,
            target: Point3::origin(),
            enabled: true,
            saved: None,
            spin: 0.0,
        }
    }

    pub fn frame(&mut self, framing: &CameraFraming) {
        self.target = framing.target;
        self.distance = framing.distance.max(MIN_DISTANCE);
        self.spin = 0.0;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.saved.is_some() {
            // Takes effect on resume
            self.saved = Some(enabled);
        } else {
            self.enabled = enabled;
        }
    }

    pub fn is_suspended(&self) -> bool {
        self.saved.is_some()
    }

    /// Snapshot the enabled flag and disable user input
    pub fn suspend(&mut self) {
        if self.saved.is_none() {
            self.saved = Some(self.enabled);
        }
        self.enabled = false;
        self.spin = 0.0;
    }

    /// Restore the flag captured by `suspend`. No-op when not suspended.
    pub fn resume(&mut self) {
        if let Some(enabled) = self.saved.take() {
            self.enabled = enabled;
        }
    }

    /// Orbit by pixel deltas; ignored while disabled
    pub fn rotate(&mut self, dx: f64, dy: f64) {
        if !self.enabled {
            return;
        }
        let yaw_delta = dx.to_radians() * 0.5;
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + dy.to_radians() * 0.5).clamp(0.05, MAX_PITCH);
        self.spin = yaw_delta * 10.0;
    }

    pub fn zoom(&mut self, delta: f64) {
        if !self.enabled {
            return;
        }
        self.distance = (self.distance * (1.0 - delta)).max(MIN_DISTANCE);
    }

    /// Move the target in the horizontal plane
    pub fn pan(&mut self, dx: f64, dz: f64) {
        if !self.enabled {
            return;
        }
        let (s, c) = self.yaw.sin_cos();
        let right = Vector3::new(c, 0.0, -s);
        let forward = Vector3::new(-s, 0.0, -c);
        self.target += right * dx + forward * dz;
    }

    /// Advance inertial orbit
    pub fn update(&mut self, dt: f64) {
        if !self.enabled || self.spin == 0.0 {
            return;
        }
        self.yaw += self.spin * dt;
        self.spin *= (-DAMPING * dt).exp();
        if self.spin.abs() < 1e-4 {
            self.spin = 0.0;
        }
    }

    pub fn eye_position(&self) -> Point3<f64> {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vector3::new(cp * sy, sp, cp * cy) * self.distance
    }

    /// Camera for the current orbit. The far plane grows with the distance
    /// so a framed structure stays inside the depth range.
    pub fn camera(&self) -> Camera {
        let camera = Camera::new(self.eye_position(), self.target);
        let far = camera.far.max(self.distance * FAR_FACTOR);
        let near = camera.near;
        camera.with_depth_range(near, far)
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_suspend_resume_restores_flag() {
        let mut controls = OrbitControls::new();
        controls.set_enabled(false);
        controls.suspend();
        controls.suspend();
        assert!(!controls.is_enabled());
        controls.resume();
        assert!(!controls.is_enabled());

        controls.set_enabled(true);
        controls.suspend();
        assert!(!controls.is_enabled());
        controls.resume();
        assert!(controls.is_enabled());
        assert!(!controls.is_suspended());
    }

    #[test]
    fn test_disabled_controls_ignore_input() {
        let mut controls = OrbitControls::new();
        controls.suspend();
        let before = controls.clone();
        controls.rotate(30.0, 10.0);
        controls.zoom(0.5);
        controls.pan(1.0, 1.0);
        controls.update(0.016);
        assert_eq!(controls, before);
    }

    #[test]
    fn test_framing_sets_distance() {
        let mut controls = OrbitControls::new();
        controls.frame(&CameraFraming {
            target: Point3::origin(),
            distance: 13.2,
        });
        assert_relative_eq!((controls.eye_position() - controls.target).norm(), 13.2, epsilon = 1e-9);
    }

    #[test]
    fn test_far_plane_covers_large_framing() {
        let mut controls = OrbitControls::new();
        controls.frame(&CameraFraming {
            target: Point3::origin(),
            distance: 660.0,
        });
        let camera = controls.camera();
        assert!(camera.far >= 660.0 * 1.5);
        assert!(camera
            .project_to_screen(&Point3::origin(), &plan_lite_geometry::Viewport::new(1280.0, 720.0))
            .is_some());
    }

    #[test]
    fn test_inertia_decays() {
        let mut controls = OrbitControls::new();
        controls.rotate(20.0, 0.0);
        let yaw = controls.yaw;
        for _ in 0..600 {
            controls.update(1.0 / 60.0);
        }
        assert!(controls.yaw > yaw);
        assert_eq!(controls.spin, 0.0);
    }
}
