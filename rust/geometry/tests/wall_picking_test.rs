// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Picking an extruded wall through the camera, the way the viewer does it:
//! project a world point to the screen, cast the ray back, hit the mesh.

use approx::assert_relative_eq;
use plan_lite_geometry::{
    boxes_intersect, extrude_footprint, ray_aabb, ray_plane_y, ray_triangle, rectangle_footprint,
    Aabb, Camera, Mesh, Point2, Point3, Vector3, Viewport,
};

fn wall() -> Mesh {
    // 4 m long, 0.2 m thick, 2.5 m tall, running along x at z = -2
    let footprint = rectangle_footprint(Point2::new(0.0, -2.0), 4.0, 0.2, 0.0);
    extrude_footprint(&footprint, 0.0, 2.5).unwrap()
}

fn camera() -> Camera {
    Camera::new(Point3::new(3.0, 6.0, 8.0), Point3::origin())
}

#[test]
fn test_extruded_wall_bounds() {
    let mesh = wall();
    let b = mesh.bounds();
    assert_relative_eq!(b.min.x, -2.0, epsilon = 1e-5);
    assert_relative_eq!(b.max.x, 2.0, epsilon = 1e-5);
    assert_relative_eq!(b.min.z, -2.1, epsilon = 1e-5);
    assert_relative_eq!(b.max.z, -1.9, epsilon = 1e-5);
    assert_relative_eq!(b.max.y, 2.5, epsilon = 1e-5);
    // 2 caps x 2 triangles + 4 sides x 2 triangles
    assert_eq!(mesh.triangle_count(), 12);
}

#[test]
fn test_screen_ray_hits_wall_face() {
    let mesh = wall();
    let viewport = Viewport::new(800.0, 600.0);
    let camera = camera();

    // Point on the wall's camera-facing side
    let target = Point3::new(0.5, 1.2, -1.9);
    let screen = camera.project_to_screen(&target, &viewport).unwrap();
    let ray = camera.screen_ray(&screen, &viewport);

    let box_t = ray_aabb(&ray, &mesh.bounds()).unwrap();
    let nearest = mesh
        .triangles()
        .filter_map(|[a, b, c]| ray_triangle(&ray, &a, &b, &c))
        .fold(f64::INFINITY, f64::min);
    assert!(nearest.is_finite());
    assert_relative_eq!(nearest, box_t, epsilon = 1e-5);

    let hit = ray.at(nearest);
    assert_relative_eq!(hit.x, target.x, epsilon = 1e-5);
    assert_relative_eq!(hit.y, target.y, epsilon = 1e-5);
    assert_relative_eq!(hit.z, target.z, epsilon = 1e-5);
}

#[test]
fn test_floor_plane_behind_wall() {
    let viewport = Viewport::new(800.0, 600.0);
    let camera = camera();
    let floor_point = Point3::new(1.0, 0.0, 1.0);

    let screen = camera.project_to_screen(&floor_point, &viewport).unwrap();
    let hit = ray_plane_y(&camera.screen_ray(&screen, &viewport), 0.0).unwrap();
    assert_relative_eq!(hit.x, 1.0, epsilon = 1e-5);
    assert_relative_eq!(hit.z, 1.0, epsilon = 1e-5);

    // Points behind the camera do not project
    assert!(camera
        .project_to_screen(&Point3::new(6.0, 12.0, 16.0), &viewport)
        .is_none());
}

#[test]
fn test_furniture_box_against_wall() {
    let wall_box = wall().bounds();
    let clear = Aabb::from_center_size(Point3::new(0.0, 0.4, -1.5), Vector3::new(0.5, 0.8, 0.5));
    let grazing = clear.translated(&Vector3::new(0.0, 0.0, -0.2));
    let inside = clear.translated(&Vector3::new(0.0, 0.0, -0.5));

    assert!(!boxes_intersect(&clear, &wall_box));
    assert!(boxes_intersect(&grazing, &wall_box));
    assert!(boxes_intersect(&inside, &wall_box));
    assert!(!boxes_intersect(&Aabb::empty(), &wall_box));
}
