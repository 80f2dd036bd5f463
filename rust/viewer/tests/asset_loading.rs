// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use nalgebra::Point3;
use plan_lite_geometry::{Aabb, Mesh};
use plan_lite_structure::{sample_plan, Material, MeshPart, Plan, Point2D, Rgb, Room, SceneNode};
use plan_lite_viewer::{
    fetch, FurnitureType, InteractionState, LoadRequest, LoadedStructure, MemoryAssetSource, Viewer,
    ViewerConfig,
};

fn cube(name: &str, material: &str, min: [f64; 3], max: [f64; 3]) -> MeshPart {
    MeshPart::new(
        name,
        Mesh::cuboid(&Aabb::new(Point3::from(min), Point3::from(max))),
        Material::new(material, Rgb::WHITE),
    )
}

fn chair_asset() -> SceneNode {
    // Authored off-center and above the ground
    SceneNode::new("chair.glb").with_part(cube("body", "Chair_Leg", [4.0, 1.0, 4.0], [4.5, 1.9, 4.5]))
}

/// Showcase interior: floor slab plus two perimeter walls
fn showcase_asset() -> SceneNode {
    SceneNode::new("showcase.glb")
        .with_part(cube("slab", "Floor_Tiles", [-4.0, -0.1, -3.0], [4.0, 0.0, 3.0]))
        .with_part(cube("back", "Plaster", [-4.0, 0.0, 2.8], [4.0, 2.8, 3.0]))
        .with_part(cube("left", "Plaster", [-4.0, 0.0, -3.0], [-3.8, 2.8, 3.0]))
}

fn source() -> MemoryAssetSource {
    MemoryAssetSource::new()
        .with("furniture/chair.glb", chair_asset())
        .with("models/showcase.glb", showcase_asset())
}

fn plan_viewer() -> Viewer {
    let mut viewer = Viewer::new(ViewerConfig::default());
    viewer.load_plan(&sample_plan()).unwrap();
    viewer
}

#[tokio::test]
async fn test_activating_uncached_type_requests_its_template() {
    let source = source();
    let mut viewer = plan_viewer();
    viewer.set_active_furniture_type(Some(FurnitureType::Chair));
    assert!(viewer.preview().is_none());
    assert!(viewer.place_at(Point3::origin()).is_none());

    let tickets = viewer.take_load_requests();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].request, LoadRequest::Furniture(FurnitureType::Chair));
    assert!(viewer.take_load_requests().is_empty());

    for ticket in tickets {
        let outcome = fetch(&source, ticket).await;
        assert!(viewer.complete_load(outcome));
    }
    let preview = viewer.preview().unwrap();
    assert_eq!(preview.furniture_type, FurnitureType::Chair);
    assert!(preview.node.parts[0].material.is_transparent());

    // Template was re-grounded; the placed chair sits on the floor
    let id = viewer.place_at(Point3::new(-2.0, 0.0, 0.0)).unwrap();
    let bounds = viewer.furniture_item(id).unwrap().bounds();
    assert!(bounds.min.y.abs() < 1e-6);
    assert!((bounds.center().x + 2.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_load_after_dispose_is_ignored() {
    let source = source();
    let mut viewer = plan_viewer();
    let ticket = viewer.request_template(FurnitureType::Chair).unwrap();
    // Already requested
    assert!(viewer.request_template(FurnitureType::Chair).is_none());

    viewer.dispose();
    let outcome = fetch(&source, ticket).await;
    assert!(!viewer.complete_load(outcome));
    assert!(!viewer.catalog().is_cached(FurnitureType::Chair));
    assert!(viewer.furniture().is_empty());
}

#[tokio::test]
async fn test_ticket_from_another_viewer_is_ignored() {
    let source = source();
    let mut first = plan_viewer();
    let mut second = plan_viewer();
    let ticket = first.request_template(FurnitureType::Chair).unwrap();

    let outcome = fetch(&source, ticket).await;
    assert!(!second.complete_load(outcome));
    assert!(!second.catalog().is_cached(FurnitureType::Chair));
}

#[tokio::test]
async fn test_failed_furniture_load_uses_placeholder() {
    let source = source();
    let mut viewer = plan_viewer();
    viewer.set_active_furniture_type(Some(FurnitureType::Lamp));
    let tickets = viewer.take_load_requests();

    for ticket in tickets {
        let outcome = fetch(&source, ticket).await;
        assert!(outcome.result.is_err());
        assert!(viewer.complete_load(outcome));
    }

    // Placeholders have no geometry but keep a small pick and collision box
    let id = viewer.place_at(Point3::new(-5.0, 0.0, 0.0)).unwrap();
    let item = viewer.furniture_item(id).unwrap();
    assert!(item.bounds().is_empty());
    assert!(!item.pick_bounds().is_empty());
    assert_eq!(
        viewer.interaction(),
        InteractionState::Placing {
            furniture_type: FurnitureType::Lamp
        }
    );
}

#[tokio::test]
async fn test_placeholder_cannot_enter_wall() {
    let source = source();
    let room = Plan::new(
        3.0,
        0.2,
        vec![Room::new(
            "Living",
            vec![
                Point2D::new(0.0, 0.0),
                Point2D::new(6.0, 0.0),
                Point2D::new(6.0, 5.0),
                Point2D::new(0.0, 5.0),
            ],
        )],
    );
    let mut viewer = Viewer::new(ViewerConfig::default());
    viewer.load_plan(&room).unwrap();
    viewer.set_active_furniture_type(Some(FurnitureType::Lamp));
    for ticket in viewer.take_load_requests() {
        assert!(viewer.complete_load(fetch(&source, ticket).await));
    }

    // Right wall spans x in [2.9, 3.1] after centering
    assert!(viewer.place_at(Point3::new(3.0, 0.0, 0.0)).is_none());
    assert!(viewer.furniture().is_empty());

    let id = viewer.place_at(Point3::new(2.0, 0.0, 0.0)).unwrap();
    assert!(!viewer.move_selected_to(Point3::new(2.95, 0.0, 0.0)));
    assert!((viewer.furniture_item(id).unwrap().position().x - 2.0).abs() < 1e-9);
    let collision = viewer.collision().unwrap();
    assert!(!collision.collides(&viewer.furniture_item(id).unwrap().pick_bounds()));
}

#[tokio::test]
async fn test_superseded_structure_load_is_dropped() {
    let source = source();
    let mut viewer = plan_viewer();

    let stale = viewer.begin_static_load("models/missing.glb").unwrap();
    let current = viewer.begin_static_load("models/showcase.glb").unwrap();

    let outcome = fetch(&source, stale).await;
    assert!(!viewer.complete_load(outcome));
    assert!(matches!(viewer.structure(), Some(LoadedStructure::Procedural(_))));

    let outcome = fetch(&source, current).await;
    assert!(viewer.complete_load(outcome));
    let Some(LoadedStructure::Static(loaded)) = viewer.structure() else {
        panic!("expected a static structure");
    };
    assert_eq!(loaded.collision_bounds.len(), 2);
    assert!(loaded.floor_height.abs() < 1e-9);
}

#[tokio::test]
async fn test_plan_load_supersedes_pending_static_load() {
    let source = source();
    let mut viewer = plan_viewer();
    let ticket = viewer.begin_static_load("models/showcase.glb").unwrap();

    viewer.load_plan(&sample_plan()).unwrap();
    let outcome = fetch(&source, ticket).await;
    assert!(!viewer.complete_load(outcome));
    assert!(matches!(viewer.structure(), Some(LoadedStructure::Procedural(_))));
}

#[tokio::test]
async fn test_furniture_collides_with_static_walls() {
    let source = source();
    let mut viewer = plan_viewer();
    let ticket = viewer.begin_static_load("models/showcase.glb").unwrap();
    assert!(viewer.complete_load(fetch(&source, ticket).await));

    viewer.set_active_furniture_type(Some(FurnitureType::Chair));
    for ticket in viewer.take_load_requests() {
        assert!(viewer.complete_load(fetch(&source, ticket).await));
    }

    assert!(viewer.place_at(Point3::origin()).is_some());
    // Left wall occupies x in [-4.0, -3.8] once the model is centered
    assert!(viewer.place_at(Point3::new(-3.8, 0.0, 0.0)).is_none());
    assert_eq!(viewer.furniture().len(), 1);
}
