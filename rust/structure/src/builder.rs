// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Procedural structure generation from floor plans
//!
//! The plan is re-centered on its bounding-box center so the world origin
//! sits in the middle of the building. Every room then contributes a floor
//! surface and one wall per polygon edge; walls get at most one opening.

use crate::config::BuilderConfig;
use crate::error::Result;
use crate::openings::{cut_wall, decide_opening, PlanFrame};
use crate::types::{
    BuiltStructure, CameraFraming, CollisionBounds, FloorSurface, Plan, Point2D, Room, WallObject,
    WallSegment,
};
use nalgebra::{Point2, Point3, Vector3};
use plan_lite_geometry::{polygon_bounds, polygon_signed_area, triangulate_polygon, Mesh, Segment2};

/// Generate floors, walls, openings and collision bounds for a plan.
///
/// Pure: the same plan and config always yield the same structure.
pub fn build_structure(plan: &Plan, config: &BuilderConfig) -> Result<BuiltStructure> {
    plan.check()?;

    let all_points: Vec<Point2<f64>> = plan
        .rooms
        .iter()
        .flat_map(|r| r.polygon.iter().map(Point2D::to_nalgebra))
        .collect();
    let (min, max) = polygon_bounds(&all_points).unwrap_or((Point2::origin(), Point2::origin()));
    let center = Point2::new((min.x + max.x) / 2.0, (min.y + max.y) / 2.0);
    let (width, depth) = (max.x - min.x, max.y - min.y);
    let frame = PlanFrame::new(width, depth);

    tracing::info!(
        rooms = plan.rooms.len(),
        width,
        depth,
        ceiling = plan.ceiling_height,
        "Building structure from plan"
    );

    let mut floors = Vec::with_capacity(plan.rooms.len());
    let mut segments = Vec::new();
    let mut walls = Vec::new();

    for (room_index, room) in plan.rooms.iter().enumerate() {
        let local: Vec<Point2<f64>> = room
            .polygon
            .iter()
            .map(|p| Point2::new(p.x - center.x, p.y - center.y))
            .collect();

        if local.len() < 3 {
            tracing::warn!(
                room = %room.name,
                vertices = local.len(),
                "Room polygon has fewer than 3 vertices, skipping"
            );
            continue;
        }

        match floor_surface(room, &local) {
            Ok(floor) => floors.push(floor),
            Err(e) => tracing::warn!(room = %room.name, error = %e, "Floor triangulation failed"),
        }

        let edges = usable_edges(&local, config.min_edge_length);
        if edges.len() < 3 {
            tracing::debug!(room = %room.name, edges = edges.len(), "Too few usable edges, floor only");
            continue;
        }

        for edge in edges {
            let midpoint = edge.midpoint();
            let is_exterior = frame.is_exterior(&midpoint, config);
            let is_front = frame.is_front(&midpoint, config);
            let opening = decide_opening(&edge, is_exterior, is_front, plan.ceiling_height, config);

            let segment_index = segments.len();
            let wall = cut_wall(
                segment_index,
                &edge,
                opening.as_ref(),
                plan.default_wall_thickness,
                plan.ceiling_height,
                config,
            )?;

            segments.push(WallSegment {
                room_index,
                start: Point2D::from_nalgebra(&edge.start),
                end: Point2D::from_nalgebra(&edge.end),
                midpoint: Point2D::from_nalgebra(&midpoint),
                length: edge.length(),
                angle: edge.angle(),
                is_exterior,
                opening,
            });
            walls.push(wall);
        }
    }

    let collision_bounds = collect_collision_bounds(&walls);
    let framing = CameraFraming {
        target: Point3::origin(),
        distance: width.max(depth).max(plan.ceiling_height) * config.framing_multiplier,
    };

    let structure = BuiltStructure {
        floors,
        walls,
        segments,
        collision_bounds,
        framing,
        origin_offset: Point2D::from_nalgebra(&center),
        extent: (width, depth),
        ceiling_height: plan.ceiling_height,
    };

    tracing::debug!(
        floors = structure.floors.len(),
        walls = structure.walls.len(),
        openings = structure.opening_count(),
        colliders = structure.collision_bounds.len(),
        "Structure built"
    );

    Ok(structure)
}

/// Floor mesh at y = 0 with one vertex per polygon vertex, facing up
fn floor_surface(room: &Room, local: &[Point2<f64>]) -> Result<FloorSurface> {
    let triangles = triangulate_polygon(local)?;
    // Plan CCW is clockwise seen from +Y, so CCW rings swap two indices
    let flip = polygon_signed_area(local) > 0.0;

    let mut mesh = Mesh::with_capacity(local.len(), triangles.len());
    for p in local {
        mesh.add_vertex(Point3::new(p.x, 0.0, p.y), Vector3::y());
    }
    for tri in triangles.chunks_exact(3) {
        let (a, b, c) = (tri[0] as u32, tri[1] as u32, tri[2] as u32);
        if flip {
            mesh.add_triangle(a, c, b);
        } else {
            mesh.add_triangle(a, b, c);
        }
    }

    Ok(FloorSurface {
        room_name: room.name.clone(),
        material: room.floor_material(),
        mesh,
    })
}

/// Closed-ring edges, dropping near-zero-length ones
fn usable_edges(points: &[Point2<f64>], min_length: f64) -> Vec<Segment2> {
    let n = points.len();
    (0..n)
        .map(|i| Segment2::new(points[i], points[(i + 1) % n]))
        .filter(|s| s.length() >= min_length)
        .collect()
}

fn collect_collision_bounds(walls: &[WallObject]) -> CollisionBounds {
    CollisionBounds::new(
        walls
            .iter()
            .flat_map(|w| w.pieces.iter())
            .map(|p| p.bounds)
            .collect(),
    )
}

/// Two-room sample plan: a 6 x 5 living room beside a 4 x 5 bedroom
pub fn sample_plan() -> Plan {
    let living = Room::new(
        "Living",
        vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(6.0, 0.0),
            Point2D::new(6.0, 5.0),
            Point2D::new(0.0, 5.0),
        ],
    )
    .with_material(crate::types::FloorMaterial::Wood);
    let bedroom = Room::new(
        "Bedroom",
        vec![
            Point2D::new(6.0, 0.0),
            Point2D::new(10.0, 0.0),
            Point2D::new(10.0, 5.0),
            Point2D::new(6.0, 5.0),
        ],
    );
    Plan::new(3.0, 0.2, vec![living, bedroom])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OpeningKind, WallPieceKind};
    use approx::assert_relative_eq;

    fn rectangle_plan(w: f64, d: f64, ceiling: f64) -> Plan {
        Plan::new(
            ceiling,
            0.2,
            vec![Room::new(
                "Room",
                vec![
                    Point2D::new(0.0, 0.0),
                    Point2D::new(w, 0.0),
                    Point2D::new(w, d),
                    Point2D::new(0.0, d),
                ],
            )],
        )
    }

    #[test]
    fn test_single_room() {
        let plan = rectangle_plan(6.0, 5.0, 3.0);
        let built = build_structure(&plan, &BuilderConfig::default()).unwrap();

        assert_eq!(built.floors.len(), 1);
        assert_relative_eq!(built.floors[0].area(), 30.0, epsilon = 1e-4);
        assert_eq!(built.segments.len(), 4);
        assert_eq!(built.walls.len(), 4);
        assert!(built.opening_count() >= 1);
        assert_eq!(built.origin_offset, Point2D::new(3.0, 2.5));
        assert_relative_eq!(built.framing.distance, 6.0 * 2.2);

        // Front edge (minimum plan y) carries the entry door, centered
        let front = &built.segments[0];
        assert_relative_eq!(front.midpoint.y, -2.5);
        let door = front.opening.unwrap();
        assert_eq!(door.kind, OpeningKind::Door);
        assert_relative_eq!(door.width, 0.9);
        assert_relative_eq!(door.position, 0.5);

        // Remaining exterior edges get windows
        for seg in &built.segments[1..] {
            assert!(seg.is_exterior);
            assert_eq!(seg.opening.map(|o| o.kind), Some(OpeningKind::Window));
        }

        // Door wall: two piers and a header; window walls add a sill
        assert_eq!(built.collision_bounds.len(), 3 + 4 * 3);
    }

    #[test]
    fn test_floor_faces_up_and_matches_polygon() {
        let plan = rectangle_plan(4.0, 3.0, 2.5);
        let built = build_structure(&plan, &BuilderConfig::default()).unwrap();
        let mesh = &built.floors[0].mesh;
        assert_eq!(mesh.vertex_count(), 4);
        for [a, b, c] in mesh.triangles() {
            let n = (b - a).cross(&(c - a));
            assert!(n.y > 0.0);
        }
        let bounds = mesh.bounds();
        assert_relative_eq!(bounds.min.y, 0.0);
        assert_relative_eq!(bounds.max.x - bounds.min.x, 4.0, epsilon = 1e-6);
    }

    #[test]
    fn test_clockwise_room_floor_faces_up() {
        let mut plan = rectangle_plan(4.0, 3.0, 2.5);
        plan.rooms[0].polygon.reverse();
        let built = build_structure(&plan, &BuilderConfig::default()).unwrap();
        for [a, b, c] in built.floors[0].mesh.triangles() {
            assert!((b - a).cross(&(c - a)).y > 0.0);
        }
    }

    #[test]
    fn test_short_edges_stay_solid() {
        // 1.2 x 1.2 closet: below every opening threshold
        let plan = rectangle_plan(1.2, 1.2, 2.5);
        let built = build_structure(&plan, &BuilderConfig::default()).unwrap();
        assert_eq!(built.opening_count(), 0);
        for wall in &built.walls {
            assert_eq!(wall.pieces.len(), 1);
            assert_eq!(wall.pieces[0].kind, WallPieceKind::Solid);
            assert!(wall.inset.is_none());
        }
    }

    #[test]
    fn test_idempotent() {
        let plan = sample_plan();
        let config = BuilderConfig::default();
        let a = build_structure(&plan, &config).unwrap();
        let b = build_structure(&plan, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_shared_wall_gets_interior_door() {
        let built = build_structure(&sample_plan(), &BuilderConfig::default()).unwrap();
        assert_eq!(built.floors.len(), 2);
        let interior: Vec<_> = built.segments.iter().filter(|s| !s.is_exterior).collect();
        // The shared edge appears once per room
        assert_eq!(interior.len(), 2);
        for seg in interior {
            assert_relative_eq!(seg.midpoint.x, 1.0);
            assert_eq!(seg.opening.map(|o| o.kind), Some(OpeningKind::Door));
        }
    }

    #[test]
    fn test_degenerate_rooms() {
        let mut plan = rectangle_plan(4.0, 4.0, 3.0);
        plan.rooms.push(Room::new("Line", vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0)]));
        // Collapsed triangle: two coincident vertices leave two usable edges
        plan.rooms.push(Room::new(
            "Sliver",
            vec![Point2D::new(1.0, 1.0), Point2D::new(1.0, 1.0), Point2D::new(2.0, 1.0)],
        ));
        let built = build_structure(&plan, &BuilderConfig::default()).unwrap();
        assert_eq!(built.walls.len(), 4);
        assert!(built.segments.iter().all(|s| s.room_index == 0));
    }

    #[test]
    fn test_invalid_plan() {
        let plan = Plan::new(3.0, 0.2, vec![]);
        assert!(build_structure(&plan, &BuilderConfig::default()).is_err());
    }

    #[test]
    fn test_low_ceiling_keeps_door_header() {
        let plan = rectangle_plan(6.0, 5.0, 2.0);
        let built = build_structure(&plan, &BuilderConfig::default()).unwrap();
        let door = built.segments[0].opening.unwrap();
        assert!(door.height < 2.0);
        assert!(built.walls[0]
            .pieces
            .iter()
            .any(|p| p.kind == WallPieceKind::Header));
    }
}
