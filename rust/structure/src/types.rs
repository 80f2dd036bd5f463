// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for floor plans and generated structures

use crate::error::{Result, StructureError};
use nalgebra::{Point2, Point3};
use plan_lite_geometry::{boxes_intersect, Aabb, Mesh};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A 2D point (simplified for serialization)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn from_nalgebra(p: &Point2<f64>) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Floor finish of a room
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FloorMaterial {
    Wood,
    Tile,
    Concrete,
    #[default]
    Default,
}

/// A room: a simple polygon in meters, implicitly closed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub name: String,
    pub polygon: Vec<Point2D>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_material_key: Option<FloorMaterial>,
}

impl Room {
    pub fn new(name: impl Into<String>, polygon: Vec<Point2D>) -> Self {
        Self {
            name: name.into(),
            polygon,
            floor_material_key: None,
        }
    }

    pub fn with_material(mut self, material: FloorMaterial) -> Self {
        self.floor_material_key = Some(material);
        self
    }

    pub fn floor_material(&self) -> FloorMaterial {
        self.floor_material_key.unwrap_or_default()
    }
}

fn default_true() -> bool {
    true
}

/// Abstract floor plan: rooms plus global heights
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(default = "default_true")]
    pub units_are_meters: bool,
    pub ceiling_height: f64,
    pub default_wall_thickness: f64,
    pub rooms: Vec<Room>,
}

impl Plan {
    pub fn new(ceiling_height: f64, default_wall_thickness: f64, rooms: Vec<Room>) -> Self {
        Self {
            units_are_meters: true,
            ceiling_height,
            default_wall_thickness,
            rooms,
        }
    }

    /// Parse an already-fetched plan document
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks the plan-level invariants the builder relies on.
    ///
    /// Room polygons themselves are not validated: malformed polygons
    /// produce best-effort geometry instead of an error.
    pub fn check(&self) -> Result<()> {
        if self.rooms.is_empty() {
            return Err(StructureError::InvalidPlan("plan has no rooms".into()));
        }
        if !(self.ceiling_height.is_finite() && self.ceiling_height > 0.0) {
            return Err(StructureError::InvalidPlan(format!(
                "ceiling height must be positive, got {}",
                self.ceiling_height
            )));
        }
        if !(self.default_wall_thickness.is_finite() && self.default_wall_thickness > 0.0) {
            return Err(StructureError::InvalidPlan(format!(
                "wall thickness must be positive, got {}",
                self.default_wall_thickness
            )));
        }
        Ok(())
    }
}

/// Opening type classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum OpeningKind {
    Door,
    Window,
}

/// A door or window cut into a wall segment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Opening {
    pub kind: OpeningKind,
    /// Center of the opening along the segment (0 = start, 1 = end)
    pub position: f64,
    pub width: f64,
    pub height: f64,
    /// Height of the opening's bottom edge above the floor
    pub sill_height: f64,
}

/// One polygon edge of one room, in re-centered plan coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WallSegment {
    pub room_index: usize,
    pub start: Point2D,
    pub end: Point2D,
    pub midpoint: Point2D,
    pub length: f64,
    pub angle: f64,
    pub is_exterior: bool,
    pub opening: Option<Opening>,
}

/// Role of a solid wall piece around an opening
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallPieceKind {
    /// Uncut wall
    Solid,
    LeftPier,
    RightPier,
    Header,
    Sill,
}

/// A solid box of wall. Its world AABB is registered as a collision bound.
#[derive(Debug, Clone, PartialEq)]
pub struct WallPiece {
    pub kind: WallPieceKind,
    pub mesh: Mesh,
    pub bounds: Aabb,
}

/// Non-colliding panel filling an opening
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsetKind {
    DoorLeaf,
    Glazing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Inset {
    pub kind: InsetKind,
    pub mesh: Mesh,
}

/// Generated geometry for one wall segment
#[derive(Debug, Clone, PartialEq)]
pub struct WallObject {
    /// Index into `BuiltStructure::segments`
    pub segment_index: usize,
    pub pieces: SmallVec<[WallPiece; 4]>,
    pub inset: Option<Inset>,
}

/// Walkable floor of one room
#[derive(Debug, Clone, PartialEq)]
pub struct FloorSurface {
    pub room_name: String,
    pub material: FloorMaterial,
    /// One vertex per polygon vertex, at y = 0
    pub mesh: Mesh,
}

impl FloorSurface {
    pub fn area(&self) -> f64 {
        self.mesh.projected_area_xz()
    }
}

/// Read-only set of wall/shell boxes furniture may not penetrate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionBounds {
    boxes: Vec<Aabb>,
}

impl CollisionBounds {
    pub fn new(boxes: Vec<Aabb>) -> Self {
        Self {
            boxes: boxes.into_iter().filter(|b| !b.is_empty()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Aabb> {
        self.boxes.iter()
    }

    /// True if `candidate` overlaps any registered bound
    pub fn intersects(&self, candidate: &Aabb) -> bool {
        self.boxes.iter().any(|b| boxes_intersect(b, candidate))
    }
}

/// Camera placement that frames a whole structure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFraming {
    pub target: Point3<f64>,
    pub distance: f64,
}

/// Output of a structure load
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltStructure {
    pub floors: Vec<FloorSurface>,
    pub walls: Vec<WallObject>,
    pub segments: Vec<WallSegment>,
    pub collision_bounds: CollisionBounds,
    pub framing: CameraFraming,
    /// Plan-space point that became the world origin
    pub origin_offset: Point2D,
    /// Plan width (x) and depth (y) in meters
    pub extent: (f64, f64),
    pub ceiling_height: f64,
}

impl BuiltStructure {
    pub fn opening_count(&self) -> usize {
        self.segments.iter().filter(|s| s.opening.is_some()).count()
    }

    pub fn floor_meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.floors.iter().map(|f| &f.mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_from_json() {
        let json = r#"{
            "unitsAreMeters": true,
            "ceilingHeight": 2.7,
            "defaultWallThickness": 0.15,
            "rooms": [
                {
                    "name": "Kitchen",
                    "polygon": [{"x": 0, "y": 0}, {"x": 3, "y": 0}, {"x": 3, "y": 4}],
                    "floorMaterialKey": "tile"
                },
                {
                    "name": "Hall",
                    "polygon": [{"x": 3, "y": 0}, {"x": 5, "y": 0}, {"x": 5, "y": 4}]
                }
            ]
        }"#;

        let plan = Plan::from_json(json).unwrap();
        assert_eq!(plan.rooms.len(), 2);
        assert_eq!(plan.rooms[0].floor_material(), FloorMaterial::Tile);
        assert_eq!(plan.rooms[1].floor_material(), FloorMaterial::Default);
        assert!(plan.check().is_ok());
    }

    #[test]
    fn test_plan_check_rejects_empty_and_flat() {
        let empty = Plan::new(3.0, 0.2, vec![]);
        assert!(matches!(empty.check(), Err(StructureError::InvalidPlan(_))));

        let room = Room::new("A", vec![Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0), Point2D::new(0.0, 1.0)]);
        let flat = Plan::new(0.0, 0.2, vec![room.clone()]);
        assert!(flat.check().is_err());
        let thin = Plan::new(3.0, -1.0, vec![room]);
        assert!(thin.check().is_err());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            Plan::from_json("{\"rooms\": 3}"),
            Err(StructureError::Json(_))
        ));
    }

    #[test]
    fn test_collision_bounds_drop_empty_boxes() {
        let bounds = CollisionBounds::new(vec![
            Aabb::empty(),
            Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)),
        ]);
        assert_eq!(bounds.len(), 1);
        let probe = Aabb::new(Point3::new(0.5, 0.5, 0.5), Point3::new(2.0, 2.0, 2.0));
        assert!(bounds.intersects(&probe));
    }
}
