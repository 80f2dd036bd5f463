// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Building structures from floor plans
//!
//! This crate provides:
//! 1. The floor plan model (rooms as simple polygons, ceiling height, wall thickness)
//! 2. Procedural generation of floors, walls and door/window cut-outs
//! 3. Import of pre-built models with floor and wall collider detection
//! 4. A small scene-node model shared with the viewer, and OBJ export
//!
//! # Usage
//!
//! ```rust,ignore
//! use plan_lite_structure::{build_structure, BuilderConfig, Plan};
//!
//! let plan = Plan::from_json(&json)?;
//! let structure = build_structure(&plan, &BuilderConfig::default())?;
//! println!("{} openings", structure.opening_count());
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod export;
pub mod openings;
pub mod scene;
pub mod static_loader;
pub mod types;

// Re-export commonly used types and functions
pub use builder::{build_structure, sample_plan};
pub use config::{BuilderConfig, StaticLoaderConfig};
pub use error::{Result, StructureError};
pub use export::{write_scene_obj, write_structure_obj};
pub use scene::{Material, MeshPart, ParseColorError, Rgb, SceneNode, Transform};
pub use static_loader::{load_static_structure, MaterialRole, MaterialRoleTable, StaticStructure};
pub use types::{
    BuiltStructure, CameraFraming, CollisionBounds, FloorMaterial, FloorSurface, Inset, InsetKind,
    Opening, OpeningKind, Plan, Point2D, Room, WallObject, WallPiece, WallPieceKind, WallSegment,
};
