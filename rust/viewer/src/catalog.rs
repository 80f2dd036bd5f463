// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Furniture catalog and template cache
//!
//! The catalog is a fixed table: one entry per furniture type naming its
//! asset, normalization scale, price and which materials may be recolored.
//! Loaded meshes are normalized once into a template; every placement
//! deep-clones that template.

use crate::error::ViewerError;
use plan_lite_structure::SceneNode;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FurnitureType {
    Chair,
    Table,
    Sofa,
    Bed,
    Lamp,
    Desk,
    Bookshelf,
}

/// Which of a model's materials accept a color override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecolorMask {
    /// Every material
    All,
    /// Materials whose name contains any of these fragments
    Only(&'static [&'static str]),
    /// Every material except those whose name contains any of these fragments
    Except(&'static [&'static str]),
}

impl RecolorMask {
    /// Case-insensitive match of a material name against the mask
    pub fn matches(&self, material_name: &str) -> bool {
        let name = material_name.to_lowercase();
        let hit = |fragments: &[&str]| fragments.iter().any(|f| name.contains(f));
        match self {
            RecolorMask::All => true,
            RecolorMask::Only(fragments) => hit(fragments),
            RecolorMask::Except(fragments) => !hit(fragments),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry {
    pub furniture_type: FurnitureType,
    pub id: &'static str,
    pub label: &'static str,
    pub asset_key: &'static str,
    /// Uniform scale applied after normalization
    pub scale: f64,
    /// Unit price shown by the checkout UI
    pub unit_price: f64,
    pub recolor: RecolorMask,
}

const CATALOG: [CatalogEntry; 7] = [
    CatalogEntry {
        furniture_type: FurnitureType::Chair,
        id: "chair",
        label: "Dining Chair",
        asset_key: "furniture/chair.glb",
        scale: 1.0,
        unit_price: 89.0,
        // Legs only; the seat keeps its upholstery
        recolor: RecolorMask::Only(&["leg"]),
    },
    CatalogEntry {
        furniture_type: FurnitureType::Table,
        id: "table",
        label: "Dining Table",
        asset_key: "furniture/table.glb",
        scale: 1.0,
        unit_price: 349.0,
        recolor: RecolorMask::Only(&["leg", "frame"]),
    },
    CatalogEntry {
        furniture_type: FurnitureType::Sofa,
        id: "sofa",
        label: "Three-Seat Sofa",
        asset_key: "furniture/sofa.glb",
        scale: 1.1,
        unit_price: 899.0,
        recolor: RecolorMask::Only(&["fabric", "cushion"]),
    },
    CatalogEntry {
        furniture_type: FurnitureType::Bed,
        id: "bed",
        label: "Double Bed",
        asset_key: "furniture/bed.glb",
        scale: 1.0,
        unit_price: 649.0,
        recolor: RecolorMask::Only(&["blanket", "duvet"]),
    },
    CatalogEntry {
        furniture_type: FurnitureType::Lamp,
        id: "lamp",
        label: "Floor Lamp",
        asset_key: "furniture/lamp.glb",
        scale: 0.9,
        unit_price: 59.0,
        recolor: RecolorMask::Only(&["shade"]),
    },
    CatalogEntry {
        furniture_type: FurnitureType::Desk,
        id: "desk",
        label: "Writing Desk",
        asset_key: "furniture/desk.glb",
        scale: 1.0,
        unit_price: 279.0,
        // Keep the wood grain top and metal hardware
        recolor: RecolorMask::Except(&["wood", "metal"]),
    },
    CatalogEntry {
        furniture_type: FurnitureType::Bookshelf,
        id: "bookshelf",
        label: "Bookshelf",
        asset_key: "furniture/bookshelf.glb",
        scale: 1.0,
        unit_price: 159.0,
        recolor: RecolorMask::All,
    },
];

impl FurnitureType {
    pub fn all() -> impl Iterator<Item = FurnitureType> {
        CATALOG.iter().map(|e| e.furniture_type)
    }

    pub fn entry(&self) -> &'static CatalogEntry {
        // CATALOG is declared in enum order
        &CATALOG[*self as usize]
    }

    pub fn id(&self) -> &'static str {
        self.entry().id
    }

    pub fn label(&self) -> &'static str {
        self.entry().label
    }
}

impl fmt::Display for FurnitureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for FurnitureType {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .iter()
            .find(|e| e.id.eq_ignore_ascii_case(s))
            .map(|e| e.furniture_type)
            .ok_or_else(|| ViewerError::UnknownFurnitureType(s.to_string()))
    }
}

/// Normalize a loaded model into a template: centered horizontally on its
/// own bounds, resting on y = 0, scaled per type.
pub fn normalize_template(furniture_type: FurnitureType, mut node: SceneNode) -> SceneNode {
    node.ground_and_center();
    let scale = furniture_type.entry().scale;
    if (scale - 1.0).abs() > f64::EPSILON {
        node.scale_geometry(scale);
    }
    node.name = furniture_type.id().to_string();
    node.transform = Default::default();
    node
}

/// Empty stand-in for a model that failed to load
pub fn placeholder(furniture_type: FurnitureType) -> SceneNode {
    SceneNode::new(format!("{}-placeholder", furniture_type.id()))
}

/// Normalized templates, one per furniture type
#[derive(Debug, Default)]
pub struct FurnitureCatalog {
    templates: FxHashMap<FurnitureType, SceneNode>,
}

impl FurnitureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cached(&self, furniture_type: FurnitureType) -> bool {
        self.templates.contains_key(&furniture_type)
    }

    /// Normalize and cache a loaded model. The first template for a type wins.
    pub fn install(&mut self, furniture_type: FurnitureType, node: SceneNode) {
        if self.is_cached(furniture_type) {
            tracing::debug!(%furniture_type, "Template already cached, ignoring duplicate load");
            return;
        }
        let template = normalize_template(furniture_type, node);
        tracing::debug!(
            %furniture_type,
            parts = template.parts.len(),
            triangles = template.triangle_count(),
            "Cached furniture template"
        );
        self.templates.insert(furniture_type, template);
    }

    /// Cache an empty placeholder after a failed load
    pub fn install_placeholder(&mut self, furniture_type: FurnitureType) {
        self.templates
            .entry(furniture_type)
            .or_insert_with(|| placeholder(furniture_type));
    }

    /// Deep clone of the cached template, if loaded
    pub fn instantiate(&self, furniture_type: FurnitureType) -> Option<SceneNode> {
        self.templates.get(&furniture_type).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use plan_lite_geometry::{Aabb, Mesh};
    use plan_lite_structure::{Material, MeshPart, Rgb};
    use nalgebra::Point3;

    fn offset_box() -> SceneNode {
        SceneNode::new("raw").with_part(MeshPart::new(
            "body",
            Mesh::cuboid(&Aabb::new(Point3::new(10.0, 2.0, 10.0), Point3::new(12.0, 3.0, 11.0))),
            Material::new("Fabric", Rgb::WHITE),
        ))
    }

    #[test]
    fn test_table_is_in_enum_order() {
        for (i, t) in FurnitureType::all().enumerate() {
            assert_eq!(t as usize, i);
            assert_eq!(t.entry().furniture_type, t);
            assert_eq!(t.id().parse::<FurnitureType>().unwrap(), t);
        }
        assert!(matches!(
            "throne".parse::<FurnitureType>(),
            Err(ViewerError::UnknownFurnitureType(name)) if name == "throne"
        ));
    }

    #[test]
    fn test_recolor_masks() {
        let chair = FurnitureType::Chair.entry().recolor;
        assert!(chair.matches("Chair_Leg_Metal"));
        assert!(!chair.matches("Seat_Fabric"));
        let desk = FurnitureType::Desk.entry().recolor;
        assert!(desk.matches("Drawer_Paint"));
        assert!(!desk.matches("Oak_Wood_Top"));
        assert!(RecolorMask::All.matches("anything"));
    }

    #[test]
    fn test_normalize_applies_scale() {
        let template = normalize_template(FurnitureType::Sofa, offset_box());
        let b = template.local_bounds();
        assert_relative_eq!(b.min.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(b.center().x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(b.size().x, 2.2, epsilon = 1e-5);
    }

    #[test]
    fn test_instances_are_independent() {
        let mut catalog = FurnitureCatalog::new();
        assert!(catalog.instantiate(FurnitureType::Chair).is_none());
        catalog.install(FurnitureType::Chair, offset_box());
        let mut a = catalog.instantiate(FurnitureType::Chair).unwrap();
        let b = catalog.instantiate(FurnitureType::Chair).unwrap();
        a.parts[0].material.color = Rgb::new(0.0, 0.0, 0.0);
        assert!(b.parts[0].material.color.bits_eq(&Rgb::WHITE));
    }

    #[test]
    fn test_placeholder_is_empty() {
        let mut catalog = FurnitureCatalog::new();
        catalog.install_placeholder(FurnitureType::Lamp);
        let node = catalog.instantiate(FurnitureType::Lamp).unwrap();
        assert!(node.is_empty());
        // A later successful load does not replace the cached placeholder
        catalog.install(FurnitureType::Lamp, offset_box());
        assert!(catalog.instantiate(FurnitureType::Lamp).unwrap().is_empty());
    }
}
