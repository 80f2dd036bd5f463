// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-instance color overrides
//!
//! Only materials accepted by the furniture type's recolor mask change.
//! A material's color is captured the first time it is overridden, and a
//! reset writes that captured value back unchanged.

use crate::furniture::FurnitureItem;
use plan_lite_structure::Rgb;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_COLOR_KEY: &str = "__default__";

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ColorOverride {
    #[default]
    Default,
    Custom(Rgb),
}

impl ColorOverride {
    /// `"__default__"` or `"#rrggbb"`
    pub fn key(&self) -> String {
        match self {
            ColorOverride::Default => DEFAULT_COLOR_KEY.to_string(),
            ColorOverride::Custom(color) => color.to_string(),
        }
    }
}

impl fmt::Display for ColorOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl From<ColorOverride> for String {
    fn from(value: ColorOverride) -> Self {
        value.key()
    }
}

impl TryFrom<String> for ColorOverride {
    type Error = plan_lite_structure::ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == DEFAULT_COLOR_KEY {
            Ok(ColorOverride::Default)
        } else {
            value.parse().map(ColorOverride::Custom)
        }
    }
}

/// Recolor the masked materials of `item`. Returns how many changed.
pub fn apply_color(item: &mut FurnitureItem, color: Rgb) -> usize {
    let mask = item.furniture_type.entry().recolor;
    if item.originals.len() < item.node.parts.len() {
        item.originals.resize(item.node.parts.len(), None);
    }
    let mut changed = 0;
    for (part, original) in item.node.parts.iter_mut().zip(item.originals.iter_mut()) {
        if !mask.matches(&part.material.name) {
            continue;
        }
        if original.is_none() {
            *original = Some(part.material.color);
        }
        part.material.color = color;
        changed += 1;
    }
    item.color_override = ColorOverride::Custom(color);
    changed
}

/// Restore every captured original color. Returns how many were restored.
pub fn reset_colors(item: &mut FurnitureItem) -> usize {
    let mut restored = 0;
    for (part, original) in item.node.parts.iter_mut().zip(item.originals.iter()) {
        if let Some(color) = original {
            part.material.color = *color;
            restored += 1;
        }
    }
    item.color_override = ColorOverride::Default;
    restored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FurnitureType;
    use nalgebra::Point3;
    use plan_lite_geometry::{Aabb, Mesh};
    use plan_lite_structure::{Material, MeshPart, SceneNode};

    fn chair() -> FurnitureItem {
        let part = |name: &str, material: &str, color: Rgb| {
            MeshPart::new(
                name,
                Mesh::cuboid(&Aabb::new(Point3::origin(), Point3::new(0.1, 0.1, 0.1))),
                Material::new(material, color),
            )
        };
        let node = SceneNode::new("chair")
            .with_part(part("seat", "Seat_Fabric", Rgb::new(0.8, 0.1, 0.1)))
            .with_part(part("leg_fl", "Chair_Leg", Rgb::new(0.123_456_7, 0.3, 0.9)))
            .with_part(part("leg_fr", "Chair_Leg", Rgb::new(0.2, 0.333_333_3, 0.7)));
        FurnitureItem::new(FurnitureType::Chair, node, Point3::origin())
    }

    #[test]
    fn test_override_respects_mask() {
        let mut item = chair();
        let seat_before = item.node.parts[0].material.color;
        assert_eq!(apply_color(&mut item, Rgb::new(0.0, 0.0, 0.0)), 2);
        assert!(item.node.parts[0].material.color.bits_eq(&seat_before));
        assert_eq!(item.color_override.key(), "#000000");
    }

    #[test]
    fn test_round_trip_is_bit_exact() {
        let mut item = chair();
        let before: Vec<Rgb> = item.node.parts.iter().map(|p| p.material.color).collect();
        apply_color(&mut item, "#ff8800".parse().unwrap());
        // Second override must not recapture the first override as original
        apply_color(&mut item, "#0088ff".parse().unwrap());
        assert_eq!(reset_colors(&mut item), 2);
        for (part, original) in item.node.parts.iter().zip(&before) {
            assert!(part.material.color.bits_eq(original));
        }
        assert_eq!(item.color_override, ColorOverride::Default);
    }

    #[test]
    fn test_override_key_serde() {
        let custom = ColorOverride::Custom("#102030".parse().unwrap());
        assert_eq!(serde_json::to_string(&custom).unwrap(), "\"#102030\"");
        let parsed: ColorOverride = serde_json::from_str("\"__default__\"").unwrap();
        assert_eq!(parsed, ColorOverride::Default);
        assert!(serde_json::from_str::<ColorOverride>("\"teal\"").is_err());
    }
}
