// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable view of the viewer for the surrounding UI

use crate::catalog::FurnitureType;
use crate::furniture::FurnitureItem;
use crate::interaction::InteractionState;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FurnitureSnapshot {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub furniture_type: FurnitureType,
    pub label: String,
    pub position: [f64; 3],
    pub rotation_radians: f64,
    /// `"__default__"` or `"#rrggbb"`
    pub color: String,
    pub unit_price: f64,
}

impl From<&FurnitureItem> for FurnitureSnapshot {
    fn from(item: &FurnitureItem) -> Self {
        let p = item.position();
        let entry = item.furniture_type.entry();
        Self {
            id: item.id,
            furniture_type: item.furniture_type,
            label: entry.label.to_string(),
            position: [p.x, p.y, p.z],
            rotation_radians: item.yaw(),
            color: item.color_override.key(),
            unit_price: entry.unit_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerSnapshot {
    /// In placement order
    pub items: Vec<FurnitureSnapshot>,
    pub selected_id: Option<Uuid>,
    pub interaction: InteractionState,
    pub active_type: Option<FurnitureType>,
}

impl ViewerSnapshot {
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(|i| i.unit_price).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
