// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tunable parameters for procedural and static structure loading.
//!
//! The classification and opening thresholds are empirical. They are kept
//! here rather than in the builder so deployments can tune them per plan
//! style without touching code.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Configuration for the plan-to-structure builder
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BuilderConfig {
    /// Fraction of the plan's half-width/half-depth, measured inward from the
    /// outer boundary, inside which an edge midpoint counts as exterior
    pub exterior_band: f64,
    /// Absolute tolerance (m) for an edge to sit on the front boundary
    pub front_tolerance_abs: f64,
    /// Relative tolerance (fraction of plan depth) for the front boundary
    pub front_tolerance_rel: f64,
    /// Minimum length (m) of a front exterior edge that gets the entry door
    pub entry_door_min_length: f64,
    /// Minimum length (m) of an interior edge that gets a connecting door
    pub interior_door_min_length: f64,
    /// Minimum length (m) of an exterior edge that gets a window
    pub window_min_length: f64,
    pub door_width: f64,
    pub door_height: f64,
    /// Upper bound on window width (m)
    pub window_max_width: f64,
    /// Window width as a fraction of the edge length
    pub window_width_ratio: f64,
    /// Window height as a fraction of the ceiling height
    pub window_height_ratio: f64,
    /// Window head height as a fraction of the ceiling height
    pub window_head_ratio: f64,
    /// Minimum solid wall (m) left beside an opening; shorter edges stay solid
    pub opening_margin: f64,
    /// Edges shorter than this (m) are dropped before wall generation
    pub min_edge_length: f64,
    /// Door leaf / glazing thickness as a fraction of wall thickness
    pub inset_thickness_ratio: f64,
    /// Camera distance multiplier applied to the largest plan dimension
    pub framing_multiplier: f64,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            exterior_band: 0.15,
            front_tolerance_abs: 0.25,
            front_tolerance_rel: 0.05,
            entry_door_min_length: 1.6,
            interior_door_min_length: 1.4,
            window_min_length: 2.0,
            door_width: 0.9,
            door_height: 2.1,
            window_max_width: 1.8,
            window_width_ratio: 0.45,
            window_height_ratio: 0.45,
            window_head_ratio: 0.9,
            opening_margin: 0.4,
            min_edge_length: 1e-3,
            inset_thickness_ratio: 0.25,
            framing_multiplier: 2.2,
        }
    }
}

impl BuilderConfig {
    /// Load from JSON; missing keys keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Configuration for importing pre-built structure meshes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StaticLoaderConfig {
    /// Minimum vertical extent (m) of a wall/shell collider
    pub min_wall_height: f64,
    /// Perimeter band as a fraction of the model's half-extent
    pub perimeter_band: f64,
    /// Lower-case material-name fragments that mark walkable floors
    pub floor_keywords: Vec<String>,
}

impl Default for StaticLoaderConfig {
    fn default() -> Self {
        Self {
            min_wall_height: 0.5,
            perimeter_band: 0.2,
            floor_keywords: ["floor", "wood", "laminate", "parquet", "tile", "carpet"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BuilderConfig::from_json(r#"{ "exterior_band": 0.25 }"#).unwrap();
        assert_eq!(config.exterior_band, 0.25);
        assert_eq!(config.door_width, 0.9);
    }

    #[test]
    fn test_static_defaults() {
        let config = StaticLoaderConfig::default();
        assert!(config.floor_keywords.iter().any(|k| k == "laminate"));
        assert_eq!(config.min_wall_height, 0.5);
    }
}
