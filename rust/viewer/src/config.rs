// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Viewer configuration

use crate::error::Result;
use plan_lite_structure::{BuilderConfig, StaticLoaderConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerConfig {
    /// Initial canvas size in pixels
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Max pointer travel (px) between down and up that still counts as a click
    pub click_tolerance_px: f64,
    /// Yaw applied by the rotate keys
    pub rotation_step_degrees: f64,
    /// Opacity of the placement preview
    pub preview_opacity: f32,
    /// Gap (m) between the selected object and its highlight outline
    pub highlight_padding: f64,
    pub builder: BuilderConfig,
    pub static_loader: StaticLoaderConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            click_tolerance_px: 5.0,
            rotation_step_degrees: 15.0,
            preview_opacity: 0.45,
            highlight_padding: 0.02,
            builder: BuilderConfig::default(),
            static_loader: StaticLoaderConfig::default(),
        }
    }
}

impl ViewerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
