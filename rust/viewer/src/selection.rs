// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Selection highlight outline

use nalgebra::Point3;
use plan_lite_geometry::Aabb;

/// Corner index pairs of the 12 box edges, matching `Aabb::corners`
#[rustfmt::skip]
const EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// Single outline box around the selected object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionHighlight {
    outline: Option<Aabb>,
}

impl SelectionHighlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute around `bounds`, grown by `padding`
    pub fn update(&mut self, bounds: &Aabb, padding: f64) {
        self.outline = if bounds.is_empty() {
            None
        } else {
            Some(bounds.expanded(padding))
        };
    }

    pub fn clear(&mut self) {
        self.outline = None;
    }

    pub fn outline(&self) -> Option<&Aabb> {
        self.outline.as_ref()
    }

    /// Line segments for drawing the outline
    pub fn edges(&self) -> Vec<[Point3<f64>; 2]> {
        let Some(outline) = &self.outline else {
            return Vec::new();
        };
        let c = outline.corners();
        EDGES.iter().map(|&(a, b)| [c[a], c[b]]).collect()
    }
}
