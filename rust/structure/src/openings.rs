// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Opening placement and wall cutting
//!
//! Each wall segment is classified by proximity to the plan's outer extent,
//! gets at most one centered opening, and is then cut into solid pieces
//! around that opening.

use crate::config::BuilderConfig;
use crate::error::Result;
use crate::types::{Inset, InsetKind, Opening, OpeningKind, WallObject, WallPiece, WallPieceKind};
use nalgebra::Point2;
use plan_lite_geometry::{extrude_footprint, rectangle_footprint, Segment2};
use smallvec::SmallVec;

const EPS: f64 = 1e-6;

/// Half extents of the re-centered plan, used to classify edges
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanFrame {
    pub half_width: f64,
    pub half_depth: f64,
}

impl PlanFrame {
    pub fn new(width: f64, depth: f64) -> Self {
        Self {
            half_width: width / 2.0,
            half_depth: depth / 2.0,
        }
    }

    pub fn depth(&self) -> f64 {
        self.half_depth * 2.0
    }

    /// Midpoint within the exterior band of either horizontal extent
    pub fn is_exterior(&self, midpoint: &Point2<f64>, config: &BuilderConfig) -> bool {
        let gap_x = self.half_width - midpoint.x.abs();
        let gap_y = self.half_depth - midpoint.y.abs();
        gap_x <= config.exterior_band * self.half_width
            || gap_y <= config.exterior_band * self.half_depth
    }

    /// Midpoint on the minimum-depth side of the plan
    pub fn is_front(&self, midpoint: &Point2<f64>, config: &BuilderConfig) -> bool {
        let tolerance = config
            .front_tolerance_abs
            .max(config.front_tolerance_rel * self.depth());
        midpoint.y + self.half_depth <= tolerance
    }
}

/// Decide which opening, if any, a segment receives.
///
/// Precedence: front entry door, interior connecting door, exterior window.
pub fn decide_opening(
    segment: &Segment2,
    is_exterior: bool,
    is_front: bool,
    ceiling_height: f64,
    config: &BuilderConfig,
) -> Option<Opening> {
    let length = segment.length();

    let kind = if is_exterior && is_front && length > config.entry_door_min_length {
        OpeningKind::Door
    } else if !is_exterior && length > config.interior_door_min_length {
        OpeningKind::Door
    } else if is_exterior && length > config.window_min_length {
        OpeningKind::Window
    } else {
        return None;
    };

    let opening = size_opening(kind, length, ceiling_height, config);
    if length < opening.width + config.opening_margin {
        return None;
    }
    Some(opening)
}

fn size_opening(kind: OpeningKind, length: f64, ceiling: f64, config: &BuilderConfig) -> Opening {
    match kind {
        OpeningKind::Door => Opening {
            kind,
            position: 0.5,
            width: config.door_width,
            // Leave at least a sliver of header under low ceilings
            height: config.door_height.min(ceiling * 0.95),
            sill_height: 0.0,
        },
        OpeningKind::Window => {
            let height = config.window_height_ratio * ceiling;
            let head = config.window_head_ratio * ceiling;
            Opening {
                kind,
                position: 0.5,
                width: config.window_max_width.min(config.window_width_ratio * length),
                height,
                sill_height: (head - height).max(0.0),
            }
        }
    }
}

/// Cut a segment into solid pieces around its opening.
///
/// Without an opening the whole segment is one solid piece. With one, up to
/// four pieces remain: piers either side, a header above and, for windows, a
/// sill below. The opening itself gets a thin inset panel.
pub fn cut_wall(
    segment_index: usize,
    segment: &Segment2,
    opening: Option<&Opening>,
    thickness: f64,
    ceiling: f64,
    config: &BuilderConfig,
) -> Result<WallObject> {
    let length = segment.length();
    let mut pieces: SmallVec<[WallPiece; 4]> = SmallVec::new();

    let Some(opening) = opening else {
        pieces.push(wall_piece(WallPieceKind::Solid, segment, 0.0, length, 0.0, ceiling, thickness)?);
        return Ok(WallObject {
            segment_index,
            pieces,
            inset: None,
        });
    };

    let center = opening.position * length;
    let s0 = (center - opening.width / 2.0).max(0.0);
    let s1 = (center + opening.width / 2.0).min(length);
    let bottom = opening.sill_height;
    let top = (opening.sill_height + opening.height).min(ceiling);

    if s0 > EPS {
        pieces.push(wall_piece(WallPieceKind::LeftPier, segment, 0.0, s0, 0.0, ceiling, thickness)?);
    }
    if length - s1 > EPS {
        pieces.push(wall_piece(WallPieceKind::RightPier, segment, s1, length, 0.0, ceiling, thickness)?);
    }
    if ceiling - top > EPS {
        pieces.push(wall_piece(WallPieceKind::Header, segment, s0, s1, top, ceiling, thickness)?);
    }
    if bottom > EPS {
        pieces.push(wall_piece(WallPieceKind::Sill, segment, s0, s1, 0.0, bottom, thickness)?);
    }

    let inset_kind = match opening.kind {
        OpeningKind::Door => InsetKind::DoorLeaf,
        OpeningKind::Window => InsetKind::Glazing,
    };
    let inset = if top - bottom > EPS && s1 - s0 > EPS {
        let panel = wall_piece(
            WallPieceKind::Solid,
            segment,
            s0,
            s1,
            bottom,
            top,
            thickness * config.inset_thickness_ratio,
        )?;
        Some(Inset {
            kind: inset_kind,
            mesh: panel.mesh,
        })
    } else {
        None
    };

    Ok(WallObject {
        segment_index,
        pieces,
        inset,
    })
}

/// Box spanning `[s0, s1]` along the segment and `[y0, y1]` vertically
fn wall_piece(
    kind: WallPieceKind,
    segment: &Segment2,
    s0: f64,
    s1: f64,
    y0: f64,
    y1: f64,
    thickness: f64,
) -> Result<WallPiece> {
    let length = segment.length();
    let t = if length > 0.0 { (s0 + s1) / 2.0 / length } else { 0.5 };
    let footprint = rectangle_footprint(segment.point_at(t), s1 - s0, thickness, segment.angle());
    let mesh = extrude_footprint(&footprint, y0, y1 - y0)?;
    let bounds = mesh.bounds();
    Ok(WallPiece { kind, mesh, bounds })
}
