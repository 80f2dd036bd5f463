// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room floor triangulation
//!
//! Floors keep exactly one vertex per polygon corner, so triangulation only
//! ever returns indices into the input ring.

use crate::{Error, Point2, Result};

/// Corner turn below this is treated as collinear
const TURN_EPSILON: f64 = 1e-10;

/// Turn direction at every corner agrees (collinear corners ignored)
fn turns_one_way(ring: &[Point2<f64>]) -> bool {
    let n = ring.len();
    let mut seen: Option<bool> = None;
    for i in 0..n {
        let (a, b, c) = (ring[i], ring[(i + 1) % n], ring[(i + 2) % n]);
        let turn = (b - a).perp(&(c - b));
        if turn.abs() <= TURN_EPSILON {
            continue;
        }
        let left = turn > 0.0;
        match seen {
            None => seen = Some(left),
            Some(prev) if prev != left => return false,
            Some(_) => {}
        }
    }
    true
}

/// Triangles `(0, i, i + 1)` around the first corner
fn fan(n: usize) -> Vec<usize> {
    (1..n - 1).flat_map(|i| [0, i, i + 1]).collect()
}

/// Triangulate a simple ring (no holes).
///
/// Convex rooms take a fan; anything else goes through earcut. Rings earcut
/// cannot fully cover (self-intersecting, zero area) fall back to a fan so
/// the caller still gets a well-formed index list.
pub fn triangulate_polygon(ring: &[Point2<f64>]) -> Result<Vec<usize>> {
    let n = ring.len();
    if n < 3 {
        return Err(Error::TriangulationError(format!(
            "ring has {} corners, need at least 3",
            n
        )));
    }
    if turns_one_way(ring) {
        return Ok(fan(n));
    }

    let flat: Vec<f64> = ring.iter().flat_map(|p| [p.x, p.y]).collect();
    let indices = earcutr::earcut(&flat, &[], 2)
        .map_err(|e| Error::TriangulationError(format!("earcut: {:?}", e)))?;

    if indices.len() < (n - 2) * 3 {
        return Ok(fan(n));
    }
    Ok(indices)
}
