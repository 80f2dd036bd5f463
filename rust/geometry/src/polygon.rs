// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar polygon and segment helpers
//!
//! Polygons are ordered vertex lists that close implicitly (the last vertex
//! connects back to the first).

use nalgebra::{Point2, Vector2};

/// Even-odd ray-casting point-in-polygon test.
///
/// Points exactly on an edge may fall on either side; callers that need a
/// stable answer on the boundary should apply their own tolerance.
pub fn point_in_polygon(point: &Point2<f64>, polygon: &[Point2<f64>]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let pi = &polygon[i];
        let pj = &polygon[j];
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Signed polygon area using the shoelace formula.
///
/// Positive for counter-clockwise winding.
pub fn polygon_signed_area(polygon: &[Point2<f64>]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }

    let mut twice_area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        twice_area += polygon[i].x * polygon[j].y;
        twice_area -= polygon[j].x * polygon[i].y;
    }
    twice_area / 2.0
}

/// Axis-aligned bounds `(min, max)` of a point set, `None` when empty.
pub fn polygon_bounds<'a, I>(points: I) -> Option<(Point2<f64>, Point2<f64>)>
where
    I: IntoIterator<Item = &'a Point2<f64>>,
{
    let mut iter = points.into_iter();
    let first = iter.next()?;
    let mut min = *first;
    let mut max = *first;
    for p in iter {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    Some((min, max))
}

/// A directed planar segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2 {
    pub start: Point2<f64>,
    pub end: Point2<f64>,
}

impl Segment2 {
    pub fn new(start: Point2<f64>, end: Point2<f64>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Orientation angle in radians, measured from +X towards +Y.
    pub fn angle(&self) -> f64 {
        (self.end.y - self.start.y).atan2(self.end.x - self.start.x)
    }

    pub fn midpoint(&self) -> Point2<f64> {
        Point2::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }

    /// Unit direction, or zero for a degenerate segment.
    pub fn direction(&self) -> Vector2<f64> {
        let d = self.end - self.start;
        let len = d.norm();
        if len < 1e-12 {
            Vector2::zeros()
        } else {
            d / len
        }
    }

    /// Left-hand unit normal (direction rotated by +90 degrees).
    pub fn normal(&self) -> Vector2<f64> {
        let d = self.direction();
        Vector2::new(-d.y, d.x)
    }

    /// The segment shifted sideways by `distance` along its left normal.
    pub fn perpendicular_offset(&self, distance: f64) -> Segment2 {
        let offset = self.normal() * distance;
        Segment2::new(self.start + offset, self.end + offset)
    }

    /// Point at parameter `t` (0 = start, 1 = end).
    pub fn point_at(&self, t: f64) -> Point2<f64> {
        self.start + (self.end - self.start) * t
    }
}
