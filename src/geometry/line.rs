// Line segments and segment-segment intersection.
// Collinear segments are reported as non-intersecting: a link lying along a
// node edge has no single crossing point to anchor an arrow on.

use super::tolerance::{clamp01, EPS_DENOM};
use super::vector::Vector2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Vector2,
    pub end: Vector2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

#[inline]
fn orient(p: Vector2, q: Vector2, r: Vector2) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if val == 0.0 {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

// q lies within the bounding box of p..r
#[inline]
fn on_segment(p: Vector2, q: Vector2, r: Vector2) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

impl Line {
    pub const fn new(start: Vector2, end: Vector2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.direction().magnitude()
    }

    pub fn direction(&self) -> Vector2 {
        self.end - self.start
    }

    pub fn midpoint(&self) -> Vector2 {
        (self.start + self.end) / 2.0
    }

    pub fn translate(&self, d: Vector2) -> Line {
        Line::new(self.start + d, self.end + d)
    }

    /// Cross product of the two direction vectors.
    pub fn cross(&self, other: &Line) -> f64 {
        self.direction().cross(other.direction())
    }

    pub fn is_parallel(&self, other: &Line) -> bool {
        self.cross(other) == 0.0
    }

    pub fn is_collinear(&self, other: &Line) -> bool {
        self.is_parallel(other) && (self.start - other.start).cross(self.direction()) == 0.0
    }

    pub fn is_intersecting(&self, other: &Line) -> bool {
        if self.is_collinear(other) {
            return false;
        }
        let o1 = orient(self.start, self.end, other.start);
        let o2 = orient(self.start, self.end, other.end);
        let o3 = orient(other.start, other.end, self.start);
        let o4 = orient(other.start, other.end, self.end);

        if o1 != o2 && o3 != o4 {
            return true;
        }
        (o1 == Orientation::Collinear && on_segment(self.start, other.start, self.end))
            || (o2 == Orientation::Collinear && on_segment(self.start, other.end, self.end))
            || (o3 == Orientation::Collinear && on_segment(other.start, self.start, other.end))
            || (o4 == Orientation::Collinear && on_segment(other.start, self.end, other.end))
    }

    /// Crossing point of two segments, `None` when they miss each other or
    /// are parallel/degenerate.
    pub fn get_intersection(&self, other: &Line) -> Option<Vector2> {
        if !self.is_intersecting(other) {
            return None;
        }
        let (x1, y1, x2, y2) = (self.start.x, self.start.y, self.end.x, self.end.y);
        let (x3, y3, x4, y4) = (other.start.x, other.start.y, other.end.x, other.end.y);

        let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
        if denom.abs() <= EPS_DENOM {
            return None;
        }
        let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denom;
        let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / denom;
        if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
            return None;
        }
        Some(Vector2::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
    }

    /// Squared distance from `p` to the segment and the clamped parameter of
    /// the closest point.
    pub fn distance_sq_to_point(&self, p: Vector2) -> (f64, f64) {
        let v = self.direction();
        let w = p - self.start;
        let vv = v.dot(v);
        let t = if vv > 0.0 { clamp01(w.dot(v) / vv) } else { 0.0 };
        let proj = self.start + v * t;
        let d = p - proj;
        (d.dot(d), t)
    }
}
