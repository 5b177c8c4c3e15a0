// Circles and circular arcs (self-loop links).
// Angles are in degrees, measured from +x towards +y; on screen, where y
// grows downward, positive sweep runs clockwise.

use super::line::Line;
use super::tolerance::EPS_DENOM;
use super::vector::Vector2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vector2,
    pub radius: f64,
}

impl Circle {
    pub const fn new(center: Vector2, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn contains_point(&self, p: Vector2) -> bool {
        self.center.distance_to(p) <= self.radius
    }

    /// True when the segment passes through the disc.
    pub fn intersect_with_line(&self, line: &Line) -> bool {
        let (d2, _) = line.distance_sq_to_point(self.center);
        d2 <= self.radius * self.radius
    }

    /// Points where the segment crosses the circumference, in order along
    /// the segment.
    pub fn line_intersection_points(&self, line: &Line) -> Vec<Vector2> {
        let d = line.direction();
        let f = line.start - self.center;
        let a = d.dot(d);
        if a <= EPS_DENOM {
            return Vec::new();
        }
        let b = 2.0 * f.dot(d);
        let c = f.dot(f) - self.radius * self.radius;
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return Vec::new();
        }
        let sqrt = disc.sqrt();
        let mut out = Vec::with_capacity(2);
        for t in [(-b - sqrt) / (2.0 * a), (-b + sqrt) / (2.0 * a)] {
            if (0.0..=1.0).contains(&t) {
                let p = line.start + d * t;
                if out.last() != Some(&p) {
                    out.push(p);
                }
            }
        }
        out
    }

    pub fn point_at_angle(&self, degrees: f64) -> Vector2 {
        let (sin, cos) = degrees.to_radians().sin_cos();
        self.center + Vector2::new(cos, sin) * self.radius
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub circle: Circle,
    pub start_angle: f64,
    pub sweep_angle: f64,
}

impl Arc {
    pub fn new(center: Vector2, radius: f64, start_angle: f64, sweep_angle: f64) -> Self {
        Self { circle: Circle::new(center, radius), start_angle, sweep_angle }
    }

    pub fn start_point(&self) -> Vector2 {
        self.circle.point_at_angle(self.start_angle)
    }

    pub fn end_point(&self) -> Vector2 {
        self.circle.point_at_angle(self.start_angle + self.sweep_angle)
    }

    /// Unit tangent at the end of the arc, pointing along the sweep.
    pub fn end_tangent(&self) -> Vector2 {
        let (sin, cos) = (self.start_angle + self.sweep_angle).to_radians().sin_cos();
        let t = Vector2::new(-sin, cos);
        if self.sweep_angle < 0.0 { -t } else { t }
    }

    /// Whether the angle (degrees) at which `p` sits around the centre falls
    /// inside the swept range.
    pub fn covers_point(&self, p: Vector2) -> bool {
        let v = p - self.circle.center;
        let angle = v.y.atan2(v.x).to_degrees();
        let (lo, span) = if self.sweep_angle >= 0.0 {
            (self.start_angle, self.sweep_angle)
        } else {
            (self.start_angle + self.sweep_angle, -self.sweep_angle)
        };
        if span >= 360.0 {
            return true;
        }
        let rel = (angle - lo).rem_euclid(360.0);
        rel <= span
    }

    pub fn intersect_with_line(&self, line: &Line) -> bool {
        self.circle
            .line_intersection_points(line)
            .into_iter()
            .any(|p| self.covers_point(p))
    }
}
