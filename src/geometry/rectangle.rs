//! Axis-aligned rectangles: node bodies, label boxes and selection frames.

use super::line::Line;
use super::tolerance::scaled_eps;
use super::vector::Vector2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub location_left_top: Vector2,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    /// Negative sizes are flipped onto the origin so `width` and `height`
    /// are never negative afterwards.
    pub fn new(location_left_top: Vector2, width: f64, height: f64) -> Self {
        let mut location = location_left_top;
        if width < 0.0 {
            location.x += width;
        }
        if height < 0.0 {
            location.y += height;
        }
        Self {
            location_left_top: location,
            width: width.abs(),
            height: height.abs(),
        }
    }

    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(Vector2::new(left, top), right - left, bottom - top)
    }

    /// Box spanned by two arbitrary corners (drag-selection frames).
    pub fn from_two_points(p1: Vector2, p2: Vector2) -> Self {
        Self::from_edges(p1.x.min(p2.x), p1.y.min(p2.y), p1.x.max(p2.x), p1.y.max(p2.y))
    }

    /// Rectangle of the given size centred on `center`.
    pub fn from_center(center: Vector2, width: f64, height: f64) -> Self {
        Self::new(center - Vector2::new(width / 2.0, height / 2.0), width, height)
    }

    pub fn get_bounding_rectangle(rectangles: &[Rectangle]) -> Option<Rectangle> {
        let first = rectangles.first()?;
        let (mut l, mut t, mut r, mut b) = (first.left(), first.top(), first.right(), first.bottom());
        for rect in &rectangles[1..] {
            l = l.min(rect.left());
            t = t.min(rect.top());
            r = r.max(rect.right());
            b = b.max(rect.bottom());
        }
        Some(Rectangle::from_edges(l, t, r, b))
    }

    pub fn left(&self) -> f64 {
        self.location_left_top.x
    }
    pub fn right(&self) -> f64 {
        self.location_left_top.x + self.width
    }
    pub fn top(&self) -> f64 {
        self.location_left_top.y
    }
    pub fn bottom(&self) -> f64 {
        self.location_left_top.y + self.height
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(self.left() + self.width / 2.0, self.top() + self.height / 2.0)
    }
    pub fn left_center(&self) -> Vector2 {
        Vector2::new(self.left(), self.center().y)
    }
    pub fn right_center(&self) -> Vector2 {
        Vector2::new(self.right(), self.center().y)
    }
    pub fn top_center(&self) -> Vector2 {
        Vector2::new(self.center().x, self.top())
    }
    pub fn bottom_center(&self) -> Vector2 {
        Vector2::new(self.center().x, self.bottom())
    }
    pub fn left_top(&self) -> Vector2 {
        self.location_left_top
    }
    pub fn right_top(&self) -> Vector2 {
        Vector2::new(self.right(), self.top())
    }
    pub fn left_bottom(&self) -> Vector2 {
        Vector2::new(self.left(), self.bottom())
    }
    pub fn right_bottom(&self) -> Vector2 {
        Vector2::new(self.right(), self.bottom())
    }

    /// Corners clockwise on screen, starting at the top-left.
    pub fn get_four_points(&self) -> [Vector2; 4] {
        [self.left_top(), self.right_top(), self.right_bottom(), self.left_bottom()]
    }

    /// Edges in hit-test order: top, bottom, left, right.
    pub fn edges(&self) -> [Line; 4] {
        [
            Line::new(self.left_top(), self.right_top()),
            Line::new(self.left_bottom(), self.right_bottom()),
            Line::new(self.left_top(), self.left_bottom()),
            Line::new(self.right_top(), self.right_bottom()),
        ]
    }

    pub fn translate(&self, d: Vector2) -> Rectangle {
        Rectangle {
            location_left_top: self.location_left_top + d,
            ..*self
        }
    }

    pub fn expand_from_center(&self, delta_x: f64, delta_y: f64) -> Rectangle {
        Rectangle::new(
            self.location_left_top - Vector2::new(delta_x, delta_y),
            self.width + 2.0 * delta_x,
            self.height + 2.0 * delta_y,
        )
    }

    /// True when the gap between the two rectangles is smaller than
    /// `margin`; with `margin == 0` this is a strict overlap test and
    /// rectangles that merely touch do not collide.
    pub fn is_collision(&self, rect: &Rectangle, margin: f64) -> bool {
        let collision_x = self.right() - rect.left() > -margin && rect.right() - self.left() > -margin;
        let collision_y = self.bottom() - rect.top() > -margin && rect.bottom() - self.top() > -margin;
        collision_x && collision_y
    }

    pub fn is_contain(&self, rect: &Rectangle) -> bool {
        self.left() <= rect.left()
            && self.right() >= rect.right()
            && self.top() <= rect.top()
            && self.bottom() >= rect.bottom()
    }

    pub fn is_contain_point(&self, point: Vector2) -> bool {
        self.left() <= point.x && point.x <= self.right() && self.top() <= point.y && point.y <= self.bottom()
    }

    pub fn is_intersect_with_line(&self, line: &Line) -> bool {
        self.edges().iter().any(|edge| edge.is_intersecting(line))
    }

    /// First crossing of `line` with the boundary (edges tested top, bottom,
    /// left, right). Falls back to the centre when nothing is hit, which is
    /// the case for zero-size shapes and segments that stay inside.
    pub fn get_line_intersection_point(&self, line: &Line) -> Vector2 {
        self.edges()
            .iter()
            .find_map(|edge| edge.get_intersection(line))
            .unwrap_or_else(|| self.center())
    }

    /// Outward unit normal of the edge `point` lies on; zero when the point is
    /// off the boundary.
    pub fn get_normal_from_center_to_edge(&self, point: Vector2) -> Vector2 {
        let eps_x = scaled_eps(self.left(), self.right());
        let eps_y = scaled_eps(self.top(), self.bottom());
        if point.x < self.left() - eps_x
            || point.x > self.right() + eps_x
            || point.y < self.top() - eps_y
            || point.y > self.bottom() + eps_y
        {
            return Vector2::ZERO;
        }
        if (point.x - self.left()).abs() <= eps_x {
            Vector2::new(-1.0, 0.0)
        } else if (point.x - self.right()).abs() <= eps_x {
            Vector2::new(1.0, 0.0)
        } else if (point.y - self.top()).abs() <= eps_y {
            Vector2::new(0.0, -1.0)
        } else if (point.y - self.bottom()).abs() <= eps_y {
            Vector2::new(0.0, 1.0)
        } else {
            Vector2::ZERO
        }
    }

    pub fn is_finite(&self) -> bool {
        self.location_left_top.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}
